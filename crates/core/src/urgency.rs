//! Urgency decision ladder.
//!
//! Emergency is checked first and always wins, whether triggered by a symptom or by the caller
//! declaring `severe`. `self-care` is only reached when every symptom is recognised and low
//! severity.

use crate::constants::{EMERGENCY_SYMPTOMS, URGENT_SYMPTOMS};
use crate::types::{DeclaredSeverity, NormalizedSymptom, SeverityClass, UrgencyLevel};

pub fn classify_urgency(
    symptoms: &[NormalizedSymptom],
    declared: Option<DeclaredSeverity>,
) -> UrgencyLevel {
    let labels: Vec<String> = symptoms.iter().map(NormalizedSymptom::label_key).collect();
    let any_in = |set: &[&str]| labels.iter().any(|label| set.contains(&label.as_str()));

    if declared == Some(DeclaredSeverity::Severe) || any_in(EMERGENCY_SYMPTOMS) {
        return UrgencyLevel::Emergency;
    }

    if any_in(URGENT_SYMPTOMS) {
        return UrgencyLevel::Urgent;
    }

    let all_minor = !symptoms.is_empty()
        && symptoms
            .iter()
            .all(|s| s.is_recognised() && s.severity == SeverityClass::Low);
    let declared_minor = matches!(declared, None | Some(DeclaredSeverity::Mild));

    if all_minor && declared_minor {
        UrgencyLevel::SelfCare
    } else {
        UrgencyLevel::Routine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;
    use crate::normalizer::normalize_symptoms;

    fn urgency_for(symptoms: &[&str], declared: Option<DeclaredSeverity>) -> UrgencyLevel {
        let raw: Vec<String> = symptoms.iter().map(|s| s.to_string()).collect();
        let normalized = normalize_symptoms(&KnowledgeBase::builtin(), &raw, None);
        classify_urgency(&normalized, declared)
    }

    #[test]
    fn chest_pain_is_emergency_regardless_of_declared_severity() {
        for declared in [
            None,
            Some(DeclaredSeverity::Mild),
            Some(DeclaredSeverity::Moderate),
            Some(DeclaredSeverity::Severe),
        ] {
            assert_eq!(
                urgency_for(&["  Chest PAIN "], declared),
                UrgencyLevel::Emergency
            );
        }
    }

    #[test]
    fn declared_severe_forces_emergency() {
        assert_eq!(
            urgency_for(&["rash"], Some(DeclaredSeverity::Severe)),
            UrgencyLevel::Emergency
        );
    }

    #[test]
    fn unrecognised_emergency_label_still_escalates() {
        assert_eq!(
            urgency_for(&["Difficulty Breathing"], None),
            UrgencyLevel::Emergency
        );
    }

    #[test]
    fn emergency_outranks_urgent() {
        assert_eq!(
            urgency_for(&["fever", "confusion"], None),
            UrgencyLevel::Emergency
        );
    }

    #[test]
    fn fever_is_urgent() {
        assert_eq!(urgency_for(&["fever"], None), UrgencyLevel::Urgent);
        assert_eq!(
            urgency_for(&["persistent cough"], Some(DeclaredSeverity::Mild)),
            UrgencyLevel::Urgent
        );
    }

    #[test]
    fn medium_severity_symptom_is_routine() {
        assert_eq!(urgency_for(&["headache"], None), UrgencyLevel::Routine);
    }

    #[test]
    fn unknown_symptom_is_routine() {
        assert_eq!(
            urgency_for(&["purple aura sensation"], None),
            UrgencyLevel::Routine
        );
    }

    #[test]
    fn all_recognised_low_severity_is_self_care() {
        assert_eq!(
            urgency_for(&["cough", "runny nose"], None),
            UrgencyLevel::SelfCare
        );
        assert_eq!(
            urgency_for(&["sore throat"], Some(DeclaredSeverity::Mild)),
            UrgencyLevel::SelfCare
        );
    }

    #[test]
    fn moderate_declaration_or_unknown_symptom_blocks_self_care() {
        assert_eq!(
            urgency_for(&["cough"], Some(DeclaredSeverity::Moderate)),
            UrgencyLevel::Routine
        );
        assert_eq!(
            urgency_for(&["cough", "odd tingling"], None),
            UrgencyLevel::Routine
        );
    }
}
