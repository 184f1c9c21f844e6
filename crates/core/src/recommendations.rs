//! Care recommendations and red-flag warnings.

use crate::knowledge::RedFlagTable;
use crate::types::{
    NormalizedSymptom, Recommendation, RecommendationType, RedFlagWarning, UrgencyLevel,
};

/// The single care recommendation for an urgency level.
pub fn recommendation_for(urgency: UrgencyLevel) -> Recommendation {
    let (kind, action, description, escalation) = match urgency {
        UrgencyLevel::Emergency => (
            RecommendationType::Immediate,
            "Call emergency services now",
            "Your symptoms may indicate a serious condition that needs immediate medical attention.",
            "Do not wait for symptoms to improve. If you are alone, call for help before anything else.",
        ),
        UrgencyLevel::Urgent => (
            RecommendationType::Urgent,
            "Contact a healthcare provider within 24 hours",
            "Your symptoms should be assessed by a clinician soon.",
            "Go to emergency care if symptoms worsen or new warning signs appear before you are seen.",
        ),
        UrgencyLevel::Routine => (
            RecommendationType::Routine,
            "Schedule a routine appointment within the next few days",
            "Your symptoms are worth discussing with a healthcare provider at your next convenience.",
            "Seek care sooner if symptoms get worse or do not improve.",
        ),
        UrgencyLevel::SelfCare => (
            RecommendationType::SelfCare,
            "Manage symptoms at home",
            "Rest, fluids and over-the-counter remedies are usually enough for these symptoms.",
            "Contact a healthcare provider if symptoms persist beyond a week or get worse.",
        ),
    };

    Recommendation {
        kind,
        action: action.to_string(),
        description: description.to_string(),
        escalation: escalation.to_string(),
    }
}

/// Red-flag warnings for each normalised symptom whose standardised label has a rule.
pub fn collect_red_flags(
    red_flags: &RedFlagTable,
    symptoms: &[NormalizedSymptom],
) -> Vec<RedFlagWarning> {
    symptoms
        .iter()
        .filter_map(|symptom| {
            red_flags.get(&symptom.standardized).map(|rule| RedFlagWarning {
                symptom: symptom.standardized.clone(),
                warning: rule.warning.clone(),
                recommendation: rule.recommendation.clone(),
            })
        })
        .collect()
}
