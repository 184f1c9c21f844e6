//! Condition matching and ranking.
//!
//! Two scores are kept per condition. The raw match count orders the list; the prior discounted
//! by `count / typical_symptoms.len()` is what gets reported as probability.

use std::collections::HashMap;

use crate::constants::{MAX_CONDITION_CANDIDATES, MAX_CONDITION_PROBABILITY};
use crate::knowledge::{KnowledgeBase, RelatedCondition};
use crate::types::{ConditionCandidate, NormalizedSymptom};

struct Tally<'a> {
    condition: &'a RelatedCondition,
    matches: usize,
}

/// Ranks conditions reachable from the recognised symptoms.
///
/// `raw_symptoms` is the full input set that typical symptoms are checked against; each
/// recognised symptom contributes the full overlap count to every condition it reaches, so a
/// condition reachable from several inputs accumulates from each.
pub fn rank_conditions(
    knowledge: &KnowledgeBase,
    normalized: &[NormalizedSymptom],
    raw_symptoms: &[String],
) -> Vec<ConditionCandidate> {
    let inputs: Vec<(String, &String)> = raw_symptoms
        .iter()
        .map(|raw| (raw.trim().to_lowercase(), raw))
        .filter(|(lower, _)| !lower.is_empty())
        .collect();

    let mut order: Vec<&str> = Vec::new();
    let mut tallies: HashMap<&str, Tally<'_>> = HashMap::new();

    for entry in normalized
        .iter()
        .filter_map(|symptom| symptom.key.as_ref())
        .filter_map(|key| knowledge.get(key))
    {
        for condition in &entry.conditions {
            let matches = condition
                .typical_symptoms
                .iter()
                .filter(|typical| inputs.iter().any(|(input, _)| overlaps(typical, input)))
                .count();

            tallies
                .entry(condition.name.as_str())
                .or_insert_with(|| {
                    order.push(condition.name.as_str());
                    Tally {
                        condition,
                        matches: 0,
                    }
                })
                .matches += matches;
        }
    }

    let mut ranked: Vec<&Tally<'_>> = order.iter().map(|name| &tallies[name]).collect();
    // Stable: equal counts keep first-seen order.
    ranked.sort_by(|a, b| b.matches.cmp(&a.matches));

    ranked
        .into_iter()
        .take(MAX_CONDITION_CANDIDATES)
        .map(|tally| to_candidate(tally, &inputs))
        .collect()
}

fn to_candidate(tally: &Tally<'_>, inputs: &[(String, &String)]) -> ConditionCandidate {
    let condition = tally.condition;
    let coverage = tally.matches as f64 / condition.typical_symptoms.len() as f64;
    let probability = (condition.probability * coverage).clamp(0.0, MAX_CONDITION_PROBABILITY);

    let mut matched_symptoms: Vec<String> = Vec::new();
    for (input, original) in inputs {
        let hit = condition
            .typical_symptoms
            .iter()
            .any(|typical| overlaps(typical, input));
        if hit && !matched_symptoms.contains(original) {
            matched_symptoms.push((*original).clone());
        }
    }

    ConditionCandidate {
        name: condition.name.clone(),
        code: condition.code.clone(),
        probability,
        description: condition.description.clone(),
        typical_symptoms: condition.typical_symptoms.clone(),
        matched_symptoms,
        match_count: tally.matches,
        red_flags: condition.red_flags.clone(),
    }
}

fn overlaps(typical: &str, input: &str) -> bool {
    let typical = typical.to_lowercase();
    typical.contains(input) || input.contains(typical.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeEntry;
    use crate::normalizer::normalize_symptoms;
    use crate::types::SeverityClass;
    use triage_types::SymptomKey;

    fn rank(symptoms: &[&str]) -> Vec<ConditionCandidate> {
        let kb = KnowledgeBase::builtin();
        let raw: Vec<String> = symptoms.iter().map(|s| s.to_string()).collect();
        let normalized = normalize_symptoms(&kb, &raw, None);
        rank_conditions(&kb, &normalized, &raw)
    }

    fn names(candidates: &[ConditionCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn chest_pain_suggests_cardiac_conditions() {
        let candidates = rank(&["chest pain"]);
        let names = names(&candidates);
        assert!(names.contains(&"Myocardial Infarction"));
        assert!(names.contains(&"Angina"));
        assert!(candidates.iter().all(|c| c.probability > 0.0));
    }

    #[test]
    fn probability_is_prior_discounted_by_coverage() {
        let candidates = rank(&["chest pain"]);
        let angina = candidates
            .iter()
            .find(|c| c.name == "Angina")
            .expect("angina ranked");
        assert!((angina.probability - 0.25 / 3.0).abs() < 1e-9);
        assert_eq!(angina.matched_symptoms, vec!["chest pain".to_string()]);
    }

    #[test]
    fn lone_headache_ranks_tension_headache_first() {
        let candidates = rank(&["headache"]);
        assert_eq!(candidates[0].name, "Tension Headache");
        assert_eq!(candidates[0].code, "G44.209");
    }

    #[test]
    fn co_occurring_symptoms_reorder_by_match_count() {
        let candidates = rank(&["headache", "nausea", "sensitivity to light"]);
        assert_eq!(candidates[0].name, "Migraine");
        assert_eq!(
            candidates[0].matched_symptoms,
            vec![
                "headache".to_string(),
                "nausea".to_string(),
                "sensitivity to light".to_string()
            ]
        );
    }

    #[test]
    fn candidates_are_capped_and_sorted_by_match_count() {
        let candidates = rank(&[
            "chest pain",
            "shortness of breath",
            "fever",
            "cough",
            "fatigue",
        ]);
        assert_eq!(candidates.len(), MAX_CONDITION_CANDIDATES);
        assert!(candidates
            .windows(2)
            .all(|w| w[0].match_count >= w[1].match_count));
    }

    #[test]
    fn conditions_reached_twice_accumulate_matches() {
        let candidates = rank(&["chest pain", "shortness of breath", "fatigue"]);
        assert_eq!(candidates[0].name, "Angina");
        assert_eq!(candidates[0].match_count, 6);
        assert!((candidates[0].probability - 0.5).abs() < 1e-9);
    }

    #[test]
    fn probability_is_clamped_below_certainty() {
        let entry = |key: &str| KnowledgeEntry {
            key: SymptomKey::new(key).expect("key"),
            label: key.to_string(),
            severity: SeverityClass::Medium,
            conditions: vec![RelatedCondition {
                name: "Shared".into(),
                code: "X00".into(),
                probability: 0.9,
                description: "Reached from both symptoms.".into(),
                typical_symptoms: vec!["alpha".into()],
                red_flags: vec!["none".into()],
            }],
        };
        let kb = KnowledgeBase::new(vec![entry("alpha"), entry("beta")]).expect("valid kb");
        let raw = vec!["alpha".to_string(), "beta".to_string()];
        let normalized = normalize_symptoms(&kb, &raw, None);

        let candidates = rank_conditions(&kb, &normalized, &raw);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].match_count, 2);
        assert_eq!(candidates[0].probability, MAX_CONDITION_PROBABILITY);
    }

    #[test]
    fn reached_condition_without_overlap_keeps_zero_probability() {
        let kb = KnowledgeBase::new(vec![KnowledgeEntry {
            key: SymptomKey::new("alpha").expect("key"),
            label: "Alpha".into(),
            severity: SeverityClass::Low,
            conditions: vec![RelatedCondition {
                name: "Unrelated".into(),
                code: "X01".into(),
                probability: 0.6,
                description: "Typical symptoms never named by the patient.".into(),
                typical_symptoms: vec!["gamma".into()],
                red_flags: vec!["none".into()],
            }],
        }])
        .expect("valid kb");
        let raw = vec!["alpha".to_string()];
        let normalized = normalize_symptoms(&kb, &raw, None);

        let candidates = rank_conditions(&kb, &normalized, &raw);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Unrelated");
        assert_eq!(candidates[0].match_count, 0);
        assert_eq!(candidates[0].probability, 0.0);
        assert!(candidates[0].matched_symptoms.is_empty());
    }

    #[test]
    fn unrecognised_symptoms_yield_no_candidates() {
        assert!(rank(&["purple aura sensation"]).is_empty());
    }
}
