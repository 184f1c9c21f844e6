//! Maps raw symptom text onto knowledge-base entries.

use crate::knowledge::KnowledgeBase;
use crate::types::{NormalizedSymptom, SeverityClass};

/// Normalises each raw symptom against the knowledge base.
///
/// Recognised text takes the entry's label and severity; anything else passes through verbatim
/// with `medium` severity. The request duration is carried onto every symptom unchanged.
pub fn normalize_symptoms(
    knowledge: &KnowledgeBase,
    raw_symptoms: &[String],
    duration: Option<&str>,
) -> Vec<NormalizedSymptom> {
    raw_symptoms
        .iter()
        .map(|raw| match knowledge.resolve(raw) {
            Some(entry) => NormalizedSymptom {
                original: raw.clone(),
                standardized: entry.label.clone(),
                severity: entry.severity,
                duration: duration.map(str::to_string),
                key: Some(entry.key.clone()),
            },
            None => NormalizedSymptom {
                original: raw.clone(),
                standardized: raw.clone(),
                severity: SeverityClass::default(),
                duration: duration.map(str::to_string),
                key: None,
            },
        })
        .collect()
}
