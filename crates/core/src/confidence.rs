//! Confidence heuristic.

use crate::constants::{
    BASELINE_CONFIDENCE, DURATION_BONUS, HISTORY_BONUS, MAX_CONFIDENCE, RECOGNISED_SYMPTOM_BONUS,
};
use crate::knowledge::KnowledgeBase;
use crate::types::SymptomRequest;

/// Scores how much of the request was understood and how much context came with it.
///
/// Recognition is re-checked against the raw input text. The result never drops below the
/// baseline and never exceeds [`MAX_CONFIDENCE`].
pub fn estimate_confidence(knowledge: &KnowledgeBase, request: &SymptomRequest) -> f64 {
    let recognised = request
        .symptoms
        .iter()
        .filter(|raw| knowledge.resolve(raw).is_some())
        .count();

    let mut confidence = BASELINE_CONFIDENCE + RECOGNISED_SYMPTOM_BONUS * recognised as f64;
    if request.duration().is_some() {
        confidence += DURATION_BONUS;
    }
    if request.has_history() {
        confidence += HISTORY_BONUS;
    }

    confidence.min(MAX_CONFIDENCE)
}
