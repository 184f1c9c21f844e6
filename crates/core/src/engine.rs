//! The triage engine: a pure function from request to result over injected tables.

use std::sync::Arc;

use crate::confidence::estimate_confidence;
use crate::knowledge::{KnowledgeBase, RedFlagTable};
use crate::matcher::rank_conditions;
use crate::normalizer::normalize_symptoms;
use crate::recommendations::{collect_red_flags, recommendation_for};
use crate::types::{AnalysisResult, SymptomRequest};
use crate::urgency::classify_urgency;

/// Stateless analyser over read-only knowledge tables.
///
/// Cloning is cheap and clones share the same tables, so one engine can serve any number of
/// concurrent callers.
#[derive(Clone, Debug)]
pub struct TriageEngine {
    knowledge: Arc<KnowledgeBase>,
    red_flags: Arc<RedFlagTable>,
}

impl TriageEngine {
    pub fn new(knowledge: Arc<KnowledgeBase>, red_flags: Arc<RedFlagTable>) -> Self {
        Self {
            knowledge,
            red_flags,
        }
    }

    /// An engine over the built-in tables.
    pub fn builtin() -> Self {
        Self::new(
            Arc::new(KnowledgeBase::builtin()),
            Arc::new(RedFlagTable::builtin()),
        )
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Analyses a request.
    ///
    /// Never fails: unrecognised text lowers confidence and contributes no candidates. Requests
    /// are expected to have passed [`crate::validation::validate_request`]; an empty symptom list
    /// simply yields an empty analysis.
    pub fn analyze(&self, request: &SymptomRequest) -> AnalysisResult {
        let normalized =
            normalize_symptoms(&self.knowledge, &request.symptoms, request.duration.as_deref());

        let urgency = classify_urgency(&normalized, request.severity);
        let confidence = estimate_confidence(&self.knowledge, request);
        let conditions = rank_conditions(&self.knowledge, &normalized, &request.symptoms);

        let recommendations = vec![recommendation_for(urgency)];
        let red_flags = collect_red_flags(&self.red_flags, &normalized);

        tracing::debug!(
            symptoms = normalized.len(),
            %urgency,
            confidence,
            conditions = conditions.len(),
            red_flags = red_flags.len(),
            "triage analysis complete"
        );

        AnalysisResult {
            normalized_symptoms: normalized,
            urgency,
            confidence,
            conditions,
            recommendations,
            red_flags,
        }
    }
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::builtin()
    }
}
