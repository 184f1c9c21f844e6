//! # Triage Core
//!
//! Core business logic for the symptom triage engine.
//!
//! This crate turns a set of patient-reported symptoms into:
//! - an urgency level (`emergency`, `urgent`, `routine`, `self-care`)
//! - a confidence score
//! - ranked condition candidates
//! - a care recommendation and any red-flag warnings
//!
//! Analysis is deterministic rule matching over read-only knowledge tables. It is not a
//! diagnostic system and makes no claim of clinical accuracy.
//!
//! **No API concerns**: HTTP servers, wire formats, and CLIs belong in `api-rest`, `api-shared`,
//! and `triage-cli`.

pub mod config;
pub mod confidence;
pub mod constants;
pub mod engine;
pub mod error;
pub mod knowledge;
pub mod matcher;
pub mod normalizer;
pub mod recommendations;
pub mod types;
pub mod urgency;
pub mod validation;

use std::sync::Arc;

pub use config::CoreConfig;
pub use engine::TriageEngine;
pub use error::{TriageError, TriageResult};
pub use knowledge::{KnowledgeBase, RedFlagTable};
pub use types::{
    AnalysisResult, ConditionCandidate, DeclaredSeverity, NormalizedSymptom, Recommendation,
    RecommendationType, RedFlagWarning, SeverityClass, SymptomRequest, UrgencyLevel,
};

/// Caller-facing triage operations: request validation in front of the pure engine, plus the
/// read-only symptom queries.
#[derive(Clone, Debug)]
pub struct TriageService {
    engine: TriageEngine,
    max_symptoms: usize,
    max_symptom_chars: usize,
}

impl TriageService {
    /// Creates a service, loading the knowledge tables named by `cfg`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured knowledge pack cannot be read or is invalid.
    pub fn new(cfg: &CoreConfig) -> TriageResult<Self> {
        let (knowledge, red_flags) = cfg.load_knowledge()?;
        Ok(Self::with_engine(
            TriageEngine::new(Arc::new(knowledge), Arc::new(red_flags)),
            cfg,
        ))
    }

    pub fn with_engine(engine: TriageEngine, cfg: &CoreConfig) -> Self {
        Self {
            engine,
            max_symptoms: cfg.max_symptoms(),
            max_symptom_chars: cfg.max_symptom_chars(),
        }
    }

    pub fn engine(&self) -> &TriageEngine {
        &self.engine
    }

    /// Validates and analyses a request.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::NoSymptoms` for an empty symptom list and
    /// `TriageError::InvalidInput` for other malformed requests. Unrecognised symptoms are not
    /// errors.
    pub fn analyze(&self, request: &SymptomRequest) -> TriageResult<AnalysisResult> {
        if let Err(e) =
            validation::validate_request(request, self.max_symptoms, self.max_symptom_chars)
        {
            tracing::warn!("rejected triage request: {}", e);
            return Err(e);
        }
        Ok(self.engine.analyze(request))
    }

    /// All recognised symptom keys, in knowledge-base order.
    pub fn list_symptoms(&self) -> Vec<String> {
        self.engine
            .knowledge()
            .symptom_keys()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Recognised symptom keys matching a partial query.
    pub fn search_symptoms(&self, query: &str) -> Vec<String> {
        self.engine
            .knowledge()
            .search(query)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl Default for TriageService {
    fn default() -> Self {
        Self::with_engine(TriageEngine::builtin(), &CoreConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn service_rejects_empty_request_before_analysis() {
        let err = TriageService::default()
            .analyze(&SymptomRequest::default())
            .expect_err("empty request");
        assert!(matches!(err, TriageError::NoSymptoms));
    }

    #[test]
    fn service_respects_configured_symptom_limit() {
        let cfg = CoreConfig::new(None, 1, 200).expect("config");
        let service = TriageService::new(&cfg).expect("service");
        assert!(service.analyze(&SymptomRequest::new(["fever"])).is_ok());
        assert!(service
            .analyze(&SymptomRequest::new(["fever", "cough"]))
            .is_err());
    }

    #[test]
    fn service_lists_and_searches_symptoms() {
        let service = TriageService::default();
        let all = service.list_symptoms();
        assert!(all.contains(&"chest pain".to_string()));
        assert_eq!(all.len(), service.engine().knowledge().len());

        let hits = service.search_symptoms("Head");
        assert_eq!(hits, vec!["headache".to_string(), "severe headache".to_string()]);
    }

    #[test]
    fn service_uses_configured_knowledge_pack() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(
            br#"
symptoms:
  - key: wheezing
    label: Wheezing
    severity: low
    conditions:
      - name: Asthma
        code: J45.909
        probability: 0.4
        description: Chronic airway inflammation.
        typical_symptoms: [wheezing]
        red_flags: [unable to speak in full sentences]
"#,
        )
        .expect("write pack");

        let cfg = CoreConfig::new(Some(file.path().to_path_buf()), 10, 200).expect("config");
        let service = TriageService::new(&cfg).expect("service");

        assert_eq!(service.list_symptoms(), vec!["wheezing".to_string()]);
        let result = service
            .analyze(&SymptomRequest::new(["Wheezing"]))
            .expect("analysis");
        assert_eq!(result.urgency, UrgencyLevel::SelfCare);
        assert_eq!(result.conditions[0].name, "Asthma");
        assert!((result.conditions[0].probability - 0.4).abs() < 1e-9);
    }
}
