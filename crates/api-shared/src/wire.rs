//! Wire types for the triage HTTP API.
//!
//! These mirror the core request/result types with string-valued enums and OpenAPI schemas, and
//! translate to and from them. Core types stay free of transport concerns.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use triage_core::{
    AnalysisResult, ConditionCandidate, DeclaredSeverity, NormalizedSymptom, Recommendation,
    RedFlagWarning, SymptomRequest,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl From<Severity> for DeclaredSeverity {
    fn from(value: Severity) -> Self {
        match value {
            Severity::Mild => DeclaredSeverity::Mild,
            Severity::Moderate => DeclaredSeverity::Moderate,
            Severity::Severe => DeclaredSeverity::Severe,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeReq {
    /// Patient-reported symptoms; at least one is required.
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
    /// Prior conditions.
    #[serde(default)]
    pub history: Option<Vec<String>>,
    #[serde(default)]
    pub medications: Option<Vec<String>>,
    #[serde(default)]
    pub allergies: Option<Vec<String>>,
}

impl From<AnalyzeReq> for SymptomRequest {
    fn from(req: AnalyzeReq) -> Self {
        SymptomRequest {
            symptoms: req.symptoms,
            duration: req.duration,
            severity: req.severity.map(Into::into),
            history: req.history,
            medications: req.medications,
            allergies: req.allergies,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NormalizedSymptomRes {
    pub original: String,
    pub standardized: String,
    /// One of `low`, `medium`, `high`, `critical`.
    pub severity: String,
    pub duration: Option<String>,
    pub recognised: bool,
}

impl From<NormalizedSymptom> for NormalizedSymptomRes {
    fn from(symptom: NormalizedSymptom) -> Self {
        Self {
            recognised: symptom.is_recognised(),
            severity: symptom.severity.as_str().to_string(),
            original: symptom.original,
            standardized: symptom.standardized,
            duration: symptom.duration,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConditionRes {
    pub name: String,
    pub code: String,
    pub probability: f64,
    pub description: String,
    pub typical_symptoms: Vec<String>,
    pub matched_symptoms: Vec<String>,
    pub match_count: u32,
    pub red_flags: Vec<String>,
}

impl From<ConditionCandidate> for ConditionRes {
    fn from(candidate: ConditionCandidate) -> Self {
        Self {
            name: candidate.name,
            code: candidate.code,
            probability: candidate.probability,
            description: candidate.description,
            typical_symptoms: candidate.typical_symptoms,
            matched_symptoms: candidate.matched_symptoms,
            match_count: u32::try_from(candidate.match_count).unwrap_or(u32::MAX),
            red_flags: candidate.red_flags,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecommendationRes {
    /// One of `immediate`, `urgent`, `routine`, `self-care`.
    #[serde(rename = "type")]
    pub kind: String,
    pub action: String,
    pub description: String,
    pub escalation: String,
}

impl From<Recommendation> for RecommendationRes {
    fn from(rec: Recommendation) -> Self {
        Self {
            kind: rec.kind.as_str().to_string(),
            action: rec.action,
            description: rec.description,
            escalation: rec.escalation,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RedFlagRes {
    pub symptom: String,
    pub warning: String,
    pub recommendation: String,
}

impl From<RedFlagWarning> for RedFlagRes {
    fn from(flag: RedFlagWarning) -> Self {
        Self {
            symptom: flag.symptom,
            warning: flag.warning,
            recommendation: flag.recommendation,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeRes {
    pub normalized_symptoms: Vec<NormalizedSymptomRes>,
    /// One of `emergency`, `urgent`, `routine`, `self-care`.
    pub urgency: String,
    pub confidence: f64,
    pub conditions: Vec<ConditionRes>,
    pub recommendations: Vec<RecommendationRes>,
    pub red_flags: Vec<RedFlagRes>,
}

impl From<AnalysisResult> for AnalyzeRes {
    fn from(result: AnalysisResult) -> Self {
        Self {
            normalized_symptoms: result
                .normalized_symptoms
                .into_iter()
                .map(Into::into)
                .collect(),
            urgency: result.urgency.as_str().to_string(),
            confidence: result.confidence,
            conditions: result.conditions.into_iter().map(Into::into).collect(),
            recommendations: result.recommendations.into_iter().map(Into::into).collect(),
            red_flags: result.red_flags.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SymptomListRes {
    pub symptoms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchSymptomsParams {
    /// Partial symptom text to search for.
    pub q: String,
}
