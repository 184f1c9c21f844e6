//! Request and result types for a single triage analysis.
//!
//! Every type here is a plain value: the engine builds a result once and never mutates it, so
//! callers can clone, serialise or compare results freely.

use serde::{Deserialize, Serialize};
use triage_types::SymptomKey;

/// Severity the caller attaches to the request as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredSeverity {
    Mild,
    Moderate,
    Severe,
}

impl std::str::FromStr for DeclaredSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Ok(Self::Mild),
            "moderate" => Ok(Self::Moderate),
            "severe" => Ok(Self::Severe),
            other => Err(format!(
                "unknown severity '{other}' (expected mild, moderate or severe)"
            )),
        }
    }
}

/// Intrinsic severity of a symptom as recorded in the knowledge base.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SeverityClass {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl SeverityClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Urgency levels, ordered by decreasing required speed of care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrgencyLevel {
    Emergency,
    Urgent,
    Routine,
    SelfCare,
}

impl UrgencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Urgent => "urgent",
            Self::Routine => "routine",
            Self::SelfCare => "self-care",
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A symptom-analysis request as submitted by a caller.
///
/// `medications` and `allergies` are accepted and carried through for future rules; no current
/// rule reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymptomRequest {
    pub symptoms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<DeclaredSeverity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
}

impl SymptomRequest {
    pub fn new<I, S>(symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symptoms: symptoms.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn with_severity(mut self, severity: DeclaredSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_history<I, S>(mut self, history: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.history = Some(history.into_iter().map(Into::into).collect());
        self
    }

    /// Duration text, if one was supplied and is not blank.
    pub fn duration(&self) -> Option<&str> {
        self.duration
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    pub fn has_history(&self) -> bool {
        self.history
            .as_ref()
            .is_some_and(|h| h.iter().any(|c| !c.trim().is_empty()))
    }
}

/// A raw symptom mapped onto the knowledge base (or passed through when unrecognised).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSymptom {
    pub original: String,
    pub standardized: String,
    pub severity: SeverityClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Knowledge-base key this symptom resolved to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<SymptomKey>,
}

impl NormalizedSymptom {
    pub fn is_recognised(&self) -> bool {
        self.key.is_some()
    }

    /// Lowercase standardised label, the form used by the urgency and red-flag tables.
    pub fn label_key(&self) -> String {
        self.standardized.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionCandidate {
    pub name: String,
    pub code: String,
    pub probability: f64,
    pub description: String,
    pub typical_symptoms: Vec<String>,
    pub matched_symptoms: Vec<String>,
    /// Accumulated typical-symptom matches; the ranking key.
    pub match_count: usize,
    pub red_flags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationType {
    Immediate,
    Urgent,
    Routine,
    SelfCare,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::Urgent => "urgent",
            Self::Routine => "routine",
            Self::SelfCare => "self-care",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub action: String,
    pub description: String,
    pub escalation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlagWarning {
    pub symptom: String,
    pub warning: String,
    pub recommendation: String,
}

/// The sole output of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub normalized_symptoms: Vec<NormalizedSymptom>,
    pub urgency: UrgencyLevel,
    pub confidence: f64,
    pub conditions: Vec<ConditionCandidate>,
    pub recommendations: Vec<Recommendation>,
    pub red_flags: Vec<RedFlagWarning>,
}
