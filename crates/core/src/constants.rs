//! Constants used throughout the triage core crate.
//!
//! Scoring weights, clamps and request guardrails live here so the classifier, estimator and
//! matcher stay in step with each other.

/// Confidence assigned before any bonus is applied.
pub const BASELINE_CONFIDENCE: f64 = 0.5;

/// Confidence bonus per raw input symptom recognised by the knowledge base.
pub const RECOGNISED_SYMPTOM_BONUS: f64 = 0.15;

/// Confidence bonus when a symptom duration was supplied.
pub const DURATION_BONUS: f64 = 0.10;

/// Confidence bonus when prior-condition history was supplied.
pub const HISTORY_BONUS: f64 = 0.10;

/// Upper clamp for confidence; the engine never reports certainty.
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Upper clamp for a condition candidate's probability.
pub const MAX_CONDITION_PROBABILITY: f64 = 0.95;

/// Number of condition candidates returned per analysis.
pub const MAX_CONDITION_CANDIDATES: usize = 5;

/// Default cap on symptoms accepted in a single request.
pub const DEFAULT_MAX_SYMPTOMS: usize = 32;

/// Default cap on the length (in characters) of a single symptom string.
pub const DEFAULT_MAX_SYMPTOM_CHARS: usize = 200;

/// Lowercase standardised labels that force an `emergency` urgency.
pub const EMERGENCY_SYMPTOMS: &[&str] = &[
    "chest pain",
    "shortness of breath",
    "severe headache",
    "high fever",
    "confusion",
    "difficulty breathing",
    "loss of consciousness",
];

/// Lowercase standardised labels that raise urgency to `urgent`.
pub const URGENT_SYMPTOMS: &[&str] = &["fever", "persistent cough", "severe pain"];
