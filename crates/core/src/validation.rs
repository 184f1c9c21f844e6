//! Input validation utilities.
//!
//! Requests are validated at the caller-facing boundary, before they reach the engine. The engine
//! itself never rejects text it does not recognise.

use triage_types::{NonEmptyText, TextError};

use crate::types::SymptomRequest;
use crate::{TriageError, TriageResult};

/// Validates a symptom request.
///
/// # Arguments
///
/// * `request` - The request to check.
/// * `max_symptoms` - Maximum number of symptoms accepted in one request.
/// * `max_symptom_chars` - Maximum length of a single symptom, in characters.
///
/// # Errors
///
/// Returns `TriageError::NoSymptoms` when the symptom list is empty, and
/// `TriageError::InvalidInput` when there are too many symptoms or any symptom is blank or too
/// long.
pub fn validate_request(
    request: &SymptomRequest,
    max_symptoms: usize,
    max_symptom_chars: usize,
) -> TriageResult<()> {
    if request.symptoms.is_empty() {
        return Err(TriageError::NoSymptoms);
    }

    if request.symptoms.len() > max_symptoms {
        return Err(TriageError::InvalidInput(format!(
            "too many symptoms: {} (maximum {})",
            request.symptoms.len(),
            max_symptoms
        )));
    }

    for (position, symptom) in request.symptoms.iter().enumerate() {
        NonEmptyText::bounded(symptom, max_symptom_chars).map_err(|e| match e {
            TextError::Empty => {
                TriageError::InvalidInput(format!("symptom {} cannot be empty", position + 1))
            }
            TextError::TooLong { max, .. } => TriageError::InvalidInput(format!(
                "symptom {} exceeds maximum length of {} characters",
                position + 1,
                max
            )),
        })?;
    }

    Ok(())
}
