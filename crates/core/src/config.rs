//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads environment variables; binaries read
//! them and hand the parsed values to [`CoreConfig::new`].

use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_MAX_SYMPTOMS, DEFAULT_MAX_SYMPTOM_CHARS};
use crate::knowledge::{load_knowledge_pack, KnowledgeBase, RedFlagTable};
use crate::{TriageError, TriageResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    knowledge_pack: Option<PathBuf>,
    max_symptoms: usize,
    max_symptom_chars: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if either limit is zero or the knowledge pack path is
    /// not an existing file.
    pub fn new(
        knowledge_pack: Option<PathBuf>,
        max_symptoms: usize,
        max_symptom_chars: usize,
    ) -> TriageResult<Self> {
        if max_symptoms == 0 {
            return Err(TriageError::InvalidInput(
                "max_symptoms must be greater than zero".into(),
            ));
        }
        if max_symptom_chars == 0 {
            return Err(TriageError::InvalidInput(
                "max_symptom_chars must be greater than zero".into(),
            ));
        }
        if let Some(path) = &knowledge_pack {
            if !path.is_file() {
                return Err(TriageError::InvalidInput(format!(
                    "knowledge pack does not exist: {}",
                    path.display()
                )));
            }
        }

        Ok(Self {
            knowledge_pack,
            max_symptoms,
            max_symptom_chars,
        })
    }

    pub fn knowledge_pack(&self) -> Option<&Path> {
        self.knowledge_pack.as_deref()
    }

    pub fn max_symptoms(&self) -> usize {
        self.max_symptoms
    }

    pub fn max_symptom_chars(&self) -> usize {
        self.max_symptom_chars
    }

    /// Loads the configured knowledge pack, or the built-in tables when none is configured.
    pub fn load_knowledge(&self) -> TriageResult<(KnowledgeBase, RedFlagTable)> {
        match &self.knowledge_pack {
            Some(path) => load_knowledge_pack(path),
            None => Ok((KnowledgeBase::builtin(), RedFlagTable::builtin())),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            knowledge_pack: None,
            max_symptoms: DEFAULT_MAX_SYMPTOMS,
            max_symptom_chars: DEFAULT_MAX_SYMPTOM_CHARS,
        }
    }
}

/// Parse the per-request symptom limit from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_MAX_SYMPTOMS`].
pub fn max_symptoms_from_env_value(value: Option<String>) -> TriageResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_MAX_SYMPTOMS),
        Some(v) => v.parse::<usize>().map_err(|_| {
            TriageError::InvalidInput(format!("TRIAGE_MAX_SYMPTOMS is not a valid number: {v}"))
        }),
    }
}

/// Parse the knowledge pack override from an optional string value.
///
/// `None` or empty/whitespace means the built-in tables are used.
pub fn knowledge_pack_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
