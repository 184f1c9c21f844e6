#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("at least one symptom required")]
    NoSymptoms,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read knowledge pack: {0}")]
    FileRead(std::io::Error),
    #[error("failed to parse knowledge pack: {0}")]
    KnowledgeParse(String),
    #[error("invalid knowledge pack: {0}")]
    InvalidKnowledge(String),
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;
