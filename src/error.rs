use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum RecruitError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Unsupported file type for {name}: {mime_type}")]
    UnsupportedDocument { name: String, mime_type: String },

    #[error("No resumes provided. Pass at least one --resume.")]
    NoResumes,

    #[error("Job description must not be empty")]
    EmptyJobDescription,

    #[error("Job title and company are required to generate a description")]
    MissingGenerateFields,

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The system clipboard could not be opened or written.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ClipboardError(pub String);
