//! Unified error type for the question-to-SQL pipeline
//! Every variant is request-scoped: a failure ends one request, never the process
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Request errors: missing or blank question
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Extracted text is not a read-only statement
    #[error("Only SELECT queries are allowed.")]
    RejectedQuery {
        /// Literal extracted text, kept for diagnostics
        query: String,
    },

    /// The data store rejected or failed the statement
    #[error("{message}")]
    Execution { message: String },

    /// The language model did not produce a usable response
    #[error("Language model request failed: {message}")]
    UpstreamModel { message: String },

    /// Connection open or setup failures
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl PipelineError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn rejected(query: impl Into<String>) -> Self {
        Self::RejectedQuery {
            query: query.into(),
        }
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamModel {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// HTTP status used at the request boundary.
    ///
    /// Every pipeline failure is reported as a client error; the caller is
    /// expected to rephrase or retry on its own.
    pub fn status_code(&self) -> u16 {
        400
    }

    /// Short machine-readable kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::RejectedQuery { .. } => "rejected_query",
            Self::Execution { .. } => "execution_error",
            Self::UpstreamModel { .. } => "upstream_model_error",
            Self::Storage { .. } => "storage_error",
        }
    }
}

impl From<rusqlite::Error> for PipelineError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Execution {
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for PipelineError {
    fn from(err: anyhow::Error) -> Self {
        Self::UpstreamModel {
            message: format!("{:#}", err),
        }
    }
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
