//! Provider error types.

use thiserror::Error;

/// Errors that can occur when talking to the learning-path backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No learning path exists for this student.
    #[error("no learning path for student {0}")]
    NotFound(String),

    /// The backend returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Message shown on the learner-facing retry card.
    pub fn user_message(&self) -> &'static str {
        match self {
            ProviderError::NotFound(_) => {
                "We could not find a learning path yet. Complete the assessment and try again."
            }
            ProviderError::Timeout(_) | ProviderError::NetworkError(_) => {
                "We could not reach the learning path service. Check your connection and try again."
            }
            ProviderError::ApiError { .. } | ProviderError::InvalidResponse(_) => {
                "Something went wrong while loading your learning path. Please try again."
            }
        }
    }
}
