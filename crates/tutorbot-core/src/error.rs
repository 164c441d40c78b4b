//! Assessment error types.
//!
//! Every invalid action in the question flow is reported as one of these
//! variants instead of being silently ignored.

use thiserror::Error;

/// Errors raised by the assessment flow and question selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// A score outside the 1–5 Likert range was submitted.
    #[error("score {0} is out of range (expected 1-5)")]
    ScoreOutOfRange(i64),

    /// An answer referenced a question that is not in the pool.
    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    /// `advance()` was called while the current question has no answer.
    #[error("question {0} has not been answered yet")]
    Unanswered(String),

    /// The flow already signalled completion.
    #[error("assessment is already complete")]
    AlreadyComplete,

    /// Two questions in the bank share an id.
    #[error("duplicate question id: {0}")]
    DuplicateQuestion(String),

    /// The question pool is empty.
    #[error("question pool is empty")]
    EmptyPool,

    /// Even the unfiltered pool cannot satisfy the requested minimum.
    #[error("only {available} questions available, {required} required")]
    InsufficientQuestions { available: usize, required: usize },
}

impl AssessmentError {
    /// Returns `true` if this error comes from user input rather than flow state.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AssessmentError::ScoreOutOfRange(_) | AssessmentError::UnknownQuestion(_)
        )
    }
}
