//! Quiz grader error types.
//!
//! Every variant is a contract violation by the caller or by the quiz data.
//! None of them are transient, so nothing here is worth retrying.

use thiserror::Error;

/// Errors raised by the quiz grader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The selected option is outside the current question's option range.
    /// The attempt is left unchanged; re-prompt the learner.
    #[error("invalid option {option}: question has {option_count} option(s)")]
    InvalidOption { option: usize, option_count: usize },

    /// An operation was invoked on an attempt that is already completed.
    #[error("cannot {operation} a completed attempt")]
    InvalidTransition { operation: &'static str },

    /// A question cannot be graded: fewer than two options, or the correct
    /// index points past the options.
    #[error("malformed quiz: question '{question_id}' {reason}")]
    MalformedQuiz { question_id: String, reason: String },
}

impl QuizError {
    /// Returns `true` if the attempt can continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, QuizError::InvalidOption { .. })
    }
}
