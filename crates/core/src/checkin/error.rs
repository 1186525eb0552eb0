use thiserror::Error;

use crate::model::QuestionId;

/// Errors emitted by the check-in session controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CheckinError {
    /// The position invariant was violated. Unreachable through the public API.
    #[error("position {position} is outside the pool (len {len})")]
    OutOfRange { position: usize, len: usize },

    /// `advance` was called before the current question had an answer.
    #[error("question {0} has not been answered")]
    NotAnswered(QuestionId),

    /// The session already reached its terminal state.
    #[error("check-in session already completed")]
    Completed,

    /// An answer was offered for a question outside the sampled pool.
    #[error("question {0} is not part of this check-in")]
    UnknownQuestion(QuestionId),

    #[error("pool must contain exactly {expected} questions, got {actual}")]
    PoolSize { expected: usize, actual: usize },

    #[error("question {0} appears more than once in the pool")]
    DuplicateQuestion(QuestionId),

    #[error("catalog has {available} questions, cannot sample {requested}")]
    CatalogTooSmall { available: usize, requested: usize },
}
