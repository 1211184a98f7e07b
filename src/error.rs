use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse progress data: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("A practice session needs at least one question.")]
    EmptyQuestionList,

    #[error("No practice session is active.")]
    NoActiveSession,

    #[error("The practice session is already complete.")]
    SessionComplete,

    #[error("The practice session is not complete yet.")]
    SessionIncomplete,

    #[error("Answer for question {0} arrived after the session moved on.")]
    StaleAnswer(String),
}
