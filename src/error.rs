use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskerError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("task {0} already has a rating")]
    AlreadySet(u64),

    #[error("rating {0} is out of range (expected 1-5)")]
    OutOfRange(i64),

    #[error("task {0} not found")]
    TaskNotFound(u64),

    #[error("corrupt task file '{0}': {1}")]
    CorruptStore(String, String),

    #[error("locked by another process: {0}")]
    Locked(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TaskerError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::InvalidState(_) => "invalid_state",
            Self::AlreadySet(_) => "already_set",
            Self::OutOfRange(_) => "out_of_range",
            Self::TaskNotFound(_) => "task_not_found",
            Self::CorruptStore(_, _) => "corrupt_store",
            Self::Locked(_) => "locked",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }

    /// True for failures of the durable store rather than of the request.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::CorruptStore(_, _) | Self::Locked(_) | Self::Io(_) | Self::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TaskerError>;
