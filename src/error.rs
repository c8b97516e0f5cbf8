use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Unexpected status code: {status}")]
    Remote { status: u16 },
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid repository identifier: {0}")]
    Validation(String),
    #[error("Statistics still being computed after {attempts} attempts")]
    Timeout { attempts: u32 },
    #[error("Cancelled")]
    Cancelled,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Missing credential: {0}")]
    MissingCredential(String),
}

impl From<reqwest::Error> for StatsError {
    fn from(err: reqwest::Error) -> Self {
        StatsError::Transport(err.to_string())
    }
}

impl StatsError {
    /// Errors confined to a single repository; the batch moves on after these.
    pub fn is_per_repository(&self) -> bool {
        matches!(
            self,
            StatsError::Transport(_)
                | StatsError::Remote { .. }
                | StatsError::Decode(_)
                | StatsError::Validation(_)
                | StatsError::Timeout { .. }
        )
    }
}
