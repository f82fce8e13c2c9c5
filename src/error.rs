use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShaiError {
    #[error("Failed to generate commands: {0}")]
    Generation(String),

    #[error("Command blocked for safety reasons: {0}")]
    Blocked(String),

    #[error("Failed to execute command: {0}")]
    Spawn(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User cancelled")]
    UserCancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShaiError>;
