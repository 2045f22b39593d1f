use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaperbindError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Command(String),

    #[error("Tool execution error: {0}")]
    ToolExecution(String),
}

pub type Result<T> = std::result::Result<T, PaperbindError>;
