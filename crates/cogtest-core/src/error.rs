use thiserror::Error;

#[derive(Debug, Error)]
pub enum CogError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type CogResult<T> = Result<T, CogError>;
