use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodozError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),

    /// Raised by a subscriber's own callback. The notifier logs these and keeps going.
    #[error("Subscriber error: {0}")]
    Subscriber(String),
}

pub type Result<T> = std::result::Result<T, TodozError>;
