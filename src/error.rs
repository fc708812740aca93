use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures from the pricing and execution collaborators.
///
/// Both are fatal to the active flow: the engine reports them and discards
/// the draft, never retrying automatically.
#[derive(Error, Debug, Clone)]
pub enum OracleError {
    #[error("quote unavailable: {0}")]
    Quote(String),

    #[error("execution failed: {0}")]
    Execution(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "telegram")]
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

pub type Result<T> = std::result::Result<T, Error>;
