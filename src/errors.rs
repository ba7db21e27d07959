// src/errors.rs

use thiserror::Error;

/// Errors raised by the chat client.
///
/// `Transport`, `Parse` and `Io` surface in the chat log as `Error: <description>`,
/// so their display text is the bare description.
#[derive(Debug, Error)]
pub enum MiloError {
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logger error: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
}

pub type MiloResult<T> = Result<T, MiloError>;

impl MiloError {
    pub fn transport_error(msg: impl Into<String>) -> Self {
        MiloError::Transport(msg.into())
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        MiloError::Parse(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        MiloError::Config(msg.into())
    }
}
