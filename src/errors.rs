// src/errors.rs

use thiserror::Error;

/// Errors raised inside the chat client. None of these reach the user as a
/// failure of a turn; the controller turns them into bot messages or logs.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChatError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        ChatError::Config(msg.into())
    }

    pub fn storage_error(msg: impl Into<String>) -> Self {
        ChatError::Storage(msg.into())
    }

    pub fn transport_error(msg: impl Into<String>) -> Self {
        ChatError::Transport(msg.into())
    }
}

pub type ChatResult<T> = Result<T, ChatError>;
