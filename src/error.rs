//! Error types for the scene compiler

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected token {found}: {expected}")]
    UnexpectedToken { found: String, expected: String },

    #[error("malformed CSS length: {value:?}")]
    MalformedLength { value: String },

    #[error("invalid selector: {message}")]
    InvalidSelector { message: String },

    #[error("no element matches selector {selector:?}")]
    ContentNotFound { selector: String },

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("CSS inlining failed: {message}")]
    Inline { message: String },

    #[error("render error: {message}")]
    Render { message: String },
}

pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    pub fn unexpected_token(found: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            found: found.into(),
            expected: expected.into(),
        }
    }

    pub fn malformed_length(value: impl Into<String>) -> Self {
        Self::MalformedLength {
            value: value.into(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }
}
