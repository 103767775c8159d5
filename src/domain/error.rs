use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Key directory error: {operation} - {message}")]
    Directory { operation: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn directory(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Directory {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
