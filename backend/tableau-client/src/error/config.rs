use common::ErrorLocation;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Invalid Server URL Error: {url}: {reason} {location}")]
    InvalidServerUrl {
        location: ErrorLocation,
        url: String,
        reason: String,
    },

    #[error("Config Environment Error: {variable}={value:?}: {reason} {location}")]
    InvalidEnvValue {
        location: ErrorLocation,
        variable: String,
        value: String,
        reason: String,
    },

    #[error("Config Validation Error: {reason} {location}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Config Logger Error: {message} {location}")]
    Logger {
        location: ErrorLocation,
        message: String,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn validation(reason: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            location: ErrorLocation::caller(),
            reason: reason.into(),
        }
    }

    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        ConfigError::Logger {
            location: ErrorLocation::caller(),
            message: message.into(),
        }
    }
}
