//! Error types and handling for the `EnvDash` dashboard

use thiserror::Error;

/// Main error type for the `EnvDash` application
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream unavailable: network failure, timeout or non-2xx status
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// Payload parsed but an expected field or array is absent
    #[error("Malformed payload: {message}")]
    Payload { message: String },

    /// Nothing to resolve against (empty candidate set, no matching reading)
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl DashboardError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new malformed payload error
    pub fn payload<S: Into<String>>(message: S) -> Self {
        Self::Payload {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            DashboardError::Upstream { .. } => {
                "Unable to reach the environmental data service.".to_string()
            }
            DashboardError::Payload { .. } | DashboardError::NotFound { .. } => {
                "The environmental data service returned incomplete data.".to_string()
            }
            DashboardError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::payload(err.to_string())
        } else {
            Self::upstream(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::payload(err.to_string())
    }
}
