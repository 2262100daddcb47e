//! Error types for the onboarding core and its terminal host.

/// Precondition violations on screen setters and host input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OnboardingError {
    #[error("Invalid argument for {field}: {value:?}")]
    InvalidArgument { field: String, value: String },
}

impl OnboardingError {
    pub fn invalid(field: &str, value: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}
