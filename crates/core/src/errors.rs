use thiserror::Error;

use crate::config::ConfigError;

/// Session-level failures surfaced to the boundary (the CLI). Oracle
/// failures during a turn are handled inside the controller and never
/// reach this layer; what remains is startup and wiring.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("integration failure: {0}")]
    Integration(String),
}

impl ApplicationError {
    /// Fixed, user-safe text for boundary display. Detail stays in logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Configuration(_) => {
                "Scout is not configured yet. Run `scout doctor` for details."
            }
            Self::Integration(_) => {
                "The language model service is unavailable. Please retry shortly."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ConfigError;
    use crate::errors::ApplicationError;

    #[test]
    fn configuration_errors_point_at_doctor() {
        let error = ApplicationError::from(ConfigError::Validation("llm.api_key".to_string()));
        assert_eq!(
            error.user_message(),
            "Scout is not configured yet. Run `scout doctor` for details."
        );
    }

    #[test]
    fn integration_errors_read_as_retryable() {
        let error = ApplicationError::Integration("connection reset".to_string());
        assert!(error.user_message().contains("retry"));
        assert!(error.to_string().contains("connection reset"));
    }
}
