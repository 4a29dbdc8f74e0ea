//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use super::form::FormField;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Non-success HTTP status. `message` is the response body, verbatim.
    #[error("Service responded with HTTP {status}: {message}")]
    Transport { status: u16, message: String },

    #[error("Request failed: {0}")]
    Network(String),

    #[error("Unexpected response from service: {0}")]
    Decode(String),

    #[error("Prompt failed: {0}")]
    Ui(String),

    #[error("Report error: {0}")]
    Report(String),
}

impl DomainError {
    /// Text for an alert. Transport errors show the server's message as-is.
    pub fn alert_message(&self) -> String {
        match self {
            Self::Transport { message, .. } if !message.trim().is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Client-side validation failure, reported next to `field`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct ValidationError {
    pub field: FormField,
    pub kind: ValidationKind,
}

impl ValidationError {
    pub fn new(field: FormField, kind: ValidationKind) -> Self {
        Self { field, kind }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    #[error("Please specify your Twitter username")]
    MissingUsername,

    #[error("Please specify a valid Twitter username")]
    InvalidUsername,

    #[error("Session token missing - please register")]
    MissingToken,

    #[error("Please specify a from date")]
    MissingFrom,

    #[error("Please specify a to date")]
    MissingTo,

    #[error("Please specify the date as YYYY-MM-DD")]
    MalformedDate,

    #[error("The to date must not be before the from date")]
    InvertedRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_alert_is_verbatim_body() {
        let err = DomainError::Transport {
            status: 500,
            message: "model unavailable".into(),
        };
        assert_eq!(err.alert_message(), "model unavailable");
        assert_eq!(
            err.to_string(),
            "Service responded with HTTP 500: model unavailable"
        );
    }

    #[test]
    fn test_transport_alert_falls_back_on_empty_body() {
        let err = DomainError::Transport {
            status: 502,
            message: String::new(),
        };
        assert!(err.alert_message().contains("502"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(FormField::From, ValidationKind::MissingFrom);
        assert_eq!(err.to_string(), "Please specify a from date");
        assert_eq!(err.field, FormField::From);
    }
}
