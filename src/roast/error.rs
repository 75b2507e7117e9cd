//! Roast request errors

use crate::constants::*;

/// Errors that can end a comparison attempt.
#[derive(Debug, thiserror::Error)]
pub enum RoastError {
    /// Usernames rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The service answered but reported failure.
    #[error("Service reported failure: {0}")]
    Service(String),

    /// `success: true` without a `roast` field.
    #[error("Response is missing the roast")]
    MissingRoast,

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RoastError {
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service(_))
    }

    /// Text shown in the result panel for a failed attempt
    pub fn result_text(&self) -> &'static str {
        match self {
            Self::Service(_) => SERVICE_FAILURE_PLACEHOLDER,
            _ => TRANSPORT_FAILURE_FALLBACK,
        }
    }

    /// Text shown in a toast, if this error warrants one
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::Validation(msg) | Self::Service(msg) => Some(msg.clone()),
            _ => None,
        }
    }
}

pub type RoastResult<T> = Result<T, RoastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_failure_gets_placeholder_and_notice() {
        let err = RoastError::Service("rate limited".into());
        assert!(err.is_service());
        assert_eq!(err.result_text(), SERVICE_FAILURE_PLACEHOLDER);
        assert_eq!(err.notice().as_deref(), Some("rate limited"));
    }

    #[test]
    fn parse_failure_gets_fallback_without_notice() {
        let err = RoastError::from(serde_json::from_str::<u8>("nope").unwrap_err());
        assert!(!err.is_service());
        assert_eq!(err.result_text(), TRANSPORT_FAILURE_FALLBACK);
        assert!(err.notice().is_none());
    }
}
