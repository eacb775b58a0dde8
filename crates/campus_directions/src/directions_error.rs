use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectionsError {
    #[error("Directions API key is not configured")]
    ConfigurationMissing,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("{}", rejected_message(.status, .message))]
    Rejected {
        status: String,
        message: Option<String>,
    },

    #[error("No routes returned from Directions API")]
    NoRoute,
}

/// The three failure classes callers act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionsErrorKind {
    /// Network failure, timeout or non 2xx response. Retryable by a later call.
    TransportFailure,

    /// The provider answered but refused this origin/destination pair.
    ProviderRejected,

    /// No credential, the request was never sent.
    ConfigurationMissing,
}

impl DirectionsError {
    pub fn kind(&self) -> DirectionsErrorKind {
        match self {
            DirectionsError::ConfigurationMissing => DirectionsErrorKind::ConfigurationMissing,
            DirectionsError::Request(_) | DirectionsError::Http { .. } => {
                DirectionsErrorKind::TransportFailure
            }
            DirectionsError::Rejected { .. } | DirectionsError::NoRoute => {
                DirectionsErrorKind::ProviderRejected
            }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, DirectionsError::Request(error) if error.is_timeout())
    }
}

fn rejected_message(status: &str, message: &Option<String>) -> String {
    match message {
        Some(message) => format!("Directions API error: {status} - {message}"),
        None => format!("Directions API error: {status}"),
    }
}

impl Display for DirectionsErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DirectionsErrorKind::TransportFailure => "transport_failure",
                DirectionsErrorKind::ProviderRejected => "provider_rejected",
                DirectionsErrorKind::ConfigurationMissing => "configuration_missing",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            DirectionsError::ConfigurationMissing.kind(),
            DirectionsErrorKind::ConfigurationMissing
        );
        assert_eq!(
            DirectionsError::Http {
                status: 503,
                message: String::new()
            }
            .kind(),
            DirectionsErrorKind::TransportFailure
        );
        assert_eq!(
            DirectionsError::Rejected {
                status: String::from("ZERO_RESULTS"),
                message: None
            }
            .kind(),
            DirectionsErrorKind::ProviderRejected
        );
        assert_eq!(
            DirectionsError::NoRoute.kind(),
            DirectionsErrorKind::ProviderRejected
        );
    }

    #[test]
    fn test_rejected_message() {
        let error = DirectionsError::Rejected {
            status: String::from("REQUEST_DENIED"),
            message: Some(String::from("The provided API key is invalid.")),
        };
        assert_eq!(
            error.to_string(),
            "Directions API error: REQUEST_DENIED - The provided API key is invalid."
        );

        let error = DirectionsError::Rejected {
            status: String::from("ZERO_RESULTS"),
            message: None,
        };
        assert_eq!(error.to_string(), "Directions API error: ZERO_RESULTS");
    }
}
