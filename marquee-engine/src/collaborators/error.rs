// Collaborator error types
//
// Errors from server endpoints and the payment gateway. Controllers map
// these to user-visible messages; nothing here propagates as a panic.

use std::fmt;

/// Errors that can occur while talking to an external collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// Request never reached the server
    Network(String),

    /// Server answered with a non-success status
    Status { code: u16, body: String },

    /// Response body was not the expected envelope
    Parse(String),

    /// Payment was declined by the gateway
    PaymentDeclined(String),

    /// Client secret did not match an open payment intent
    UnknownIntent(String),
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status { code, body } => {
                write!(f, "Server responded with status {}: {}", code, body)
            }
            Self::Parse(msg) => write!(f, "Failed to parse server response: {}", msg),
            Self::PaymentDeclined(msg) => write!(f, "Payment declined: {}", msg),
            Self::UnknownIntent(secret) => write!(f, "Unknown payment intent: {}", secret),
        }
    }
}

impl std::error::Error for EndpointError {}

impl From<serde_json::Error> for EndpointError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type for collaborator operations
pub type EndpointResult<T> = Result<T, EndpointError>;
