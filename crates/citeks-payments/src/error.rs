//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Stripe API error
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Requested package is not in the catalog
    #[error("Unknown package: {0}")]
    UnknownPackage(String),

    /// Session id could not be parsed
    #[error("Invalid session id: {0}")]
    InvalidSession(String),

    /// Stripe answered without a field we rely on
    #[error("Incomplete session: {0}")]
    IncompleteSession(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// Get user-friendly message
    pub const fn user_message(&self) -> &str {
        match self {
            Self::Stripe(_) | Self::IncompleteSession(_) => {
                "Payment processing failed. Please try again or email contact@citeks.net."
            }
            Self::UnknownPackage(_) => "Unknown package",
            Self::InvalidSession(_) => "Invalid session id",
            Self::Config(_) => "Payments are not configured.",
        }
    }
}

impl From<stripe::StripeError> for PaymentError {
    fn from(err: stripe::StripeError) -> Self {
        Self::Stripe(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_hide_details() {
        let err = PaymentError::Stripe("api_key_expired: sk_live_...".into());
        assert!(!err.user_message().contains("sk_live"));
    }
}
