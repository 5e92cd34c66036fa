//! Error Types

use std::collections::BTreeMap;

use thiserror::Error;

use crate::config::DEFAULT_CONTACT_EMAIL;

/// Result type alias for site operations
pub type Result<T> = std::result::Result<T, SiteError>;

/// Shown when checkout cannot start and nothing better is known.
pub const CHECKOUT_FALLBACK_MESSAGE: &str =
    "Could not start checkout. Please email contact@citeks.net.";

/// Shown on the thank-you page when the session lookup fails.
pub const RECEIPT_APOLOGY_MESSAGE: &str =
    "We received your payment, but couldn’t load the details. We’ll email you shortly.";

/// Site error taxonomy. None of these is fatal; each degrades to a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SiteError {
    /// One or more form fields failed validation
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(ValidationErrors),

    /// The form backend could not be reached or rejected the post
    #[error("Form submission failed: {0}")]
    Transport(String),

    /// The payment API refused or failed to create a session
    #[error("{0}")]
    SessionCreation(String),

    /// The payment widget library could not be loaded or mounted
    #[error("Widget mount failed: {0}")]
    WidgetMount(String),

    /// The session status lookup failed after payment
    #[error("Receipt fetch failed: {0}")]
    ReceiptFetch(String),
}

impl SiteError {
    /// Message to put in front of a visitor
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(_) => "Please fix the highlighted fields.".into(),
            Self::Transport(_) => {
                format!("Submission failed. Please email {DEFAULT_CONTACT_EMAIL}")
            }
            Self::SessionCreation(msg) | Self::WidgetMount(msg) => msg.clone(),
            Self::ReceiptFetch(_) => RECEIPT_APOLOGY_MESSAGE.into(),
        }
    }
}

/// Per-field validation messages keyed by the field's wire name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, &'static str>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    /// `Ok(())` when empty, otherwise the errors wrapped as [`SiteError::Validation`]
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(SiteError::Validation(self))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_errors_pass() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_errors_wrap_into_validation() {
        let mut errors = ValidationErrors::new();
        errors.insert("email", "Enter a valid email");
        let err = errors.into_result().unwrap_err();
        assert!(matches!(&err, SiteError::Validation(e) if e.get("email").is_some()));
        assert_eq!(err.user_message(), "Please fix the highlighted fields.");
    }

    #[test]
    fn test_transport_message_points_to_email() {
        let err = SiteError::Transport("connection reset".into());
        assert!(err.user_message().contains("contact@citeks.net"));
    }

    #[test]
    fn test_session_creation_message_is_passed_through() {
        let err = SiteError::SessionCreation("Card networks down".into());
        assert_eq!(err.user_message(), "Card networks down");
    }
}
