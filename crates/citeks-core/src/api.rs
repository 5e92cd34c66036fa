//! External Collaborators
//!
//! Wire types and the traits the site talks through: the form backend, the
//! payment API and the embedded payment widget. The browser adapters live in
//! `citeks-web`; tests use in-memory doubles.
//!
//! All traits are `?Send`: the client runs on a single-threaded event loop.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{CHECKOUT_FALLBACK_MESSAGE, Result};

// ============================================================================
// Form backend
// ============================================================================

/// How a submission is encoded on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormEncoding {
    /// `application/x-www-form-urlencoded`
    UrlEncoded,
    /// `multipart/form-data`, required when files may be attached
    Multipart,
}

/// A file picked by the visitor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Ordered form payload ready for the form backend
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormSubmission {
    pub form_name: String,
    pub encoding: FormEncoding,
    /// Text parts in append order, `form-name` first
    pub fields: Vec<(String, String)>,
    /// Part name for every attachment
    pub file_field: &'static str,
    pub files: Vec<Attachment>,
}

impl FormSubmission {
    pub fn new(form_name: impl Into<String>, encoding: FormEncoding) -> Self {
        let form_name = form_name.into();
        Self {
            fields: vec![("form-name".into(), form_name.clone())],
            form_name,
            encoding,
            file_field: "",
            files: Vec::new(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Value of the first text part with this name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Form ingestion backend. Any 2xx is success.
#[async_trait(?Send)]
pub trait FormBackend {
    async fn submit(&self, submission: &FormSubmission) -> Result<()>;
}

// ============================================================================
// Payment API
// ============================================================================

/// Body of the checkout-session-creation call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    /// Package id
    pub slug: String,
    pub rush: bool,
    /// Page origin, used to build the return URL
    pub origin: String,
}

/// Successful creation response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

/// Structured error body returned by both payment endpoints
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Metadata recorded on the session at creation time
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    #[serde(default)]
    pub package: Option<String>,
    /// `"true"` / `"false"`
    #[serde(default)]
    pub rush: Option<String>,
}

/// Session status as returned by the status endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub payment_status: String,
    #[serde(default)]
    pub payment_intent_id: Option<String>,
    /// Minor currency units
    #[serde(default)]
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub metadata: SessionMetadata,
}

/// Opaque token binding the embedded widget to one session
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Secrets never go to logs in full
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "ClientSecret({prefix}…)")
    }
}

/// Hosted payment API
#[async_trait(?Send)]
pub trait CheckoutApi {
    /// Create a session for `(slug, rush)`. Errors are
    /// [`SiteError::SessionCreation`](crate::SiteError::SessionCreation) carrying
    /// the text to show, see [`extract_error_message`].
    async fn create_session(&self, request: &CheckoutSessionRequest) -> Result<ClientSecret>;

    /// Look up a session after the processor redirects back
    async fn session_status(&self, session_id: &str) -> Result<SessionStatus>;
}

/// Pick the message to show for a failed session creation.
///
/// A JSON `{error}` body wins; any other non-empty text is shown raw;
/// otherwise the manual-contact fallback.
pub fn extract_error_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return CHECKOUT_FALLBACK_MESSAGE.into();
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => value
            .get("error")
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
            .map_or_else(|| CHECKOUT_FALLBACK_MESSAGE.into(), String::from),
        Err(_) => trimmed.to_string(),
    }
}

// ============================================================================
// Embedded widget
// ============================================================================

/// An embedded payment widget, attached or not
pub trait MountedWidget {
    /// Release the widget. Consumes it so it cannot be released twice.
    fn destroy(self);
}

/// Mounts the hosted payment widget into the page in two steps
#[async_trait(?Send)]
pub trait WidgetHost {
    type Widget: MountedWidget;

    /// Build a widget bound to `secret` without attaching it. `Ok(None)`
    /// means the attachment point is not in the page yet; the caller
    /// retries later.
    async fn prepare(&self, secret: &ClientSecret) -> Result<Option<Self::Widget>>;

    /// Attach a prepared widget to the page. Never suspends, so the caller
    /// can check the widget is still wanted and attach it in one step.
    fn attach(&self, widget: &Self::Widget) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_error_wins() {
        assert_eq!(
            extract_error_message(r#"{"error":"Card networks down"}"#),
            "Card networks down"
        );
    }

    #[test]
    fn test_raw_text_when_not_json() {
        assert_eq!(extract_error_message("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_fallback_when_nothing_useful() {
        assert_eq!(extract_error_message(""), CHECKOUT_FALLBACK_MESSAGE);
        assert_eq!(extract_error_message(r#"{"message":"x"}"#), CHECKOUT_FALLBACK_MESSAGE);
        assert_eq!(extract_error_message(r#"{"error":""}"#), CHECKOUT_FALLBACK_MESSAGE);
    }

    #[test]
    fn test_request_wire_shape() {
        let request = CheckoutSessionRequest {
            slug: "growth".into(),
            rush: true,
            origin: "https://citeks.net".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["slug"], "growth");
        assert_eq!(json["rush"], true);
        assert_eq!(json["origin"], "https://citeks.net");
    }

    #[test]
    fn test_response_uses_camel_case() {
        let response: CheckoutSessionResponse =
            serde_json::from_str(r#"{"clientSecret":"cs_test_secret"}"#).unwrap();
        assert_eq!(response.client_secret, "cs_test_secret");
    }

    #[test]
    fn test_status_tolerates_missing_fields() {
        let status: SessionStatus =
            serde_json::from_str(r#"{"payment_status":"unpaid"}"#).unwrap();
        assert_eq!(status.payment_status, "unpaid");
        assert!(status.amount_total.is_none());
        assert!(status.metadata.package.is_none());
    }

    #[test]
    fn test_client_secret_debug_is_truncated() {
        let secret = ClientSecret::new("cs_test_a1b2c3d4e5f6_secret_xyz");
        assert_eq!(format!("{secret:?}"), "ClientSecret(cs_test_…)");
    }
}
