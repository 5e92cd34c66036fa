//! Site Configuration
//!
//! Endpoint paths and contact details shared by the client adapters.

use serde::{Deserialize, Serialize};

/// Address every manual fallback points to
pub const DEFAULT_CONTACT_EMAIL: &str = "contact@citeks.net";

/// Form backend root; both forms post here
pub const DEFAULT_FORM_ENDPOINT: &str = "/";

pub const DEFAULT_CHECKOUT_ENDPOINT: &str = "/api/create-checkout-session";

pub const DEFAULT_STATUS_ENDPOINT: &str = "/api/session-status";

/// Client-side site configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Manual contact address used in fallbacks
    pub contact_email: String,

    /// Form ingestion endpoint
    pub form_endpoint: String,

    /// Checkout session creation endpoint
    pub checkout_endpoint: String,

    /// Session status endpoint
    pub status_endpoint: String,

    /// Publishable key for the embedded payment widget
    #[serde(default)]
    pub publishable_key: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            contact_email: DEFAULT_CONTACT_EMAIL.into(),
            form_endpoint: DEFAULT_FORM_ENDPOINT.into(),
            checkout_endpoint: DEFAULT_CHECKOUT_ENDPOINT.into(),
            status_endpoint: DEFAULT_STATUS_ENDPOINT.into(),
            publishable_key: None,
        }
    }
}

impl SiteConfig {
    /// Set the publishable key, ignoring blank values
    #[must_use]
    pub fn with_publishable_key(mut self, key: Option<&str>) -> Self {
        self.publishable_key = key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from);
        self
    }

    /// Resolve an endpoint path against the page origin
    pub fn absolute(&self, origin: &str, path: &str) -> String {
        format!("{}{}", origin.trim_end_matches('/'), path)
    }
}
