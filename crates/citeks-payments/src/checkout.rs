//! Stripe Embedded Checkout
//!
//! Creates `ui_mode=embedded` Checkout Sessions priced by the core calculator
//! and projects retrieved sessions into the receipt shape the site expects.

use std::collections::HashMap;

use async_trait::async_trait;
use citeks_core::api::{SessionMetadata, SessionStatus};
use citeks_core::{Package, pricing};
use stripe::{
    CheckoutSession as StripeCheckoutSession, CheckoutSessionId, CheckoutSessionMode,
    CheckoutSessionUiMode, Client, CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionLineItemsPriceData, CreateCheckoutSessionLineItemsPriceDataProductData,
    Currency,
};

use crate::error::{PaymentError, Result};

/// Placeholder Stripe substitutes with the real session id on redirect
const SESSION_ID_TEMPLATE: &str = "{CHECKOUT_SESSION_ID}";

/// Request to create an embedded checkout session
#[derive(Clone, Debug)]
pub struct EmbeddedCheckoutRequest {
    pub package: &'static Package,
    pub rush: bool,
    /// Site origin, e.g. `https://citeks.net`
    pub origin: String,
}

impl EmbeddedCheckoutRequest {
    /// Resolve a wire request; fails for packages not in the catalog
    pub fn resolve(slug: &str, rush: bool, origin: impl Into<String>) -> Result<Self> {
        let package = citeks_core::catalog::find(slug)
            .ok_or_else(|| PaymentError::UnknownPackage(slug.to_string()))?;
        Ok(Self {
            package,
            rush,
            origin: origin.into(),
        })
    }

    /// Amount charged, in cents
    pub fn amount_cents(&self) -> i64 {
        pricing::total_cents(self.package, self.rush)
    }

    pub fn line_item_name(&self) -> String {
        if self.rush {
            format!("{} package + rush", self.package.name)
        } else {
            format!("{} package", self.package.name)
        }
    }

    pub fn line_item_description(&self) -> String {
        let days = if self.rush {
            self.package.rush_days
        } else {
            self.package.standard_days
        };
        format!("Website build, delivered in {days} days")
    }

    /// Where the embedded form sends the buyer afterwards
    pub fn return_url(&self) -> String {
        format!(
            "{}/#/thank-you?session_id={SESSION_ID_TEMPLATE}",
            self.origin.trim_end_matches('/')
        )
    }

    /// Metadata echoed back on the receipt
    pub fn metadata(&self) -> HashMap<String, String> {
        HashMap::from([
            ("package".to_string(), self.package.name.to_string()),
            ("rush".to_string(), self.rush.to_string()),
        ])
    }
}

/// A created session
#[derive(Clone, Debug)]
pub struct EmbeddedSession {
    pub id: String,
    /// Handed to the browser to mount the widget
    pub client_secret: String,
}

/// Payment processor behind the checkout endpoints (Strategy pattern)
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    async fn create_embedded_session(&self, request: &EmbeddedCheckoutRequest) -> Result<EmbeddedSession>;

    async fn session_status(&self, session_id: &str) -> Result<SessionStatus>;

    fn name(&self) -> &str;
}

/// Stripe client wrapper
pub struct StripeClient {
    client: Client,
}

impl StripeClient {
    /// Create a new Stripe client
    pub fn new(secret_key: &str) -> Self {
        Self {
            client: Client::new(secret_key),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| PaymentError::Config("STRIPE_SECRET_KEY not set".into()))?;
        if secret_key.trim().is_empty() {
            return Err(PaymentError::Config("STRIPE_SECRET_KEY is empty".into()));
        }
        Ok(Self::new(secret_key.trim()))
    }
}

#[async_trait]
impl CheckoutProvider for StripeClient {
    async fn create_embedded_session(&self, request: &EmbeddedCheckoutRequest) -> Result<EmbeddedSession> {
        let return_url = request.return_url();

        let mut params = CreateCheckoutSession::new();
        params.mode = Some(CheckoutSessionMode::Payment);
        params.ui_mode = Some(CheckoutSessionUiMode::Embedded);
        params.return_url = Some(&return_url);
        params.metadata = Some(request.metadata());
        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            quantity: Some(1),
            price_data: Some(CreateCheckoutSessionLineItemsPriceData {
                currency: Currency::USD,
                unit_amount: Some(request.amount_cents()),
                product_data: Some(CreateCheckoutSessionLineItemsPriceDataProductData {
                    name: request.line_item_name(),
                    description: Some(request.line_item_description()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }]);

        let session = StripeCheckoutSession::create(&self.client, params).await?;

        let client_secret = session
            .client_secret
            .ok_or_else(|| PaymentError::IncompleteSession("no client secret returned".into()))?;

        tracing::info!(
            session_id = %session.id,
            package = request.package.id,
            rush = request.rush,
            amount = request.amount_cents(),
            "Created embedded checkout session"
        );

        Ok(EmbeddedSession {
            id: session.id.to_string(),
            client_secret,
        })
    }

    async fn session_status(&self, session_id: &str) -> Result<SessionStatus> {
        let id: CheckoutSessionId = session_id
            .parse()
            .map_err(|_| PaymentError::InvalidSession(session_id.to_string()))?;

        let session = StripeCheckoutSession::retrieve(&self.client, &id, &[]).await?;

        let metadata = session.metadata.as_ref();
        let lookup = |key: &str| metadata.and_then(|m| m.get(key)).cloned();

        Ok(SessionStatus {
            payment_status: session.payment_status.as_str().to_string(),
            payment_intent_id: session.payment_intent.as_ref().map(|pi| pi.id().to_string()),
            amount_total: session.amount_total,
            currency: session.currency.map(|c| c.to_string()),
            metadata: SessionMetadata {
                package: lookup("package"),
                rush: lookup("rush"),
            },
        })
    }

    fn name(&self) -> &str {
        "stripe"
    }
}
