//! # citeks-payments
//!
//! Server-side payment processing for the CITEKS site.
//!
//! ## Stripe Embedded Checkout
//!
//! **Flow:** the payment form is mounted inside the `#/pay/<id>` page; Stripe
//! redirects to `#/thank-you?session_id=...` when done.
//!
//! ```text
//! ┌──────────────┐  POST /api/create-checkout-session   ┌────────────┐
//! │  #/pay/<id>  │─────────────────────────────────────▶│   server   │──▶ Stripe
//! │  (browser)   │◀──────────── {clientSecret} ─────────│            │
//! │  ┌────────┐  │                                      └────────────┘
//! │  │ Stripe │  │  initEmbeddedCheckout({clientSecret})
//! │  │ iframe │  │
//! │  └────────┘  │──▶ #/thank-you?session_id=cs_... ──▶ GET /api/session-status
//! └──────────────┘
//! ```
//!
//! The amount always comes from `citeks_core::pricing`, the same function the
//! browser uses for the displayed total.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use citeks_payments::{CheckoutProvider, EmbeddedCheckoutRequest, StripeClient};
//!
//! let stripe = StripeClient::new("sk_test_xxx");
//! let request = EmbeddedCheckoutRequest::resolve("growth", true, "https://citeks.net")?;
//! let session = stripe.create_embedded_session(&request).await?;
//!
//! // Send session.client_secret to the browser
//! ```

mod checkout;
mod error;

pub use checkout::{CheckoutProvider, EmbeddedCheckoutRequest, EmbeddedSession, StripeClient};
pub use error::{PaymentError, Result};
