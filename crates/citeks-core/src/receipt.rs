//! Receipt
//!
//! Post-payment summary fetched once from the session status endpoint.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::api::{CheckoutApi, SessionStatus};

/// Placeholder for values the processor did not return
pub const MISSING: &str = "—";

/// Read-only purchase summary
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReceiptSummary {
    pub status: String,
    pub transaction_id: Option<String>,
    pub package: Option<String>,
    pub rush: bool,
    /// Formatted total, e.g. `$2500.00 USD`
    pub total: Option<String>,
}

impl ReceiptSummary {
    pub fn transaction_display(&self) -> &str {
        self.transaction_id.as_deref().unwrap_or(MISSING)
    }

    pub fn package_display(&self) -> &str {
        self.package.as_deref().unwrap_or(MISSING)
    }

    pub fn total_display(&self) -> &str {
        self.total.as_deref().unwrap_or(MISSING)
    }
}

impl From<SessionStatus> for ReceiptSummary {
    fn from(status: SessionStatus) -> Self {
        let total = match (status.amount_total, status.currency.as_deref()) {
            (Some(amount), Some(currency)) if amount != 0 => Some(format_total(amount, currency)),
            _ => None,
        };
        Self {
            status: status.payment_status,
            transaction_id: status.payment_intent_id.filter(|id| !id.is_empty()),
            package: status.metadata.package.filter(|p| !p.is_empty()),
            rush: status.metadata.rush.as_deref() == Some("true"),
            total,
        }
    }
}

/// Format minor units as `$<major>.<minor> <CURRENCY>`
pub fn format_total(amount_minor: i64, currency: &str) -> String {
    let major = Decimal::new(amount_minor, 2);
    format!("${major:.2} {}", currency.to_uppercase())
}

/// What the thank-you page shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReceiptView {
    /// No session id: only the generic thank-you
    Generic,
    Loading,
    Summary(ReceiptSummary),
    /// Lookup failed; payment already went through
    Apology(String),
}

/// Fetch the receipt for `session_id`. One request, no retry.
pub async fn fetch_receipt<A>(api: &A, session_id: Option<&str>) -> ReceiptView
where
    A: CheckoutApi + ?Sized,
{
    let Some(session_id) = session_id.filter(|id| !id.is_empty()) else {
        return ReceiptView::Generic;
    };

    match api.session_status(session_id).await {
        Ok(status) => {
            tracing::info!(status = %status.payment_status, "Loaded purchase summary");
            ReceiptView::Summary(status.into())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not load purchase summary");
            ReceiptView::Apology(crate::error::RECEIPT_APOLOGY_MESSAGE.into())
        }
    }
}
