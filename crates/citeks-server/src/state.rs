//! Application State

use std::sync::Arc;

use citeks_payments::CheckoutProvider;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment provider (optional - None if not configured)
    pub payments: Option<Arc<dyn CheckoutProvider>>,
}
