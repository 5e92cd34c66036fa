//! HTTP Handlers

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use citeks_core::api::{CheckoutSessionRequest, CheckoutSessionResponse, ErrorBody, SessionStatus};
use citeks_payments::{EmbeddedCheckoutRequest, PaymentError};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub stripe_configured: bool,
}

#[derive(Debug, Deserialize)]
pub struct SessionStatusQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

fn payments_disabled() -> ApiError {
    api_error(StatusCode::SERVICE_UNAVAILABLE, "Payments not configured")
}

fn payment_error(err: &PaymentError) -> ApiError {
    let status = match err {
        PaymentError::UnknownPackage(_) => StatusCode::NOT_FOUND,
        PaymentError::InvalidSession(_) => StatusCode::BAD_REQUEST,
        PaymentError::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
        PaymentError::Stripe(_) | PaymentError::IncompleteSession(_) => StatusCode::BAD_GATEWAY,
    };
    api_error(status, err.user_message())
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        stripe_configured: state.payments.is_some(),
    })
}

/// Create an embedded checkout session
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutSessionRequest>,
) -> Result<Json<CheckoutSessionResponse>, ApiError> {
    let request = EmbeddedCheckoutRequest::resolve(&payload.slug, payload.rush, payload.origin)
        .map_err(|e| {
            tracing::warn!(slug = %payload.slug, "Checkout requested for unknown package");
            payment_error(&e)
        })?;

    let payments = state.payments.as_ref().ok_or_else(payments_disabled)?;

    let session = payments
        .create_embedded_session(&request)
        .await
        .map_err(|e| {
            tracing::error!(provider = payments.name(), "Checkout error: {}", e);
            payment_error(&e)
        })?;

    Ok(Json(CheckoutSessionResponse {
        client_secret: session.client_secret,
    }))
}

/// Session status for the thank-you page
pub async fn session_status(
    State(state): State<AppState>,
    Query(query): Query<SessionStatusQuery>,
) -> Result<Json<SessionStatus>, ApiError> {
    let session_id = query
        .session_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Missing session_id"))?;

    let payments = state.payments.as_ref().ok_or_else(payments_disabled)?;

    let status = payments.session_status(&session_id).await.map_err(|e| {
        tracing::error!(provider = payments.name(), "Session status error: {}", e);
        payment_error(&e)
    })?;

    Ok(Json(status))
}
