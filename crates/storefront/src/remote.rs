//! Normalization boundary for untyped backend payloads.
//!
//! The remote backend's response shapes drift: lists arrive bare, under
//! a `users` key, or nested under `data`; error bodies carry `message`
//! or `error`. Everything entering the rest of the system passes through
//! this module first and comes out as a strict internal model or a typed
//! [`RemoteError`]. Failures surface once; nothing here retries.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use aurelia_core::OrderId;

/// Fallback text when an error body carries no usable message.
const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Remote interaction errors.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Missing or invalid credentials (HTTP 401/403).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The backend answered with a non-success status.
    #[error("Api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The payload shape is not one this boundary understands.
    #[error("Malformed payload: {0}")]
    Malformed(String),
}

/// A backend user record, normalized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// A backend order confirmation, normalized.
///
/// `status` stays a free string: the backend's status vocabulary drifts
/// and nothing downstream branches on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub id: OrderId,
    pub status: String,
}

/// Normalize a user-list payload.
///
/// Accepts `{"users": [...]}`, `{"data": {"users": [...]}}`, or a bare
/// array. Entries that do not parse as users are skipped with a warning.
///
/// # Errors
///
/// Returns `RemoteError::Malformed` when no user list can be located.
pub fn normalize_users(payload: &Value) -> Result<Vec<RemoteUser>, RemoteError> {
    let list = payload
        .as_array()
        .or_else(|| payload.get("users").and_then(Value::as_array))
        .or_else(|| {
            payload
                .get("data")
                .and_then(|d| d.get("users"))
                .and_then(Value::as_array)
        })
        .ok_or_else(|| RemoteError::Malformed("no user list in payload".to_owned()))?;

    Ok(list
        .iter()
        .filter_map(|entry| match RemoteUser::deserialize(entry) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Skipping malformed user entry");
                None
            }
        })
        .collect())
}

/// Normalize an order-confirmation payload.
///
/// Accepts the confirmation object bare or wrapped under `order`. The id
/// may arrive as a string or a number; a missing status defaults to
/// `"created"`.
///
/// # Errors
///
/// Returns `RemoteError::Malformed` when no order id can be located.
pub fn normalize_order(payload: &Value) -> Result<OrderConfirmation, RemoteError> {
    let order = payload.get("order").unwrap_or(payload);

    let id = match order.get("id") {
        Some(Value::String(s)) if !s.is_empty() => OrderId::new(s.clone()),
        Some(Value::Number(n)) => OrderId::new(n.to_string()),
        _ => return Err(RemoteError::Malformed("order id missing".to_owned())),
    };

    let status = order
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or("created")
        .to_owned();

    Ok(OrderConfirmation { id, status })
}

/// Map a non-success response to a [`RemoteError`], extracting the
/// message from a `message` or `error` string field when present.
#[must_use]
pub fn extract_error(status: u16, body: &Value) -> RemoteError {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
        .unwrap_or(GENERIC_ERROR_MESSAGE)
        .to_owned();

    match status {
        401 | 403 => RemoteError::Unauthorized(message),
        _ => RemoteError::Api { status, message },
    }
}
