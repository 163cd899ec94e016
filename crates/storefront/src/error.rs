//! Unified error handling.
//!
//! Provides a unified `StorefrontError` type for callers that drive the
//! library as a whole (the CLI, a web tier). Subsystems keep their own
//! error enums and convert via `#[from]`. Nothing in this crate is fatal
//! to the process; callers are expected to degrade to an empty or
//! previous-known-good state plus a notification.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::remote::RemoteError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Catalog data could not be read or parsed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisted state could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A backend payload or response failed normalization.
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Checkout validation or confirmation failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
