//! Storefront configuration loaded from environment variables.
//!
//! Carries the canonical pricing policy: exactly one tax rate, one
//! free-shipping threshold, and one flat shipping fee, shared by every
//! call site that derives cart totals.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults are the production policy.
//!
//! - `AURELIA_CURRENCY` - ISO 4217 store currency (default: USD)
//! - `AURELIA_TAX_RATE` - sales tax rate as a decimal fraction (default: 0.08)
//! - `AURELIA_FREE_SHIPPING_THRESHOLD` - subtotal at which shipping becomes
//!   free, inclusive (default: 100)
//! - `AURELIA_SHIPPING_FEE` - flat shipping fee below the threshold
//!   (default: 9.99)
//! - `AURELIA_CONTENT_DIR` - catalog content directory; the embedded seed
//!   catalog is used when unset
//! - `AURELIA_STATE_DIR` - directory for persisted cart/wishlist state
//!   (default: .aurelia)

use std::path::PathBuf;

use rust_decimal::{Decimal, dec};
use thiserror::Error;

use aurelia_core::CurrencyCode;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid pricing policy: {0}")]
    InvalidPolicy(String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Pricing policy applied to every cart computation.
    pub pricing: PricingPolicy,
    /// Catalog content directory; `None` means use the embedded seed data.
    pub content_dir: Option<PathBuf>,
    /// Directory for persisted cart/wishlist state.
    pub state_dir: PathBuf,
}

/// The canonical pricing policy.
///
/// Exactly one of these exists per configuration; cart totals are never
/// derived from any other constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Store currency for all derived totals.
    pub currency: CurrencyCode,
    /// Sales tax rate as a decimal fraction of the subtotal.
    pub tax_rate: Decimal,
    /// Subtotal at which shipping becomes free (inclusive).
    pub free_shipping_threshold: Decimal,
    /// Flat shipping fee charged below the threshold.
    pub flat_shipping_fee: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::USD,
            tax_rate: dec!(0.08),
            free_shipping_threshold: dec!(100),
            flat_shipping_fee: dec!(9.99),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unparseable, or if
    /// the resulting pricing policy is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let currency = match get_env_or_default("AURELIA_CURRENCY", "USD").as_str() {
            "USD" => CurrencyCode::USD,
            "EUR" => CurrencyCode::EUR,
            "GBP" => CurrencyCode::GBP,
            "CAD" => CurrencyCode::CAD,
            "AUD" => CurrencyCode::AUD,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "AURELIA_CURRENCY".to_owned(),
                    format!("unknown currency code: {other}"),
                ));
            }
        };

        let pricing = PricingPolicy {
            currency,
            tax_rate: get_decimal_or_default("AURELIA_TAX_RATE", dec!(0.08))?,
            free_shipping_threshold: get_decimal_or_default(
                "AURELIA_FREE_SHIPPING_THRESHOLD",
                dec!(100),
            )?,
            flat_shipping_fee: get_decimal_or_default("AURELIA_SHIPPING_FEE", dec!(9.99))?,
        };
        validate_policy(&pricing)?;

        Ok(Self {
            pricing,
            content_dir: get_optional_env("AURELIA_CONTENT_DIR").map(PathBuf::from),
            state_dir: PathBuf::from(get_env_or_default("AURELIA_STATE_DIR", ".aurelia")),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Get a decimal environment variable with a default value.
fn get_decimal_or_default(key: &str, default: Decimal) -> Result<Decimal, ConfigError> {
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse::<Decimal>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string())),
    }
}

/// Validate that a pricing policy is internally consistent.
fn validate_policy(policy: &PricingPolicy) -> Result<(), ConfigError> {
    if policy.tax_rate < Decimal::ZERO || policy.tax_rate >= Decimal::ONE {
        return Err(ConfigError::InvalidPolicy(format!(
            "tax rate must be in [0, 1), got {}",
            policy.tax_rate
        )));
    }
    if policy.free_shipping_threshold < Decimal::ZERO {
        return Err(ConfigError::InvalidPolicy(format!(
            "free shipping threshold must be non-negative, got {}",
            policy.free_shipping_threshold
        )));
    }
    if policy.flat_shipping_fee < Decimal::ZERO {
        return Err(ConfigError::InvalidPolicy(format!(
            "shipping fee must be non-negative, got {}",
            policy.flat_shipping_fee
        )));
    }
    Ok(())
}
