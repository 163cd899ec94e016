//! Persistence port for cart and wishlist state.
//!
//! State is persisted as string-keyed JSON blobs under fixed keys, one
//! blob per key, overwritten on every mutation (last write wins; no
//! cross-process reconciliation). Loading is defensive: derived cart
//! totals are recomputed from the stored line items rather than trusted,
//! and a corrupt blob degrades to empty state with a warning instead of
//! an error.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::cart::{Cart, CartItem, CartTotals};
use crate::config::PricingPolicy;
use crate::wishlist::Wishlist;

/// Fixed storage key for the cart blob.
pub const CART_KEY: &str = "cart";
/// Fixed storage key for the wishlist blob.
pub const WISHLIST_KEY: &str = "wishlist";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string-keyed blob store.
///
/// Implementations persist whole snapshots; there is no partial update.
pub trait StateStore {
    /// Overwrite the blob stored under `key`.
    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError>;

    /// Load the blob stored under `key`, or `None` if absent.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Delete the blob stored under `key`. No-op when absent.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// File-backed store: one `<key>.json` file per key under a state
/// directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// The state directory this store writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StateStore for FileStore {
    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        fs::write(self.path(key), blob)?;
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// The persisted cart structure: the full cart, plus a write timestamp.
///
/// Stored totals exist for inspection only; loading always recomputes
/// them from `items`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SavedCart {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
    pub saved_at: DateTime<Utc>,
}

/// Persist the full cart under [`CART_KEY`].
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_cart(store: &impl StateStore, cart: &Cart) -> Result<(), StorageError> {
    let saved = SavedCart {
        items: cart.items().to_vec(),
        totals: cart.totals().clone(),
        saved_at: Utc::now(),
    };
    store.save(CART_KEY, &serde_json::to_string(&saved)?)
}

/// Load the cart stored under [`CART_KEY`], recomputing derived totals.
///
/// A missing or unparseable blob yields an empty cart; parse failures
/// are logged, not surfaced.
///
/// # Errors
///
/// Returns an error only if the underlying store read fails.
pub fn load_cart(store: &impl StateStore, policy: &PricingPolicy) -> Result<Cart, StorageError> {
    let Some(blob) = store.load(CART_KEY)? else {
        return Ok(Cart::new(policy.clone()));
    };
    match serde_json::from_str::<SavedCart>(&blob) {
        Ok(saved) => Ok(Cart::from_items(saved.items, policy.clone())),
        Err(e) => {
            warn!(error = %e, key = CART_KEY, "Discarding corrupt cart state");
            Ok(Cart::new(policy.clone()))
        }
    }
}

/// Persist the wishlist under [`WISHLIST_KEY`].
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_wishlist(store: &impl StateStore, wishlist: &Wishlist) -> Result<(), StorageError> {
    store.save(WISHLIST_KEY, &serde_json::to_string(wishlist)?)
}

/// Load the wishlist stored under [`WISHLIST_KEY`].
///
/// A missing or unparseable blob yields an empty wishlist.
///
/// # Errors
///
/// Returns an error only if the underlying store read fails.
pub fn load_wishlist(store: &impl StateStore) -> Result<Wishlist, StorageError> {
    let Some(blob) = store.load(WISHLIST_KEY)? else {
        return Ok(Wishlist::new());
    };
    match serde_json::from_str::<Wishlist>(&blob) {
        Ok(wishlist) => Ok(wishlist),
        Err(e) => {
            warn!(error = %e, key = WISHLIST_KEY, "Discarding corrupt wishlist state");
            Ok(Wishlist::new())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;

    fn store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_cart_round_trip_recomputes_totals() {
        let (_dir, store) = store();
        let catalog = CatalogStore::builtin();
        let policy = PricingPolicy::default();

        let mut cart = Cart::new(policy.clone());
        cart.add(&catalog.products()[0], 2);
        cart.add(&catalog.products()[1], 1);
        save_cart(&store, &cart).unwrap();

        let reloaded = load_cart(&store, &policy).unwrap();
        assert_eq!(reloaded.items(), cart.items());
        assert_eq!(reloaded.totals(), cart.totals());
    }

    #[test]
    fn test_load_ignores_stored_totals() {
        let (_dir, store) = store();
        let catalog = CatalogStore::builtin();
        let policy = PricingPolicy::default();

        let mut cart = Cart::new(policy.clone());
        cart.add(&catalog.products()[0], 1);
        save_cart(&store, &cart).unwrap();

        // Tamper with the stored totals; items are untouched.
        let blob = store.load(CART_KEY).unwrap().unwrap();
        let mut saved: serde_json::Value = serde_json::from_str(&blob).unwrap();
        saved["totals"]["total"]["amount"] = serde_json::Value::String("9999.99".to_owned());
        store
            .save(CART_KEY, &serde_json::to_string(&saved).unwrap())
            .unwrap();

        let reloaded = load_cart(&store, &policy).unwrap();
        assert_eq!(reloaded.totals(), cart.totals());
    }

    #[test]
    fn test_missing_blob_yields_empty_state() {
        let (_dir, store) = store();
        let cart = load_cart(&store, &PricingPolicy::default()).unwrap();
        assert!(cart.is_empty());
        let wishlist = load_wishlist(&store).unwrap();
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_corrupt_blob_yields_empty_state() {
        let (_dir, store) = store();
        store.save(CART_KEY, "{not json").unwrap();
        store.save(WISHLIST_KEY, "[1, 2, 3]").unwrap();

        let cart = load_cart(&store, &PricingPolicy::default()).unwrap();
        assert!(cart.is_empty());
        let wishlist = load_wishlist(&store).unwrap();
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_wishlist_round_trip() {
        let (_dir, store) = store();
        let catalog = CatalogStore::builtin();

        let mut wishlist = Wishlist::new();
        wishlist.add(&catalog.products()[2]);
        save_wishlist(&store, &wishlist).unwrap();

        let reloaded = load_wishlist(&store).unwrap();
        assert_eq!(reloaded, wishlist);
    }

    #[test]
    fn test_remove_is_noop_when_absent() {
        let (_dir, store) = store();
        store.remove("never-written").unwrap();
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let (_dir, store) = store();
        store.save("k", "first").unwrap();
        store.save("k", "second").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("second"));
    }
}
