//! Cart line items and derived totals.
//!
//! `items` is the sole source of truth: every derived field (subtotal,
//! tax, shipping, total, item count) is recomputed from the line items
//! after each mutation and never adjusted independently. Line items are
//! snapshots of the product at add time and do not track later catalog
//! changes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aurelia_core::{Money, ProductId};

use crate::catalog::Product;
use crate::config::PricingPolicy;

/// One product-quantity pairing within a cart.
///
/// Display fields are copied from the product when the line is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: Uuid,
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub original_price: Option<Money>,
    #[serde(default)]
    pub image: Option<String>,
    pub material: String,
    pub color: String,
    #[serde(default)]
    pub size: Option<String>,
    pub in_stock: bool,
    pub quantity: u32,
}

impl CartItem {
    /// Capture a snapshot of a product as a new line item.
    #[must_use]
    pub fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            original_price: product.original_price,
            image: product.images.first().cloned(),
            material: product.material.clone(),
            color: product.color.clone(),
            size: product.size.clone(),
            in_stock: product.in_stock,
            quantity,
        }
    }

    /// Unit price times quantity, rounded to the cent.
    #[must_use]
    pub fn line_total(&self) -> Money {
        Money::new(
            self.price.amount * Decimal::from(self.quantity),
            self.price.currency_code,
        )
        .round_to_cents()
    }
}

/// Derived monetary totals for a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub shipping: Money,
    pub total: Money,
    /// Sum of quantities, not distinct line count.
    pub item_count: u32,
}

impl CartTotals {
    /// All-zero totals in the policy currency.
    #[must_use]
    pub const fn zero(policy: &PricingPolicy) -> Self {
        let zero = Money::zero(policy.currency);
        Self {
            subtotal: zero,
            tax: zero,
            shipping: zero,
            total: zero,
            item_count: 0,
        }
    }

    /// Derive totals from line items under the given policy.
    ///
    /// Each monetary step is rounded to the cent, half up. An empty item
    /// list yields all-zero totals; the shipping fee only applies once
    /// there is something to ship.
    #[must_use]
    pub fn compute(items: &[CartItem], policy: &PricingPolicy) -> Self {
        if items.is_empty() {
            return Self::zero(policy);
        }
        let currency = policy.currency;

        let raw_subtotal: Decimal = items
            .iter()
            .map(|item| item.price.amount * Decimal::from(item.quantity))
            .sum();
        let subtotal = Money::new(raw_subtotal, currency).round_to_cents();

        let tax = Money::new(subtotal.amount * policy.tax_rate, currency).round_to_cents();

        let shipping = if subtotal.amount >= policy.free_shipping_threshold {
            Money::zero(currency)
        } else {
            Money::new(policy.flat_shipping_fee, currency).round_to_cents()
        };

        let total = Money::new(
            subtotal.amount + tax.amount + shipping.amount,
            currency,
        )
        .round_to_cents();

        let item_count = items.iter().map(|item| item.quantity).sum();

        Self {
            subtotal,
            tax,
            shipping,
            total,
            item_count,
        }
    }
}

/// A cart: ordered line items plus totals derived under a pricing policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    totals: CartTotals,
    policy: PricingPolicy,
}

impl Cart {
    /// An empty cart under the given policy.
    #[must_use]
    pub const fn new(policy: PricingPolicy) -> Self {
        Self {
            items: Vec::new(),
            totals: CartTotals::zero(&policy),
            policy,
        }
    }

    /// Rebuild a cart from stored line items, recomputing all derived
    /// fields rather than trusting stored totals.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>, policy: PricingPolicy) -> Self {
        let totals = CartTotals::compute(&items, &policy);
        Self {
            items,
            totals,
            policy,
        }
    }

    /// Add a product. If a line for this product id already exists, its
    /// quantity is incremented; otherwise a new snapshot line is appended.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id)
        {
            existing.quantity += quantity;
        } else {
            self.items.push(CartItem::snapshot(product, quantity));
        }
        self.recalculate();
    }

    /// Remove the line for a product id. No-op when absent.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.items.retain(|item| item.product_id != *product_id);
        self.recalculate();
    }

    /// Set a line's quantity to exactly `quantity` (not incremental).
    /// A quantity of zero behaves as [`Cart::remove`]. No-op when the
    /// product is not in the cart.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == *product_id)
        {
            item.quantity = quantity;
            self.recalculate();
        }
    }

    /// Empty the cart and reset all derived fields to zero.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recalculate();
    }

    /// Whether a line exists for the product id.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| item.product_id == *product_id)
    }

    /// Current quantity for the product id, 0 when absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| item.product_id == *product_id)
            .map_or(0, |item| item.quantity)
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Current derived totals.
    #[must_use]
    pub const fn totals(&self) -> &CartTotals {
        &self.totals
    }

    /// The pricing policy the totals are derived under.
    #[must_use]
    pub const fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recalculate(&mut self) {
        self.totals = CartTotals::compute(&self.items, &self.policy);
    }
}
