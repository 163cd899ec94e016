//! Order assembly and confirmation handling.
//!
//! Builds the serializable order payload from a validated cart and
//! applies the backend's confirmation: a successful confirmation clears
//! the cart. Payment capture and inventory reservation happen on the
//! backend and are not modeled here.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use aurelia_core::{Money, ProductId};

use crate::cart::Cart;
use crate::remote::{self, OrderConfirmation, RemoteError};

/// Checkout errors.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Shipping address is required")]
    MissingAddress,

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Buyer contact details collected at checkout.
#[derive(Debug, Clone)]
pub struct CheckoutContact {
    pub email: String,
    pub shipping_address: String,
}

/// One order line, denormalized from a cart line item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

/// The serializable order payload sent to the backend.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    pub items: Vec<OrderLine>,
    pub subtotal: Money,
    pub tax: Money,
    pub shipping: Money,
    pub total: Money,
    pub email: String,
    pub shipping_address: String,
}

/// Assemble an order request from a non-empty cart and validated
/// contact details.
///
/// # Errors
///
/// Returns a validation error for an empty cart, an email without `@`,
/// or a blank shipping address.
pub fn build_order_request(
    cart: &Cart,
    contact: &CheckoutContact,
) -> Result<OrderRequest, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if contact.email.is_empty() || !contact.email.contains('@') {
        return Err(CheckoutError::InvalidEmail(contact.email.clone()));
    }
    if contact.shipping_address.trim().is_empty() {
        return Err(CheckoutError::MissingAddress);
    }

    let totals = cart.totals();
    Ok(OrderRequest {
        items: cart
            .items()
            .iter()
            .map(|item| OrderLine {
                product_id: item.product_id.clone(),
                name: item.name.clone(),
                unit_price: item.price,
                quantity: item.quantity,
            })
            .collect(),
        subtotal: totals.subtotal,
        tax: totals.tax,
        shipping: totals.shipping,
        total: totals.total,
        email: contact.email.clone(),
        shipping_address: contact.shipping_address.clone(),
    })
}

/// Apply the backend's order response to the cart.
///
/// A payload that normalizes to a confirmation clears the cart; a
/// malformed payload leaves the cart untouched.
///
/// # Errors
///
/// Returns the normalization error when the payload is not a
/// confirmation.
pub fn apply_confirmation(
    cart: &mut Cart,
    payload: &Value,
) -> Result<OrderConfirmation, CheckoutError> {
    let confirmation = remote::normalize_order(payload)?;
    cart.clear();
    Ok(confirmation)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use crate::config::PricingPolicy;
    use serde_json::json;

    fn contact() -> CheckoutContact {
        CheckoutContact {
            email: "iris@example.com".to_owned(),
            shipping_address: "12 Foundry Lane, Portland OR".to_owned(),
        }
    }

    fn cart_with_items() -> Cart {
        let catalog = CatalogStore::builtin();
        let mut cart = Cart::new(PricingPolicy::default());
        cart.add(&catalog.products()[0], 2);
        cart
    }

    #[test]
    fn test_build_order_request_carries_cart_totals() {
        let cart = cart_with_items();
        let request = build_order_request(&cart, &contact()).unwrap();

        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].quantity, 2);
        assert_eq!(request.subtotal, cart.totals().subtotal);
        assert_eq!(request.total, cart.totals().total);
    }

    #[test]
    fn test_build_order_request_rejects_empty_cart() {
        let cart = Cart::new(PricingPolicy::default());
        let err = build_order_request(&cart, &contact()).unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[test]
    fn test_build_order_request_validates_contact() {
        let cart = cart_with_items();

        let bad_email = CheckoutContact {
            email: "not-an-email".to_owned(),
            ..contact()
        };
        assert!(matches!(
            build_order_request(&cart, &bad_email).unwrap_err(),
            CheckoutError::InvalidEmail(_)
        ));

        let no_address = CheckoutContact {
            shipping_address: "   ".to_owned(),
            ..contact()
        };
        assert!(matches!(
            build_order_request(&cart, &no_address).unwrap_err(),
            CheckoutError::MissingAddress
        ));
    }

    #[test]
    fn test_confirmation_clears_cart() {
        let mut cart = cart_with_items();
        let confirmation =
            apply_confirmation(&mut cart, &json!({"order": {"id": "ord-7", "status": "paid"}}))
                .unwrap();

        assert_eq!(confirmation.id.as_str(), "ord-7");
        assert!(cart.is_empty());
        assert!(cart.totals().total.is_zero());
    }

    #[test]
    fn test_malformed_confirmation_leaves_cart_untouched() {
        let mut cart = cart_with_items();
        let err = apply_confirmation(&mut cart, &json!({"ok": true})).unwrap_err();
        assert!(matches!(err, CheckoutError::Remote(_)));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_order_request_serializes_to_json() {
        let cart = cart_with_items();
        let request = build_order_request(&cart, &contact()).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["items"][0]["product_id"], "diamond-stud-earrings");
        assert_eq!(value["email"], "iris@example.com");
    }
}
