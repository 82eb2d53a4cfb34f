//! Order messages
//!
//! Checkout produces one message per store, sent through a `wa.me` link to the
//! store's contact number.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    cart::{Cart, StoreGroup},
    pricing::{TotalPriceError, format_money, format_price},
};

/// Country code prefixed to every contact number.
pub const COUNTRY_CODE: &str = "55";

const GREETING: &str = "Olá! Vi esses produtos no ACHA AI e quero comprar:";

/// Errors raised while composing an order.
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    /// The store's contact has no digits to dial.
    #[error("store {0:?} has no contact number")]
    MissingContact(String),

    /// The total could not be computed.
    #[error(transparent)]
    Total(#[from] TotalPriceError),
}

/// A ready-to-send order for one store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreOrder {
    /// Store the order is addressed to
    pub store_name: String,

    /// Order message text
    pub message: String,

    /// Messaging deep link carrying the message
    pub link: String,

    /// Sum of the store's lines
    pub total: Money<'static, Currency>,
}

/// Build the order message for one store's lines.
///
/// Each line is named with its variant, e.g. `Camiseta (Azul / M)`, so the store
/// sees which color and size was picked.
///
/// # Errors
///
/// Returns [`OrderError::Total`] if the total overflows.
pub fn compose_message(group: &StoreGroup<'_>) -> Result<String, OrderError> {
    let total = group.total()?;

    let mut message = format!("{GREETING}\n\n");

    for item in &group.items {
        message.push_str(&format!(
            "📦 {}\n   Quantidade: {}\n   Preço: {}\n   Subtotal: {}\n\n",
            item.display_name(),
            item.quantity,
            format_price(item.price),
            format_price(item.subtotal()),
        ));
    }

    message.push_str(&format!("💰 Total: {}", format_money(&total)));

    Ok(message)
}

/// Digits of a free-form phone number.
pub fn contact_digits(contact: &str) -> String {
    contact.chars().filter(char::is_ascii_digit).collect()
}

/// `https://wa.me/55{digits}?text={message}` for the given contact.
///
/// # Errors
///
/// Returns [`OrderError::MissingContact`] if the contact has no digits.
pub fn whatsapp_link(contact: &str, message: &str) -> Result<String, OrderError> {
    let digits = contact_digits(contact);

    if digits.is_empty() {
        return Err(OrderError::MissingContact(contact.to_string()));
    }

    Ok(format!(
        "https://wa.me/{COUNTRY_CODE}{digits}?text={}",
        urlencoding::encode(message)
    ))
}

/// Compose the order for one store group.
///
/// # Errors
///
/// - [`OrderError::MissingContact`]: the store has no dialable contact.
/// - [`OrderError::Total`]: the total overflows.
pub fn compose_order(group: &StoreGroup<'_>) -> Result<StoreOrder, OrderError> {
    let message = compose_message(group)?;

    let link = whatsapp_link(&group.store.whatsapp, &message)
        .map_err(|_err| OrderError::MissingContact(group.store.name.clone()))?;

    Ok(StoreOrder {
        store_name: group.store.name.clone(),
        message,
        link,
        total: group.total()?,
    })
}

/// One order per store in the cart; a failing store does not affect the others.
pub fn compose_orders(cart: &Cart) -> Vec<Result<StoreOrder, OrderError>> {
    cart.group_by_store().iter().map(compose_order).collect()
}
