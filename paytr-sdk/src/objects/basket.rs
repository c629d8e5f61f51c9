//! Basket items and their `user_basket` encoding.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A single basket line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasketItem {
    /// Product name as shown on the checkout page.
    pub name: String,
    /// Price of one unit in major currency units (e.g. `18.00` TL).
    pub unit_price: Decimal,
    /// Number of units.
    pub quantity: u32,
}

impl BasketItem {
    pub fn new(name: impl Into<String>, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
        }
    }
}

/// The basket could not be serialized.
#[derive(Debug, thiserror::Error)]
#[error("failed to encode basket: {0}")]
pub struct BasketError(#[from] serde_json::Error);

/// Positional record `[name, price, quantity]`, serialized as a JSON array.
#[derive(Serialize)]
struct BasketRecord<'a>(&'a str, String, u32);

/// Encode a basket as PayTR's `user_basket`: base64 of a JSON array of
/// `[name, price, quantity]` records, in insertion order.
pub fn encode_basket(items: &[BasketItem]) -> Result<String, BasketError> {
    let records: Vec<BasketRecord<'_>> = items
        .iter()
        .map(|item| BasketRecord(&item.name, item.unit_price.to_string(), item.quantity))
        .collect();
    let json = serde_json::to_vec(&records)?;
    Ok(fast32::base64::RFC4648.encode(&json))
}

/// Sum of `unit_price * quantity` in minor units (kuruş), or `None` if the
/// total is negative, overflows, or does not land on a whole minor unit.
pub fn total_in_minor_units(items: &[BasketItem]) -> Option<u64> {
    let mut total = Decimal::ZERO;
    for item in items {
        let line = item.unit_price.checked_mul(Decimal::from(item.quantity))?;
        total = total.checked_add(line)?;
    }
    let minor = total.checked_mul(Decimal::ONE_HUNDRED)?;
    if !minor.fract().is_zero() {
        return None;
    }
    minor.to_u64()
}
