use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Session key under which the cart is stored.
pub const CART_SESSION_KEY: &str = "cart";

/// Shopping cart kept in the visitor's session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Quantities keyed by product id.
    lines: BTreeMap<i32, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity(&self, product_id: i32) -> u32 {
        self.lines.get(&product_id).copied().unwrap_or(0)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.values().sum()
    }

    pub fn lines(&self) -> impl Iterator<Item = (i32, u32)> + '_ {
        self.lines.iter().map(|(id, quantity)| (*id, *quantity))
    }

    /// Add one unit of `product_id`, never exceeding `available`.
    ///
    /// Returns the resulting quantity.
    pub fn add(&mut self, product_id: i32, available: u32) -> u32 {
        if available == 0 {
            return self.quantity(product_id);
        }
        let quantity = self.lines.entry(product_id).or_insert(0);
        *quantity = (*quantity + 1).min(available);
        *quantity
    }

    pub fn remove(&mut self, product_id: i32) -> bool {
        self.lines.remove(&product_id).is_some()
    }

    /// Clamp a line to the currently available stock, dropping it at zero.
    pub fn clamp(&mut self, product_id: i32, available: u32) {
        if available == 0 {
            self.lines.remove(&product_id);
        } else if let Some(quantity) = self.lines.get_mut(&product_id) {
            *quantity = (*quantity).min(available);
        }
    }
}
