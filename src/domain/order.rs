use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
    #[error("Your order is empty!")]
    Empty,
}

/// Parses a menu price such as `$12.50`. The currency sign is optional.
pub fn parse_price(raw: &str) -> Result<Decimal, OrderError> {
    let amount = raw.trim().trim_start_matches('$').trim();
    match Decimal::from_str(amount) {
        Ok(price) if price >= Decimal::ZERO => Ok(price),
        _ => Err(OrderError::InvalidPrice(raw.to_string())),
    }
}

/// Formats an amount the way the menu shows it, e.g. `$12.50`.
pub fn format_price(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    pub price: Decimal,
    pub prep_time: Option<u32>,
    pub quantity: u32,
}

impl OrderItem {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The dishes picked from the menu, in the order they were first added.
///
/// Items are keyed by name: adding a dish that is already listed bumps its
/// quantity instead of adding a second line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderList {
    items: Vec<OrderItem>,
}

impl OrderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, name: &str, price: Decimal, prep_time: Option<u32>) {
        if let Some(item) = self.items.iter_mut().find(|item| item.name == name) {
            item.quantity += 1;
            return;
        }
        self.items.push(OrderItem {
            name: name.to_string(),
            price,
            prep_time,
            quantity: 1,
        });
    }

    /// Adds `change` to an item's quantity. An item whose quantity drops to
    /// zero or below is removed.
    ///
    /// Returns the new quantity, or `None` when no item has that name.
    pub fn update_quantity(&mut self, name: &str, change: i64) -> Option<u32> {
        let index = self.items.iter().position(|item| item.name == name)?;
        let quantity = i64::from(self.items[index].quantity) + change;
        if quantity <= 0 {
            self.items.remove(index);
            return Some(0);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.items[index].quantity = quantity;
        Some(quantity)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.name != name);
        self.items.len() != before
    }

    pub fn total(&self) -> Decimal {
        self.items.iter().map(OrderItem::subtotal).sum()
    }

    /// The items to hand to checkout. An empty order cannot proceed.
    pub fn checkout(&self) -> Result<&[OrderItem], OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::Empty);
        }
        Ok(&self.items)
    }
}
