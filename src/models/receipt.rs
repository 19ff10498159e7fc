use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::product::Product;

/// A settled checkout. Printed once, never stored.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub number: Uuid,
    pub issued_at: DateTime<Utc>,
    pub items: Vec<Product>,
    pub total: Decimal,
    pub tendered: Decimal,
}

impl Receipt {
    pub fn new(items: Vec<Product>, total: Decimal, tendered: Decimal) -> Self {
        Self {
            number: Uuid::new_v4(),
            issued_at: Utc::now(),
            items,
            total,
            tendered,
        }
    }

    pub fn change(&self) -> Decimal {
        self.tendered - self.total
    }

    pub fn short_number(&self) -> String {
        format!("{:.8}", self.number.to_string())
    }
}
