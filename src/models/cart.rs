use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::product::Product;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CartError {
    #[error("Cart total is too large to be represented")]
    TotalOverflow,
}

/// The user's working selection. The same product may appear more than once.
#[derive(Debug, Default, Clone)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, product: Product) {
        self.items.push(product);
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum over every entry, regardless of how a listing displays them.
    pub fn total(&self) -> Result<Decimal, CartError> {
        self.items.iter().try_fold(Decimal::ZERO, |sum, item| {
            sum.checked_add(item.price).ok_or(CartError::TotalOverflow)
        })
    }

    /// Hands the contents over to a completed checkout and leaves the cart empty.
    pub fn settle(&mut self) -> Vec<Product> {
        std::mem::take(&mut self.items)
    }
}
