use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
}

// row dto, one per catalog line
#[derive(Debug, Deserialize, Validate)]
pub struct StoreProductRequest {
    #[validate(length(min = 1, message = "Id is required"))]
    pub id: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    pub price: String,
}

// custom error
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Price '{value}' is not a decimal number")]
    InvalidPrice { value: String },

    #[error("Price {value} must not be negative")]
    NegativePrice { value: Decimal },
}

impl Product {
    pub fn new(request: StoreProductRequest) -> Result<Self, ProductError> {
        request.validate()?;

        let price = Decimal::from_str(request.price.trim()).map_err(|_| ProductError::InvalidPrice {
            value: request.price.clone(),
        })?;
        if price < Decimal::ZERO {
            return Err(ProductError::NegativePrice { value: price });
        }

        Ok(Self {
            id: request.id.trim().to_string(),
            name: request.name.trim().to_string(),
            price,
        })
    }

    /// Case-insensitive id comparison used by catalog lookup.
    pub fn has_id(&self, id: &str) -> bool {
        self.id.to_uppercase() == id.trim().to_uppercase()
    }
}
