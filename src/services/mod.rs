pub mod catalog_service;
pub mod checkout_service;

pub use catalog_service::*;
pub use checkout_service::*;
