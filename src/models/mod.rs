pub mod product;
pub mod catalog;
pub mod cart;
pub mod receipt;

pub use product::*;
pub use catalog::*;
pub use cart::*;
pub use receipt::*;
