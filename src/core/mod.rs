pub mod cart;

pub use crate::domain::model::{Cart, CartItem, Product, Stock};
pub use crate::domain::ports::{CartMessages, CatalogApi, ConfigProvider, Notifier, Storage};
pub use crate::utils::error::Result;
pub use cart::{CartManager, CartOptions, Operation};
