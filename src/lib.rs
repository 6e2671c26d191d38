pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{ConsoleNotifier, HttpCatalog, LocalStorage};
pub use config::CartConfig;
pub use crate::core::{Cart, CartItem, CartManager, CartOptions};
pub use utils::error::{CartError, Result};
