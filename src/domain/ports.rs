use crate::domain::model::{Product, Stock};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// String-keyed persistence for the serialized cart.
pub trait Storage: Send + Sync {
    /// Returns `None` when nothing has been stored under `key` yet.
    fn read(&self, key: &str) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write(&self, key: &str, data: &[u8]) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Remote stock and product queries.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_stock(&self, product_id: u64) -> Result<Stock>;
    async fn fetch_product(&self, product_id: u64) -> Result<Product>;
}

/// User-facing notifications (the storefront shows these as toasts).
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn storage_path(&self) -> &str;
    fn storage_key(&self) -> &str;
    fn messages(&self) -> &CartMessages;
}

/// Fixed messages shown to the user when an operation fails.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CartMessages {
    pub out_of_stock: String,
    pub add_failed: String,
    pub remove_failed: String,
    pub update_failed: String,
}

impl Default for CartMessages {
    fn default() -> Self {
        Self {
            out_of_stock: "Requested quantity is out of stock".to_string(),
            add_failed: "Error adding product".to_string(),
            remove_failed: "Error removing product".to_string(),
            update_failed: "Error updating product quantity".to_string(),
        }
    }
}
