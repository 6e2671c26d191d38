use crate::core::{Cart, CartItem, CartMessages, CatalogApi, ConfigProvider, Notifier, Storage};
use crate::utils::error::{CartError, ErrorCategory, Result};
use std::fmt;
use tokio::sync::Mutex;

pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// The three mutating cart operations, used to pick the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl Operation {
    pub fn failure_message<'a>(&self, messages: &'a CartMessages, err: &CartError) -> &'a str {
        match self {
            Operation::Add if err.is_stock_violation() => &messages.out_of_stock,
            Operation::UpdateAmount if err.is_stock_violation() => &messages.out_of_stock,
            Operation::Add => &messages.add_failed,
            Operation::Remove => &messages.remove_failed,
            Operation::UpdateAmount => &messages.update_failed,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "add product",
            Operation::Remove => "remove product",
            Operation::UpdateAmount => "update product amount",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartOptions {
    pub storage_key: String,
    pub messages: CartMessages,
}

impl Default for CartOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            messages: CartMessages::default(),
        }
    }
}

impl CartOptions {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            storage_key: config.storage_key().to_string(),
            messages: config.messages().clone(),
        }
    }
}

/// Cart state mirrored to storage and validated against remote stock.
///
/// Every mutating operation holds the state lock from its first read until
/// the new snapshot is committed, so overlapping calls on a shared manager
/// are applied one after the other. Storage is written before the in-memory
/// cart is replaced; a failed write leaves both untouched.
///
/// Failures are logged, reported through the [`Notifier`] with the
/// operation's fixed message, and returned to the caller.
pub struct CartManager<A: CatalogApi, S: Storage, N: Notifier> {
    api: A,
    storage: S,
    notifier: N,
    options: CartOptions,
    cart: Mutex<Cart>,
}

impl<A: CatalogApi, S: Storage, N: Notifier> CartManager<A, S, N> {
    /// Reads the persisted snapshot once; a missing entry starts an empty cart.
    pub async fn load(api: A, storage: S, notifier: N, options: CartOptions) -> Result<Self> {
        let cart = match storage.read(&options.storage_key).await? {
            Some(bytes) => Cart::from_json(&bytes)?,
            None => {
                tracing::debug!("No saved cart under '{}'", options.storage_key);
                Cart::new()
            }
        };

        tracing::info!(
            "Loaded cart '{}' with {} product(s)",
            options.storage_key,
            cart.len()
        );

        Ok(Self {
            api,
            storage,
            notifier,
            options,
            cart: Mutex::new(cart),
        })
    }

    /// Snapshot of the current cart.
    pub async fn cart(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    pub fn options(&self) -> &CartOptions {
        &self.options
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub async fn add_product(&self, product_id: u64) -> Result<()> {
        let mut cart = self.cart.lock().await;
        let outcome = self.try_add(&cart, product_id).await;
        self.finish(Operation::Add, &mut cart, outcome).await?;

        tracing::info!(
            "🛒 Added product {} (amount {})",
            product_id,
            cart.amount_of(product_id)
        );
        Ok(())
    }

    pub async fn remove_product(&self, product_id: u64) -> Result<()> {
        let mut cart = self.cart.lock().await;
        let outcome = Self::try_remove(&cart, product_id);
        self.finish(Operation::Remove, &mut cart, outcome).await?;

        tracing::info!("🗑️ Removed product {}", product_id);
        Ok(())
    }

    pub async fn update_product_amount(&self, product_id: u64, amount: u32) -> Result<()> {
        let mut cart = self.cart.lock().await;
        let outcome = self.try_update(&cart, product_id, amount).await;
        self.finish(Operation::UpdateAmount, &mut cart, outcome).await?;

        if cart.contains(product_id) {
            tracing::info!("✏️ Product {} amount set to {}", product_id, amount);
        }
        Ok(())
    }

    async fn try_add(&self, cart: &Cart, product_id: u64) -> Result<Cart> {
        let stock = self.api.fetch_stock(product_id).await?;
        let requested = cart.amount_of(product_id).saturating_add(1);

        if requested > stock.amount {
            return Err(CartError::OutOfStock {
                product_id,
                requested,
                available: stock.amount,
            });
        }

        let mut updated = cart.clone();
        if let Some(item) = updated.get_mut(product_id) {
            item.amount = requested;
        } else {
            let product = self.api.fetch_product(product_id).await?;
            updated
                .push(CartItem::from_product(product_id, product))
                .map_err(|item| CartError::CorruptSnapshot {
                    reason: format!("product {} is already in the cart", item.id),
                })?;
        }
        Ok(updated)
    }

    fn try_remove(cart: &Cart, product_id: u64) -> Result<Cart> {
        let mut updated = cart.clone();
        updated
            .remove(product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        Ok(updated)
    }

    /// Stock is checked before anything else, so an unreachable API wins over
    /// a bad amount. A product that is not in the cart is left alone.
    async fn try_update(&self, cart: &Cart, product_id: u64, amount: u32) -> Result<Cart> {
        let stock = self.api.fetch_stock(product_id).await?;

        if amount < 1 {
            return Err(CartError::InvalidAmount { product_id, amount });
        }
        if amount > stock.amount {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let mut updated = cart.clone();
        match updated.get_mut(product_id) {
            Some(item) => item.amount = amount,
            None => tracing::debug!("Product {} is not in the cart, nothing to update", product_id),
        }
        Ok(updated)
    }

    /// Persists a successful outcome and swaps it in, or reports the failure.
    async fn finish(
        &self,
        operation: Operation,
        current: &mut Cart,
        outcome: Result<Cart>,
    ) -> Result<()> {
        let committed = match outcome {
            Ok(updated) => match self.persist(&updated).await {
                Ok(()) => Ok(updated),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };

        match committed {
            Ok(updated) => {
                *current = updated;
                Ok(())
            }
            Err(err) => {
                self.report(operation, &err);
                Err(err)
            }
        }
    }

    async fn persist(&self, cart: &Cart) -> Result<()> {
        let data = cart.to_json()?;
        tracing::debug!(
            "Persisting {} product(s) under '{}'",
            cart.len(),
            self.options.storage_key
        );
        self.storage.write(&self.options.storage_key, &data).await
    }

    fn report(&self, operation: Operation, err: &CartError) {
        if err.category() == ErrorCategory::BusinessRule {
            tracing::warn!("Rejected {}: {}", operation, err);
        } else {
            tracing::error!("Failed to {}: {} (Category: {:?})", operation, err, err.category());
        }
        self.notifier
            .error(operation.failure_message(&self.options.messages, err));
    }
}
