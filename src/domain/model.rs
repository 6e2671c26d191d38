use crate::utils::error::{CartError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Product metadata as served by `GET /products/{id}`.
///
/// Only `id` is interpreted; everything else (title, price, image, ...) is
/// carried through to the cart untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Available quantity as served by `GET /stock/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: u64,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u64,
    #[serde(flatten)]
    pub details: Map<String, Value>,
    pub amount: u32,
}

impl CartItem {
    /// Builds the first cart entry for `product_id` from its catalog record.
    pub fn from_product(product_id: u64, product: Product) -> Self {
        let mut details = product.details;
        // `amount` is ours; a stray field with that name would collide on serialization
        details.remove("amount");
        Self {
            id: product_id,
            details,
            amount: 1,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.details.get("title").and_then(|v| v.as_str())
    }

    pub fn price(&self) -> Option<f64> {
        self.details.get("price").and_then(|v| v.as_f64())
    }

    pub fn subtotal(&self) -> Option<f64> {
        self.price().map(|price| price * f64::from(self.amount))
    }
}

/// Ordered cart contents. Serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from loaded items, enforcing one entry per id and
    /// positive amounts.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self> {
        let mut cart = Self::new();
        for item in items {
            if item.amount == 0 {
                return Err(CartError::CorruptSnapshot {
                    reason: format!("product {} has amount 0", item.id),
                });
            }
            if cart.contains(item.id) {
                return Err(CartError::CorruptSnapshot {
                    reason: format!("product {} appears more than once", item.id),
                });
            }
            cart.items.push(item);
        }
        Ok(cart)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let items: Vec<CartItem> =
            serde_json::from_slice(bytes).map_err(|e| CartError::CorruptSnapshot {
                reason: e.to_string(),
            })?;
        Self::from_items(items)
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    pub fn get(&self, product_id: u64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == product_id)
    }

    pub fn get_mut(&mut self, product_id: u64) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id == product_id)
    }

    pub fn contains(&self, product_id: u64) -> bool {
        self.get(product_id).is_some()
    }

    /// Current amount for `product_id`, zero when absent.
    pub fn amount_of(&self, product_id: u64) -> u32 {
        self.get(product_id).map(|item| item.amount).unwrap_or(0)
    }

    /// Appends a new entry. Returns the item back if its id is already present.
    pub fn push(&mut self, item: CartItem) -> std::result::Result<(), CartItem> {
        if self.contains(item.id) {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove(&mut self, product_id: u64) -> Option<CartItem> {
        let index = self.items.iter().position(|item| item.id == product_id)?;
        Some(self.items.remove(index))
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Sum of subtotals; entries without a numeric price are skipped.
    pub fn total_price(&self) -> f64 {
        self.items.iter().filter_map(CartItem::subtotal).sum()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: u64, price: f64, amount: u32) -> CartItem {
        let mut details = Map::new();
        details.insert("title".to_string(), json!(format!("Shoe {}", id)));
        details.insert("price".to_string(), json!(price));
        CartItem {
            id,
            details,
            amount,
        }
    }

    #[test]
    fn test_snapshot_keeps_opaque_fields() {
        let raw = br#"[{"id":1,"title":"Tenis Runner","price":179.9,"image":"https://cdn/1.jpg","amount":2}]"#;
        let cart = Cart::from_json(raw).unwrap();

        assert_eq!(cart.len(), 1);
        let entry = cart.get(1).unwrap();
        assert_eq!(entry.amount, 2);
        assert_eq!(entry.title(), Some("Tenis Runner"));
        assert_eq!(entry.details.get("image"), Some(&json!("https://cdn/1.jpg")));

        let written: Value = serde_json::from_slice(&cart.to_json().unwrap()).unwrap();
        assert_eq!(
            written,
            json!([{"id":1,"title":"Tenis Runner","price":179.9,"image":"https://cdn/1.jpg","amount":2}])
        );
    }

    #[test]
    fn test_snapshot_rejects_duplicates_and_zero_amounts() {
        let duplicated = br#"[{"id":1,"amount":1},{"id":1,"amount":3}]"#;
        assert!(matches!(
            Cart::from_json(duplicated),
            Err(CartError::CorruptSnapshot { .. })
        ));

        let zero = br#"[{"id":2,"amount":0}]"#;
        assert!(matches!(
            Cart::from_json(zero),
            Err(CartError::CorruptSnapshot { .. })
        ));

        assert!(matches!(
            Cart::from_json(b"not json"),
            Err(CartError::CorruptSnapshot { .. })
        ));
    }

    #[test]
    fn test_push_refuses_existing_id() {
        let mut cart = Cart::new();
        assert!(cart.push(item(1, 10.0, 1)).is_ok());
        let rejected = cart.push(item(1, 10.0, 5)).unwrap_err();
        assert_eq!(rejected.amount, 5);
        assert_eq!(cart.amount_of(1), 1);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut cart = Cart::from_items(vec![item(1, 1.0, 1), item(2, 1.0, 1), item(3, 1.0, 1)])
            .unwrap();
        assert!(cart.remove(2).is_some());
        assert!(cart.remove(2).is_none());
        let ids: Vec<u64> = cart.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_totals() {
        let mut unpriced = item(3, 0.0, 4);
        unpriced.details.remove("price");
        let cart =
            Cart::from_items(vec![item(1, 10.5, 2), item(2, 100.0, 1), unpriced]).unwrap();

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total_units(), 7);
        assert!((cart.total_price() - 121.0).abs() < f64::EPSILON);
        assert_eq!(cart.amount_of(99), 0);
    }

    #[test]
    fn test_from_product_starts_at_one() {
        let product: Product =
            serde_json::from_value(json!({"id": 7, "title": "Boot", "price": 50, "amount": 9}))
                .unwrap();
        let entry = CartItem::from_product(7, product);
        assert_eq!(entry.amount, 1);
        assert!(!entry.details.contains_key("amount"));
        assert_eq!(entry.price(), Some(50.0));
    }
}
