#![allow(dead_code)]

use httpmock::prelude::*;
use serde_json::json;
use std::sync::Mutex;
use storefront_cart::core::Notifier;

/// Collects user-facing messages instead of printing them.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub async fn mock_stock(server: &MockServer, product_id: u64, amount: u32) {
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/stock/{}", product_id));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"id": product_id, "amount": amount}));
        })
        .await;
}

pub async fn mock_product(server: &MockServer, product_id: u64, title: &str, price: f64) {
    let body = json!({
        "id": product_id,
        "title": title,
        "price": price,
        "image": format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis{}.jpg", product_id)
    });
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/products/{}", product_id));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(body.clone());
        })
        .await;
}
