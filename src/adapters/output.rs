use crate::core::Cart;
use crate::utils::error::{CartError, Result};
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(CartError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Supported formats: table, json, csv".to_string(),
            }),
        }
    }
}

pub fn render_cart(cart: &Cart, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(cart)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(cart)?),
        OutputFormat::Csv => render_csv(cart),
    }
}

fn render_table(cart: &Cart) -> String {
    if cart.is_empty() {
        return "🛒 Cart is empty\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:>6}  {:<40}  {:>10}  {:>6}  {:>12}", "ID", "TITLE", "PRICE", "QTY", "SUBTOTAL");
    for item in cart {
        let _ = writeln!(
            out,
            "{:>6}  {:<40}  {:>10}  {:>6}  {:>12}",
            item.id,
            item.title().unwrap_or("-"),
            money(item.price()),
            item.amount,
            money(item.subtotal()),
        );
    }
    let _ = writeln!(
        out,
        "🛒 {} product(s), {} unit(s), total {:.2}",
        cart.len(),
        cart.total_units(),
        cart.total_price()
    );
    out
}

fn render_csv(cart: &Cart) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["id", "title", "price", "amount", "subtotal"])?;
    for item in cart {
        writer.write_record([
            item.id.to_string(),
            item.title().unwrap_or_default().to_string(),
            item.price().map(|p| format!("{:.2}", p)).unwrap_or_default(),
            item.amount.to_string(),
            item.subtotal().map(|s| format!("{:.2}", s)).unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CartError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| CartError::ConfigError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

fn money(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}
