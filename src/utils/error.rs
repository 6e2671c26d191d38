use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Product {product_id}: requested {requested}, only {available} in stock")]
    OutOfStock {
        product_id: u64,
        requested: u32,
        available: u32,
    },

    #[error("Product {product_id}: amount must be at least 1, got {amount}")]
    InvalidAmount { product_id: u64, amount: u32 },

    #[error("Product {0} is not in the cart")]
    NotInCart(u64),

    #[error("Stored cart snapshot is corrupt: {reason}")]
    CorruptSnapshot { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    BusinessRule,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CartError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CartError::ApiError(_) | CartError::HttpStatusError { .. } => ErrorCategory::Network,
            CartError::IoError(_) | CartError::CorruptSnapshot { .. } => ErrorCategory::Storage,
            CartError::UrlError(_)
            | CartError::ConfigError { .. }
            | CartError::InvalidConfigValueError { .. }
            | CartError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            CartError::OutOfStock { .. }
            | CartError::InvalidAmount { .. }
            | CartError::NotInCart(_) => ErrorCategory::BusinessRule,
            CartError::SerializationError(_) | CartError::CsvError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::BusinessRule => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Stock and amount violations get the dedicated out-of-stock message
    /// instead of the operation's generic one.
    pub fn is_stock_violation(&self) -> bool {
        matches!(
            self,
            CartError::OutOfStock { .. } | CartError::InvalidAmount { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::ApiError(_) => "Could not reach the storefront API".to_string(),
            CartError::HttpStatusError { status: 404, .. } => {
                "The product does not exist in the storefront".to_string()
            }
            CartError::HttpStatusError { status, .. } => {
                format!("The storefront API answered with status {}", status)
            }
            CartError::OutOfStock {
                product_id,
                available,
                ..
            } => format!(
                "Only {} unit(s) of product {} are in stock",
                available, product_id
            ),
            CartError::InvalidAmount { .. } => "Quantity must be at least 1".to_string(),
            CartError::NotInCart(id) => format!("Product {} is not in the cart", id),
            CartError::CorruptSnapshot { .. } => "The saved cart could not be read".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the storefront API is running and reachable",
            ErrorCategory::Storage => {
                "Check the cart data directory, or delete the saved cart to start over"
            }
            ErrorCategory::Configuration => "Review the configuration file and CLI flags",
            ErrorCategory::BusinessRule => "Adjust the requested quantity or product",
            ErrorCategory::Data => "The storefront returned data in an unexpected format",
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_violations() {
        let out = CartError::OutOfStock {
            product_id: 1,
            requested: 3,
            available: 2,
        };
        assert!(out.is_stock_violation());
        assert!(CartError::InvalidAmount {
            product_id: 1,
            amount: 0
        }
        .is_stock_violation());
        assert!(!CartError::NotInCart(1).is_stock_violation());
    }

    #[test]
    fn test_category_and_severity() {
        let status = CartError::HttpStatusError {
            status: 500,
            url: "http://localhost/stock/1".to_string(),
        };
        assert_eq!(status.category(), ErrorCategory::Network);
        assert_eq!(status.severity(), ErrorSeverity::Medium);

        let corrupt = CartError::CorruptSnapshot {
            reason: "bad json".to_string(),
        };
        assert_eq!(corrupt.category(), ErrorCategory::Storage);
        assert_eq!(corrupt.severity(), ErrorSeverity::Critical);

        assert_eq!(CartError::NotInCart(4).severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_user_friendly_message_for_missing_product() {
        let err = CartError::HttpStatusError {
            status: 404,
            url: "http://localhost/products/9".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "The product does not exist in the storefront"
        );
    }
}
