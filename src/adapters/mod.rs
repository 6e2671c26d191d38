// Adapters layer: concrete implementations of the domain ports (http, storage, notifications)
// plus rendering of cart snapshots for the CLI.

pub mod http;
pub mod notify;
pub mod output;
pub mod storage;

pub use http::HttpCatalog;
pub use notify::ConsoleNotifier;
pub use output::{render_cart, OutputFormat};
pub use storage::LocalStorage;
