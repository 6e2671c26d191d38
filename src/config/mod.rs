pub mod toml_config;

pub use toml_config::CartConfig;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli {
    use super::CartConfig;
    use crate::adapters::OutputFormat;
    use crate::utils::error::Result;
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "cart")]
    #[command(about = "Storefront shopping cart backed by the stock API")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        /// Override the storefront API base URL
        #[arg(long)]
        pub api_url: Option<String>,

        /// Override the directory holding the saved cart
        #[arg(long)]
        pub data_dir: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Add one unit of a product
        Add { product_id: u64 },
        /// Remove a product from the cart
        Remove { product_id: u64 },
        /// Set the quantity of a product already in the cart
        Update { product_id: u64, amount: u32 },
        /// Show the cart
        List {
            #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
            format: OutputFormat,
        },
    }

    impl CliConfig {
        /// File configuration (or defaults) with command-line overrides applied.
        pub fn resolve(&self) -> Result<CartConfig> {
            let mut config = match &self.config {
                Some(path) => CartConfig::from_file(path)?,
                None => CartConfig::default(),
            };

            if let Some(api_url) = &self.api_url {
                config.api.base_url = api_url.clone();
            }
            if let Some(data_dir) = &self.data_dir {
                config.storage.path = data_dir.clone();
            }

            Ok(config)
        }
    }

}
