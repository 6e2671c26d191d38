use clap::Parser;
use storefront_cart::adapters::render_cart;
use storefront_cart::core::ConfigProvider;
use storefront_cart::utils::error::{CartError, ErrorSeverity};
use storefront_cart::utils::{logger, validation::Validate};
use storefront_cart::{
    CartManager, CartOptions, CliConfig, Command, ConsoleNotifier, HttpCatalog, LocalStorage,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Cart command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("💡 {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }
}

async fn run(cli: &CliConfig) -> Result<(), CartError> {
    let config = cli.resolve()?;
    config.validate()?;
    tracing::debug!("Using API {} and storage {}", config.api_base_url(), config.storage_path());

    let catalog = HttpCatalog::from_config(&config)?;
    let storage = LocalStorage::new(config.storage_path());
    let cart = CartManager::load(
        catalog,
        storage,
        ConsoleNotifier,
        CartOptions::from_config(&config),
    )
    .await?;

    match &cli.command {
        Command::Add { product_id } => {
            cart.add_product(*product_id).await?;
            println!("✅ Added product {}", product_id);
        }
        Command::Remove { product_id } => {
            cart.remove_product(*product_id).await?;
            println!("✅ Removed product {}", product_id);
        }
        Command::Update { product_id, amount } => {
            cart.update_product_amount(*product_id, *amount).await?;
            println!("✅ Product {} quantity set to {}", product_id, amount);
        }
        Command::List { format } => {
            let rendered = render_cart(&cart.cart().await, *format)?;
            println!("{}", rendered.trim_end());
        }
    }

    Ok(())
}

fn exit_code(error: &CartError) -> i32 {
    match error.severity() {
        ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    }
}
