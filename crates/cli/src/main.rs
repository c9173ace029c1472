//! Shopfront CLI - a shopping session in the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the first page of products
//! shopfront products
//!
//! # Scroll through the whole catalog page by page
//! shopfront browse
//!
//! # Add two units of product 3 to the cart, then check out
//! shopfront cart add 3 -q 2
//! shopfront checkout
//!
//! # Toggle a favorite
//! shopfront favorites toggle 7
//! ```
//!
//! State lives in the store file named by `SHOPFRONT_STORE_PATH`, so the cart
//! and favorites carry over between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use shopfront_core::{ProductId, ShippingAddress};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront storefront session")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of products
    Products {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Scroll through the catalog until every page is loaded
    Browse,
    /// Show a product and related products
    Product {
        /// Product ID
        id: String,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Purchase everything in the cart
    Checkout,
    /// Place an order for the whole cart with a shipping address
    Order {
        #[arg(long)]
        name: String,
        #[arg(long)]
        line1: String,
        #[arg(long)]
        line2: Option<String>,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        zip: String,
        #[arg(long, default_value = shopfront_core::DEFAULT_COUNTRY)]
        country: String,
    },
    /// Recommend products from the cart and purchase history
    Recommend {
        /// Leave this product out
        #[arg(long)]
        exclude: Option<String>,
    },
    /// List purchased products
    History,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add a product
    Add {
        /// Product ID
        id: String,
        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: String,
    },
    /// Set a product's quantity (0 or less removes it)
    Set {
        /// Product ID
        id: String,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorite products
    Show,
    /// Flip a product's favorite status
    Toggle {
        /// Product ID
        id: String,
    },
    /// Mark a product as a favorite
    Add {
        /// Product ID
        id: String,
    },
    /// Unmark a favorite
    Remove {
        /// Product ID
        id: String,
    },
}

fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_storefront=info,shopfront_cli=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if let Err(e) = run(cli.command).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<(), CliError> {
    let (mut session, notifier) = commands::open_session().await?;

    let result = match command {
        Commands::Products { page } => commands::catalog::products(&session, page).await,
        Commands::Browse => commands::catalog::browse(&mut session).await,
        Commands::Product { id } => commands::catalog::product(&session, &id.into()).await,
        Commands::Recommend { exclude } => {
            let exclude = exclude.map(ProductId::from);
            commands::catalog::recommend(&session, exclude.as_ref()).await
        }
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&session).await,
            CartAction::Add { id, quantity } => {
                commands::cart::add(&mut session, id.into(), quantity).await
            }
            CartAction::Remove { id } => commands::cart::remove(&mut session, &id.into()).await,
            CartAction::Set { id, quantity } => {
                commands::cart::set(&mut session, &id.into(), quantity).await
            }
            CartAction::Clear => commands::cart::clear(&mut session).await,
        },
        Commands::Favorites { action } => match action {
            FavoritesAction::Show => commands::favorites::show(&session).await,
            FavoritesAction::Toggle { id } => {
                commands::favorites::toggle(&mut session, &id.into()).await
            }
            FavoritesAction::Add { id } => commands::favorites::add(&mut session, id.into()).await,
            FavoritesAction::Remove { id } => {
                commands::favorites::remove(&mut session, &id.into()).await
            }
        },
        Commands::Checkout => commands::cart::checkout(&mut session).await,
        Commands::Order {
            name,
            line1,
            line2,
            city,
            state,
            zip,
            country,
        } => {
            let address = ShippingAddress {
                full_name: name,
                address_line1: line1,
                address_line2: line2,
                city,
                state,
                zip_code: zip,
                country,
            };
            commands::cart::order(&mut session, &address).await
        }
        Commands::History => commands::cart::history(&session).await,
    };

    commands::print_notifications(&notifier);
    result
}
