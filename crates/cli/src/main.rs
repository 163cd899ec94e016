//! Aurelia CLI - catalog browsing and cart management tools.
//!
//! # Usage
//!
//! ```bash
//! # Search the catalog
//! aurelia search "diamond earrings under 100" --in-stock --sort price-low
//!
//! # Inspect the catalog
//! aurelia catalog list
//! aurelia catalog categories
//!
//! # Manage the locally persisted cart
//! aurelia cart add diamond-stud-earrings --quantity 2
//! aurelia cart update diamond-stud-earrings --quantity 3
//! aurelia cart show
//! aurelia cart remove diamond-stud-earrings
//! aurelia cart clear
//!
//! # Manage the locally persisted wishlist
//! aurelia wishlist toggle pearl-drop-earrings
//! aurelia wishlist show
//! ```
//!
//! # Commands
//!
//! - `search` - Search and filter the catalog
//! - `catalog` - List products and categories
//! - `cart` - Manage the cart persisted in the state directory
//! - `wishlist` - Manage the wishlist persisted alongside it

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::search::SearchArgs;

#[derive(Parser)]
#[command(name = "aurelia")]
#[command(author, version, about = "Aurelia storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search and filter the catalog
    Search(SearchArgs),
    /// Inspect the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the locally persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the locally persisted wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Save a product (no-op when already saved)
    Add {
        /// Product id
        product_id: String,
    },
    /// Remove a product
    Remove {
        /// Product id
        product_id: String,
    },
    /// Save the product if absent, remove it if present
    Toggle {
        /// Product id
        product_id: String,
    },
    /// Show saved products
    Show,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List all products
    List,
    /// List categories and subcategories
    Categories,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart (merges with an existing line)
    Add {
        /// Product id
        product_id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        product_id: String,
    },
    /// Set a line's quantity (0 removes the line)
    Update {
        /// Product id
        product_id: String,

        /// New quantity
        #[arg(short, long)]
        quantity: u32,
    },
    /// Show the cart with derived totals
    Show,
    /// Empty the cart
    Clear,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Search(args) => commands::search::run(&args)?,
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list()?,
            CatalogAction::Categories => commands::catalog::categories()?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&product_id, quantity)?,
            CartAction::Remove { product_id } => commands::cart::remove(&product_id)?,
            CartAction::Update {
                product_id,
                quantity,
            } => commands::cart::update(&product_id, quantity)?,
            CartAction::Show => commands::cart::show()?,
            CartAction::Clear => commands::cart::clear()?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Add { product_id } => commands::wishlist::add(&product_id)?,
            WishlistAction::Remove { product_id } => commands::wishlist::remove(&product_id)?,
            WishlistAction::Toggle { product_id } => commands::wishlist::toggle(&product_id)?,
            WishlistAction::Show => commands::wishlist::show()?,
        },
    }
    Ok(())
}
