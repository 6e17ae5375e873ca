//! Techmart CLI - browse the demo shop from a terminal.
//!
//! State lives in a JSON file (`techmart-storage.json` by default, or
//! `TECHMART_STORE`), holding the same records the web storefront keeps per
//! browser session.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! techmart products --category Laptop --sort low
//! techmart show 3
//!
//! # Cart
//! techmart cart add 3
//! techmart cart update 3 -1
//! techmart cart clear --yes
//!
//! # Checkout
//! techmart signup ada lovelace
//! techmart checkout begin
//! techmart checkout place --yes
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use techmart_core::{Catalog, ProductId, Storefront};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;
mod store;

use commands::{CommandResult, catalog::Controls};
use store::{DEFAULT_STORE_PATH, JsonFileStore, STORE_ENV};

#[derive(Parser)]
#[command(name = "techmart")]
#[command(author, version, about = "Techmart demo shop in the terminal")]
struct Cli {
    /// Storage file
    #[arg(long, env = STORE_ENV, default_value = DEFAULT_STORE_PATH, global = true)]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Case-insensitive search over name and category
        #[arg(short, long)]
        query: Option<String>,

        /// Category name, or "All"
        #[arg(short, long)]
        category: Option<String>,

        /// Price bracket ("all" or "min-max")
        #[arg(short, long)]
        price: Option<String>,

        /// Sort mode (`popular`, `low`, `high`, `alpha`)
        #[arg(short, long)]
        sort: Option<String>,
    },
    /// List categories
    Categories,
    /// Show one product
    Show {
        /// Product ID
        id: i32,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Check out
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
    /// Create a demo account and sign in
    Signup { username: String, password: String },
    /// Sign in with a demo account
    Login { username: String, password: String },
    /// Simulated third-party sign-in
    Sso {
        /// Display name; omit to cancel
        name: Option<String>,
    },
    /// Sign out
    Logout {
        #[arg(long)]
        yes: bool,
    },
    /// Print the signed-in user
    Whoami,
    /// Toggle dark mode
    Dark,
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add { id: i32 },
    /// Change a line's quantity
    Update {
        id: i32,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Remove a line
    Remove { id: i32 },
    /// Empty the cart
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// Check the gate and print the order summary
    Begin,
    /// Print the order summary
    Summary,
    /// Place the order
    Place {
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("techmart=warn,techmart_core=warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        let _ = writeln!(io::stderr(), "Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CommandResult {
    let store = JsonFileStore::open(&cli.store)?;
    tracing::debug!(path = %store.path().display(), "Using storage file");

    let mut shop = Storefront::load(Catalog::seed(), store);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Products {
            query,
            category,
            price,
            sort,
        } => {
            let controls = Controls {
                text: query.as_deref(),
                category: category.as_deref(),
                price: price.as_deref(),
                sort: sort.as_deref(),
            };
            commands::catalog::products(&mut out, &mut shop, &controls)
        }
        Commands::Categories => commands::catalog::categories(&mut out, &shop),
        Commands::Show { id } => commands::catalog::show(&mut out, &mut shop, ProductId::new(id)),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&mut out, &shop),
            CartAction::Add { id } => commands::cart::add(&mut out, &mut shop, ProductId::new(id)),
            CartAction::Update { id, delta } => {
                commands::cart::update(&mut out, &mut shop, ProductId::new(id), delta)
            }
            CartAction::Remove { id } => {
                commands::cart::remove(&mut out, &mut shop, ProductId::new(id))
            }
            CartAction::Clear { yes } => commands::cart::clear(&mut out, &mut shop, yes),
        },
        Commands::Checkout { action } => match action {
            CheckoutAction::Begin => commands::checkout::begin(&mut out, &mut shop),
            CheckoutAction::Summary => commands::checkout::summary(&mut out, &shop),
            CheckoutAction::Place { yes } => commands::checkout::place(&mut out, &mut shop, yes),
        },
        Commands::Signup { username, password } => {
            commands::session::signup(&mut out, &mut shop, username, password)
        }
        Commands::Login { username, password } => {
            commands::session::login(&mut out, &mut shop, username, password)
        }
        Commands::Sso { name } => commands::session::sso(&mut out, &mut shop, name),
        Commands::Logout { yes } => commands::session::logout(&mut out, &mut shop, yes),
        Commands::Whoami => commands::session::whoami(&mut out, &shop),
        Commands::Dark => commands::session::dark(&mut out, &mut shop),
    }
}
