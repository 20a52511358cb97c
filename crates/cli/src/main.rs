//! Vitrine CLI - the cart widget from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog (from the cart API, or a local file)
//! vitrine catalog
//! vitrine --catalog crates/server/content/catalog.json catalog
//!
//! # Edit the cart
//! vitrine add 0 -n 2
//! vitrine remove 0
//! vitrine drop 0
//! vitrine clear
//!
//! # Show the cart, then send it
//! vitrine cart
//! vitrine checkout
//! ```
//!
//! Persistence and the order link source come from the `VITRINE_*`
//! environment variables (see `vitrine_widget::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use vitrine_core::ProductId;
use vitrine_widget::WidgetConfig;

mod commands;
mod terminal;

use terminal::TerminalPresenter;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "Vitrine cart from the terminal")]
struct Cli {
    /// Catalog JSON file (fetched from the cart API when omitted and the
    /// command needs the catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog with the quantities in the cart
    Catalog,
    /// Add a product to the cart
    Add {
        /// Product id
        id: String,

        /// How many to add
        #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Take a product out of the cart
    Remove {
        /// Product id
        id: String,

        /// How many to take out
        #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Remove a product's line whatever its quantity
    Drop {
        /// Product id
        id: String,
    },
    /// Show the cart
    Cart,
    /// Empty the cart
    Clear,
    /// Send the order and print the messaging link
    Checkout,
}

impl Commands {
    /// Whether the command reads the catalog grid. The others work on the
    /// saved cart lines alone.
    const fn needs_catalog(&self) -> bool {
        matches!(self, Self::Catalog | Self::Add { .. })
    }
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vitrine_cli=warn,vitrine_widget=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = WidgetConfig::from_env()?;
    let catalog = if cli.catalog.is_some() || cli.command.needs_catalog() {
        commands::load_catalog(cli.catalog.as_deref(), &config).await?
    } else {
        Vec::new()
    };

    let presenter = if matches!(cli.command, Commands::Catalog) {
        TerminalPresenter::with_grid()
    } else {
        TerminalPresenter::cart_only()
    };
    let mut session = commands::open_session(&config, catalog, presenter).await?;

    match cli.command {
        Commands::Catalog | Commands::Cart => {}
        Commands::Add { id, quantity } => {
            commands::cart::add(&mut session, &ProductId::new(id), quantity).await?;
        }
        Commands::Remove { id, quantity } => {
            commands::cart::remove(&mut session, &ProductId::new(id), quantity).await?;
        }
        Commands::Drop { id } => {
            commands::cart::drop_line(&mut session, &ProductId::new(id)).await?;
        }
        Commands::Clear => commands::cart::clear(&mut session).await,
        Commands::Checkout => {
            commands::cart::checkout(&mut session).await?;
        }
    }

    if !session.store().is_synced() {
        tracing::warn!("The cart change was not saved; it will be lost when this command exits");
    }

    let mut stdout = std::io::stdout().lock();
    session.presenter().render(&mut stdout)?;
    Ok(())
}
