//! Shop CLI - drive the storefront cart from the command line.
//!
//! Commands:
//! - `shop products` - Browse the catalog
//! - `shop show` - Show cart lines and totals
//! - `shop add` - Add a product in a size
//! - `shop remove` - Remove a line
//! - `shop set` - Set a line's quantity
//! - `shop clear` - Empty the cart
//! - `shop checkout` - Submit the cart as an order
//! - `shop config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    AddArgs, CheckoutArgs, ClearArgs, ConfigArgs, ProductsArgs, RemoveArgs, SetArgs,
};

/// Shop CLI - Manage a persisted storefront cart
#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products from the catalog
    Products(ProductsArgs),

    /// Show cart lines and totals
    Show,

    /// Add a product to the cart
    Add(AddArgs),

    /// Remove a product size from the cart
    Remove(RemoveArgs),

    /// Set the quantity of a cart line
    Set(SetArgs),

    /// Remove every line from the cart
    Clear(ClearArgs),

    /// Place an order for the cart contents
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Show => commands::cart::show(&ctx).await,
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Set(args) => commands::cart::set(args, &ctx).await,
        Commands::Clear(args) => commands::cart::clear(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
