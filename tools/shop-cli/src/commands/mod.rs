//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod products;

use clap::{Args, Subcommand, ValueEnum};
use shop_cart::catalog::ProductSort;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product identifier.
    pub product_id: String,

    /// Size variant.
    #[arg(short, long)]
    pub size: String,

    /// Units to add, capped at the product's stock.
    #[arg(short, long, default_value = "1")]
    pub quantity: u32,

    /// Unit price as a decimal amount (e.g. 49.99), overriding the catalog price.
    #[arg(short, long)]
    pub price: Option<String>,

    /// Display name, overriding the catalog name.
    #[arg(long)]
    pub name: Option<String>,

    /// Image reference, overriding the catalog image.
    #[arg(long)]
    pub image: Option<String>,

    /// Do not look the product up; requires --price.
    #[arg(long, requires = "price")]
    pub offline: bool,
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Listing page, starting at 1.
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Listing order.
    #[arg(long, value_enum, default_value_t = SortArg::Default)]
    pub sort: SortArg,
}

/// Listing order accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// As returned by the API.
    Default,
    /// Cheapest first.
    Price,
    /// Most units in stock first.
    #[value(alias = "availability")]
    Stock,
}

impl From<SortArg> for ProductSort {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Default => ProductSort::Default,
            SortArg::Price => ProductSort::Price,
            SortArg::Stock => ProductSort::Availability,
        }
    }
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product identifier.
    pub product_id: String,

    /// Size variant.
    pub size: String,
}

/// Arguments for the set command.
#[derive(Args)]
pub struct SetArgs {
    /// Product identifier.
    pub product_id: String,

    /// Size variant.
    pub size: String,

    /// New quantity; zero or less removes the line.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub zip_code: Option<String>,

    #[arg(long)]
    pub mobile_number: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Print the order request without submitting it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
