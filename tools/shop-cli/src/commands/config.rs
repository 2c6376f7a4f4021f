//! Configuration management commands.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use serde::Serialize;
use shop_cache::{FileStore, KeyValueStore};
use shop_cart::store::CartPersistence;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// What is persisted under the configured cart key.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
enum Snapshot {
    /// Nothing stored; the cart is empty.
    Missing,
    Stored { lines: usize, items: u64 },
    /// Present but not a cart; discarded on the next open.
    Unreadable,
}

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

/// Inspect the snapshot without creating the storage directory.
fn inspect_snapshot(dir: &Path, key: &str) -> Result<Snapshot> {
    if !dir.exists() {
        return Ok(Snapshot::Missing);
    }
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }

    let storage = FileStore::open(dir)?;
    if !storage.exists(key)? {
        return Ok(Snapshot::Missing);
    }

    Ok(match CartPersistence::new(storage, key).load() {
        Some(state) => Snapshot::Stored {
            lines: state.line_count(),
            items: state.item_count(),
        },
        None => Snapshot::Unreadable,
    })
}

async fn show_config(ctx: &Context) -> Result<()> {
    let dir = ctx.storage_dir();
    let key = ctx.config.store_options().key;
    let snapshot = inspect_snapshot(&dir, &key)
        .with_context(|| format!("Failed to inspect cart storage: {}", dir.display()))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "config": ctx.config,
            "configFile": ctx.config_path,
            "storageDir": dir,
            "cartKey": key,
            "cart": snapshot,
        }));
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("dir", &dir.display().to_string());
    ctx.output.kv("namespace", &ctx.config.storage.namespace);
    ctx.output.kv("key", &key);
    let cart = match snapshot {
        Snapshot::Missing => "empty".to_string(),
        Snapshot::Stored { lines, items } => format!("{} line(s), {} item(s)", lines, items),
        Snapshot::Unreadable => "unreadable, will be reset".to_string(),
    };
    ctx.output.kv("cart", &cart);

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output.kv("products", &ctx.config.api_config().endpoint("/v1/products"));
    ctx.output.kv("orders", &ctx.config.api_config().endpoint("/v1/orders"));
    ctx.output.kv("timeout_secs", &ctx.config.api.timeout_secs.to_string());

    ctx.output.info("");
    ctx.output.info("[display]");
    ctx.output.kv("currency_symbol", &ctx.config.display.currency_symbol);
    ctx.output.kv(
        "tax_rate_percent",
        &ctx.config.display.tax_rate_percent.to_string(),
    );
    ctx.output.kv("sample", &ctx.output.price(shop_cart::Money::from_cents(4999)));

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("shop.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

/// Errors and warnings about the cart storage location and its snapshot.
fn check_storage(dir: &Path, key: &str) -> (Vec<String>, Vec<String>) {
    match inspect_snapshot(dir, key) {
        Ok(Snapshot::Unreadable) => (
            Vec::new(),
            vec![format!("stored cart under '{}' is unreadable and will be reset", key)],
        ),
        Ok(_) => (Vec::new(), Vec::new()),
        Err(e) => (vec![format!("storage.dir: {:#}", e)], Vec::new()),
    }
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (mut errors, mut warnings) = ctx.config.check();
    if errors.is_empty() {
        let (storage_errors, storage_warnings) =
            check_storage(&ctx.storage_dir(), &ctx.config.store_options().key);
        errors.extend(storage_errors);
        warnings.extend(storage_warnings);
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
