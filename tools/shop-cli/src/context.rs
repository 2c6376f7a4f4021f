//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use shop_cache::FileStore;
use shop_cart::cart::CartState;
use shop_cart::store::CartStore;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(resolve(&cwd, path)))
        } else {
            match find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        let output = output.with_currency_symbol(config.display.currency_symbol.as_str());

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory relative paths in the config are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Directory holding the persisted cart.
    pub fn storage_dir(&self) -> PathBuf {
        resolve(&self.base_dir(), &self.config.storage.dir)
    }

    /// Open the persisted cart, hydrated from disk.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let dir = self.storage_dir();
        let storage = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;

        let mut store = CartStore::open(storage, self.config.store_options());

        let output = self.output.clone();
        store.subscribe(move |state: &CartState| {
            output.debug(&format!(
                "cart now has {} line(s), {} item(s)",
                state.line_count(),
                state.item_count()
            ));
        });

        Ok(store)
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                    return Some((config, config_path));
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Resolve `path` against `base` unless it is already absolute.
fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shop-cli-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = temp_dir("walk");
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("shop.toml"), "[storage]\nnamespace = \"walked\"\n").unwrap();

        let (config, path) = find_config(&nested).unwrap();
        assert_eq!(config.storage.namespace, "walked");
        assert_eq!(path, root.join("shop.toml"));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_storage_dir_is_relative_to_config() {
        let root = temp_dir("storage");
        let ctx = Context {
            config: CliConfig::default(),
            config_path: Some(root.join("shop.toml")),
            output: Output::new(false, true),
            cwd: PathBuf::from("/somewhere/else"),
        };
        assert_eq!(ctx.storage_dir(), root.join(".shop"));

        let ctx = Context {
            config_path: None,
            ..ctx
        };
        assert_eq!(ctx.storage_dir(), PathBuf::from("/somewhere/else/.shop"));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_open_cart_persists_between_opens() {
        let root = temp_dir("open");
        let ctx = Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: root.clone(),
        };

        let mut store = ctx.open_cart().unwrap();
        store.add_line(shop_cart::cart::CartLine::new(
            "shoe1",
            "9",
            shop_cart::Money::from_cents(5000),
            1,
        ));
        drop(store);

        let store = ctx.open_cart().unwrap();
        assert_eq!(store.item_count(), 1);
        assert!(root.join(".shop").is_dir());

        std::fs::remove_dir_all(&root).unwrap();
    }
}
