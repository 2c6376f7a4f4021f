//! CLI configuration.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use shop_api::ApiConfig;
use shop_cart::store::{StoreOptions, DEFAULT_NAMESPACE};
use shop_cart::summary::TaxRate;

/// Config file names searched for, in order, walking up from the working directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the cart is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Storefront API connection.
    #[serde(default)]
    pub api: ApiSection,

    /// Price formatting and tax.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions::with_namespace(&self.storage.namespace)
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api.base_url.clone())
            .with_timeout(Duration::from_secs(self.api.timeout_secs))
    }

    pub fn tax_rate(&self) -> Result<TaxRate> {
        TaxRate::from_percent(self.display.tax_rate_percent).ok_or_else(|| {
            anyhow!(
                "display.tax_rate_percent must be between 0 and 100, got {}",
                self.display.tax_rate_percent
            )
        })
    }

    /// Check the config, returning `(errors, warnings)`.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.storage.dir.trim().is_empty() {
            errors.push("storage.dir must not be empty".to_string());
        }
        if self.storage.namespace.trim().is_empty() {
            errors.push("storage.namespace must not be empty".to_string());
        }

        let url = self.api.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(format!("api.base_url '{}' must start with http:// or https://", url));
        } else if url.starts_with("http://") {
            warnings.push("api.base_url uses plain http".to_string());
        }
        if self.api.timeout_secs == 0 {
            errors.push("api.timeout_secs must be greater than 0".to_string());
        }

        if self.tax_rate().is_err() {
            errors.push("display.tax_rate_percent must be 0-100".to_string());
        }
        if self.display.currency_symbol.is_empty() {
            warnings.push("display.currency_symbol is empty".to_string());
        }

        (errors, warnings)
    }
}

/// Cart persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the cart snapshot, relative to the config file.
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    /// Key namespace; the snapshot lives under `<namespace>:cart`.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_storage_dir() -> String {
    ".shop".to_string()
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            namespace: default_namespace(),
        }
    }
}

/// Storefront API settings, shared by the product and order clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    shop_api::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    shop_api::DEFAULT_TIMEOUT.as_secs()
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Tax added on top of the subtotal, in percent.
    #[serde(default)]
    pub tax_rate_percent: f64,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            tax_rate_percent: 0.0,
        }
    }
}

/// Generate a default shop.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront cart configuration

[storage]
dir = "{dir}"
namespace = "{namespace}"

[api]
base_url = "{base_url}"
timeout_secs = {timeout}

[display]
currency_symbol = "$"
# Tax shown on top of the subtotal, e.g. 10.0 for 10%
tax_rate_percent = 0.0
"#,
        dir = default_storage_dir(),
        namespace = default_namespace(),
        base_url = default_base_url(),
        timeout = default_timeout_secs(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.storage.dir, ".shop");
        assert_eq!(config.store_options().key, "storefront:cart");
        assert_eq!(config.api_config().endpoint("/v1/orders"), "https://babagang.onrender.com/v1/orders");
        assert_eq!(config.api_config().timeout, Duration::from_secs(30));
        assert!(config.tax_rate().unwrap().is_zero());
    }

    #[test]
    fn test_generated_config_matches_defaults() {
        let parsed: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, CliConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: CliConfig = toml::from_str(
            r#"
            [storage]
            namespace = "dev"

            [display]
            tax_rate_percent = 10.0
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.dir, ".shop");
        assert_eq!(config.store_options().key, "dev:cart");
        assert_eq!(config.tax_rate().unwrap().basis_points(), 1000);
        assert_eq!(config.display.currency_symbol, "$");
    }

    #[test]
    fn test_json_config() {
        let config: CliConfig =
            serde_json::from_str(r#"{"api":{"base_url":"http://localhost:8080","timeout_secs":5}}"#)
                .unwrap();
        assert_eq!(config.api_config().timeout, Duration::from_secs(5));
        let (errors, warnings) = config.check();
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_check_reports_errors() {
        let mut config = CliConfig::default();
        config.api.base_url = "ftp://nope".to_string();
        config.api.timeout_secs = 0;
        config.display.tax_rate_percent = 150.0;
        let (errors, _) = config.check();
        assert_eq!(errors.len(), 3);
        assert!(config.tax_rate().is_err());
    }
}
