//! Configuration module for paytr-server.
//!
//! Handles loading configuration from TOML files, CLI arguments,
//! and environment variables.

pub mod file;

use crate::config::file::{CheckoutConfig, FileConfig};
use paytr_sdk::config::MerchantConfig;
use paytr_sdk::objects::PaymentOptions;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub listen: Option<SocketAddr>,
    pub merchant_key: Option<String>,
    pub merchant_salt: Option<String>,
}

/// Loaded configuration result containing all parts.
#[derive(Debug)]
pub struct LoadedConfig {
    pub listen: SocketAddr,
    pub merchant: MerchantConfig,
    pub checkout: PaymentOptions,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    overrides: Overrides,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, overrides: Overrides) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            overrides,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI and environment overrides
    /// 3. Validate the configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let file_config: FileConfig = toml::from_str(&config_content)?;
        self.build(file_config)
    }

    fn build(&self, mut file_config: FileConfig) -> Result<LoadedConfig, ConfigError> {
        if let Some(listen) = self.overrides.listen {
            file_config.server.listen = listen;
        }
        if let Some(key) = &self.overrides.merchant_key {
            file_config.merchant.key = key.clone();
        }
        if let Some(salt) = &self.overrides.merchant_salt {
            file_config.merchant.salt = salt.clone();
        }

        self.validate(&file_config)?;

        let merchant = file_config.merchant;
        Ok(LoadedConfig {
            listen: file_config.server.listen,
            merchant: MerchantConfig::new(
                merchant.id,
                merchant.key.into_bytes(),
                merchant.salt,
                merchant.ok_url,
                merchant.fail_url,
            ),
            checkout: convert_checkout(file_config.checkout),
        })
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        let merchant = &config.merchant;
        if merchant.id == 0 {
            return Err(ConfigError::ValidationError(
                "merchant id must be set".to_string(),
            ));
        }
        if merchant.key.is_empty() {
            return Err(ConfigError::ValidationError(
                "merchant key is missing (set it in the file or PAYTR_MERCHANT_KEY)".to_string(),
            ));
        }
        if merchant.salt.is_empty() {
            return Err(ConfigError::ValidationError(
                "merchant salt is missing (set it in the file or PAYTR_MERCHANT_SALT)".to_string(),
            ));
        }
        for (name, value) in [("ok_url", &merchant.ok_url), ("fail_url", &merchant.fail_url)] {
            url::Url::parse(value).map_err(|e| {
                ConfigError::ValidationError(format!("merchant {name} is not a valid URL: {e}"))
            })?;
        }
        if config.checkout.timeout_limit == 0 {
            return Err(ConfigError::ValidationError(
                "checkout timeout_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn convert_checkout(c: CheckoutConfig) -> PaymentOptions {
    PaymentOptions {
        debug: c.debug.into(),
        no_installment: c.no_installment.into(),
        max_installment: c.max_installment,
        timeout_limit: c.timeout_limit,
        currency: c.currency,
        test_mode: c.test_mode.into(),
    }
}
