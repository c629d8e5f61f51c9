//! TOML file configuration structures.
//!
//! These structs directly map to the `paytr-config.toml` file format.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub merchant: MerchantConfig,
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().expect("valid default address")
}

/// Merchant credentials issued by PayTR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantConfig {
    pub id: u64,
    /// Can be left out and supplied through `PAYTR_MERCHANT_KEY`.
    #[serde(default)]
    pub key: String,
    /// Can be left out and supplied through `PAYTR_MERCHANT_SALT`.
    #[serde(default)]
    pub salt: String,
    pub ok_url: String,
    pub fail_url: String,
}

/// Defaults applied to every checkout created by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Minutes before the checkout page expires.
    #[serde(default = "default_timeout_limit")]
    pub timeout_limit: u16,
    #[serde(default)]
    pub max_installment: u8,
    #[serde(default)]
    pub no_installment: bool,
    #[serde(default)]
    pub test_mode: bool,
    #[serde(default)]
    pub debug: bool,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            timeout_limit: default_timeout_limit(),
            max_installment: 0,
            no_installment: false,
            test_mode: false,
            debug: false,
        }
    }
}

fn default_currency() -> String {
    "TL".to_string()
}

fn default_timeout_limit() -> u16 {
    30
}
