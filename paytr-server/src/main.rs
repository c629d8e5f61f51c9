//! PayTR demo server
//!
//! A small merchant backend that creates hosted checkouts and receives
//! PayTR's payment callbacks.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::{ConfigLoader, Overrides};
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// PayTR demo server - hosted checkout and callback receiver
#[derive(Parser, Debug)]
#[command(name = "paytr-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./paytr-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Merchant key; overrides the value in the configuration file
    #[arg(long, env = "PAYTR_MERCHANT_KEY", hide_env_values = true)]
    merchant_key: Option<String>,

    /// Merchant salt; overrides the value in the configuration file
    #[arg(long, env = "PAYTR_MERCHANT_SALT", hide_env_values = true)]
    merchant_salt: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    tracing::info!("Starting paytr-server v{}", env!("CARGO_PKG_VERSION"));

    let config_loader = ConfigLoader::new(
        &args.config,
        Overrides {
            listen: args.listen,
            merchant_key: args.merchant_key,
            merchant_salt: args.merchant_salt,
        },
    );
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!(
        merchant_id = loaded_config.merchant.merchant_id,
        test_mode = loaded_config.checkout.test_mode.is_enabled(),
        "Configuration loaded from {:?}",
        args.config
    );

    let listen_addr = loaded_config.listen;
    let state = AppState::new(loaded_config.merchant, loaded_config.checkout);
    let router = build_router(state);

    tracing::info!("Starting HTTP server on {}", listen_addr);
    run_server(router, listen_addr).await?;
    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
