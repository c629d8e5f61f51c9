//! Application state shared across all request handlers.

use paytr_sdk::client::PaytrClient;
use paytr_sdk::config::MerchantConfig;
use paytr_sdk::objects::PaymentOptions;
use std::sync::Arc;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// Merchant credentials used to sign payments and verify callbacks.
    pub merchant: Arc<MerchantConfig>,
    /// Options applied to every checkout.
    pub checkout: Arc<PaymentOptions>,
    /// Client for the PayTR token endpoint.
    pub paytr: PaytrClient,
}

impl AppState {
    /// Create a new AppState talking to the production PayTR endpoint.
    pub fn new(merchant: MerchantConfig, checkout: PaymentOptions) -> Self {
        Self {
            merchant: Arc::new(merchant),
            checkout: Arc::new(checkout),
            paytr: PaytrClient::new(),
        }
    }

    /// Swap the PayTR client (tests point it at a local stub).
    #[cfg(test)]
    pub fn with_paytr_client(mut self, client: PaytrClient) -> Self {
        self.paytr = client;
        self
    }
}
