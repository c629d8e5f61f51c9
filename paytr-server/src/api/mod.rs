//! HTTP API exposed by the demo server.
//!
//! # Endpoints
//!
//! - `POST /checkout`       – create a PayTR checkout and return its iframe
//! - `POST /paytr/callback` – payment result notification from PayTR
//! - `POST /paytr/error`    – page PayTR posts to when the checkout errors

mod callback;
mod checkout;

use axum::{Router, routing::post};

use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(checkout::create_checkout))
        .route("/paytr/callback", post(callback::payment_callback))
        .route("/paytr/error", post(callback::payment_error))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::state::AppState;
    use paytr_sdk::config::MerchantConfig;
    use paytr_sdk::objects::PaymentOptions;

    pub fn merchant() -> MerchantConfig {
        MerchantConfig::new(
            1,
            b"K".to_vec(),
            "S",
            "https://shop.example.com/ok",
            "https://shop.example.com/fail",
        )
    }

    pub fn state() -> AppState {
        AppState::new(merchant(), PaymentOptions::default())
    }

    pub async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }
}
