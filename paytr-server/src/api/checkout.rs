//! `POST /checkout` — start a hosted PayTR checkout.

use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use paytr_sdk::client::ClientError;
use paytr_sdk::objects::basket::total_in_minor_units;
use paytr_sdk::objects::{BasketError, BasketItem, Customer, PreparePayment};
use serde::Deserialize;
use std::net::SocketAddr;
use uuid::Uuid;

use crate::state::AppState;

/// Customer details collected by the shop's checkout form.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutCustomer {
    pub email: String,
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Request body for `POST /checkout`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub customer: CheckoutCustomer,
    pub items: Vec<BasketItem>,
}

/// Errors returned by the checkout endpoint.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("basket is empty")]
    EmptyBasket,
    #[error("basket total is not a whole amount of minor units")]
    InvalidTotal,
    #[error(transparent)]
    Basket(#[from] BasketError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("PayTR refused the payment: {0}")]
    Refused(String),
}

impl IntoResponse for CheckoutError {
    fn into_response(self) -> Response {
        let status = match &self {
            CheckoutError::EmptyBasket | CheckoutError::InvalidTotal => StatusCode::BAD_REQUEST,
            CheckoutError::Client(ClientError::Validation(_)) => StatusCode::BAD_REQUEST,
            CheckoutError::Basket(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CheckoutError::Client(_) | CheckoutError::Refused(_) => StatusCode::BAD_GATEWAY,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "Checkout failed");
        }
        (status, self.to_string()).into_response()
    }
}

/// Create a payment for the posted basket and return the iframe HTML.
pub(super) async fn create_checkout(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(body): Json<CheckoutRequest>,
) -> Result<Html<String>, CheckoutError> {
    if body.items.is_empty() {
        return Err(CheckoutError::EmptyBasket);
    }
    let payment_amount = total_in_minor_units(&body.items)
        .filter(|amount| *amount > 0)
        .ok_or(CheckoutError::InvalidTotal)?;

    let customer = Customer {
        ip: client_ip(&headers, peer),
        email: body.customer.email,
        name: body.customer.name,
        address: body.customer.address,
        phone: body.customer.phone,
    };
    let merchant_oid = Uuid::new_v4().simple().to_string();

    let mut payment = PreparePayment::new(&state.merchant, &merchant_oid, payment_amount, customer)
        .with_options(state.checkout.as_ref().clone());
    payment.add_basket(body.items)?;

    let response = state.paytr.create_token(payment, &state.merchant).await?;
    if let Some(reason) = response.failed() {
        return Err(CheckoutError::Refused(reason.to_string()));
    }

    tracing::info!(%merchant_oid, payment_amount, "Checkout created");
    Ok(Html(response.iframe()))
}

/// The customer's address: first `X-Forwarded-For` hop, else the peer.
fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| peer.ip().to_string())
}
