//! Token client (merchant backend → PayTR).

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::ClientError;
use crate::config::MerchantConfig;
use crate::objects::{PreparePayment, TokenResponse};

/// Production "get token" endpoint.
pub const TOKEN_ENDPOINT: &str = "https://www.paytr.com/odeme/api/get-token";

/// Typed HTTP client for PayTR's iFrame token endpoint.
///
/// Each call is a single form-encoded POST; there are no retries and no
/// timeout beyond what the wrapped `reqwest::Client` is configured with.
#[derive(Debug, Clone)]
pub struct PaytrClient {
    http: Client,
    endpoint: Url,
}

impl Default for PaytrClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PaytrClient {
    /// Create a client that talks to the production endpoint.
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            endpoint: Url::parse(TOKEN_ENDPOINT).expect("valid token endpoint"),
        }
    }

    /// Send requests somewhere else (a sandbox proxy, a local stub).
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `POST /odeme/api/get-token` with an already signed payment.
    pub async fn fetch_token(&self, payment: &PreparePayment) -> Result<TokenResponse, ClientError> {
        let fields = payment.form_fields()?;

        debug!(
            merchant_oid = %payment.merchant_oid,
            endpoint = %self.endpoint,
            "Requesting PayTR iframe token"
        );

        let resp = self
            .http
            .post(self.endpoint.clone())
            .form(&fields)
            .send()
            .await?;

        let response: TokenResponse = parse_response(resp).await?;
        if let Some(reason) = response.failed() {
            warn!(merchant_oid = %payment.merchant_oid, reason, "PayTR refused to issue a token");
        }
        Ok(response)
    }

    /// Sign `payment` with the merchant's key and salt, then fetch its token.
    pub async fn create_token(
        &self,
        mut payment: PreparePayment,
        merchant: &MerchantConfig,
    ) -> Result<TokenResponse, ClientError> {
        payment.generate_token(merchant);
        self.fetch_token(&payment).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        warn!(%status, "PayTR token endpoint returned an error status");
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{BasketItem, Customer, ValidationError};
    use axum::{Form, Json, Router, extract::State, http::StatusCode, routing::post};
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    type Captured = Arc<Mutex<Option<Vec<(String, String)>>>>;

    /// Serve a fixed response on `/get-token` and record the form it receives.
    async fn spawn_stub(status: StatusCode, body: serde_json::Value) -> (Url, Captured) {
        let captured: Captured = Arc::default();
        let router = Router::new()
            .route(
                "/get-token",
                post(
                    move |State(captured): State<Captured>,
                          Form(form): Form<Vec<(String, String)>>| async move {
                        *captured.lock().await = Some(form);
                        (status, Json(body))
                    },
                ),
            )
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let url = Url::parse(&format!("http://{addr}/get-token")).unwrap();
        (url, captured)
    }

    fn merchant() -> MerchantConfig {
        MerchantConfig::new(
            123456,
            b"merchantkey".to_vec(),
            "saltysalt",
            "https://shop.example.com/ok",
            "https://shop.example.com/fail",
        )
    }

    fn payment() -> PreparePayment {
        let customer = Customer {
            ip: "85.34.78.112".to_string(),
            email: "buyer@example.com".to_string(),
            name: "Ada Lovelace".to_string(),
            address: "Kadıköy, İstanbul".to_string(),
            phone: "05555555555".to_string(),
        };
        let mut payment = PreparePayment::new(&merchant(), "ORDER42", 3800, customer);
        payment
            .add_basket([BasketItem::new("Sample product", Decimal::new(3800, 2), 1)])
            .unwrap();
        payment
    }

    #[tokio::test]
    async fn test_create_token_posts_signed_form() {
        let (url, captured) = spawn_stub(
            StatusCode::OK,
            serde_json::json!({"status": "success", "token": "tok123"}),
        )
        .await;
        let client = PaytrClient::new().with_endpoint(url);

        let response = client.create_token(payment(), &merchant()).await.unwrap();
        assert!(response.is_success());
        assert_eq!(response.token, "tok123");

        let mut expected = payment();
        expected.generate_token(&merchant());
        let expected: Vec<(String, String)> = expected
            .form_fields()
            .unwrap()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();

        let form = captured.lock().await.take().unwrap();
        assert_eq!(form, expected);
    }

    #[tokio::test]
    async fn test_failed_status_is_returned_not_raised() {
        let (url, _captured) = spawn_stub(
            StatusCode::OK,
            serde_json::json!({"status": "failed", "reason": "merchant_oid must be unique"}),
        )
        .await;
        let client = PaytrClient::new().with_endpoint(url);

        let response = client.create_token(payment(), &merchant()).await.unwrap();
        assert_eq!(response.failed(), Some("merchant_oid must be unique"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let (url, _captured) = spawn_stub(
            StatusCode::INTERNAL_SERVER_ERROR,
            serde_json::json!({"error": "boom"}),
        )
        .await;
        let client = PaytrClient::new().with_endpoint(url);

        let err = client.create_token(payment(), &merchant()).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Api { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let (url, _captured) =
            spawn_stub(StatusCode::OK, serde_json::json!(["not", "an", "object"])).await;
        let client = PaytrClient::new().with_endpoint(url);

        let err = client.create_token(payment(), &merchant()).await.unwrap_err();
        assert!(matches!(err, ClientError::Json(_)));
    }

    #[tokio::test]
    async fn test_non_json_body_is_json_error() {
        let router = Router::new().route("/get-token", post(|| async { "<html>maintenance</html>" }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        let url = Url::parse(&format!("http://{addr}/get-token")).unwrap();
        let client = PaytrClient::new().with_endpoint(url);

        let err = client.create_token(payment(), &merchant()).await.unwrap_err();
        assert!(matches!(err, ClientError::Json(_)));
    }

    #[tokio::test]
    async fn test_unsigned_payment_is_rejected_locally() {
        let (url, captured) = spawn_stub(
            StatusCode::OK,
            serde_json::json!({"status": "success", "token": "unused"}),
        )
        .await;
        let client = PaytrClient::new().with_endpoint(url);

        let err = client.fetch_token(&payment()).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::MissingField("paytr_token"))
        ));
        assert!(captured.lock().await.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_is_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/get-token")).unwrap();
        let client = PaytrClient::new().with_endpoint(url);

        let err = client.create_token(payment(), &merchant()).await.unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
    }

    #[test]
    fn test_default_endpoint() {
        assert_eq!(PaytrClient::default().endpoint().as_str(), TOKEN_ENDPOINT);
    }
}
