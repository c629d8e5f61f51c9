//! Handlers for requests PayTR sends to the merchant.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use paytr_sdk::objects::CallbackNotification;
use tracing::{info, warn};

use crate::state::AppState;

/// Errors returned by the callback endpoint.
#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    #[error("bad hash")]
    BadHash,
}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            CallbackError::BadHash => (StatusCode::BAD_REQUEST, "PAYTR notification failed: bad hash"),
        };
        (status, message).into_response()
    }
}

/// `POST /paytr/callback` — payment result notification.
///
/// The notification is only trusted after its hash verifies. PayTR keeps
/// retrying until it receives a plain `OK`, including for failed payments
/// and for notifications it already delivered.
pub(super) async fn payment_callback(
    State(state): State<AppState>,
    Form(notification): Form<CallbackNotification>,
) -> Result<&'static str, CallbackError> {
    if let Err(e) = notification.verify(&state.merchant) {
        warn!(
            merchant_oid = %notification.merchant_oid,
            error = %e,
            "Rejected PayTR callback"
        );
        return Err(CallbackError::BadHash);
    }

    if notification.is_success() {
        info!(
            merchant_oid = %notification.merchant_oid,
            total_amount = notification.total_amount,
            payment_type = %notification.payment_type,
            test_mode = notification.test_mode.is_enabled(),
            "Payment completed"
        );
    } else {
        info!(
            merchant_oid = %notification.merchant_oid,
            failed_reason_code = ?notification.failed_reason_code,
            failed_reason_message = %notification.failed_reason_message,
            "Payment failed"
        );
    }

    Ok("OK")
}

/// `POST /paytr/error` — render whatever PayTR posted when the checkout broke.
pub(super) async fn payment_error(Form(fields): Form<Vec<(String, String)>>) -> Html<String> {
    warn!(fields = fields.len(), "PayTR reported a checkout error");

    let mut page = String::from("<meta charset=\"utf-8\" />\nerror <br>\n<dl>\n");
    for (name, value) in &fields {
        page.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>\n",
            escape_html(name),
            escape_html(value)
        ));
    }
    page.push_str("</dl>\n");
    Html(page)
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
