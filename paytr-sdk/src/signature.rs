//! Signature algorithm and verification for the PayTR iFrame API.
//!
//! Every signature PayTR deals in is `base64(HMAC-SHA256(message, merchant_key))`
//! using the standard, padded base64 alphabet. Two messages exist:
//!
//! * **Payment token** (merchant → PayTR, `paytr_token` form field):
//!
//!   ```text
//!   merchant_id ‖ user_ip ‖ merchant_oid ‖ email ‖ payment_amount ‖ user_basket
//!     ‖ no_installment ‖ max_installment ‖ currency ‖ test_mode ‖ merchant_salt
//!   ```
//!
//! * **Callback hash** (PayTR → merchant, `hash` form field):
//!
//!   ```text
//!   merchant_oid ‖ merchant_salt ‖ status ‖ total_amount
//!   ```

use crate::config::MerchantConfig;
use crate::objects::{CallbackNotification, PreparePayment};

/// Errors produced by signature verification.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("invalid base64 encoding")]
    InvalidBase64,
    #[error("invalid signature")]
    SignatureMismatch,
}

impl From<ring::error::Unspecified> for SignatureError {
    fn from(_: ring::error::Unspecified) -> Self {
        Self::SignatureMismatch
    }
}

fn hmac_key(key: &[u8]) -> ring::hmac::Key {
    ring::hmac::Key::new(ring::hmac::HMAC_SHA256, key)
}

/// Compute `base64(HMAC-SHA256(message, key))`.
pub fn sign(message: &str, key: &[u8]) -> String {
    let tag = ring::hmac::sign(&hmac_key(key), message.as_bytes());
    fast32::base64::RFC4648.encode(tag.as_ref())
}

/// Check a base64 signature against `message` in constant time.
pub fn verify(message: &str, signature: &str, key: &[u8]) -> Result<(), SignatureError> {
    let signature = fast32::base64::RFC4648
        .decode_str(signature)
        .map_err(|_| SignatureError::InvalidBase64)?;
    ring::hmac::verify(&hmac_key(key), message.as_bytes(), &signature)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Payment token
// ---------------------------------------------------------------------------

/// Build the exact string PayTR hashes to produce `paytr_token`.
pub fn payment_message(payment: &PreparePayment, salt: &str) -> String {
    let options = &payment.options;
    let mut message = String::with_capacity(128 + payment.user_basket().len());
    message.push_str(&payment.merchant_id.to_string());
    message.push_str(&payment.customer.ip);
    message.push_str(&payment.merchant_oid);
    message.push_str(&payment.customer.email);
    message.push_str(&payment.payment_amount.to_string());
    message.push_str(payment.user_basket());
    message.push_str(options.no_installment.as_flag());
    message.push_str(&options.max_installment.to_string());
    message.push_str(&options.currency);
    message.push_str(options.test_mode.as_flag());
    message.push_str(salt);
    message
}

/// Compute the `paytr_token` for a prepared payment.
pub fn payment_token(payment: &PreparePayment, merchant: &MerchantConfig) -> String {
    sign(
        &payment_message(payment, &merchant.salt),
        merchant.key_bytes(),
    )
}

// ---------------------------------------------------------------------------
// Callback hash
// ---------------------------------------------------------------------------

/// Build the exact string PayTR hashes to produce a callback's `hash`.
pub fn callback_message(notification: &CallbackNotification, salt: &str) -> String {
    format!(
        "{}{}{}{}",
        notification.merchant_oid, salt, notification.status, notification.total_amount
    )
}

/// Verify the `hash` PayTR attached to a callback notification.
pub fn verify_callback(
    notification: &CallbackNotification,
    merchant: &MerchantConfig,
) -> Result<(), SignatureError> {
    verify(
        &callback_message(notification, &merchant.salt),
        &notification.hash,
        merchant.key_bytes(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_known_vector() {
        assert_eq!(
            sign("ORD1Ssuccess1000", b"K"),
            "wrURbRwF1VRWWA7qzMTY0OAH4xdm7UUp8673CUDA/MI="
        );
    }

    #[test]
    fn test_verify_roundtrip_and_rejection() {
        let signature = sign("hello", b"key");
        assert!(verify("hello", &signature, b"key").is_ok());
        assert!(matches!(
            verify("hellO", &signature, b"key"),
            Err(SignatureError::SignatureMismatch)
        ));
        assert!(matches!(
            verify("hello", &signature, b"other-key"),
            Err(SignatureError::SignatureMismatch)
        ));
        assert!(matches!(
            verify("hello", "not base64!", b"key"),
            Err(SignatureError::InvalidBase64)
        ));
    }

    #[test]
    fn test_verify_rejects_truncated_signature() {
        let signature = sign("hello", b"key");
        let decoded = fast32::base64::RFC4648.decode_str(&signature).unwrap();
        let truncated = fast32::base64::RFC4648.encode(&decoded[..16]);
        assert!(verify("hello", &truncated, b"key").is_err());
    }
}
