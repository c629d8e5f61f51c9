//! Payment result notification PayTR posts to the merchant's callback URL.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::Toggle;
use crate::config::MerchantConfig;
use crate::signature::{self, SignatureError};

/// Form body of a callback notification.
///
/// Deserialize it from the `application/x-www-form-urlencoded` request body,
/// then check [`is_valid`](Self::is_valid) before acting on it. PayTR
/// expects a plain `OK` response once the notification has been handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackNotification {
    pub hash: String,
    #[serde(default)]
    pub merchant_id: String,
    pub merchant_oid: String,
    /// `success` or `failed`.
    pub status: String,
    /// Amount charged in minor units, including installment interest.
    pub total_amount: u64,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub payment_amount: Option<u64>,
    #[serde(default)]
    pub payment_type: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub test_mode: Toggle,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub failed_reason_code: Option<u32>,
    #[serde(default, rename = "failed_reason_msg")]
    pub failed_reason_message: String,
}

impl CallbackNotification {
    /// Whether the gateway reported a completed payment.
    pub fn is_success(&self) -> bool {
        self.status == "success" && self.failed_reason_message.is_empty()
    }

    /// Recompute the hash with the merchant key and salt and compare it.
    pub fn verify(&self, merchant: &MerchantConfig) -> Result<(), SignatureError> {
        signature::verify_callback(self, merchant)
    }

    /// `true` only if the notification was signed with this merchant's key.
    pub fn is_valid(&self, merchant: &MerchantConfig) -> bool {
        self.verify(merchant).is_ok()
    }
}

/// Form posts send absent numbers as empty strings.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
