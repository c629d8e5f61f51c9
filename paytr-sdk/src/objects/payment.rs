//! The outgoing "get token" request.

use serde::{Deserialize, Serialize};

use super::Toggle;
use super::basket::{BasketError, BasketItem, encode_basket};
use crate::config::MerchantConfig;
use crate::signature;

/// Maximum length of `user_ip` accepted by PayTR.
pub const MAX_USER_IP_LEN: usize = 39;

/// Maximum length of `merchant_oid` accepted by PayTR.
pub const MAX_MERCHANT_OID_LEN: usize = 64;

/// The paying customer as known to the merchant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer IP address at the time of the request.
    pub ip: String,
    pub email: String,
    /// Full name.
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Per-payment switches that default to PayTR's usual settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOptions {
    /// Ask PayTR to explain errors in the token response.
    pub debug: Toggle,
    /// Offer single-shot card payments only.
    pub no_installment: Toggle,
    /// Highest installment count offered; `0` uses the account's maximum.
    pub max_installment: u8,
    /// Minutes before the checkout page expires.
    pub timeout_limit: u16,
    /// Currency code, e.g. `TL`.
    pub currency: String,
    /// Use the sandbox iframe.
    pub test_mode: Toggle,
}

impl Default for PaymentOptions {
    fn default() -> Self {
        Self {
            debug: Toggle::Disabled,
            no_installment: Toggle::Disabled,
            max_installment: 0,
            timeout_limit: 30,
            currency: "TL".to_string(),
            test_mode: Toggle::Disabled,
        }
    }
}

/// The request was not ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),
    #[error("field `{field}` exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("field `{0}` must be alphanumeric")]
    NotAlphanumeric(&'static str),
}

/// A payment about to be registered with PayTR.
///
/// Built once per checkout: add the basket, sign it, and hand it to the
/// client. Adding items after signing discards the stale token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparePayment {
    pub merchant_id: u64,
    /// Unique order number chosen by the merchant.
    pub merchant_oid: String,
    /// Total amount in minor units, e.g. `3456` for 34.56 TL.
    pub payment_amount: u64,
    pub customer: Customer,
    pub ok_url: String,
    pub fail_url: String,
    pub options: PaymentOptions,
    basket_items: Vec<BasketItem>,
    user_basket: String,
    token: Option<String>,
}

impl PreparePayment {
    /// Start a payment for `merchant` with default options and an empty basket.
    pub fn new(
        merchant: &MerchantConfig,
        merchant_oid: impl Into<String>,
        payment_amount: u64,
        customer: Customer,
    ) -> Self {
        Self {
            merchant_id: merchant.merchant_id,
            merchant_oid: merchant_oid.into(),
            payment_amount,
            customer,
            ok_url: merchant.ok_url.clone(),
            fail_url: merchant.fail_url.clone(),
            options: PaymentOptions::default(),
            basket_items: Vec::new(),
            user_basket: String::new(),
            token: None,
        }
    }

    pub fn with_options(mut self, options: PaymentOptions) -> Self {
        self.options = options;
        self
    }

    /// Append items to the basket and re-encode `user_basket`.
    ///
    /// On error the basket is left unchanged.
    pub fn add_basket(
        &mut self,
        items: impl IntoIterator<Item = BasketItem>,
    ) -> Result<(), BasketError> {
        let mut basket_items = self.basket_items.clone();
        basket_items.extend(items);
        self.user_basket = encode_basket(&basket_items)?;
        self.basket_items = basket_items;
        self.token = None;
        Ok(())
    }

    pub fn basket_items(&self) -> &[BasketItem] {
        &self.basket_items
    }

    /// The encoded basket; empty until [`add_basket`](Self::add_basket) runs.
    pub fn user_basket(&self) -> &str {
        &self.user_basket
    }

    /// The signature computed by [`generate_token`](Self::generate_token).
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Sign the request with the merchant key and salt and remember the token.
    pub fn generate_token(&mut self, merchant: &MerchantConfig) -> &str {
        let token = signature::payment_token(self, merchant);
        self.token.insert(token)
    }

    /// Check required fields and PayTR's length limits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.merchant_id == 0 {
            return Err(ValidationError::MissingField("merchant_id"));
        }
        require("user_ip", &self.customer.ip)?;
        require("merchant_oid", &self.merchant_oid)?;
        require("email", &self.customer.email)?;
        if self.payment_amount == 0 {
            return Err(ValidationError::MissingField("payment_amount"));
        }
        require("paytr_token", self.token.as_deref().unwrap_or_default())?;
        require("user_basket", &self.user_basket)?;
        require("user_name", &self.customer.name)?;
        require("user_address", &self.customer.address)?;
        require("user_phone", &self.customer.phone)?;
        require("merchant_ok_url", &self.ok_url)?;
        require("merchant_fail_url", &self.fail_url)?;
        if self.options.timeout_limit == 0 {
            return Err(ValidationError::MissingField("timeout_limit"));
        }
        require("currency", &self.options.currency)?;

        if self.customer.ip.chars().count() > MAX_USER_IP_LEN {
            return Err(ValidationError::TooLong {
                field: "user_ip",
                max: MAX_USER_IP_LEN,
            });
        }
        if self.merchant_oid.chars().count() > MAX_MERCHANT_OID_LEN {
            return Err(ValidationError::TooLong {
                field: "merchant_oid",
                max: MAX_MERCHANT_OID_LEN,
            });
        }
        if !self.merchant_oid.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::NotAlphanumeric("merchant_oid"));
        }
        Ok(())
    }

    /// Map the request to its form fields, in the order PayTR documents them.
    pub fn form_fields(&self) -> Result<Vec<(&'static str, String)>, ValidationError> {
        self.validate()?;
        let options = &self.options;
        Ok(vec![
            ("merchant_id", self.merchant_id.to_string()),
            ("user_ip", self.customer.ip.clone()),
            ("merchant_oid", self.merchant_oid.clone()),
            ("email", self.customer.email.clone()),
            ("payment_amount", self.payment_amount.to_string()),
            ("paytr_token", self.token.clone().unwrap_or_default()),
            ("user_basket", self.user_basket.clone()),
            ("debug_on", options.debug.to_string()),
            ("no_installment", options.no_installment.to_string()),
            ("max_installment", options.max_installment.to_string()),
            ("user_name", self.customer.name.clone()),
            ("user_address", self.customer.address.clone()),
            ("user_phone", self.customer.phone.clone()),
            ("merchant_ok_url", self.ok_url.clone()),
            ("merchant_fail_url", self.fail_url.clone()),
            ("timeout_limit", options.timeout_limit.to_string()),
            ("currency", options.currency.clone()),
            ("test_mode", options.test_mode.to_string()),
        ])
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}
