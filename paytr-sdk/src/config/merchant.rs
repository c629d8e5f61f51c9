//! Merchant configuration.

/// Credentials and redirect targets issued to a merchant by PayTR.
#[derive(Clone)]
pub struct MerchantConfig {
    /// Numeric store id ("Mağaza No").
    pub merchant_id: u64,
    /// Secret key bytes for HMAC signing.
    pub key: Box<[u8]>,
    /// Salt appended to every signed message.
    pub salt: String,
    /// Page the customer is sent to after a successful payment.
    pub ok_url: String,
    /// Page the customer is sent to when the payment fails.
    pub fail_url: String,
}

impl MerchantConfig {
    /// Create a new MerchantConfig.
    pub fn new(
        merchant_id: u64,
        key: impl Into<Box<[u8]>>,
        salt: impl Into<String>,
        ok_url: impl Into<String>,
        fail_url: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id,
            key: key.into(),
            salt: salt.into(),
            ok_url: ok_url.into(),
            fail_url: fail_url.into(),
        }
    }

    /// Get the secret key bytes for HMAC signing.
    pub fn key_bytes(&self) -> &[u8] {
        &self.key
    }
}

impl std::fmt::Debug for MerchantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchantConfig")
            .field("merchant_id", &self.merchant_id)
            .field("key", &"<redacted>")
            .field("salt", &"<redacted>")
            .field("ok_url", &self.ok_url)
            .field("fail_url", &self.fail_url)
            .finish()
    }
}
