//! Response of the "get token" endpoint.

use serde::{Deserialize, Serialize};

/// Body returned by `POST /odeme/api/get-token`.
///
/// Only a JSON object is accepted; any other JSON value is a decoding error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Map<String, serde_json::Value>")]
pub struct TokenResponse {
    /// `success` or `failed`, kept as PayTR sent it.
    pub status: String,
    /// Iframe token, present on success.
    pub token: String,
    /// Error message, present on failure.
    pub reason: Option<String>,
}

#[derive(Deserialize)]
struct RawTokenResponse {
    status: String,
    #[serde(default)]
    token: String,
    #[serde(default)]
    reason: Option<String>,
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for TokenResponse {
    type Error = serde_json::Error;

    fn try_from(map: serde_json::Map<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let raw: RawTokenResponse = serde_json::from_value(serde_json::Value::Object(map))?;
        Ok(Self {
            status: raw.status,
            token: raw.token,
            reason: raw.reason,
        })
    }
}

impl TokenResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// The failure reason when PayTR refused to issue a token.
    pub fn failed(&self) -> Option<&str> {
        if self.status == "failed" {
            Some(self.reason.as_deref().unwrap_or_default())
        } else {
            None
        }
    }

    /// HTML snippet embedding the hosted checkout page for this token.
    pub fn iframe(&self) -> String {
        format!(
            concat!(
                "\n\t<script src=\"https://www.paytr.com/js/iframeResizer.min.js\"></script>",
                "\n\t\t<iframe src=\"https://www.paytr.com/odeme/guvenli/{}\" id=\"paytriframe\" ",
                "frameborder=\"0\" scrolling=\"no\" style=\"width: 100%;\"></iframe>",
                "\n\t<script>iFrameResize({{}}, \"#paytriframe\");</script>",
            ),
            self.token
        )
    }
}
