pub mod basket;
pub mod callback;
pub mod payment;
pub mod token;

pub use basket::{BasketError, BasketItem, encode_basket};
pub use callback::CallbackNotification;
pub use payment::{Customer, PaymentOptions, PreparePayment, ValidationError};
pub use token::TokenResponse;

use serde::{Deserialize, Serialize};

/// A `0`/`1` switch as PayTR encodes it on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Toggle {
    #[default]
    #[serde(rename = "0")]
    Disabled,
    #[serde(rename = "1")]
    Enabled,
}

impl Toggle {
    /// The wire representation, `"0"` or `"1"`.
    pub fn as_flag(self) -> &'static str {
        match self {
            Toggle::Disabled => "0",
            Toggle::Enabled => "1",
        }
    }

    pub fn is_enabled(self) -> bool {
        self == Toggle::Enabled
    }
}

impl From<bool> for Toggle {
    fn from(value: bool) -> Self {
        if value { Toggle::Enabled } else { Toggle::Disabled }
    }
}

impl std::fmt::Display for Toggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_flag())
    }
}
