//! Client SDK for the PayTR iFrame API.
//!
//! The flow mirrors what the gateway expects from a merchant backend:
//!
//! 1. Build a [`PreparePayment`](objects::PreparePayment) and add basket items.
//! 2. Sign it with the merchant key and salt ([`signature::payment_token`]).
//! 3. Post it to the token endpoint with [`PaytrClient`](client::PaytrClient)
//!    and embed [`TokenResponse::iframe`](objects::TokenResponse::iframe).
//! 4. Verify every [`CallbackNotification`](objects::CallbackNotification)
//!    the gateway posts back before trusting it.

#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod objects;
pub mod signature;
