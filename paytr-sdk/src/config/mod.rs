//! Configuration types for PayTR merchants.
//!
//! Loading these values (files, environment, secret stores) is left to the
//! application; the SDK only consumes them per call.

mod merchant;

pub use merchant::MerchantConfig;
