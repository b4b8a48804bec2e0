pub mod client;
pub mod token;
pub mod types;

use thiserror::Error;

/// Failure taxonomy for the remote gateway. Every variant is surfaced to the
/// user as a transient notice; only `Unauthorized` forces a state reset back
/// to onboarding. Nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not complete (transport failure or unexpected
    /// server error).
    #[error("network failure: {0}")]
    Network(String),
    /// Token missing, invalid, or expired.
    #[error("session expired")]
    Unauthorized,
    /// Backend-reported validation message.
    #[error("{0}")]
    Validation(String),
    /// Trial expired and no active subscription.
    #[error("{0}")]
    Payment(String),
}
