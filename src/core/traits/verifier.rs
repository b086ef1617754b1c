use std::future::Future;

use crate::core::errors::Result;

/// Port for checking an API key with its provider.
pub trait KeyVerifier: Send + Sync {
    /// `Ok(true)` if the provider accepts `secret`, `Ok(false)` if it
    /// answers with a rejection. Transport failures are errors.
    fn verify(&self, secret: &str) -> impl Future<Output = Result<bool>> + Send;
}
