use async_trait::async_trait;

use crate::error::Result;

/// Hands out a bearer token that is valid right now.
///
/// Implementations refresh an expired token before returning and must
/// serialize concurrent refresh attempts themselves; the API client calls
/// [`TokenGate::valid_token`] once per request, from whatever task the
/// request runs on.
#[async_trait]
pub trait TokenGate: Send + Sync {
    async fn valid_token(&self) -> Result<String>;
}

/// A gate around a fixed token. Handy for scripts that already hold a
/// short-lived token, and for tests.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl TokenGate for StaticToken {
    async fn valid_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
