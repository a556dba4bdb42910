use std::fmt;

use azure_core::auth::TokenCredential;
use azure_identity::{DefaultAzureCredential, TokenCredentialOptions};
use tracing::{debug, instrument};

use crate::error::{Error, Result};

/// Bearer token for the management API. Acquired once per run and never
/// refreshed, so calls start failing with 401 once it expires.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(secret: impl Into<String>) -> Self {
        AccessToken(secret.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Resolves the default identity chain (environment, managed identity,
/// developer login) and requests a token for `scope`.
#[instrument]
pub async fn acquire_token(scope: &str) -> Result<AccessToken> {
    let credential = DefaultAzureCredential::create(TokenCredentialOptions::default())
        .map_err(Error::Credential)?;

    let token = credential
        .get_token(&[scope])
        .await
        .map_err(Error::Credential)?;

    debug!("Obtained management token, expires on {}", token.expires_on);
    Ok(AccessToken::new(token.token.secret()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_secret() {
        let token = AccessToken::new("eyJ0eXAiOiJKV1Qi");
        let rendered = format!("{:?}", token);
        assert!(!rendered.contains("eyJ0"));
        assert_eq!(rendered, "AccessToken(<redacted>)");
    }
}
