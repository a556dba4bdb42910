use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response};
use tracing::trace;

use crate::config::Config;
use crate::credential::AccessToken;
use crate::error::{Error, Result};

/// Thin wrapper over a `reqwest::Client` that knows the management endpoint
/// and the per-call timeout. Status codes are left to the caller.
#[derive(Debug, Clone)]
pub struct ArmClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl ArmClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|source| Error::Transport {
                url: config.management_endpoint.clone(),
                source,
            })?;

        Ok(ArmClient {
            http,
            endpoint: config.management_endpoint.clone(),
            timeout: config.request_timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Per-request timeout applied to every call made through this client.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends a body-less request with the bearer token attached. Transport
    /// failures (including the timeout) come back as `Error::Transport`.
    pub async fn send(&self, method: Method, url: &str, token: &AccessToken) -> Result<Response> {
        let headers = request_headers(token)?;

        trace!("{} {}", method, url);
        self.http
            .request(method, url)
            .headers(headers)
            .send()
            .await
            .map_err(|source| Error::Transport {
                url: url.to_string(),
                source,
            })
    }
}

fn request_headers(token: &AccessToken) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.secret()))
        .map_err(|_| Error::Config("access token contains invalid header characters".into()))?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_carry_bearer_and_json_content_type() {
        let headers = request_headers(&AccessToken::new("abc123")).unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer abc123");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn default_client_times_out_after_thirty_seconds() {
        let client = ArmClient::new(&Config::default()).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(30));
        assert_eq!(client.endpoint(), "https://management.azure.com");
    }

    #[test]
    fn rejects_token_with_newline() {
        assert!(request_headers(&AccessToken::new("abc\n123")).is_err());
    }
}
