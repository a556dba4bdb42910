use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";
pub const DEFAULT_MANAGEMENT_SCOPE: &str = "https://management.azure.com/.default";

pub const SUBSCRIPTION_API_VERSION: &str = "2022-12-01";
pub const VM_API_VERSION: &str = "2025-04-01";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const ENDPOINT_VAR: &str = "AZURE_MANAGEMENT_ENDPOINT";
const SCOPE_VAR: &str = "AZURE_MANAGEMENT_SCOPE";

/// Runtime settings. Credentials themselves are resolved by the identity
/// chain, never read here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub management_endpoint: String,
    pub scope: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            management_endpoint: DEFAULT_MANAGEMENT_ENDPOINT.to_string(),
            scope: DEFAULT_MANAGEMENT_SCOPE.to_string(),
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}

impl Config {
    pub fn new_from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(endpoint) = lookup(ENDPOINT_VAR).filter(|v| !v.trim().is_empty()) {
            config.management_endpoint = normalize_endpoint(&endpoint)?;
        }
        if let Some(scope) = lookup(SCOPE_VAR).filter(|v| !v.trim().is_empty()) {
            config.scope = scope.trim().to_string();
        }

        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self> {
        self.management_endpoint = normalize_endpoint(endpoint)?;
        Ok(self)
    }
}

fn normalize_endpoint(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(Error::Config(format!(
            "{} must be an http(s) URL, got '{}'",
            ENDPOINT_VAR, raw
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_target_public_cloud() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.management_endpoint, "https://management.azure.com");
        assert_eq!(config.scope, "https://management.azure.com/.default");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn endpoint_override_strips_trailing_slash() {
        let config = Config::from_lookup(lookup_from(&[(
            "AZURE_MANAGEMENT_ENDPOINT",
            "https://management.usgovcloudapi.net/",
        )]))
        .unwrap();
        assert_eq!(
            config.management_endpoint,
            "https://management.usgovcloudapi.net"
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("AZURE_MANAGEMENT_ENDPOINT", "  "),
            ("AZURE_MANAGEMENT_SCOPE", ""),
        ]))
        .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let err = Config::from_lookup(lookup_from(&[(
            "AZURE_MANAGEMENT_ENDPOINT",
            "management.azure.com",
        )]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn scope_override() {
        let config = Config::from_lookup(lookup_from(&[(
            "AZURE_MANAGEMENT_SCOPE",
            "https://management.chinacloudapi.cn/.default",
        )]))
        .unwrap();
        assert_eq!(config.scope, "https://management.chinacloudapi.cn/.default");
    }
}
