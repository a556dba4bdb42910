use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The identity chain could not produce a management token.
    #[error("failed to get Azure token: {0}")]
    Credential(#[source] azure_core::Error),

    /// Network, TLS or timeout failure before a status code was received.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: StatusCode },

    #[error("failed to parse {what} JSON: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The resource id carries no `/resourceGroups/` segment.
    #[error("no resource group in resource id '{id}'")]
    MissingResourceGroup { id: String },

    #[error("no VM name for resource id '{id}'")]
    MissingVmName { id: String },

    #[error("subscription entry has no subscriptionId")]
    MissingSubscriptionId,

    #[error("invalid configuration: {0}")]
    Config(String),
}
