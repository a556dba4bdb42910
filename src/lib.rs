//! Starts every virtual machine visible to the ambient Azure identity.
//!
//! One run lists the subscriptions, lists the VMs in each of them and sends
//! a start action per VM, logging the outcome of every request.

pub mod arm;
pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod starter;

pub use client::ArmClient;
pub use config::Config;
pub use credential::AccessToken;
pub use error::{Error, Result};
pub use starter::{run, RunSummary};
