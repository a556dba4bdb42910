//! The start pipeline: list subscriptions, list the VMs of each one and ask
//! the management API to start every VM found.
//!
//! Only the subscription listing is fatal. A failed VM listing skips that
//! subscription, a failed start skips that VM. Calls are issued one at a
//! time in the order the list endpoints return them.

use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use crate::arm::{self, Subscription, SubscriptionList, VirtualMachine, VmList};
use crate::client::ArmClient;
use crate::credential::AccessToken;
use crate::error::{Error, Result};

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub subscriptions: usize,
    pub subscriptions_failed: usize,
    pub vms_found: usize,
    pub starts_accepted: usize,
    pub starts_failed: usize,
}

#[instrument(skip(client, token))]
pub async fn list_subscriptions(
    client: &ArmClient,
    token: &AccessToken,
) -> Result<Vec<Subscription>> {
    let url = arm::subscriptions_url(client.endpoint());
    debug!("Requesting subscriptions: {}", url);

    let response = client.send(Method::GET, &url, token).await?;
    let response = expect_status(response, StatusCode::OK, &url)?;
    let list: SubscriptionList = decode(response, "subscriptions").await?;

    if list.next_link.is_some() {
        warn!(
            "Subscription list is paged, only the first {} entries are processed",
            list.value.len()
        );
    }

    Ok(list.value)
}

#[instrument(skip(client, token))]
pub async fn list_vms(
    client: &ArmClient,
    token: &AccessToken,
    subscription_id: &str,
) -> Result<Vec<VirtualMachine>> {
    let url = arm::vms_url(client.endpoint(), subscription_id);
    debug!("Requesting VMs: {}", url);

    let response = client.send(Method::GET, &url, token).await?;
    let response = expect_status(response, StatusCode::OK, &url)?;
    let list: VmList = decode(response, "VMs").await?;

    if list.next_link.is_some() {
        warn!(
            "VM list for {} is paged, only the first {} entries are processed",
            subscription_id,
            list.value.len()
        );
    }

    Ok(list.value.into_iter().map(VirtualMachine::from).collect())
}

/// Issues the start action for one VM. Only 202 counts as success; the
/// action runs asynchronously on the remote side and is not polled.
pub async fn start_vm(
    client: &ArmClient,
    token: &AccessToken,
    subscription_id: &str,
    vm: &VirtualMachine,
) -> Result<()> {
    let url = arm::start_url(client.endpoint(), subscription_id, vm);
    debug!(
        "Sending POST request to start VM. subscription_id={} resource_group={} vm_name={} url={}",
        subscription_id, vm.resource_group, vm.name, url
    );

    if vm.name.is_empty() {
        return Err(Error::MissingVmName { id: vm.id.clone() });
    }
    if vm.resource_group.is_empty() {
        return Err(Error::MissingResourceGroup { id: vm.id.clone() });
    }

    let response = client.send(Method::POST, &url, token).await?;
    expect_status(response, StatusCode::ACCEPTED, &url)?;
    Ok(())
}

/// Runs the whole pipeline with one token. Returns `Err` only when the
/// subscription list cannot be obtained.
pub async fn run(client: &ArmClient, token: &AccessToken) -> Result<RunSummary> {
    let subscriptions = list_subscriptions(client, token).await?;
    let mut summary = RunSummary {
        subscriptions: subscriptions.len(),
        ..RunSummary::default()
    };

    for subscription in subscriptions {
        let subscription_id = subscription.subscription_id;
        if subscription_id.is_empty() {
            error!("Skipping subscription: {}", Error::MissingSubscriptionId);
            summary.subscriptions_failed += 1;
            continue;
        }
        info!("Processing subscription {}", subscription_id);

        let vms = match list_vms(client, token, &subscription_id).await {
            Ok(vms) => vms,
            Err(err) => {
                error!("Failed to fetch VMs for {}: {}", subscription_id, err);
                summary.subscriptions_failed += 1;
                continue;
            }
        };
        summary.vms_found += vms.len();

        for vm in &vms {
            match start_vm(client, token, &subscription_id, vm).await {
                Ok(()) => {
                    info!("VM {} start request accepted", vm.name);
                    summary.starts_accepted += 1;
                }
                Err(err) => {
                    error!(
                        "Failed to start VM {}: {}. subscription_id={} resource_group={} vm_name={}",
                        vm.name, err, subscription_id, vm.resource_group, vm.name
                    );
                    summary.starts_failed += 1;
                }
            }
        }
    }

    info!(
        "Run complete: {} subscriptions ({} failed), {} VMs, {} starts accepted, {} failed",
        summary.subscriptions,
        summary.subscriptions_failed,
        summary.vms_found,
        summary.starts_accepted,
        summary.starts_failed
    );

    Ok(summary)
}

fn expect_status(response: Response, expected: StatusCode, url: &str) -> Result<Response> {
    if response.status() != expected {
        return Err(Error::UnexpectedStatus {
            url: url.to_string(),
            status: response.status(),
        });
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response, what: &'static str) -> Result<T> {
    let url = response.url().to_string();
    let body = response
        .bytes()
        .await
        .map_err(|source| Error::Transport { url, source })?;

    serde_json::from_slice(&body).map_err(|source| Error::Decode { what, source })
}
