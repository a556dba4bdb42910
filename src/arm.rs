use serde::Deserialize;

use crate::config::{SUBSCRIPTION_API_VERSION, VM_API_VERSION};

const RESOURCE_GROUP_MARKER: &str = "/resourceGroups/";

// Response of GET /subscriptions
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionList {
    #[serde(default)]
    pub value: Vec<Subscription>,
    pub next_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(default)]
    pub subscription_id: String,
}

// Response of GET .../Microsoft.Compute/virtualMachines
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmList {
    #[serde(default)]
    pub value: Vec<VmDescriptor>,
    pub next_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct VmDescriptor {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A VM with its resource group resolved from the resource id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualMachine {
    pub id: String,
    pub name: String,
    pub resource_group: String,
}

impl From<VmDescriptor> for VirtualMachine {
    fn from(vm: VmDescriptor) -> Self {
        let resource_group = parse_resource_group(&vm.id).to_string();
        VirtualMachine {
            id: vm.id,
            name: vm.name,
            resource_group,
        }
    }
}

/// Returns the segment following `/resourceGroups/` in a resource id, or an
/// empty string when the marker is absent.
///
/// `/subscriptions/s/resourceGroups/rg-a/providers/...` yields `rg-a`.
pub fn parse_resource_group(resource_id: &str) -> &str {
    match resource_id.find(RESOURCE_GROUP_MARKER) {
        Some(idx) => {
            let rest = &resource_id[idx + RESOURCE_GROUP_MARKER.len()..];
            rest.split('/').next().unwrap_or_default()
        }
        None => "",
    }
}

pub fn subscriptions_url(endpoint: &str) -> String {
    format!(
        "{}/subscriptions?api-version={}",
        endpoint, SUBSCRIPTION_API_VERSION
    )
}

pub fn vms_url(endpoint: &str, subscription_id: &str) -> String {
    format!(
        "{}/subscriptions/{}/providers/Microsoft.Compute/virtualMachines?api-version={}",
        endpoint, subscription_id, VM_API_VERSION
    )
}

pub fn start_url(endpoint: &str, subscription_id: &str, vm: &VirtualMachine) -> String {
    format!(
        "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Compute/virtualMachines/{}/start?api-version={}",
        endpoint, subscription_id, vm.resource_group, vm.name, VM_API_VERSION
    )
}
