//! Configuration types for cluster documents
//!
//! A cluster document is the already-validated cluster specification plus
//! its instance groups, the active tag set and the deployment region. It is
//! read once per provisioning run and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use crate::error::{Error, Result};

/// Everything a render needs to know about one cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDocument {
    /// The cluster itself
    pub cluster: Cluster,

    /// Instance groups, in declaration order
    #[serde(default)]
    pub instance_groups: Vec<InstanceGroup>,

    /// Active tags
    #[serde(default)]
    pub tags: BTreeSet<String>,

    /// Deployment region
    #[serde(default)]
    pub region: String,
}

impl ClusterDocument {
    /// Parse a cluster document from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a cluster document from a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Validate the document
    ///
    /// Instance group names must be non-empty and unique, so that a lookup
    /// by name finds exactly one group or none.
    pub fn validate(&self) -> Result<()> {
        if self.cluster.name.is_empty() {
            return Err(Error::config("Cluster name cannot be empty"));
        }

        let mut seen = HashSet::new();
        for group in &self.instance_groups {
            if group.name.is_empty() {
                return Err(Error::config("InstanceGroup name cannot be empty"));
            }
            if !seen.insert(group.name.as_str()) {
                return Err(Error::config(format!(
                    "Duplicate InstanceGroup name {:?}",
                    group.name
                )));
            }
        }

        Ok(())
    }
}

/// A named cluster and its specification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Cluster name (usually a DNS name)
    pub name: String,

    /// Cluster specification
    #[serde(default)]
    pub spec: ClusterSpec,
}

/// Cluster specification fields consumed by template functions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// Cloud provider identifier (e.g. "aws", "gce", "vsphere")
    #[serde(default)]
    pub cloud_provider: String,

    /// GCE project
    #[serde(default)]
    pub project: String,

    /// DNS zone, either a zone name (contains a dot) or a provider zone id
    #[serde(default)]
    pub dns_zone: String,

    /// Internal hostname of the master
    #[serde(default)]
    pub master_internal_name: String,

    /// Existing network to deploy into; set for shared VPCs
    #[serde(default, rename = "networkID")]
    pub network_id: String,

    /// Kubernetes version used to pick component images
    #[serde(default)]
    pub kubernetes_version: Option<String>,

    /// External DNS settings; absence means ingress watching is disabled
    #[serde(default)]
    pub external_dns: Option<ExternalDnsConfig>,

    /// KubeDNS add-on settings
    #[serde(default, rename = "kubeDNS")]
    pub kube_dns: Option<KubeDnsConfig>,

    /// Cloud-specific settings
    #[serde(default)]
    pub cloud_config: Option<CloudConfiguration>,

    /// Labels applied to every cloud resource of the cluster
    #[serde(default)]
    pub cloud_labels: BTreeMap<String, String>,
}

/// External DNS settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDnsConfig {
    /// Whether the DNS controller should publish records for ingresses
    #[serde(default)]
    pub watch_ingress: Option<bool>,
}

/// KubeDNS add-on settings, handed to templates as-is
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubeDnsConfig {
    /// Image override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Replica count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,

    /// Cluster DNS domain
    #[serde(default)]
    pub domain: String,

    /// Service IP of the DNS server
    #[serde(default, rename = "serverIP")]
    pub server_ip: String,
}

/// Cloud-specific settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudConfiguration {
    /// CoreDNS server the DNS controller talks to on vSphere
    #[serde(
        default,
        rename = "vSphereCoreDNSServer",
        skip_serializing_if = "Option::is_none"
    )]
    pub vsphere_core_dns_server: Option<String>,
}

/// A named group of instances sharing a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceGroup {
    /// Group name, unique within a cluster
    pub name: String,

    /// Role of the instances in the group
    #[serde(default)]
    pub role: InstanceGroupRole,

    /// Machine type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_type: Option<String>,

    /// Minimum group size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<u32>,

    /// Maximum group size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>,

    /// Subnets the group is placed in
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subnets: Vec<String>,

    /// Labels applied to the group's cloud resources
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cloud_labels: BTreeMap<String, String>,
}

impl InstanceGroup {
    /// Create a new instance group with the given name and role
    pub fn new(name: impl Into<String>, role: InstanceGroupRole) -> Self {
        Self {
            name: name.into(),
            role,
            machine_type: None,
            min_size: None,
            max_size: None,
            subnets: Vec::new(),
            cloud_labels: BTreeMap::new(),
        }
    }

    /// Set the machine type
    pub fn with_machine_type(mut self, machine_type: impl Into<String>) -> Self {
        self.machine_type = Some(machine_type.into());
        self
    }

    /// Add a cloud label
    pub fn with_cloud_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.cloud_labels.insert(key.into(), value.into());
        self
    }

    /// Whether this group runs masters
    pub fn is_master(&self) -> bool {
        self.role == InstanceGroupRole::Master
    }
}

/// Instance group role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstanceGroupRole {
    /// Control-plane instances
    Master,
    /// Worker instances
    #[default]
    Node,
    /// SSH bastion instances
    Bastion,
}
