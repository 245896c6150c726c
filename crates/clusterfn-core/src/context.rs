//! Read-only cluster context
//!
//! A [`ClusterContext`] is built once per provisioning run from a validated
//! [`ClusterDocument`] and is never mutated afterwards. Every template
//! function reads from it; nothing writes to it.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

use crate::argv::{self, Synthesis};
use crate::cloud::CloudProvider;
use crate::config::{
    ClusterDocument, ClusterSpec, InstanceGroup, InstanceGroupRole, KubeDnsConfig,
};
use crate::error::{Error, Result};
use crate::images;

/// Cloud tag naming the owning cluster
pub const CLUSTER_TAG: &str = "KubernetesCluster";

/// Cloud tag marking master instances
pub const MASTER_ROLE_TAG: &str = "k8s.io/role/master";

/// Cloud tag marking node instances
pub const NODE_ROLE_TAG: &str = "k8s.io/role/node";

/// Immutable view of one cluster for the duration of a render
#[derive(Debug, Clone)]
pub struct ClusterContext {
    document: ClusterDocument,
}

impl ClusterContext {
    /// Build a context from a cluster document
    ///
    /// The document is validated first; duplicate instance group names are
    /// rejected here so lookups can never be ambiguous.
    pub fn new(document: ClusterDocument) -> Result<Self> {
        document.validate()?;
        debug!(
            cluster = %document.cluster.name,
            instance_groups = document.instance_groups.len(),
            "cluster context created"
        );
        Ok(Self { document })
    }

    /// Load and validate a cluster document from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(ClusterDocument::from_path(path)?)
    }

    /// Cluster name
    pub fn cluster_name(&self) -> &str {
        &self.document.cluster.name
    }

    /// Cluster specification
    pub fn spec(&self) -> &ClusterSpec {
        &self.document.cluster.spec
    }

    /// Instance groups in declaration order
    pub fn instance_groups(&self) -> &[InstanceGroup] {
        &self.document.instance_groups
    }

    /// Active tags
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.document.tags
    }

    /// Deployment region
    pub fn region(&self) -> &str {
        &self.document.region
    }

    /// Parsed cloud provider
    pub fn cloud_provider(&self) -> Result<CloudProvider> {
        self.spec().cloud_provider.parse()
    }

    /// Whether the cluster is deployed into an existing network
    pub fn shared_vpc(&self) -> bool {
        !self.spec().network_id.is_empty()
    }

    /// Whether a tag is active
    pub fn has_tag(&self, tag: &str) -> bool {
        self.document.tags.contains(tag)
    }

    /// Look up an instance group by exact name
    pub fn instance_group(&self, name: &str) -> Result<&InstanceGroup> {
        self.instance_groups()
            .iter()
            .find(|group| group.name == name)
            .ok_or_else(|| Error::not_found(name))
    }

    /// KubeDNS settings, if any
    pub fn kube_dns(&self) -> Option<&KubeDnsConfig> {
        self.spec().kube_dns.as_ref()
    }

    /// Cloud tags for resources belonging to an instance group
    ///
    /// Group labels override cluster labels; the cluster and role tags are
    /// applied last and always win.
    pub fn cloud_tags(&self, group: &InstanceGroup) -> BTreeMap<String, String> {
        let mut tags = self.spec().cloud_labels.clone();
        tags.extend(
            group
                .cloud_labels
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        tags.insert(CLUSTER_TAG.to_string(), self.cluster_name().to_string());
        match group.role {
            InstanceGroupRole::Master => {
                tags.insert(MASTER_ROLE_TAG.to_string(), "1".to_string());
            }
            InstanceGroupRole::Node => {
                tags.insert(NODE_ROLE_TAG.to_string(), "1".to_string());
            }
            InstanceGroupRole::Bastion => {}
        }

        tags
    }

    /// Image for a cluster component
    pub fn image(&self, component: &str) -> Result<String> {
        images::image(component, self.spec())
    }

    /// DNS controller argv and diagnostics
    pub fn dns_controller_argv(&self) -> Result<Synthesis> {
        argv::dns_controller_argv(self.spec())
    }

    /// external-dns argv and diagnostics
    pub fn external_dns_argv(&self) -> Result<Synthesis> {
        argv::external_dns_argv(self.spec())
    }
}

/// Resolve an optional boolean against a default
pub fn with_default_bool(value: Option<bool>, default: bool) -> bool {
    value.unwrap_or(default)
}
