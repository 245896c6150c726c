//! Fixtures shared by the contract tests
//!
//! Builders for cluster documents and registries, plus a helper that writes
//! a document to a temporary file for load-from-disk tests.

#![allow(dead_code)]

use clusterfn_core::config::{CloudConfiguration, Cluster, ExternalDnsConfig};
use clusterfn_core::{
    ClusterContext, ClusterDocument, ClusterSpec, FunctionRegistry, InstanceGroup,
    InstanceGroupRole, Namespace,
};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// A cluster on `provider` with no zone, no external DNS and a non-gossip master
pub fn cluster(provider: &str) -> ClusterDocument {
    ClusterDocument {
        cluster: Cluster {
            name: "test.example.com".to_string(),
            spec: ClusterSpec {
                cloud_provider: provider.to_string(),
                master_internal_name: "api.internal.test.example.com".to_string(),
                ..Default::default()
            },
        },
        instance_groups: vec![
            InstanceGroup::new("master-1", InstanceGroupRole::Master),
            InstanceGroup::new("node-1", InstanceGroupRole::Node).with_machine_type("m4.large"),
        ],
        tags: ["_networking_kubenet".to_string()].into_iter().collect(),
        region: "us-east-1".to_string(),
    }
}

/// Set the DNS zone
pub fn with_zone(mut doc: ClusterDocument, zone: &str) -> ClusterDocument {
    doc.cluster.spec.dns_zone = zone.to_string();
    doc
}

/// Set the external DNS config
pub fn with_watch_ingress(
    mut doc: ClusterDocument,
    watch_ingress: Option<bool>,
) -> ClusterDocument {
    doc.cluster.spec.external_dns = Some(ExternalDnsConfig { watch_ingress });
    doc
}

/// Set the vSphere CoreDNS server
pub fn with_core_dns_server(mut doc: ClusterDocument, server: &str) -> ClusterDocument {
    doc.cluster.spec.cloud_config = Some(CloudConfiguration {
        vsphere_core_dns_server: Some(server.to_string()),
    });
    doc
}

/// Build a validated context
pub fn context(doc: ClusterDocument) -> ClusterContext {
    ClusterContext::new(doc).expect("fixture document is valid")
}

/// Build a populated namespace for a document
pub fn namespace(doc: ClusterDocument) -> Namespace {
    FunctionRegistry::new(Arc::new(context(doc))).namespace()
}

/// Write a document to a temporary JSON file
pub fn write_document(doc: &ClusterDocument) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    let json = serde_json::to_string_pretty(doc).expect("serialize document");
    file.write_all(json.as_bytes()).expect("write document");
    file
}

/// Turn a JSON argv into strings
pub fn argv_strings(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .expect("argv is a list")
        .iter()
        .map(|v| v.as_str().expect("argv entries are strings").to_string())
        .collect()
}
