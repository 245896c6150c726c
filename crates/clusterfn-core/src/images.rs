//! Container image names for cluster components

use crate::config::ClusterSpec;
use crate::error::{Error, Result};

/// Registry that hosts the versioned component images
pub const IMAGE_REPOSITORY: &str = "gcr.io/google_containers";

/// KubeDNS ships on its own release cycle and is pinned
pub const KUBE_DNS_IMAGE: &str = "gcr.io/google_containers/kubedns-amd64:1.3";

/// Components whose image tag follows the cluster's Kubernetes version
const VERSIONED_COMPONENTS: &[&str] = &[
    "kube-apiserver",
    "kube-controller-manager",
    "kube-scheduler",
    "kube-proxy",
];

/// Resolve the image for a logical component
///
/// Fails with [`Error::UnsupportedComponent`] for anything that is neither
/// a versioned control-plane component nor `kube-dns`.
pub fn image(component: &str, spec: &ClusterSpec) -> Result<String> {
    if component == "kube-dns" {
        return Ok(KUBE_DNS_IMAGE.to_string());
    }

    if !VERSIONED_COMPONENTS.contains(&component) {
        return Err(Error::unsupported_component(component));
    }

    let version = spec
        .kubernetes_version
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            Error::precondition(format!(
                "kubernetesVersion must be set to resolve the {component} image"
            ))
        })?;

    // Tags for release URLs live next to the binaries and need a fetch.
    if version.starts_with("http://") || version.starts_with("https://") {
        return Err(Error::precondition(format!(
            "kubernetesVersion {version:?} is a base URL; \
             image tags cannot be resolved without fetching it"
        )));
    }

    let version = version.strip_prefix('v').unwrap_or(version);
    Ok(format!("{IMAGE_REPOSITORY}/{component}:v{version}"))
}
