//! external-dns argv

use super::Synthesis;
use crate::cloud::CloudProvider;
use crate::config::ClusterSpec;
use crate::error::{Error, Result};

/// Build the external-dns argv for a cluster
///
/// Only AWS and GCE are handled; vSphere is rejected like any unknown
/// provider.
pub fn external_dns_argv(spec: &ClusterSpec) -> Result<Synthesis> {
    let mut out = Synthesis::default();

    match spec.cloud_provider.parse::<CloudProvider>()? {
        CloudProvider::Aws => out.push("--provider=aws"),
        CloudProvider::Gce => {
            out.push("--provider=google");
            out.push(format!("--google-project={}", spec.project));
        }
        provider @ CloudProvider::Vsphere => {
            return Err(Error::unsupported_provider(provider.as_str()));
        }
    }

    out.push("--source=ingress");

    Ok(out)
}
