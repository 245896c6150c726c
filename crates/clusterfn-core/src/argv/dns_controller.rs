//! DNS controller argv

use super::{Diagnostic, Synthesis};
use crate::cloud::{CloudProvider, is_gossip_hostname};
use crate::config::ClusterSpec;
use crate::context::with_default_bool;
use crate::error::{Error, Result};

/// Executable path, always argv[0]
pub const DNS_CONTROLLER_BINARY: &str = "/usr/bin/dns-controller";

/// Seed address used when the cluster runs in gossip mode
pub const GOSSIP_SEED: &str = "127.0.0.1:3999";

/// Build the DNS controller argv for a cluster
///
/// The trailing `--zone=*/*` is always emitted, even after a narrower
/// `--zone` flag. Consumers rely on the wildcard being present.
pub fn dns_controller_argv(spec: &ClusterSpec) -> Result<Synthesis> {
    let mut out = Synthesis::default();
    out.push(DNS_CONTROLLER_BINARY);

    match &spec.external_dns {
        None => {
            out.push("--watch-ingress=false");
            out.record(Diagnostic::info("watch-ingress=false set on DNSController"));
        }
        Some(external_dns) => {
            if with_default_bool(external_dns.watch_ingress, false) {
                out.record(Diagnostic::warning(
                    "--watch-ingress=true set on DNSController; \
                     this may cause problems with previously defined services: \
                     https://github.com/kubernetes/kops/issues/2496",
                ));
            } else {
                out.push("--watch-ingress=false");
            }
        }
    }

    match spec.cloud_provider.parse::<CloudProvider>()? {
        CloudProvider::Aws => out.push("--dns=aws-route53"),
        CloudProvider::Gce => out.push("--dns=google-clouddns"),
        CloudProvider::Vsphere => {
            let server = spec
                .cloud_config
                .as_ref()
                .and_then(|c| c.vsphere_core_dns_server.as_deref())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| {
                    Error::precondition("vsphere requires cloudConfig.vSphereCoreDNSServer")
                })?;
            out.push("--dns=coredns");
            out.push(format!("--dns-server={server}"));
        }
    }

    if is_gossip_hostname(&spec.master_internal_name) {
        out.push(format!("--gossip-seed={GOSSIP_SEED}"));
    }

    let zone = spec.dns_zone.as_str();
    if !zone.is_empty() {
        if zone.contains('.') {
            // match by name
            out.push(format!("--zone={zone}"));
        } else {
            // match by id
            out.push(format!("--zone=*/{zone}"));
        }
    }
    // permit wildcard updates
    out.push("--zone=*/*");

    out.push("-v=2");

    Ok(out)
}
