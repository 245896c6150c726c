//! Contract Test: external-dns Argv
//!
//! Constraints verified:
//! - Provider flags come first, `--source=ingress` last
//! - The GCE project is passed through verbatim
//! - Providers other than AWS and GCE fail without a partial argv

mod common;

use clusterfn_core::Error;
use common::*;

#[test]
fn aws() {
    let out = context(cluster("aws")).external_dns_argv().unwrap();
    assert_eq!(out.argv, vec!["--provider=aws", "--source=ingress"]);
}

#[test]
fn gce_with_project() {
    let mut doc = cluster("gce");
    doc.cluster.spec.project = "proj-x".to_string();
    let out = context(doc).external_dns_argv().unwrap();

    assert_eq!(
        out.argv,
        vec!["--provider=google", "--google-project=proj-x", "--source=ingress"]
    );
}

#[test]
fn unsupported_providers_fail() {
    for provider in ["azure", "vsphere", ""] {
        let err = context(cluster(provider)).external_dns_argv().unwrap_err();
        assert!(
            matches!(err, Error::UnsupportedProvider(ref p) if p == provider),
            "provider {provider:?} gave {err:?}"
        );
    }
}

#[test]
fn synthesis_is_repeatable() {
    let mut doc = cluster("gce");
    doc.cluster.spec.project = "proj-x".to_string();
    let ctx = context(doc);
    assert_eq!(ctx.external_dns_argv().unwrap(), ctx.external_dns_argv().unwrap());
}
