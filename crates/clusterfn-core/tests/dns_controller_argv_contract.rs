//! Contract Test: DNS Controller Argv
//!
//! Constraints verified:
//! - Flag order is fixed: binary, ingress policy, provider, gossip, zones, verbosity
//! - The wildcard zone flag is emitted even after a narrower zone flag
//! - Unsupported providers fail without a partial argv
//! - Repeated synthesis over the same context is identical

mod common;

use clusterfn_core::{DiagnosticLevel, Error};
use common::*;

#[test]
fn aws_defaults() {
    let ctx = context(cluster("aws"));
    let out = ctx.dns_controller_argv().unwrap();

    assert_eq!(
        out.argv,
        vec![
            "/usr/bin/dns-controller",
            "--watch-ingress=false",
            "--dns=aws-route53",
            "--zone=*/*",
            "-v=2",
        ]
    );
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].level, DiagnosticLevel::Info);
}

#[test]
fn gce_zone_by_name() {
    let ctx = context(with_zone(cluster("gce"), "example.com"));
    let out = ctx.dns_controller_argv().unwrap();

    assert_eq!(
        out.argv,
        vec![
            "/usr/bin/dns-controller",
            "--watch-ingress=false",
            "--dns=google-clouddns",
            "--zone=example.com",
            "--zone=*/*",
            "-v=2",
        ]
    );
}

#[test]
fn gce_zone_by_id() {
    let ctx = context(with_zone(cluster("gce"), "Z123"));
    let argv = ctx.dns_controller_argv().unwrap().argv;

    let specific = argv.iter().position(|a| a == "--zone=*/Z123").unwrap();
    let wildcard = argv.iter().position(|a| a == "--zone=*/*").unwrap();
    assert_eq!(wildcard, specific + 1);
}

#[test]
fn watch_ingress_true_omits_suppression_and_warns() {
    let ctx = context(with_watch_ingress(cluster("aws"), Some(true)));
    let out = ctx.dns_controller_argv().unwrap();

    assert!(!out.argv.iter().any(|a| a == "--watch-ingress=false"));
    assert!(out.has_warnings());
    assert_eq!(out.argv[1], "--dns=aws-route53");
}

#[test]
fn watch_ingress_unset_defaults_to_false() {
    let ctx = context(with_watch_ingress(cluster("aws"), None));
    let out = ctx.dns_controller_argv().unwrap();

    assert_eq!(out.argv[1], "--watch-ingress=false");
    assert!(out.diagnostics.is_empty());
}

#[test]
fn vsphere_with_gossip_master() {
    let mut doc = with_core_dns_server(cluster("vsphere"), "http://10.0.0.2:2379");
    doc.cluster.spec.master_internal_name = "api.internal.test.k8s.local".to_string();
    let out = context(doc).dns_controller_argv().unwrap();

    assert_eq!(
        out.argv,
        vec![
            "/usr/bin/dns-controller",
            "--watch-ingress=false",
            "--dns=coredns",
            "--dns-server=http://10.0.0.2:2379",
            "--gossip-seed=127.0.0.1:3999",
            "--zone=*/*",
            "-v=2",
        ]
    );
}

#[test]
fn vsphere_missing_dns_server_is_precondition_violation() {
    let err = context(cluster("vsphere")).dns_controller_argv().unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));
}

#[test]
fn unsupported_provider_fails() {
    let err = context(cluster("azure")).dns_controller_argv().unwrap_err();
    assert!(matches!(err, Error::UnsupportedProvider(ref p) if p == "azure"));
}

#[test]
fn synthesis_is_repeatable() {
    let ctx = context(with_zone(with_watch_ingress(cluster("gce"), Some(true)), "Z123"));
    assert_eq!(ctx.dns_controller_argv().unwrap(), ctx.dns_controller_argv().unwrap());
}
