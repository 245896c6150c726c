// # clusterfn - template function evaluator
//
// Thin front end over clusterfn-core. It loads a cluster document, binds the
// template function catalog to it, invokes one function (or both controller
// argv synthesizers) and prints the JSON result on stdout. All cluster logic
// lives in clusterfn-core.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// - `CLUSTERFN_CLUSTER_PATH`: Path to the cluster document (JSON, required)
// - `CLUSTERFN_FUNCTION`: Function to invoke. When unset, DnsControllerArgv
//   and ExternalDnsArgv are both invoked and printed as
//   `{"dnsController": [...], "externalDns": [...]}`
// - `CLUSTERFN_ARGS`: JSON array of positional arguments (default: []);
//   requires `CLUSTERFN_FUNCTION`
// - `CLUSTERFN_LOG_LEVEL`: trace, debug, info, warn or error (default: info)
//
// Logs go to stderr so stdout can be piped.
//
// ## Example
//
// ```bash
// export CLUSTERFN_CLUSTER_PATH=/etc/cluster/cluster.json
// export CLUSTERFN_FUNCTION=GetInstanceGroup
// export CLUSTERFN_ARGS='["nodes"]'
//
// clusterfn
// ```

use anyhow::{Context, Result};
use clusterfn_core::{ClusterContext, FunctionRegistry};
use serde_json::{Value, json};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Function evaluated and printed
/// - 1: Configuration or startup error
/// - 2: The function failed (the render would abort)
#[derive(Debug, Clone, Copy)]
enum ClusterfnExitCode {
    /// Result printed
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Function evaluation failed
    RenderError = 2,
}

impl From<ClusterfnExitCode> for ExitCode {
    fn from(code: ClusterfnExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    cluster_path: String,
    function: Option<String>,
    args: Vec<Value>,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let args = match env::var("CLUSTERFN_ARGS") {
            Ok(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
                .context("CLUSTERFN_ARGS must be a JSON array, e.g. '[\"nodes\"]'")?,
            _ => Vec::new(),
        };

        Ok(Self {
            cluster_path: env::var("CLUSTERFN_CLUSTER_PATH").unwrap_or_default(),
            function: env::var("CLUSTERFN_FUNCTION")
                .ok()
                .filter(|f| !f.trim().is_empty()),
            args,
            log_level: env::var("CLUSTERFN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.cluster_path.is_empty() {
            anyhow::bail!(
                "CLUSTERFN_CLUSTER_PATH is required. \
                Set it via: export CLUSTERFN_CLUSTER_PATH=/path/to/cluster.json"
            );
        }

        if !std::path::Path::new(&self.cluster_path).is_file() {
            anyhow::bail!(
                "CLUSTERFN_CLUSTER_PATH does not point to a file: {}",
                self.cluster_path
            );
        }

        match &self.function {
            Some(function)
                if !FunctionRegistry::catalog()
                    .iter()
                    .any(|spec| spec.name == function.as_str()) =>
            {
                let names: Vec<&str> =
                    FunctionRegistry::catalog().iter().map(|s| s.name).collect();
                anyhow::bail!(
                    "CLUSTERFN_FUNCTION '{}' is not a known function. Known functions: {}",
                    function,
                    names.join(", ")
                );
            }
            None if !self.args.is_empty() => {
                anyhow::bail!("CLUSTERFN_ARGS is set but CLUSTERFN_FUNCTION is not");
            }
            _ => {}
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "CLUSTERFN_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return ClusterfnExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return ClusterfnExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return ClusterfnExitCode::ConfigError.into();
    }

    let context = match ClusterContext::from_path(&config.cluster_path) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Failed to load cluster document {}: {}", config.cluster_path, e);
            return ClusterfnExitCode::ConfigError.into();
        }
    };

    let registry = FunctionRegistry::new(Arc::new(context));
    info!(
        "Loaded cluster {} ({} instance group(s))",
        registry.context().cluster_name(),
        registry.context().instance_groups().len()
    );

    let output = evaluate(&registry, config.function.as_deref(), &config.args)
        .and_then(|value| Ok(serde_json::to_string_pretty(&value)?));

    match output {
        Ok(output) => {
            println!("{}", output);
            ClusterfnExitCode::Success.into()
        }
        Err(e) => {
            let function = config.function.as_deref().unwrap_or("controller argv");
            error!("{} failed: {:#}", function, e);
            ClusterfnExitCode::RenderError.into()
        }
    }
}

/// Invoke one function, or both controller argv synthesizers when none is named
///
/// Either synthesizer failing fails the whole evaluation.
fn evaluate(registry: &FunctionRegistry, function: Option<&str>, args: &[Value]) -> Result<Value> {
    let namespace = registry.namespace();

    match function {
        Some(function) => {
            debug!(function, args = args.len(), "invoking template function");
            Ok(namespace.call(function, args)?)
        }
        None => {
            debug!("invoking controller argv synthesizers");
            Ok(json!({
                "dnsController": namespace.call("DnsControllerArgv", &[])?,
                "externalDns": namespace.call("ExternalDnsArgv", &[])?,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clusterfn_core::config::{CloudConfiguration, Cluster};
    use clusterfn_core::{ClusterDocument, ClusterSpec, Error, InstanceGroup, InstanceGroupRole};

    fn registry(spec: ClusterSpec) -> FunctionRegistry {
        let context = ClusterContext::new(ClusterDocument {
            cluster: Cluster {
                name: "c.example.com".to_string(),
                spec,
            },
            instance_groups: vec![InstanceGroup::new("nodes", InstanceGroupRole::Node)],
            ..Default::default()
        })
        .unwrap();
        FunctionRegistry::new(Arc::new(context))
    }

    fn gce() -> ClusterSpec {
        ClusterSpec {
            cloud_provider: "gce".to_string(),
            project: "proj-x".to_string(),
            dns_zone: "Z123".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_runs_both_synthesizers() {
        let value = evaluate(&registry(gce()), None, &[]).unwrap();

        assert_eq!(
            value,
            json!({
                "dnsController": [
                    "/usr/bin/dns-controller",
                    "--watch-ingress=false",
                    "--dns=google-clouddns",
                    "--zone=*/Z123",
                    "--zone=*/*",
                    "-v=2",
                ],
                "externalDns": [
                    "--provider=google",
                    "--google-project=proj-x",
                    "--source=ingress",
                ],
            })
        );
    }

    #[test]
    fn test_default_fails_when_external_dns_unsupported() {
        let spec = ClusterSpec {
            cloud_provider: "vsphere".to_string(),
            cloud_config: Some(CloudConfiguration {
                vsphere_core_dns_server: Some("http://10.0.0.2:2379".to_string()),
            }),
            ..Default::default()
        };

        let err = evaluate(&registry(spec), None, &[]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::UnsupportedProvider(p)) if p == "vsphere"
        ));
    }

    #[test]
    fn test_named_function_with_args() {
        let value =
            evaluate(&registry(gce()), Some("GetInstanceGroup"), &[json!("nodes")]).unwrap();
        assert_eq!(value["name"], json!("nodes"));
    }

    #[test]
    fn test_args_without_function_rejected() {
        let config = Config {
            cluster_path: "Cargo.toml".to_string(),
            function: None,
            args: vec![json!("nodes")],
            log_level: "info".to_string(),
        };
        assert!(config.validate().is_err());
    }
}
