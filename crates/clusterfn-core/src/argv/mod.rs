//! Argument vector synthesis for cluster add-on controllers
//!
//! Synthesizers are pure: they return the argv together with the
//! diagnostics observed while building it, and leave logging to the caller.
//! On error no partial argv is returned.
//!
//! - [`dns_controller_argv`]: the DNS-publishing controller
//! - [`external_dns_argv`]: the external-dns synchronizer

mod dns_controller;
mod external_dns;

pub use dns_controller::{DNS_CONTROLLER_BINARY, GOSSIP_SEED, dns_controller_argv};
pub use external_dns::external_dns_argv;

use serde::Serialize;
use tracing::{info, warn};

/// Severity of a synthesis diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    /// Informational
    Info,
    /// Known compatibility risk
    Warning,
}

/// An observation made while building an argv
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    /// Create an informational diagnostic
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            message: message.into(),
        }
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            message: message.into(),
        }
    }
}

/// Ordered argv plus the diagnostics recorded while building it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Synthesis {
    /// Arguments in emission order
    pub argv: Vec<String>,
    /// Diagnostics in recording order
    pub diagnostics: Vec<Diagnostic>,
}

impl Synthesis {
    fn push(&mut self, arg: impl Into<String>) {
        self.argv.push(arg.into());
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Whether any warning was recorded
    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.level == DiagnosticLevel::Warning)
    }

    /// Log the recorded diagnostics for a controller
    pub fn log_diagnostics(&self, controller: &str) {
        for diagnostic in &self.diagnostics {
            match diagnostic.level {
                DiagnosticLevel::Info => info!(controller, "{}", diagnostic.message),
                DiagnosticLevel::Warning => warn!(controller, "{}", diagnostic.message),
            }
        }
    }

    /// Drop the diagnostics and keep the argv
    pub fn into_argv(self) -> Vec<String> {
        self.argv
    }
}
