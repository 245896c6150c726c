//! Cloud provider identity and provider-specific helpers
//!
//! - [`CloudProvider`]: the closed set of providers argv synthesis handles
//! - [`gce`]: GCE label encoding
//! - [`is_gossip_hostname`]: gossip-mode detection for master hostnames

pub mod gce;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Suffix that marks a cluster as using gossip instead of a DNS zone
pub const GOSSIP_DOMAIN_SUFFIX: &str = ".k8s.local";

/// Cloud provider a cluster is deployed to
///
/// Parsing is exact and case-sensitive. Any identifier outside this set is
/// rejected with [`Error::UnsupportedProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    /// Amazon Web Services
    Aws,
    /// Google Compute Engine
    Gce,
    /// VMware vSphere
    Vsphere,
}

impl CloudProvider {
    /// All known providers
    pub const ALL: [CloudProvider; 3] = [Self::Aws, Self::Gce, Self::Vsphere];

    /// Identifier as it appears in the cluster spec
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Gce => "gce",
            Self::Vsphere => "vsphere",
        }
    }
}

impl FromStr for CloudProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|provider| provider.as_str() == s)
            .ok_or_else(|| Error::unsupported_provider(s))
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a hostname follows the gossip naming convention
///
/// A single trailing dot is ignored, so `api.c.k8s.local.` counts as well.
pub fn is_gossip_hostname(name: &str) -> bool {
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    format!(".{trimmed}").ends_with(GOSSIP_DOMAIN_SUFFIX)
}
