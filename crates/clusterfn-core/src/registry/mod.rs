//! Template function registry
//!
//! The registry binds a fixed catalog of cluster-derived functions into a
//! [`Namespace`] that a template renderer calls by name. The catalog is a
//! static table of (name, arity, handler); the namespace is the string-keyed
//! view the renderer needs.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use clusterfn_core::{ClusterContext, FunctionRegistry, Namespace};
//!
//! # fn try_main() -> clusterfn_core::Result<()> {
//! let context = Arc::new(ClusterContext::from_path("cluster.json")?);
//! let registry = FunctionRegistry::new(context);
//!
//! let mut namespace = Namespace::new();
//! registry.populate(&mut namespace);
//!
//! let argv = namespace.call("DnsControllerArgv", &[])?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Arguments
//!
//! Functions take positional JSON values. Arity is checked by the namespace
//! before a handler runs; argument types are checked by each handler and
//! reported as [`Error::InvalidArgument`].

mod functions;

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::context::ClusterContext;
use crate::error::{Error, Result};

/// A callable bound into a namespace
pub type BoundFunction = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// Handler signature for catalog entries
type Handler = fn(&ClusterContext, &[Value]) -> Result<Value>;

/// One entry of the static function catalog
#[derive(Debug, Clone, Copy)]
pub struct FunctionSpec {
    /// Name the renderer calls the function by
    pub name: &'static str,
    /// Number of positional arguments
    pub arity: usize,
    handler: Handler,
}

const CATALOG: &[FunctionSpec] = &[
    FunctionSpec {
        name: "SharedVPC",
        arity: 0,
        handler: functions::shared_vpc,
    },
    FunctionSpec {
        name: "Arch",
        arity: 0,
        handler: functions::arch,
    },
    FunctionSpec {
        name: "Base64Encode",
        arity: 1,
        handler: functions::base64_encode,
    },
    FunctionSpec {
        name: "replace",
        arity: 3,
        handler: functions::replace,
    },
    FunctionSpec {
        name: "join",
        arity: 2,
        handler: functions::join,
    },
    FunctionSpec {
        name: "ClusterName",
        arity: 0,
        handler: functions::cluster_name,
    },
    FunctionSpec {
        name: "HasTag",
        arity: 1,
        handler: functions::has_tag,
    },
    FunctionSpec {
        name: "Image",
        arity: 1,
        handler: functions::image,
    },
    FunctionSpec {
        name: "WithDefaultBool",
        arity: 2,
        handler: functions::with_default_bool,
    },
    FunctionSpec {
        name: "GetInstanceGroup",
        arity: 1,
        handler: functions::get_instance_group,
    },
    FunctionSpec {
        name: "CloudTags",
        arity: 1,
        handler: functions::cloud_tags,
    },
    FunctionSpec {
        name: "KubeDNS",
        arity: 0,
        handler: functions::kube_dns,
    },
    FunctionSpec {
        name: "DnsControllerArgv",
        arity: 0,
        handler: functions::dns_controller_argv,
    },
    FunctionSpec {
        name: "ExternalDnsArgv",
        arity: 0,
        handler: functions::external_dns_argv,
    },
    FunctionSpec {
        name: "EncodeGCELabel",
        arity: 1,
        handler: functions::encode_gce_label,
    },
    FunctionSpec {
        name: "DecodeGCELabel",
        arity: 1,
        handler: functions::decode_gce_label,
    },
    FunctionSpec {
        name: "Region",
        arity: 0,
        handler: functions::region,
    },
];

struct Entry {
    arity: usize,
    function: BoundFunction,
}

/// String-keyed function namespace handed to the renderer
#[derive(Default)]
pub struct Namespace {
    functions: HashMap<String, Entry>,
}

impl Namespace {
    /// Create a new empty namespace
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a function
    ///
    /// # Parameters
    ///
    /// - `name`: Name the renderer will call
    /// - `arity`: Exact number of positional arguments
    /// - `function`: The callable; replaces any previous binding of `name`
    pub fn insert(&mut self, name: impl Into<String>, arity: usize, function: BoundFunction) {
        self.functions.insert(name.into(), Entry { arity, function });
    }

    /// Invoke a bound function
    ///
    /// # Returns
    ///
    /// - `Ok(Value)`: The function result
    /// - `Err(Error)`: Unknown name, wrong arity, or the function's own error
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        let entry = self
            .functions
            .get(name)
            .ok_or_else(|| Error::unknown_function(name))?;

        if args.len() != entry.arity {
            return Err(Error::invalid_argument(
                name,
                format!("expected {} argument(s), got {}", entry.arity, args.len()),
            ));
        }

        (entry.function)(args)
    }

    /// Check if a function is bound
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Arity of a bound function
    pub fn arity(&self, name: &str) -> Option<usize> {
        self.functions.get(name).map(|e| e.arity)
    }

    /// List all bound function names, sorted
    pub fn list_functions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of bound functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether nothing is bound
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("functions", &self.list_functions())
            .finish()
    }
}

/// Binds the function catalog to one cluster context
///
/// Built once per run. Every binding holds its own handle on the context,
/// so a populated namespace stays valid independently of the registry.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    context: Arc<ClusterContext>,
}

impl FunctionRegistry {
    /// Create a registry for a context
    pub fn new(context: Arc<ClusterContext>) -> Self {
        Self { context }
    }

    /// The bound context
    pub fn context(&self) -> &ClusterContext {
        &self.context
    }

    /// The static catalog of functions this registry binds
    pub fn catalog() -> &'static [FunctionSpec] {
        CATALOG
    }

    /// Insert every catalog function into `namespace`
    ///
    /// Repeated calls bind identical functions; existing bindings with the
    /// same names are replaced.
    pub fn populate(&self, namespace: &mut Namespace) {
        for spec in CATALOG {
            let context = Arc::clone(&self.context);
            let handler = spec.handler;
            namespace.insert(
                spec.name,
                spec.arity,
                Arc::new(move |args: &[Value]| handler(&context, args)),
            );
        }

        debug!(
            cluster = %self.context.cluster_name(),
            functions = CATALOG.len(),
            "template namespace populated"
        );
    }

    /// Convenience: a fresh namespace holding only the catalog
    pub fn namespace(&self) -> Namespace {
        let mut namespace = Namespace::new();
        self.populate(&mut namespace);
        namespace
    }
}
