// # clusterfn-core
//
// Cluster-derived template functions and add-on controller argv synthesis.
//
// ## Architecture Overview
//
// - **ClusterContext**: Read-only view of one cluster for a render
// - **FunctionRegistry**: Binds the function catalog into a renderer namespace
// - **Namespace**: String-keyed function table the renderer calls into
// - **argv**: DNS controller and external-dns argument synthesis
// - **cloud**: Closed cloud provider set, gossip detection, GCE labels
//
// ## Design Principles
//
// 1. **Read-only**: Nothing here mutates the cluster context
// 2. **Synchronous**: No I/O after the context is loaded, no retries
// 3. **Fail the render**: Every error aborts the render that caused it
// 4. **Pure synthesis**: Synthesizers return diagnostics instead of logging

pub mod argv;
pub mod cloud;
pub mod config;
pub mod context;
pub mod error;
pub mod images;
pub mod registry;

// Re-export core types for convenience
pub use argv::{Diagnostic, DiagnosticLevel, Synthesis};
pub use cloud::CloudProvider;
pub use config::{ClusterDocument, ClusterSpec, InstanceGroup, InstanceGroupRole};
pub use context::ClusterContext;
pub use error::{Error, Result};
pub use registry::{FunctionRegistry, FunctionSpec, Namespace};
