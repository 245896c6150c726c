//! Error types for cluster template functions
//!
//! Every error here aborts the render that triggered it. Nothing is retried
//! and nothing is downgraded to a default value.

use thiserror::Error;

/// Result type alias for template function operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for template functions and argv synthesis
#[derive(Error, Debug)]
pub enum Error {
    /// Requested instance group is not part of the cluster
    #[error("InstanceGroup {0:?} not found")]
    NotFound(String),

    /// Image resolution requested for an unknown component
    #[error("unsupported component {0:?}")]
    UnsupportedComponent(String),

    /// Cloud provider outside the set a synthesizer handles
    #[error("unhandled cloud provider {0:?}")]
    UnsupportedProvider(String),

    /// Provider-specific configuration that must be present is missing
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// A bound function was invoked with the wrong arguments
    #[error("invalid arguments to {function}: {message}")]
    InvalidArgument {
        /// Function name as registered in the namespace
        function: String,
        /// What was wrong with the arguments
        message: String,
    },

    /// The renderer asked for a function that is not registered
    #[error("unknown template function {0:?}")]
    UnknownFunction(String),

    /// Cluster document failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a cluster document failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a "not found" error for an instance group name
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create an unsupported component error
    pub fn unsupported_component(component: impl Into<String>) -> Self {
        Self::UnsupportedComponent(component.into())
    }

    /// Create an unsupported provider error
    pub fn unsupported_provider(provider: impl Into<String>) -> Self {
        Self::UnsupportedProvider(provider.into())
    }

    /// Create a precondition violation
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Create an invalid argument error for a named function
    pub fn invalid_argument(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            function: function.into(),
            message: message.into(),
        }
    }

    /// Create an unknown function error
    pub fn unknown_function(name: impl Into<String>) -> Self {
        Self::UnknownFunction(name.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_quotes_name() {
        let err = Error::not_found("node-2");
        assert_eq!(err.to_string(), "InstanceGroup \"node-2\" not found");
    }

    #[test]
    fn test_unsupported_provider_carries_value() {
        match Error::unsupported_provider("azure") {
            Error::UnsupportedProvider(p) => assert_eq!(p, "azure"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_anyhow_conversion() {
        let err: Error = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
