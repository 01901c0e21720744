//! Error types for the introspection crate.

use structeq_types::TypeError;

/// A strategy could not read a named child of a node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntrospectionError {
    /// The name does not resolve to a field or accessor of the node's type.
    #[error("no child node named `{name}` on {type_name}")]
    UnknownChildNode { name: String, type_name: String },

    /// The accessor behind the name exists but failed when invoked.
    #[error("reading `{name}` on {type_name} failed: {source}")]
    ReadFailed {
        name: String,
        type_name: String,
        #[source]
        source: TypeError,
    },

    /// The node is not an object and has no named children.
    #[error("cannot read `{name}` on a node of kind {kind}")]
    NotIntrospectable { name: String, kind: String },
}

impl IntrospectionError {
    /// The child-node name that failed to resolve.
    pub fn name(&self) -> &str {
        match self {
            Self::UnknownChildNode { name, .. }
            | Self::ReadFailed { name, .. }
            | Self::NotIntrospectable { name, .. } => name,
        }
    }
}

/// Convenience alias for introspection results.
pub type IntrospectionResult<T> = Result<T, IntrospectionError>;
