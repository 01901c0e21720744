use thiserror::Error;

/// Errors produced by value and schema operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("type {type_name} declares no field named `{field}`")]
    UnknownField { type_name: String, field: String },

    #[error("type {type_name} declares no accessor named `{accessor}`")]
    UnknownAccessor { type_name: String, accessor: String },

    #[error("accessor `{accessor}` failed: {message}")]
    AccessorFailed { accessor: String, message: String },
}

impl TypeError {
    /// Error returned by an accessor body that cannot produce a value.
    pub fn accessor_failed(accessor: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AccessorFailed {
            accessor: accessor.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias for type operations.
pub type TypeResult<T> = Result<T, TypeError>;
