//! Error types for the configuration crate.

/// A configuration that cannot drive a comparison.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// A path is both ignored and explicitly compared.
    #[error("field `{path}` is both ignored and compared")]
    IgnoredAndCompared { path: String },

    /// A type is both ignored and explicitly compared.
    #[error("type `{type_name}` is both ignored and compared")]
    IgnoredAndComparedType { type_name: String },

    /// A path regex does not compile.
    #[error("invalid field regex `{pattern}`: {message}")]
    InvalidRegex { pattern: String, message: String },

    /// Settings could not be parsed.
    #[error("settings parse error: {0}")]
    Parse(String),
}

/// Convenience alias for configuration results.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;

/// A user comparator could not decide.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComparatorError {
    /// The comparator does not handle values of this kind.
    #[error("{comparator} cannot compare a {actual} with a {expected}")]
    Unsupported {
        comparator: String,
        actual: String,
        expected: String,
    },

    /// The comparator failed for another reason.
    #[error("{comparator} failed: {message}")]
    Failed { comparator: String, message: String },
}

/// Convenience alias for comparator results.
pub type ComparatorResult<T> = Result<T, ComparatorError>;
