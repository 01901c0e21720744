use structeq_config::{ComparatorError, ConfigurationError};
use structeq_introspect::IntrospectionError;

use crate::report::AssertionFailure;

/// Errors raised by a recursive comparison.
///
/// Differences are not errors: [`crate::compare`] returns them as data. Only
/// the assertion facade turns a non-empty difference list into
/// [`ComparisonError::NotEqual`].
#[derive(Debug, thiserror::Error)]
pub enum ComparisonError {
    /// A side that enumerates a child node failed to read it.
    #[error("cannot read `{path}`: {source}")]
    Introspection {
        path: String,
        #[source]
        source: IntrospectionError,
    },

    /// The configuration is contradictory or malformed.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A user comparator failed.
    #[error("comparator failed at `{path}`: {source}")]
    Comparator {
        path: String,
        #[source]
        source: ComparatorError,
    },

    /// The values differ.
    #[error("{0}")]
    NotEqual(Box<AssertionFailure>),

    /// The values were expected to differ but did not.
    #[error("expected values to differ when {strategy}, but no difference was found")]
    UnexpectedlyEqual { strategy: String },
}

impl ComparisonError {
    /// The failure behind a [`ComparisonError::NotEqual`].
    pub fn failure(&self) -> Option<&AssertionFailure> {
        match self {
            Self::NotEqual(failure) => Some(&**failure),
            _ => None,
        }
    }
}

/// Convenience alias for comparison results.
pub type ComparisonResult<T> = Result<T, ComparisonError>;
