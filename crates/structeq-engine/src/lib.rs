//! Recursive structural comparison for structeq.
//!
//! Walks two object graphs side by side, guided by an introspection
//! strategy, and reports every location where they differ.
//!
//! # Pipeline
//!
//! Each pair popped from the work stack goes through, in order:
//!
//! 1. **Configuration**: ignored paths, ignored types, null flags
//! 2. **Absent / null**: one-sided values are differences
//! 3. **Identity / cycles**: same instance or already-visited pairs stop here
//! 4. **Comparators**: path, then type, then overridden equality
//! 5. **Specialisations**: ordered sequences, unordered collections, maps,
//!    optionals
//! 6. **Objects**: children from the strategy, names unioned across sides
//! 7. **Leaves**: natural equality
//!
//! # Quick Start
//!
//! ```rust
//! use structeq_config::RecursiveComparisonConfiguration;
//! use structeq_engine::compare;
//! use structeq_types::Value;
//!
//! let config = RecursiveComparisonConfiguration::new();
//! let differences = compare(
//!     &Value::seq(["A", "B"]),
//!     &Value::seq(["A", "C"]),
//!     &config,
//! ).unwrap();
//! assert_eq!(differences[0].path(), "[1]");
//! ```

pub mod assertion;
pub mod difference;
pub mod dual_value;
pub mod error;
pub mod report;
pub mod representation;
pub mod specialisation;
pub mod specialisations;
pub mod walker;

pub use assertion::RecursiveComparison;
pub use difference::{ComparisonDifference, DifferenceRecord};
pub use dual_value::{DualValue, VisitedPairs};
pub use error::{ComparisonError, ComparisonResult};
pub use report::AssertionFailure;
pub use representation::{Representation, StandardRepresentation};
pub use specialisation::{Expansion, Specialisation};
pub use specialisations::{MapEntries, OptionalValue, OrderedSequence, UnorderedCollection};
pub use walker::RecursiveComparator;

use structeq_config::RecursiveComparisonConfiguration;
use structeq_types::Value;

/// Compare `actual` against `expected` with the standard specialisations.
///
/// Returns every difference found, in discovery order; an empty list means
/// the values are recursively equal.
pub fn compare(
    actual: &Value,
    expected: &Value,
    configuration: &RecursiveComparisonConfiguration,
) -> ComparisonResult<Vec<ComparisonDifference>> {
    RecursiveComparator::with_default_specialisations(configuration)?.compare(actual, expected)
}
