use structeq_config::ConfigurationMatcher;

use crate::dual_value::DualValue;
use crate::error::ComparisonResult;
use crate::walker::RecursiveComparator;

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

/// What a specialisation made of a pair.
#[derive(Clone, Debug)]
pub enum Expansion {
    /// The pair is equivalent as a whole.
    Equal,
    /// The pair differs as a whole.
    Different { reason: String },
    /// The pair is decided by these child pairs, in visiting order.
    Children(Vec<DualValue>),
}

// ---------------------------------------------------------------------------
// Specialisation trait
// ---------------------------------------------------------------------------

/// Container-specific handling tried before the object fallback.
///
/// Specialisations are tried in order; the first whose [`applies`] returns
/// `true` decides the pair.
///
/// [`applies`]: Specialisation::applies
pub trait Specialisation {
    /// Short name used in traces.
    fn name(&self) -> &str;

    fn applies(&self, dual: &DualValue, matcher: &ConfigurationMatcher<'_>) -> bool;

    /// Decide the pair. Nested comparisons go through
    /// [`RecursiveComparator::are_equivalent`].
    fn expand(
        &self,
        dual: &DualValue,
        comparator: &RecursiveComparator<'_>,
    ) -> ComparisonResult<Expansion>;
}

/// Reason for a pair where only one side has the container shape.
pub(crate) fn shape_mismatch(dual: &DualValue, shape: &str, actual_has_shape: bool) -> Expansion {
    let (side, other) = if actual_has_shape {
        ("actual", &dual.expected)
    } else {
        ("expected", &dual.actual)
    };
    let other_side = if actual_has_shape { "expected" } else { "actual" };
    Expansion::Different {
        reason: format!(
            "{side} value is {shape} but {other_side} value is a {}",
            other.type_name()
        ),
    }
}
