use structeq_config::ConfigurationMatcher;
use structeq_types::Value;

use crate::dual_value::DualValue;
use crate::error::ComparisonResult;
use crate::specialisation::{shape_mismatch, Expansion, Specialisation};
use crate::walker::RecursiveComparator;

/// Ordered sequences compare element by element at `p[i]`.
///
/// Does not apply where collection order is ignored.
pub struct OrderedSequence;

impl Specialisation for OrderedSequence {
    fn name(&self) -> &str {
        "ordered sequence"
    }

    fn applies(&self, dual: &DualValue, matcher: &ConfigurationMatcher<'_>) -> bool {
        let either_seq =
            matches!(dual.actual, Value::Seq(_)) || matches!(dual.expected, Value::Seq(_));
        either_seq && !matcher.ignores_collection_order_at(&dual.location)
    }

    fn expand(
        &self,
        dual: &DualValue,
        _comparator: &RecursiveComparator<'_>,
    ) -> ComparisonResult<Expansion> {
        match (&dual.actual, &dual.expected) {
            (Value::Seq(actual), Value::Seq(expected)) => {
                if actual.len() != expected.len() {
                    return Ok(Expansion::Different {
                        reason: format!(
                            "different sizes: actual has {} elements, expected has {}",
                            actual.len(),
                            expected.len()
                        ),
                    });
                }
                let children = actual
                    .iter()
                    .zip(expected)
                    .enumerate()
                    .map(|(i, (a, e))| dual.child(dual.location.index(i), a.clone(), e.clone()))
                    .collect();
                Ok(Expansion::Children(children))
            }
            (Value::Seq(_), _) => Ok(shape_mismatch(dual, "an ordered sequence", true)),
            _ => Ok(shape_mismatch(dual, "an ordered sequence", false)),
        }
    }
}
