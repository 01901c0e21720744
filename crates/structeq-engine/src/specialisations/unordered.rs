use structeq_config::ConfigurationMatcher;
use structeq_types::Value;
use tracing::trace;

use crate::dual_value::DualValue;
use crate::error::ComparisonResult;
use crate::representation::{Representation, StandardRepresentation};
use crate::specialisation::{shape_mismatch, Expansion, Specialisation};
use crate::walker::RecursiveComparator;

/// Sets, and sequences whose order is ignored, compare by matching.
///
/// Each actual element is matched against the first not-yet-matched
/// expected element it is recursively equal to. Unmatched elements make a
/// single difference at the collection's path.
pub struct UnorderedCollection;

impl Specialisation for UnorderedCollection {
    fn name(&self) -> &str {
        "unordered collection"
    }

    fn applies(&self, dual: &DualValue, matcher: &ConfigurationMatcher<'_>) -> bool {
        let either = |f: fn(&Value) -> bool| f(&dual.actual) || f(&dual.expected);
        either(|v| matches!(v, Value::Set(_)))
            || (either(|v| matches!(v, Value::Seq(_)))
                && matcher.ignores_collection_order_at(&dual.location))
    }

    fn expand(
        &self,
        dual: &DualValue,
        comparator: &RecursiveComparator<'_>,
    ) -> ComparisonResult<Expansion> {
        let (Some(actual), Some(expected)) = (dual.actual.as_elements(), dual.expected.as_elements())
        else {
            return Ok(shape_mismatch(
                dual,
                "an unordered collection",
                dual.actual.is_collection(),
            ));
        };
        if actual.len() != expected.len() {
            return Ok(Expansion::Different {
                reason: format!(
                    "different sizes: actual has {} elements, expected has {}",
                    actual.len(),
                    expected.len()
                ),
            });
        }

        let mut remaining: Vec<&Value> = expected.iter().collect();
        let mut unmatched: Vec<Value> = Vec::new();
        for element in actual {
            let mut matched = None;
            for (i, candidate) in remaining.iter().enumerate() {
                if comparator.are_equivalent(dual, element, candidate)? {
                    matched = Some(i);
                    break;
                }
            }
            match matched {
                Some(i) => {
                    remaining.remove(i);
                }
                None => unmatched.push(element.clone()),
            }
        }

        if unmatched.is_empty() {
            return Ok(Expansion::Equal);
        }
        trace!(path = %dual.location, unmatched = unmatched.len(), "unmatched collection elements");
        Ok(Expansion::Different {
            reason: format!(
                "actual elements not found in expected: {}",
                StandardRepresentation.to_string_of(&Value::Seq(unmatched))
            ),
        })
    }
}
