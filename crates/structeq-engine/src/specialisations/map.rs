use std::collections::{BTreeMap, BTreeSet};

use structeq_config::ConfigurationMatcher;
use structeq_types::Value;

use crate::dual_value::DualValue;
use crate::error::ComparisonResult;
use crate::specialisation::{shape_mismatch, Expansion, Specialisation};
use crate::walker::RecursiveComparator;

/// Maps compare entry by entry at `p.key`; a missing key is `Absent`.
pub struct MapEntries;

impl Specialisation for MapEntries {
    fn name(&self) -> &str {
        "map"
    }

    fn applies(&self, dual: &DualValue, _matcher: &ConfigurationMatcher<'_>) -> bool {
        matches!(dual.actual, Value::Map(_)) || matches!(dual.expected, Value::Map(_))
    }

    fn expand(
        &self,
        dual: &DualValue,
        _comparator: &RecursiveComparator<'_>,
    ) -> ComparisonResult<Expansion> {
        match (&dual.actual, &dual.expected) {
            (Value::Map(actual), Value::Map(expected)) => {
                let keys: BTreeSet<&String> = actual.keys().chain(expected.keys()).collect();
                let entry = |map: &BTreeMap<String, Value>, key: &String| {
                    map.get(key).cloned().unwrap_or(Value::Absent)
                };
                let children = keys
                    .into_iter()
                    .map(|key| {
                        dual.child(
                            dual.location.field(key.as_str()),
                            entry(actual, key),
                            entry(expected, key),
                        )
                    })
                    .collect();
                Ok(Expansion::Children(children))
            }
            (Value::Map(_), _) => Ok(shape_mismatch(dual, "a map", true)),
            _ => Ok(shape_mismatch(dual, "a map", false)),
        }
    }
}
