use structeq_config::ConfigurationMatcher;
use structeq_types::Value;

use crate::dual_value::DualValue;
use crate::error::ComparisonResult;
use crate::specialisation::{shape_mismatch, Expansion, Specialisation};
use crate::walker::RecursiveComparator;

/// Optionals compare their content at `p.value`; an empty one is `Absent`.
pub struct OptionalValue;

fn content(value: &Option<Box<Value>>) -> Value {
    value.as_deref().cloned().unwrap_or(Value::Absent)
}

impl Specialisation for OptionalValue {
    fn name(&self) -> &str {
        "optional"
    }

    fn applies(&self, dual: &DualValue, _matcher: &ConfigurationMatcher<'_>) -> bool {
        matches!(dual.actual, Value::Optional(_)) || matches!(dual.expected, Value::Optional(_))
    }

    fn expand(
        &self,
        dual: &DualValue,
        _comparator: &RecursiveComparator<'_>,
    ) -> ComparisonResult<Expansion> {
        match (&dual.actual, &dual.expected) {
            (Value::Optional(actual), Value::Optional(expected)) => {
                Ok(Expansion::Children(vec![dual.child(
                    dual.location.field("value"),
                    content(actual),
                    content(expected),
                )]))
            }
            (Value::Optional(_), _) => Ok(shape_mismatch(dual, "an optional", true)),
            _ => Ok(shape_mismatch(dual, "an optional", false)),
        }
    }
}
