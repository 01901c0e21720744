use serde::{Deserialize, Serialize};
use structeq_types::{FieldLocation, Value};

use crate::dual_value::DualValue;
use crate::representation::Representation;

/// A difference found at one location.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonDifference {
    pub location: FieldLocation,
    pub actual: Value,
    pub expected: Value,
    /// Why the values differ, when it is not obvious from the values.
    pub reason: Option<String>,
}

impl ComparisonDifference {
    pub fn new(dual: &DualValue) -> Self {
        Self {
            location: dual.location.clone(),
            actual: dual.actual.clone(),
            expected: dual.expected.clone(),
            reason: None,
        }
    }

    pub fn with_reason(dual: &DualValue, reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Self::new(dual)
        }
    }

    /// Dotted path, empty at the root.
    pub fn path(&self) -> String {
        self.location.to_string()
    }

    /// Render both sides for reporting.
    pub fn to_record(&self, representation: &dyn Representation) -> DifferenceRecord {
        DifferenceRecord {
            path: self.path(),
            actual: representation.to_string_of(&self.actual),
            expected: representation.to_string_of(&self.expected),
            reason: self.reason.clone(),
        }
    }
}

/// A rendered difference: `(path, actual, expected)` plus an optional reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferenceRecord {
    pub path: String,
    pub actual: String,
    pub expected: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl DifferenceRecord {
    pub fn as_tuple(&self) -> (&str, &str, &str) {
        (&self.path, &self.actual, &self.expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::representation::StandardRepresentation;

    #[test]
    fn record_renders_both_sides() {
        let dual = DualValue::new(
            FieldLocation::root().field("phone").field("value"),
            Value::from("123"),
            Value::from("456"),
        );
        let record = ComparisonDifference::new(&dual).to_record(&StandardRepresentation);
        assert_eq!(record.as_tuple(), ("phone.value", "\"123\"", "\"456\""));
        assert_eq!(record.reason, None);
    }

    #[test]
    fn record_serializes_without_empty_reason() {
        let dual = DualValue::root(Value::from(1), Value::from(2));
        let record = ComparisonDifference::new(&dual).to_record(&StandardRepresentation);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"path":"","actual":"1","expected":"2"}"#);

        let with_reason = ComparisonDifference::with_reason(&dual, "different sizes")
            .to_record(&StandardRepresentation);
        let back: DifferenceRecord =
            serde_json::from_str(&serde_json::to_string(&with_reason).unwrap()).unwrap();
        assert_eq!(back.reason.as_deref(), Some("different sizes"));
    }
}
