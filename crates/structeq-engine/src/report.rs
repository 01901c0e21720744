use std::fmt;

use serde::{Deserialize, Serialize};
use structeq_types::Value;

use crate::difference::{ComparisonDifference, DifferenceRecord};
use crate::representation::Representation;

/// A failed recursive equality assertion, fully rendered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionFailure {
    pub actual: String,
    pub expected: String,
    /// Description of the introspection strategy that was used.
    pub strategy: String,
    pub differences: Vec<DifferenceRecord>,
}

impl AssertionFailure {
    pub fn new(
        actual: &Value,
        expected: &Value,
        strategy: impl Into<String>,
        differences: &[ComparisonDifference],
        representation: &dyn Representation,
    ) -> Self {
        Self {
            actual: representation.to_string_of(actual),
            expected: representation.to_string_of(expected),
            strategy: strategy.into(),
            differences: differences
                .iter()
                .map(|d| d.to_record(representation))
                .collect(),
        }
    }

    pub fn paths(&self) -> Vec<&str> {
        self.differences.iter().map(|d| d.path.as_str()).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Expecting actual:")?;
        writeln!(f, "  {}", self.actual)?;
        writeln!(f, "to be equal to:")?;
        writeln!(f, "  {}", self.expected)?;
        write!(
            f,
            "when recursively {}, but found the following {} difference(s):",
            self.strategy,
            self.differences.len()
        )?;
        for difference in &self.differences {
            writeln!(f)?;
            writeln!(f)?;
            if difference.path.is_empty() {
                writeln!(f, "Top level actual and expected objects differ:")?;
            } else {
                writeln!(f, "field/property '{}' differ:", difference.path)?;
            }
            writeln!(f, "- actual value  : {}", difference.actual)?;
            write!(f, "- expected value: {}", difference.expected)?;
            if let Some(reason) = &difference.reason {
                writeln!(f)?;
                write!(f, "{reason}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dual_value::DualValue;
    use crate::representation::StandardRepresentation;
    use structeq_types::FieldLocation;

    fn failure() -> AssertionFailure {
        let dual = DualValue::new(
            FieldLocation::root().field("values").index(1),
            Value::from("B"),
            Value::from("C"),
        );
        AssertionFailure::new(
            &Value::seq(["A", "B"]),
            &Value::seq(["A", "C"]),
            "comparing fields",
            &[ComparisonDifference::new(&dual)],
            &StandardRepresentation,
        )
    }

    #[test]
    fn display_names_strategy_and_differences() {
        let text = failure().to_string();
        assert!(text.contains("when recursively comparing fields"));
        assert!(text.contains("1 difference(s)"));
        assert!(text.contains("field/property 'values[1]' differ:"));
        assert!(text.contains("- actual value  : \"B\""));
        assert!(text.contains("- expected value: \"C\""));
    }

    #[test]
    fn json_keeps_paths() {
        let failure = failure();
        assert_eq!(failure.paths(), vec!["values[1]"]);
        let back: AssertionFailure = serde_json::from_str(&failure.to_json().unwrap()).unwrap();
        assert_eq!(back, failure);
    }
}
