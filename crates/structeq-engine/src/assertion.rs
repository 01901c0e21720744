//! Assertion-style entry point over the comparison engine.

use std::rc::Rc;

use structeq_config::RecursiveComparisonConfiguration;
use structeq_introspect::SharedStrategy;
use structeq_types::Value;
use tracing::debug;

use crate::difference::ComparisonDifference;
use crate::error::{ComparisonError, ComparisonResult};
use crate::report::AssertionFailure;
use crate::representation::{Representation, StandardRepresentation};
use crate::walker::RecursiveComparator;

/// Recursive equality assertion on an actual value.
///
/// ```rust
/// use structeq_engine::RecursiveComparison;
/// use structeq_types::Value;
///
/// let actual = Value::map([("name", "John")]);
/// assert!(RecursiveComparison::new(actual.clone()).is_equal_to(actual).is_ok());
/// ```
pub struct RecursiveComparison {
    actual: Value,
    configuration: RecursiveComparisonConfiguration,
    representation: Rc<dyn Representation>,
}

impl RecursiveComparison {
    pub fn new(actual: impl Into<Value>) -> Self {
        Self {
            actual: actual.into(),
            configuration: RecursiveComparisonConfiguration::default(),
            representation: Rc::new(StandardRepresentation),
        }
    }

    pub fn with_configuration(mut self, configuration: RecursiveComparisonConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Adjust the current configuration in place.
    pub fn configure(
        mut self,
        f: impl FnOnce(RecursiveComparisonConfiguration) -> RecursiveComparisonConfiguration,
    ) -> Self {
        self.configuration = f(std::mem::take(&mut self.configuration));
        self
    }

    pub fn with_introspection_strategy(mut self, strategy: SharedStrategy) -> Self {
        self.configuration.set_introspection_strategy(strategy);
        self
    }

    pub fn with_representation(mut self, representation: Rc<dyn Representation>) -> Self {
        self.representation = representation;
        self
    }

    pub fn configuration(&self) -> &RecursiveComparisonConfiguration {
        &self.configuration
    }

    /// The raw difference list against `expected`.
    pub fn differences_with(&self, expected: &Value) -> ComparisonResult<Vec<ComparisonDifference>> {
        RecursiveComparator::with_default_specialisations(&self.configuration)?
            .compare(&self.actual, expected)
    }

    /// `Ok(())` when no difference is found, [`ComparisonError::NotEqual`]
    /// otherwise.
    pub fn is_equal_to(&self, expected: impl Into<Value>) -> ComparisonResult<()> {
        let expected = expected.into();
        let differences = self.differences_with(&expected)?;
        if differences.is_empty() {
            return Ok(());
        }
        debug!(differences = differences.len(), "recursive equality assertion failed");
        Err(ComparisonError::NotEqual(Box::new(AssertionFailure::new(
            &self.actual,
            &expected,
            self.strategy_description(),
            &differences,
            self.representation.as_ref(),
        ))))
    }

    /// `Ok(())` when at least one difference is found.
    pub fn is_not_equal_to(&self, expected: impl Into<Value>) -> ComparisonResult<()> {
        let expected = expected.into();
        if self.differences_with(&expected)?.is_empty() {
            return Err(ComparisonError::UnexpectedlyEqual {
                strategy: self.strategy_description(),
            });
        }
        Ok(())
    }

    fn strategy_description(&self) -> String {
        self.configuration.introspection_strategy().description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use structeq_introspect::ComparingFields;

    #[test]
    fn equal_values_pass() {
        let value = Value::seq([1, 2, 3]);
        RecursiveComparison::new(value.clone()).is_equal_to(value).unwrap();
    }

    #[test]
    fn failure_carries_strategy_description() {
        let err = RecursiveComparison::new(Value::seq(["A", "B"]))
            .with_introspection_strategy(Rc::new(ComparingFields::new()))
            .is_equal_to(Value::seq(["A", "C"]))
            .unwrap_err();
        let failure = err.failure().unwrap();
        assert_eq!(failure.strategy, "comparing fields");
        assert_eq!(failure.paths(), vec!["[1]"]);
        assert!(err.to_string().contains("when recursively comparing fields"));
    }

    #[test]
    fn configure_keeps_previous_settings() {
        let comparison = RecursiveComparison::new(Value::map([("id", 1), ("v", 2)]))
            .configure(|c| c.ignoring_fields(["id"]))
            .configure(|c| c.with_strict_type_checking());
        assert!(comparison.configuration().settings().ignored_fields.contains("id"));
        comparison
            .is_equal_to(Value::map([("id", 7), ("v", 2)]))
            .unwrap();
    }

    #[test]
    fn is_not_equal_to_requires_a_difference() {
        let comparison = RecursiveComparison::new(Value::from(1));
        comparison.is_not_equal_to(Value::from(2)).unwrap();
        let err = comparison.is_not_equal_to(Value::from(1)).unwrap_err();
        assert!(matches!(err, ComparisonError::UnexpectedlyEqual { .. }));
    }

    #[test]
    fn configuration_errors_surface() {
        let err = RecursiveComparison::new(Value::Null)
            .configure(|c| c.comparing_only_fields(["a"]).ignoring_fields(["a"]))
            .is_equal_to(Value::Null)
            .unwrap_err();
        assert!(matches!(err, ComparisonError::Configuration(_)));
    }
}
