//! Comparators that replace structural recursion at a path or a type.

use std::fmt;
use std::rc::Rc;

use structeq_types::Value;

use crate::error::{ComparatorError, ComparatorResult};

/// Decides whether two values are equivalent.
///
/// A comparator registered for a path or a type takes over that pair
/// entirely: the engine does not recurse into it.
pub trait ValueComparator {
    /// `Ok(true)` when `actual` and `expected` are equivalent.
    fn compare(&self, actual: &Value, expected: &Value) -> ComparatorResult<bool>;

    /// Short label used in difference reasons.
    fn description(&self) -> String;
}

/// Shared handle to a comparator.
pub type SharedComparator = Rc<dyn ValueComparator>;

/// A comparator backed by a closure.
pub struct FnComparator<F> {
    description: String,
    compare: F,
}

impl<F> FnComparator<F>
where
    F: Fn(&Value, &Value) -> bool,
{
    pub fn new(description: impl Into<String>, compare: F) -> Self {
        Self {
            description: description.into(),
            compare,
        }
    }
}

impl<F> ValueComparator for FnComparator<F>
where
    F: Fn(&Value, &Value) -> bool,
{
    fn compare(&self, actual: &Value, expected: &Value) -> ComparatorResult<bool> {
        Ok((self.compare)(actual, expected))
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

impl<F> fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnComparator")
            .field("description", &self.description)
            .finish()
    }
}

/// Shorthand for a shared closure comparator.
pub fn comparator(
    description: impl Into<String>,
    compare: impl Fn(&Value, &Value) -> bool + 'static,
) -> SharedComparator {
    Rc::new(FnComparator::new(description, compare))
}

/// Numbers within `tolerance` of each other are equivalent.
///
/// Accepts `Int` and `Float` on either side; any other kind is a
/// [`ComparatorError::Unsupported`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoubleTolerance {
    tolerance: f64,
}

impl DoubleTolerance {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    fn numeric(value: &Value) -> Option<f64> {
        match value {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl ValueComparator for DoubleTolerance {
    fn compare(&self, actual: &Value, expected: &Value) -> ComparatorResult<bool> {
        match (Self::numeric(actual), Self::numeric(expected)) {
            (Some(a), Some(e)) => Ok((a - e).abs() <= self.tolerance),
            _ => Err(ComparatorError::Unsupported {
                comparator: self.description(),
                actual: actual.type_name().to_string(),
                expected: expected.type_name().to_string(),
            }),
        }
    }

    fn description(&self) -> String {
        format!("double comparator within {}", self.tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_comparator() {
        let case_insensitive = comparator("case insensitive", |a, e| match (a, e) {
            (Value::Str(a), Value::Str(e)) => a.eq_ignore_ascii_case(e),
            _ => false,
        });
        assert!(case_insensitive
            .compare(&Value::from("John"), &Value::from("JOHN"))
            .unwrap());
        assert!(!case_insensitive
            .compare(&Value::from("John"), &Value::from("Jim"))
            .unwrap());
        assert_eq!(case_insensitive.description(), "case insensitive");
    }

    #[test]
    fn tolerance_accepts_close_numbers() {
        let cmp = DoubleTolerance::new(0.5);
        assert!(cmp.compare(&Value::from(1.2), &Value::from(1.6)).unwrap());
        assert!(cmp.compare(&Value::from(2), &Value::from(2.4)).unwrap());
        assert!(!cmp.compare(&Value::from(1.0), &Value::from(2.0)).unwrap());
    }

    #[test]
    fn tolerance_rejects_non_numbers() {
        let err = DoubleTolerance::new(0.1)
            .compare(&Value::from("1.0"), &Value::from(1.0))
            .unwrap_err();
        assert!(matches!(err, ComparatorError::Unsupported { .. }));
        assert!(err.to_string().contains("string"));
    }
}
