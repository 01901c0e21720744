use std::collections::HashSet;
use std::rc::Rc;

use structeq_types::{FieldLocation, Value};

/// Identity key of an object pair.
type PairKey = (usize, usize);

/// Object pairs already compared in one traversal.
///
/// Every recorded pair is held until the traversal ends, so an address
/// cannot be reused by a later object while its key is still in the set.
#[derive(Clone, Debug, Default)]
pub struct VisitedPairs {
    keys: HashSet<PairKey>,
    held: Vec<(Value, Value)>,
}

impl VisitedPairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// The object pairs enclosing `dual`, for a nested traversal rooted there.
    pub fn enclosing(dual: &DualValue) -> Self {
        let mut visited = Self::new();
        let mut link = dual.enclosing.as_deref();
        while let Some(current) = link {
            visited.record(&current.actual, &current.expected);
            link = current.parent.as_deref();
        }
        visited
    }

    /// Record the pair when both sides are objects. Returns `false` when it
    /// was already recorded.
    pub fn insert(&mut self, dual: &DualValue) -> bool {
        self.record(&dual.actual, &dual.expected)
    }

    fn record(&mut self, actual: &Value, expected: &Value) -> bool {
        let (Some(a), Some(e)) = (actual.identity(), expected.identity()) else {
            return true;
        };
        if !self.keys.insert((a, e)) {
            return false;
        }
        self.held.push((actual.clone(), expected.clone()));
        true
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// An object pair on the way from the root to a [`DualValue`].
#[derive(Debug)]
struct Enclosing {
    actual: Value,
    expected: Value,
    parent: Option<Rc<Enclosing>>,
}

/// An actual/expected pair at a location.
#[derive(Clone, Debug)]
pub struct DualValue {
    pub location: FieldLocation,
    pub actual: Value,
    pub expected: Value,
    in_compared_type: bool,
    enclosing: Option<Rc<Enclosing>>,
}

impl DualValue {
    /// The pair at the comparison root.
    pub fn root(actual: Value, expected: Value) -> Self {
        Self::new(FieldLocation::root(), actual, expected)
    }

    pub fn new(location: FieldLocation, actual: Value, expected: Value) -> Self {
        Self {
            location,
            actual,
            expected,
            in_compared_type: false,
            enclosing: None,
        }
    }

    /// A pair below this one. Compared-type scope is inherited.
    pub fn child(&self, location: FieldLocation, actual: Value, expected: Value) -> Self {
        let enclosing = if self.identity_pair().is_some() {
            Some(Rc::new(Enclosing {
                actual: self.actual.clone(),
                expected: self.expected.clone(),
                parent: self.enclosing.clone(),
            }))
        } else {
            self.enclosing.clone()
        };
        Self {
            location,
            actual,
            expected,
            in_compared_type: self.in_compared_type,
            enclosing,
        }
    }

    pub fn path(&self) -> String {
        self.location.to_string()
    }

    /// Identity key when both sides are objects.
    pub fn identity_pair(&self) -> Option<(usize, usize)> {
        Some((self.actual.identity()?, self.expected.identity()?))
    }

    pub fn is_in_compared_type(&self) -> bool {
        self.in_compared_type
    }

    pub(crate) fn enter_compared_type(mut self) -> Self {
        self.in_compared_type = true;
        self
    }
}
