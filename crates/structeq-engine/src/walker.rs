use structeq_config::{ConfigurationMatcher, RecursiveComparisonConfiguration};
use structeq_introspect::IntrospectionStrategy;
use structeq_types::{FieldLocation, Value};
use tracing::{debug, trace};

use crate::difference::ComparisonDifference;
use crate::dual_value::{DualValue, VisitedPairs};
use crate::error::{ComparisonError, ComparisonResult};
use crate::specialisation::{Expansion, Specialisation};
use crate::specialisations::{MapEntries, OptionalValue, OrderedSequence, UnorderedCollection};

// ---------------------------------------------------------------------------
// Walk
// ---------------------------------------------------------------------------

/// State of one traversal: work stack, cycle guard, and difference sink.
struct Walk {
    stack: Vec<DualValue>,
    visited: VisitedPairs,
    differences: Vec<ComparisonDifference>,
    pairs_compared: usize,
}

impl Walk {
    fn new(root: DualValue, visited: VisitedPairs) -> Self {
        Self {
            stack: vec![root],
            visited,
            differences: Vec::new(),
            pairs_compared: 0,
        }
    }

    /// Push so that `children[0]` is popped first.
    fn push_in_order(&mut self, children: Vec<DualValue>) {
        self.stack.extend(children.into_iter().rev());
    }
}

// ---------------------------------------------------------------------------
// RecursiveComparator
// ---------------------------------------------------------------------------

/// Walks two object graphs side by side and collects their differences.
///
/// Pairs are visited depth-first, siblings in lexicographic name order and
/// sequence elements by index. Containers are handed to the first applicable
/// [`Specialisation`]; objects are expanded through the configured
/// introspection strategy; everything else compares by natural equality.
pub struct RecursiveComparator<'c> {
    matcher: ConfigurationMatcher<'c>,
    specialisations: Vec<Box<dyn Specialisation>>,
}

impl<'c> RecursiveComparator<'c> {
    /// Validate `config` and start with no specialisations.
    ///
    /// Without specialisations, containers compare by natural equality.
    pub fn new(config: &'c RecursiveComparisonConfiguration) -> ComparisonResult<Self> {
        Ok(Self {
            matcher: ConfigurationMatcher::new(config)?,
            specialisations: Vec::new(),
        })
    }

    /// Validate `config` with the standard specialisations:
    /// ordered sequence -> unordered collection -> map -> optional
    pub fn with_default_specialisations(
        config: &'c RecursiveComparisonConfiguration,
    ) -> ComparisonResult<Self> {
        let mut comparator = Self::new(config)?;
        comparator.add_specialisation(Box::new(OrderedSequence));
        comparator.add_specialisation(Box::new(UnorderedCollection));
        comparator.add_specialisation(Box::new(MapEntries));
        comparator.add_specialisation(Box::new(OptionalValue));
        Ok(comparator)
    }

    /// Append a specialisation; earlier ones take precedence.
    pub fn add_specialisation(&mut self, specialisation: Box<dyn Specialisation>) {
        self.specialisations.push(specialisation);
    }

    pub fn specialisation_count(&self) -> usize {
        self.specialisations.len()
    }

    pub fn matcher(&self) -> &ConfigurationMatcher<'c> {
        &self.matcher
    }

    pub fn configuration(&self) -> &'c RecursiveComparisonConfiguration {
        self.matcher.configuration()
    }

    /// All differences between `actual` and `expected`, in discovery order.
    pub fn compare(
        &self,
        actual: &Value,
        expected: &Value,
    ) -> ComparisonResult<Vec<ComparisonDifference>> {
        let strategy = self.configuration().introspection_strategy();
        debug!(strategy = %strategy.description(), "recursive comparison started");
        let walk = self.walk(
            DualValue::root(actual.clone(), expected.clone()),
            VisitedPairs::new(),
        )?;
        debug!(
            pairs = walk.pairs_compared,
            objects = walk.visited.len(),
            differences = walk.differences.len(),
            "recursive comparison finished"
        );
        Ok(walk.differences)
    }

    /// Whether `actual` and `expected` compare equal below `parent`.
    ///
    /// Runs a nested walk at the parent's location; nothing it finds is
    /// reported. The nested cycle guard starts with the object pairs
    /// enclosing `parent` only, so pairs already finished elsewhere are
    /// compared again.
    pub fn are_equivalent(
        &self,
        parent: &DualValue,
        actual: &Value,
        expected: &Value,
    ) -> ComparisonResult<bool> {
        let root = parent.child(parent.location.clone(), actual.clone(), expected.clone());
        let visited = VisitedPairs::enclosing(&root);
        let walk = self.walk(root, visited)?;
        Ok(walk.differences.is_empty())
    }

    fn walk(&self, root: DualValue, visited: VisitedPairs) -> ComparisonResult<Walk> {
        let mut walk = Walk::new(root, visited);
        while let Some(dual) = walk.stack.pop() {
            walk.pairs_compared += 1;
            self.compare_pair(dual, &mut walk)?;
        }
        Ok(walk)
    }

    fn compare_pair(&self, dual: DualValue, walk: &mut Walk) -> ComparisonResult<()> {
        let matcher = &self.matcher;
        if matcher.should_skip(&dual.location, &dual.actual, &dual.expected) {
            trace!(path = %dual.location, "pair skipped");
            return Ok(());
        }
        let dual = if !dual.is_in_compared_type()
            && (matcher.is_compared_type(&dual.actual) || matcher.is_compared_type(&dual.expected))
        {
            dual.enter_compared_type()
        } else {
            dual
        };

        // ----- absent and null -----
        match (dual.actual.is_absent(), dual.expected.is_absent()) {
            (true, true) => return Ok(()),
            (true, false) | (false, true) => {
                self.report(walk, &dual, None);
                return Ok(());
            }
            (false, false) => {}
        }
        match (dual.actual.is_null(), dual.expected.is_null()) {
            (true, true) => return Ok(()),
            (true, false) | (false, true) => {
                self.report(walk, &dual, None);
                return Ok(());
            }
            (false, false) => {}
        }

        // ----- identity and cycles -----
        if dual.actual.same_instance(&dual.expected) {
            return Ok(());
        }
        if !walk.visited.insert(&dual) {
            trace!(path = %dual.location, "object pair already visited");
            return Ok(());
        }

        // ----- comparators -----
        if let Some(comparator) = matcher.comparator_for(&dual.location, &dual.actual, &dual.expected)
        {
            let equivalent = comparator
                .compare(&dual.actual, &dual.expected)
                .map_err(|source| ComparisonError::Comparator {
                    path: dual.path(),
                    source,
                })?;
            if !equivalent {
                let reason = format!("not equivalent according to {}", comparator.description());
                self.report(walk, &dual, Some(reason));
            }
            return Ok(());
        }
        if let Some(equal) = matcher.overridden_equals_verdict(&dual.actual, &dual.expected) {
            if !equal {
                self.report(walk, &dual, Some("not equal according to overridden equals".into()));
            }
            return Ok(());
        }

        // ----- containers -----
        for specialisation in &self.specialisations {
            if !specialisation.applies(&dual, matcher) {
                continue;
            }
            trace!(path = %dual.location, specialisation = specialisation.name(), "container pair");
            match specialisation.expand(&dual, self)? {
                Expansion::Equal => {}
                Expansion::Different { reason } => self.report(walk, &dual, Some(reason)),
                Expansion::Children(children) => walk.push_in_order(children),
            }
            return Ok(());
        }

        // ----- objects and leaves -----
        match (&dual.actual, &dual.expected) {
            (Value::Object(_), Value::Object(_)) => self.compare_objects(dual, walk),
            (Value::Object(_), _) | (_, Value::Object(_)) => {
                let reason = format!(
                    "actual value is a {} but expected value is a {}",
                    dual.actual.type_name(),
                    dual.expected.type_name()
                );
                self.report(walk, &dual, Some(reason));
                Ok(())
            }
            _ => {
                if dual.actual != dual.expected {
                    self.report(walk, &dual, None);
                }
                Ok(())
            }
        }
    }

    fn compare_objects(&self, dual: DualValue, walk: &mut Walk) -> ComparisonResult<()> {
        let same_type = dual.actual.type_name() == dual.expected.type_name();
        if self.matcher.strict_type_checking() && !same_type {
            let reason = format!(
                "actual and expected are of different types: {} and {}",
                dual.actual.type_name(),
                dual.expected.type_name()
            );
            self.report(walk, &dual, Some(reason));
            return Ok(());
        }

        let strategy = self.configuration().introspection_strategy();
        let actual_names = strategy.children_node_names_of(&dual.actual);
        let expected_names = strategy.children_node_names_of(&dual.expected);

        // No child on either side: the strategy gives nothing to recurse on.
        if actual_names.is_empty() && expected_names.is_empty() {
            if !same_type {
                let reason = format!(
                    "no comparable children and different types: {} and {}",
                    dual.actual.type_name(),
                    dual.expected.type_name()
                );
                self.report(walk, &dual, Some(reason));
            }
            return Ok(());
        }

        let mut children = Vec::with_capacity(actual_names.len().max(expected_names.len()));
        for name in actual_names.union(&expected_names) {
            let location = dual.location.field(name.as_str());
            let actual = read_child(
                strategy.as_ref(),
                name,
                &dual.actual,
                actual_names.contains(name),
                &location,
            )?;
            let expected = read_child(
                strategy.as_ref(),
                name,
                &dual.expected,
                expected_names.contains(name),
                &location,
            )?;
            children.push(dual.child(location, actual, expected));
        }
        walk.push_in_order(children);
        Ok(())
    }

    fn report(&self, walk: &mut Walk, dual: &DualValue, reason: Option<String>) {
        if self.matcher.has_compared_types() && !dual.is_in_compared_type() {
            trace!(path = %dual.location, "difference outside compared types dropped");
            return;
        }
        trace!(path = %dual.location, "difference found");
        let difference = match reason {
            Some(reason) => ComparisonDifference::with_reason(dual, reason),
            None => ComparisonDifference::new(dual),
        };
        walk.differences.push(difference);
    }
}

/// Read `name` from `node`. A side that does not enumerate `name` reads as
/// `Absent` when the read fails.
fn read_child(
    strategy: &dyn IntrospectionStrategy,
    name: &str,
    node: &Value,
    enumerated: bool,
    location: &FieldLocation,
) -> ComparisonResult<Value> {
    match strategy.child_node_value(name, node) {
        Ok(value) => Ok(value),
        Err(_) if !enumerated => Ok(Value::Absent),
        Err(source) => {
            debug!(path = %location, error = %source, "child node read failed");
            Err(ComparisonError::Introspection {
                path: location.to_string(),
                source,
            })
        }
    }
}
