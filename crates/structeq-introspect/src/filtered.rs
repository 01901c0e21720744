use std::collections::BTreeSet;

use structeq_types::Value;

use crate::error::IntrospectionResult;
use crate::strategy::{IntrospectionStrategy, SharedStrategy};

/// Wraps a strategy and keeps only the child names accepted by a predicate.
///
/// Reads are delegated unchanged, so a filtered-out name can still be read
/// when the engine asks for it.
pub struct FilteredFields<F> {
    inner: SharedStrategy,
    predicate: F,
    description: String,
}

impl<F> FilteredFields<F>
where
    F: Fn(&str) -> bool,
{
    pub fn new(inner: SharedStrategy, predicate: F, description: impl Into<String>) -> Self {
        Self {
            inner,
            predicate,
            description: description.into(),
        }
    }
}

impl<F> IntrospectionStrategy for FilteredFields<F>
where
    F: Fn(&str) -> bool,
{
    fn children_node_names_of(&self, node: &Value) -> BTreeSet<String> {
        self.inner
            .children_node_names_of(node)
            .into_iter()
            .filter(|name| (self.predicate)(name))
            .collect()
    }

    fn child_node_value(&self, name: &str, node: &Value) -> IntrospectionResult<Value> {
        self.inner.child_node_value(name, node)
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}
