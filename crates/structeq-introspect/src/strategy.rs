use std::collections::BTreeSet;
use std::rc::Rc;

use structeq_types::{ObjectRef, Value};

use crate::error::{IntrospectionError, IntrospectionResult};

/// Decides which child nodes of a node take part in a comparison and how
/// their values are read.
///
/// Implementations must satisfy these invariants:
/// - `children_node_names_of` is pure and returns the empty set for
///   `Absent`, `Null`, and every non-object node.
/// - `child_node_value` may be called repeatedly on the same inputs and
///   never mutates the node.
/// - A name that cannot be resolved is an [`IntrospectionError`], never a
///   silent `Null`.
///
/// Names are returned as a [`BTreeSet`], so the engine visits siblings in
/// lexicographic order.
pub trait IntrospectionStrategy {
    /// The names of the children of `node` that should be compared.
    fn children_node_names_of(&self, node: &Value) -> BTreeSet<String>;

    /// Read the child named `name` on `node`.
    fn child_node_value(&self, name: &str, node: &Value) -> IntrospectionResult<Value>;

    /// Short label used in failure report headers.
    fn description(&self) -> String;
}

/// Shared handle to a strategy, as stored in a comparison configuration.
pub type SharedStrategy = Rc<dyn IntrospectionStrategy>;

impl<S: IntrospectionStrategy + ?Sized> IntrospectionStrategy for Rc<S> {
    fn children_node_names_of(&self, node: &Value) -> BTreeSet<String> {
        (**self).children_node_names_of(node)
    }

    fn child_node_value(&self, name: &str, node: &Value) -> IntrospectionResult<Value> {
        (**self).child_node_value(name, node)
    }

    fn description(&self) -> String {
        (**self).description()
    }
}

/// The object behind `node`, or the error every strategy reports when asked
/// to read a name on a non-object.
pub(crate) fn object_of<'a>(name: &str, node: &'a Value) -> IntrospectionResult<&'a ObjectRef> {
    node.as_object()
        .ok_or_else(|| IntrospectionError::NotIntrospectable {
            name: name.to_string(),
            kind: node.type_name().to_string(),
        })
}
