//! Field-based introspection.

use std::collections::BTreeSet;

use structeq_types::Value;

use crate::error::{IntrospectionError, IntrospectionResult};
use crate::strategy::{object_of, IntrospectionStrategy};

/// Compares the declared fields of objects, inherited ones included, and
/// reads them straight from their slots. Accessors are never invoked.
#[derive(Clone, Copy, Debug, Default)]
pub struct ComparingFields;

impl ComparingFields {
    pub fn new() -> Self {
        Self
    }
}

impl IntrospectionStrategy for ComparingFields {
    fn children_node_names_of(&self, node: &Value) -> BTreeSet<String> {
        match node {
            Value::Object(object) => object
                .schema()
                .fields_including_inherited()
                .into_iter()
                .map(str::to_string)
                .collect(),
            _ => BTreeSet::new(),
        }
    }

    fn child_node_value(&self, name: &str, node: &Value) -> IntrospectionResult<Value> {
        let object = object_of(name, node)?;
        object
            .field(name)
            .map_err(|_| IntrospectionError::UnknownChildNode {
                name: name.to_string(),
                type_name: object.type_name().to_string(),
            })
    }

    fn description(&self) -> String {
        "comparing fields".to_string()
    }
}
