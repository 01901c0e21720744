//! The hybrid default strategy.

use std::collections::BTreeSet;

use structeq_types::Value;
use tracing::trace;

use crate::error::{IntrospectionError, IntrospectionResult};
use crate::fields::ComparingFields;
use crate::properties::property_accessor;
use crate::strategy::{object_of, IntrospectionStrategy};

/// Enumerates declared fields but reads each one through its `getX`/`isX`
/// accessor when one exists, falling back to the slot when the accessor is
/// missing or fails.
///
/// When an accessor's result diverges from the field it is named after,
/// this strategy compares the accessor result and can report equality for
/// objects whose fields differ. Use [`ComparingFields`] when slots must be
/// compared as stored.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultIntrospection;

impl DefaultIntrospection {
    pub fn new() -> Self {
        Self
    }
}

impl IntrospectionStrategy for DefaultIntrospection {
    fn children_node_names_of(&self, node: &Value) -> BTreeSet<String> {
        ComparingFields.children_node_names_of(node)
    }

    fn child_node_value(&self, name: &str, node: &Value) -> IntrospectionResult<Value> {
        let object = object_of(name, node)?;
        if let Some(accessor) = property_accessor(object.schema(), name) {
            match accessor.invoke(object) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    trace!(accessor = accessor.name(), error = %e, "accessor failed; reading field");
                }
            }
        }
        object
            .field(name)
            .map_err(|_| IntrospectionError::UnknownChildNode {
                name: name.to_string(),
                type_name: object.type_name().to_string(),
            })
    }

    fn description(&self) -> String {
        "comparing properties then fields".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use structeq_types::{Object, TypeError, TypeSchema};

    fn values_schema() -> std::rc::Rc<TypeSchema> {
        TypeSchema::builder("Values")
            .field("values")
            .accessor("getValues", |o| match o.field("values")? {
                Value::Seq(items) => Ok(items.into_iter().next().unwrap_or(Value::Null)),
                _ => Ok(Value::Null),
            })
            .build()
    }

    #[test]
    fn accessor_wins_over_field() {
        let node = Value::from(
            Object::with_fields(&values_schema(), [("values", Value::seq(["A", "B"]))]).unwrap(),
        );
        let read = DefaultIntrospection.child_node_value("values", &node).unwrap();
        assert_eq!(read, Value::from("A"));
    }

    #[test]
    fn falls_back_to_field_when_accessor_fails() {
        let bean = TypeSchema::builder("Bean")
            .field("string")
            .accessor("getString", |_| Err(TypeError::accessor_failed("getString", "boom")))
            .build();
        let node = Value::from(Object::with_fields(&bean, [("string", "raw")]).unwrap());
        let read = DefaultIntrospection.child_node_value("string", &node).unwrap();
        assert_eq!(read, Value::from("raw"));
    }

    #[test]
    fn accessor_only_name_is_readable() {
        let hello = TypeSchema::builder("HelloMessage")
            .accessor("getTemplate", |_| Ok(Value::from("hello")))
            .build();
        let node = Value::from(Object::new(&hello));
        // Not enumerated, but readable when the other side names it.
        assert!(DefaultIntrospection.children_node_names_of(&node).is_empty());
        assert_eq!(
            DefaultIntrospection.child_node_value("template", &node).unwrap(),
            Value::from("hello")
        );
    }

    #[test]
    fn missing_both_is_unknown() {
        let node = Value::from(Object::new(&values_schema()));
        assert!(matches!(
            DefaultIntrospection.child_node_value("other", &node),
            Err(IntrospectionError::UnknownChildNode { .. })
        ));
    }
}
