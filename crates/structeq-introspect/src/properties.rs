//! Accessor-based (property) introspection.

use std::collections::BTreeSet;

use structeq_types::{Accessor, TypeSchema, Value};
use tracing::trace;

use crate::error::{IntrospectionError, IntrospectionResult};
use crate::strategy::{object_of, IntrospectionStrategy};

const GET_PREFIX: &str = "get";
const IS_PREFIX: &str = "is";

/// The property an accessor exposes: `getTemplate` -> `template`,
/// `isEmpty` -> `empty`. `None` when the identifier does not follow the
/// `getX`/`isX` pattern.
pub fn property_name_of(accessor: &str) -> Option<String> {
    let suffix = accessor
        .strip_prefix(GET_PREFIX)
        .or_else(|| accessor.strip_prefix(IS_PREFIX))?;
    let mut chars = suffix.chars();
    let first = chars.next()?;
    if !first.is_uppercase() {
        return None;
    }
    Some(first.to_lowercase().chain(chars).collect())
}

/// The accessor exposing `property`, trying `getX` before `isX`.
pub(crate) fn property_accessor<'a>(schema: &'a TypeSchema, property: &str) -> Option<&'a Accessor> {
    let mut chars = property.chars();
    let first = chars.next()?;
    let capitalized: String = first.to_uppercase().chain(chars).collect();
    schema
        .find_accessor(&format!("{GET_PREFIX}{capitalized}"))
        .or_else(|| schema.find_accessor(&format!("{IS_PREFIX}{capitalized}")))
}

/// Compares the properties exposed by `getX`/`isX` accessors, inherited ones
/// included, and reads them by invoking the accessor.
///
/// Types without any declared field can be compared this way. An accessor
/// that fails is reported as an [`IntrospectionError::ReadFailed`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ComparingProperties;

impl ComparingProperties {
    pub fn new() -> Self {
        Self
    }
}

impl IntrospectionStrategy for ComparingProperties {
    fn children_node_names_of(&self, node: &Value) -> BTreeSet<String> {
        match node {
            Value::Object(object) => object
                .schema()
                .accessors_including_inherited()
                .into_iter()
                .filter_map(|accessor| property_name_of(accessor.name()))
                .collect(),
            _ => BTreeSet::new(),
        }
    }

    fn child_node_value(&self, name: &str, node: &Value) -> IntrospectionResult<Value> {
        let object = object_of(name, node)?;
        let accessor = property_accessor(object.schema(), name).ok_or_else(|| {
            IntrospectionError::UnknownChildNode {
                name: name.to_string(),
                type_name: object.type_name().to_string(),
            }
        })?;
        trace!(accessor = accessor.name(), type_name = object.type_name(), "invoking accessor");
        accessor
            .invoke(object)
            .map_err(|source| IntrospectionError::ReadFailed {
                name: name.to_string(),
                type_name: object.type_name().to_string(),
                source,
            })
    }

    fn description(&self) -> String {
        "comparing properties".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use structeq_types::{Object, TypeError};

    #[test]
    fn property_names_follow_accessor_pattern() {
        assert_eq!(property_name_of("getTemplate").as_deref(), Some("template"));
        assert_eq!(property_name_of("isEmpty").as_deref(), Some("empty"));
        assert_eq!(property_name_of("getURL").as_deref(), Some("uRL"));
        assert_eq!(property_name_of("get"), None);
        assert_eq!(property_name_of("issue"), None);
        assert_eq!(property_name_of("toString"), None);
    }

    #[test]
    fn accessor_only_type_exposes_properties() {
        let hello = TypeSchema::builder("HelloMessage")
            .accessor("getTemplate", |_| Ok(Value::from("hello")))
            .accessor("isEmpty", |_| Ok(Value::from(false)))
            .accessor("toString", |_| Ok(Value::from("HelloMessage")))
            .build();
        let node = Value::from(Object::new(&hello));

        let names = ComparingProperties.children_node_names_of(&node);
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["empty", "template"]);
        assert_eq!(
            ComparingProperties.child_node_value("template", &node).unwrap(),
            Value::from("hello")
        );
        assert_eq!(
            ComparingProperties.child_node_value("empty", &node).unwrap(),
            Value::from(false)
        );
    }

    #[test]
    fn inherited_accessors_are_enumerated() {
        let message = TypeSchema::builder("Message")
            .accessor("getTemplate", |_| Ok(Value::from("base")))
            .build();
        let hello = TypeSchema::builder("HelloMessage").extends(&message).build();
        let node = Value::from(Object::new(&hello));
        assert!(ComparingProperties
            .children_node_names_of(&node)
            .contains("template"));
    }

    #[test]
    fn failing_accessor_is_read_failure() {
        let bean = TypeSchema::builder("Bean")
            .field("string")
            .accessor("getString", |_| {
                Err(TypeError::accessor_failed("getString", "cannot wrap a null value"))
            })
            .build();
        let node = Value::from(Object::new(&bean));
        let err = ComparingProperties
            .child_node_value("string", &node)
            .unwrap_err();
        assert!(matches!(err, IntrospectionError::ReadFailed { .. }));
    }

    #[test]
    fn fields_without_accessor_are_unknown() {
        let dto = TypeSchema::builder("UserDto").field("email").build();
        let node = Value::from(Object::new(&dto));
        assert!(ComparingProperties.children_node_names_of(&node).is_empty());
        assert!(matches!(
            ComparingProperties.child_node_value("email", &node),
            Err(IntrospectionError::UnknownChildNode { .. })
        ));
    }
}
