//! The compared value model.

use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};

use crate::schema::ObjectRef;

/// A node of a compared object graph.
///
/// Leaves (`Bool` .. `Date`) compare by natural equality. Containers
/// (`Seq`, `Set`, `Map`, `Optional`) are owned and compare element-wise.
/// `Object` is shared and identity-bearing; it is the only variant through
/// which a graph can contain cycles.
#[derive(Clone, Debug)]
pub enum Value {
    /// No value resolves at this name on this side of the comparison.
    Absent,
    /// An explicit null.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(String),
    /// A UTC instant.
    Date(DateTime<Utc>),
    /// An ordered sequence.
    Seq(Vec<Value>),
    /// An unordered collection; element order carries no meaning.
    Set(Vec<Value>),
    /// A key-value mapping.
    Map(BTreeMap<String, Value>),
    /// A single-element wrapper that may be empty.
    Optional(Option<Box<Value>>),
    /// A compound instance described by a type schema.
    Object(ObjectRef),
}

impl Value {
    /// A string value.
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    /// A date `millis` milliseconds after the Unix epoch.
    ///
    /// Out-of-range inputs clamp to the epoch.
    pub fn date_millis(millis: i64) -> Self {
        let date = Utc
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or_default();
        Self::Date(date)
    }

    /// A present optional.
    pub fn some(value: impl Into<Value>) -> Self {
        Self::Optional(Some(Box::new(value.into())))
    }

    /// An empty optional.
    pub fn none() -> Self {
        Self::Optional(None)
    }

    /// An ordered sequence.
    pub fn seq<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }

    /// An unordered collection.
    pub fn set<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Set(items.into_iter().map(Into::into).collect())
    }

    /// A key-value mapping.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// The type name used by type-keyed configuration.
    ///
    /// Objects report their schema name; other variants report a fixed
    /// kind name.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Absent => "absent",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Char(_) => "char",
            Self::Str(_) => "string",
            Self::Date(_) => "date",
            Self::Seq(_) => "seq",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Optional(_) => "optional",
            Self::Object(o) => o.type_name(),
        }
    }

    /// Returns `true` for [`Value::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for an empty [`Value::Optional`].
    pub fn is_empty_optional(&self) -> bool {
        matches!(self, Self::Optional(None))
    }

    /// Returns `true` for containers: sequences, sets, maps, and optionals.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Seq(_) | Self::Set(_) | Self::Map(_) | Self::Optional(_)
        )
    }

    /// Returns `true` for ordered or unordered collections.
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Seq(_) | Self::Set(_))
    }

    /// The elements of a sequence or set.
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Self::Seq(items) | Self::Set(items) => Some(items),
            _ => None,
        }
    }

    /// The object instance, if this is an object.
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Instance identity for objects, `None` for every other variant.
    pub fn identity(&self) -> Option<usize> {
        self.as_object().map(|o| o.identity())
    }

    /// Returns `true` if both values are the same object instance.
    pub fn same_instance(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Natural equality.
///
/// Objects are equal only when they are the same instance, which keeps the
/// comparison free of recursion through cycles. Floats treat `NaN` as equal
/// to itself so that every value equals itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Seq(a), Self::Seq(b)) | (Self::Set(a), Self::Set(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Optional(a), Self::Optional(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Date(v)
    }
}

impl From<ObjectRef> for Value {
    fn from(v: ObjectRef) -> Self {
        Self::Object(v)
    }
}

impl From<&ObjectRef> for Value {
    fn from(v: &ObjectRef) -> Self {
        Self::Object(Rc::clone(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        Self::Optional(v.map(|inner| Box::new(inner.into())))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::seq(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Object, TypeSchema};

    #[test]
    fn type_names_of_leaves() {
        assert_eq!(Value::from(1).type_name(), "int");
        assert_eq!(Value::from("x").type_name(), "string");
        assert_eq!(Value::date_millis(123).type_name(), "date");
        assert_eq!(Value::none().type_name(), "optional");
    }

    #[test]
    fn object_type_name_is_schema_name() {
        let schema = TypeSchema::builder("Person").field("name").build();
        let v = Value::from(Object::new(&schema));
        assert_eq!(v.type_name(), "Person");
    }

    #[test]
    fn date_millis_keeps_precision() {
        match Value::date_millis(456) {
            Value::Date(d) => assert_eq!(d.timestamp_millis(), 456),
            other => panic!("expected date, got {:?}", other),
        }
    }

    #[test]
    fn nan_equals_itself() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Float(1.0), Value::Int(1));
    }

    #[test]
    fn objects_compare_by_identity() {
        let schema = TypeSchema::builder("Person").field("name").build();
        let a = Object::with_fields(&schema, [("name", "John")]).unwrap();
        let b = Object::with_fields(&schema, [("name", "John")]).unwrap();
        assert_eq!(Value::from(&a), Value::from(&a));
        assert_ne!(Value::from(&a), Value::from(&b));
        assert!(Value::from(&a).same_instance(&Value::from(&a)));
    }

    #[test]
    fn option_conversion() {
        assert_eq!(Value::from(Some("667")), Value::some("667"));
        assert_eq!(Value::from(None::<&str>), Value::none());
        assert!(Value::none().is_empty_optional());
    }

    #[test]
    fn set_and_seq_are_distinct_kinds() {
        assert_ne!(Value::seq([1, 2]), Value::set([1, 2]));
        assert!(Value::set([1]).is_collection());
        assert!(Value::map([("k", 1)]).is_container());
    }
}
