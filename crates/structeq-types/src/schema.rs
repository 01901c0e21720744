//! Type schemas and object instances.
//!
//! Rust has no runtime reflection, so compared object types describe
//! themselves through a [`TypeSchema`]: the declared fields (intrinsic state
//! slots), the zero-argument accessors, an optional parent schema, and an
//! optional overridden equality. An [`Object`] is an instance of a schema
//! holding one slot per declared field.
//!
//! Objects are shared through [`ObjectRef`] (`Rc<Object>`). Slots use
//! interior mutability so self-referential graphs can be built after the
//! instances exist.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{TypeError, TypeResult};
use crate::value::Value;

/// Body of an accessor: reads an object and produces a value.
pub type AccessorFn = dyn Fn(&Object) -> TypeResult<Value>;

/// An overridden equality between two instances.
pub type EqualsFn = dyn Fn(&Object, &Object) -> bool;

/// Shared handle to an object instance. Cloning shares identity.
pub type ObjectRef = Rc<Object>;

// ---------------------------------------------------------------------------
// Accessor
// ---------------------------------------------------------------------------

/// A named zero-argument read accessor (`getName`, `isEmpty`, ...).
#[derive(Clone)]
pub struct Accessor {
    name: String,
    read: Rc<AccessorFn>,
}

impl Accessor {
    /// Create an accessor from its identifier and body.
    pub fn new(
        name: impl Into<String>,
        read: impl Fn(&Object) -> TypeResult<Value> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            read: Rc::new(read),
        }
    }

    /// The accessor identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the accessor on `object`.
    pub fn invoke(&self, object: &Object) -> TypeResult<Value> {
        (self.read)(object)
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor").field("name", &self.name).finish()
    }
}

// ---------------------------------------------------------------------------
// TypeSchema
// ---------------------------------------------------------------------------

/// Describes an object type: its name, declared fields, accessors, parent.
///
/// Schemas flagged as `core` stand for library base types. Their fields and
/// accessors are excluded when enumerating inherited members, the way the
/// members of a language's root object type are never compared.
pub struct TypeSchema {
    name: String,
    parent: Option<Rc<TypeSchema>>,
    fields: Vec<String>,
    accessors: Vec<Accessor>,
    core: bool,
    equals: Option<Rc<EqualsFn>>,
}

impl TypeSchema {
    /// Start describing a type named `name`.
    pub fn builder(name: impl Into<String>) -> TypeSchemaBuilder {
        TypeSchemaBuilder {
            name: name.into(),
            parent: None,
            fields: Vec::new(),
            accessors: Vec::new(),
            core: false,
            equals: None,
        }
    }

    /// The type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent schema, if any.
    pub fn parent(&self) -> Option<&Rc<TypeSchema>> {
        self.parent.as_ref()
    }

    /// Returns `true` if this schema describes a core library base type.
    pub fn is_core(&self) -> bool {
        self.core
    }

    /// Fields declared directly by this type.
    pub fn declared_fields(&self) -> &[String] {
        &self.fields
    }

    /// Accessors declared directly by this type.
    pub fn declared_accessors(&self) -> &[Accessor] {
        &self.accessors
    }

    /// This schema followed by its ancestors, stopping before the first core
    /// ancestor.
    fn lineage(&self) -> Vec<&TypeSchema> {
        let mut chain = vec![self];
        let mut current = self.parent.as_deref();
        while let Some(schema) = current {
            if schema.core {
                break;
            }
            chain.push(schema);
            current = schema.parent.as_deref();
        }
        chain
    }

    /// This schema followed by every ancestor, core ones included.
    fn full_lineage(&self) -> Vec<&TypeSchema> {
        let mut chain = vec![self];
        let mut current = self.parent.as_deref();
        while let Some(schema) = current {
            chain.push(schema);
            current = schema.parent.as_deref();
        }
        chain
    }

    /// Declared fields including inherited ones, excluding core ancestors.
    pub fn fields_including_inherited(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for schema in self.lineage() {
            for field in &schema.fields {
                if !names.contains(&field.as_str()) {
                    names.push(field);
                }
            }
        }
        names
    }

    /// Accessors including inherited ones, excluding core ancestors.
    ///
    /// An accessor redeclared by a subtype hides the inherited one.
    pub fn accessors_including_inherited(&self) -> Vec<&Accessor> {
        let mut accessors: Vec<&Accessor> = Vec::new();
        for schema in self.lineage() {
            for accessor in &schema.accessors {
                if !accessors.iter().any(|a| a.name == accessor.name) {
                    accessors.push(accessor);
                }
            }
        }
        accessors
    }

    /// Resolve an accessor by identifier across the whole parent chain.
    pub fn find_accessor(&self, name: &str) -> Option<&Accessor> {
        self.full_lineage()
            .into_iter()
            .flat_map(|schema| schema.accessors.iter())
            .find(|a| a.name == name)
    }

    /// Returns `true` if `name` is a field of this type or any ancestor.
    pub fn has_field(&self, name: &str) -> bool {
        self.full_lineage()
            .into_iter()
            .any(|schema| schema.fields.iter().any(|f| f == name))
    }

    /// The overridden equality of the closest non-core type that declares one.
    pub fn overridden_equals(&self) -> Option<&Rc<EqualsFn>> {
        self.lineage()
            .into_iter()
            .find_map(|schema| schema.equals.as_ref())
    }

    /// Returns `true` if this type is `type_name` or inherits from it.
    pub fn is_a(&self, type_name: &str) -> bool {
        self.full_lineage()
            .into_iter()
            .any(|schema| schema.name == type_name)
    }
}

impl fmt::Debug for TypeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSchema")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name.as_str()))
            .field("fields", &self.fields)
            .field("accessors", &self.accessors)
            .field("core", &self.core)
            .finish()
    }
}

/// Builder for [`TypeSchema`].
pub struct TypeSchemaBuilder {
    name: String,
    parent: Option<Rc<TypeSchema>>,
    fields: Vec<String>,
    accessors: Vec<Accessor>,
    core: bool,
    equals: Option<Rc<EqualsFn>>,
}

impl TypeSchemaBuilder {
    /// Declare a field.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }

    /// Declare several fields.
    pub fn fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declare a zero-argument accessor.
    pub fn accessor(
        mut self,
        name: impl Into<String>,
        read: impl Fn(&Object) -> TypeResult<Value> + 'static,
    ) -> Self {
        self.accessors.push(Accessor::new(name, read));
        self
    }

    /// Declare an accessor that returns the named field unchanged.
    pub fn field_accessor(self, name: impl Into<String>, field: impl Into<String>) -> Self {
        let field = field.into();
        self.accessor(name, move |object| object.field(&field))
    }

    /// Inherit from `parent`.
    pub fn extends(mut self, parent: &Rc<TypeSchema>) -> Self {
        self.parent = Some(Rc::clone(parent));
        self
    }

    /// Flag the type as a core library base type.
    pub fn core(mut self) -> Self {
        self.core = true;
        self
    }

    /// Override equality for instances of this type.
    pub fn equals(mut self, equals: impl Fn(&Object, &Object) -> bool + 'static) -> Self {
        self.equals = Some(Rc::new(equals));
        self
    }

    /// Finish the schema.
    pub fn build(self) -> Rc<TypeSchema> {
        Rc::new(TypeSchema {
            name: self.name,
            parent: self.parent,
            fields: self.fields,
            accessors: self.accessors,
            core: self.core,
            equals: self.equals,
        })
    }
}

// ---------------------------------------------------------------------------
// Object
// ---------------------------------------------------------------------------

/// An instance of a [`TypeSchema`].
///
/// Holds one slot per field of the schema and of every ancestor; slots start
/// as [`Value::Null`].
pub struct Object {
    schema: Rc<TypeSchema>,
    slots: RefCell<BTreeMap<String, Value>>,
}

impl Object {
    /// Create an instance with every slot set to `Null`.
    pub fn new(schema: &Rc<TypeSchema>) -> ObjectRef {
        let slots = schema
            .full_lineage()
            .into_iter()
            .flat_map(|s| s.fields.iter())
            .map(|name| (name.clone(), Value::Null))
            .collect();
        Rc::new(Self {
            schema: Rc::clone(schema),
            slots: RefCell::new(slots),
        })
    }

    /// Create an instance and assign the given slots.
    pub fn with_fields<I, S, V>(schema: &Rc<TypeSchema>, fields: I) -> TypeResult<ObjectRef>
    where
        I: IntoIterator<Item = (S, V)>,
        S: AsRef<str>,
        V: Into<Value>,
    {
        let object = Self::new(schema);
        for (name, value) in fields {
            object.set(name.as_ref(), value)?;
        }
        Ok(object)
    }

    /// The schema of this instance.
    pub fn schema(&self) -> &Rc<TypeSchema> {
        &self.schema
    }

    /// The runtime type name.
    pub fn type_name(&self) -> &str {
        self.schema.name()
    }

    /// Read a slot.
    pub fn field(&self, name: &str) -> TypeResult<Value> {
        self.slots
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| TypeError::UnknownField {
                type_name: self.type_name().to_string(),
                field: name.to_string(),
            })
    }

    /// Assign a slot. The field must be declared by the schema or an ancestor.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> TypeResult<()> {
        if !self.schema.has_field(name) {
            return Err(TypeError::UnknownField {
                type_name: self.type_name().to_string(),
                field: name.to_string(),
            });
        }
        self.slots.borrow_mut().insert(name.to_string(), value.into());
        Ok(())
    }

    /// Invoke the accessor named `name`.
    pub fn invoke(&self, name: &str) -> TypeResult<Value> {
        let accessor =
            self.schema
                .find_accessor(name)
                .ok_or_else(|| TypeError::UnknownAccessor {
                    type_name: self.type_name().to_string(),
                    accessor: name.to_string(),
                })?;
        accessor.invoke(self)
    }

    /// Stable identity of this instance for the lifetime of the allocation.
    pub fn identity(&self) -> usize {
        self as *const Object as usize
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Slots are not printed: instances may reference themselves.
        let identity = format!("{:#x}", self.identity());
        f.debug_struct("Object")
            .field("type", &self.type_name())
            .field("identity", &identity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_object_schema() -> Rc<TypeSchema> {
        TypeSchema::builder("Object")
            .field("monitor")
            .accessor("getClass", |o| Ok(Value::from(o.type_name())))
            .core()
            .build()
    }

    #[test]
    fn new_object_has_null_slots() {
        let schema = TypeSchema::builder("Address").field("number").build();
        let address = Object::new(&schema);
        assert_eq!(address.field("number").unwrap(), Value::Null);
    }

    #[test]
    fn set_rejects_undeclared_field() {
        let schema = TypeSchema::builder("Address").field("number").build();
        let address = Object::new(&schema);
        let err = address.set("street", "Main").unwrap_err();
        assert!(matches!(err, TypeError::UnknownField { .. }));
    }

    #[test]
    fn inherited_fields_stop_at_core_types() {
        let root = base_object_schema();
        let animal = TypeSchema::builder("Animal").extends(&root).field("name").build();
        let dog = TypeSchema::builder("Dog").extends(&animal).field("breed").build();

        assert_eq!(dog.fields_including_inherited(), vec!["breed", "name"]);
        // Core slots exist on the instance even though they are not enumerated.
        let rex = Object::new(&dog);
        assert_eq!(rex.field("monitor").unwrap(), Value::Null);
    }

    #[test]
    fn accessors_are_inherited_and_overridable() {
        let root = base_object_schema();
        let animal = TypeSchema::builder("Animal")
            .extends(&root)
            .field("name")
            .field_accessor("getName", "name")
            .accessor("isWild", |_| Ok(Value::Bool(true)))
            .build();
        let dog = TypeSchema::builder("Dog")
            .extends(&animal)
            .accessor("isWild", |_| Ok(Value::Bool(false)))
            .build();

        let names: Vec<&str> = dog
            .accessors_including_inherited()
            .iter()
            .map(|a| a.name())
            .collect();
        assert_eq!(names, vec!["isWild", "getName"]);

        let rex = Object::with_fields(&dog, [("name", "Rex")]).unwrap();
        assert_eq!(rex.invoke("isWild").unwrap(), Value::Bool(false));
        assert_eq!(rex.invoke("getName").unwrap(), Value::from("Rex"));
        // Core accessors still resolve when invoked by name.
        assert_eq!(rex.invoke("getClass").unwrap(), Value::from("Dog"));
    }

    #[test]
    fn failing_accessor_surfaces_error() {
        let bean = TypeSchema::builder("Bean")
            .field("string")
            .accessor("getString", |o| match o.field("string")? {
                Value::Null => Err(TypeError::accessor_failed("getString", "value is null")),
                other => Ok(Value::some(other)),
            })
            .build();
        let instance = Object::new(&bean);
        let err = instance.invoke("getString").unwrap_err();
        assert!(matches!(err, TypeError::AccessorFailed { .. }));
    }

    #[test]
    fn overridden_equals_is_found_on_ancestor() {
        let money = TypeSchema::builder("Money")
            .field("cents")
            .equals(|a, b| a.field("cents").ok() == b.field("cents").ok())
            .build();
        let euro = TypeSchema::builder("Euro").extends(&money).build();
        assert!(euro.overridden_equals().is_some());
        assert!(euro.is_a("Money"));
        assert!(!money.is_a("Euro"));
    }

    #[test]
    fn self_reference_can_be_built() {
        let person = TypeSchema::builder("Person").field("neighbour").build();
        let john = Object::new(&person);
        john.set("neighbour", Value::Object(Rc::clone(&john))).unwrap();
        match john.field("neighbour").unwrap() {
            Value::Object(n) => assert_eq!(n.identity(), john.identity()),
            other => panic!("expected object, got {:?}", other),
        }
    }
}
