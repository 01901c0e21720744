//! Foundation types for structeq.
//!
//! This crate provides the value model walked by the recursive comparison
//! engine. Every other structeq crate depends on `structeq-types`.
//!
//! # Key Types
//!
//! - [`Value`]: A node of a compared object graph (leaf, container, or object)
//! - [`TypeSchema`]: Declared fields, accessors, and parent of an object type
//! - [`Object`] / [`ObjectRef`]: A shared, identity-bearing compound instance
//! - [`FieldLocation`]: Path of a node from the comparison root

pub mod error;
pub mod location;
pub mod schema;
pub mod value;

pub use error::{TypeError, TypeResult};
pub use location::{FieldLocation, PathSegment};
pub use schema::{Accessor, Object, ObjectRef, TypeSchema, TypeSchemaBuilder};
pub use value::Value;
