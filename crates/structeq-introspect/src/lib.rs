//! Introspection strategies for structeq.
//!
//! An [`IntrospectionStrategy`] decides the comparison schema of a node:
//! which child-node names it has and how the value behind each name is read.
//! The comparison engine only ever calls the strategy; it never looks at
//! schemas directly.
//!
//! # Built-in strategies
//!
//! - [`ComparingFields`]: declared fields, read from slots
//! - [`ComparingProperties`]: `getX`/`isX` accessors, read by invocation
//! - [`DefaultIntrospection`]: declared fields, read by accessor first and
//!   slot second
//! - [`ComparingNormalizedFields`]: wraps a strategy and canonicalizes
//!   names across naming conventions
//! - [`FilteredFields`]: wraps a strategy and keeps names matching a predicate

pub mod case;
pub mod default;
pub mod error;
pub mod fields;
pub mod filtered;
pub mod normalized;
pub mod properties;
pub mod strategy;

pub use case::CaseFormat;
pub use default::DefaultIntrospection;
pub use error::{IntrospectionError, IntrospectionResult};
pub use fields::ComparingFields;
pub use filtered::FilteredFields;
pub use normalized::{ComparingNormalizedFields, NameNormalizer, SnakeOrCamelCase};
pub use properties::ComparingProperties;
pub use strategy::{IntrospectionStrategy, SharedStrategy};
