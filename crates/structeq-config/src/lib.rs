//! Recursive comparison configuration for structeq.
//!
//! The configuration is split in two parts:
//!
//! - [`ComparisonSettings`]: the declarative rules (ignored paths and types,
//!   compared paths and types, null handling, collection order, strictness).
//!   Serializable; loadable from TOML or JSON.
//! - [`RecursiveComparisonConfiguration`]: settings plus the parts that are
//!   code, namely the introspection strategy and the comparators.
//!
//! [`ConfigurationMatcher`] validates a configuration and answers the
//! walker's per-path questions: skip, substitute a comparator, or restrict.
//!
//! # Quick Start
//!
//! ```rust
//! use structeq_config::{ConfigurationMatcher, RecursiveComparisonConfiguration};
//! use structeq_types::{FieldLocation, Value};
//!
//! let config = RecursiveComparisonConfiguration::new().ignoring_fields(["home.address"]);
//! let matcher = ConfigurationMatcher::new(&config).unwrap();
//! let path = FieldLocation::root().field("home").field("address");
//! assert!(matcher.should_skip(&path, &Value::Null, &Value::Null));
//! ```

pub mod comparator;
pub mod configuration;
pub mod error;
pub mod matcher;
pub mod settings;

pub use comparator::{comparator, DoubleTolerance, FnComparator, SharedComparator, ValueComparator};
pub use configuration::RecursiveComparisonConfiguration;
pub use error::{ComparatorError, ComparatorResult, ConfigurationError, ConfigurationResult};
pub use matcher::ConfigurationMatcher;
pub use settings::ComparisonSettings;
