//! Name-normalising introspection.
//!
//! Lets two types that follow different naming conventions be compared
//! field by field: `Book { mainAuthor }` against `BookDto { main_author }`.

use std::collections::BTreeSet;
use std::rc::Rc;

use structeq_types::Value;
use tracing::trace;

use crate::case::CaseFormat;
use crate::error::IntrospectionResult;
use crate::fields::ComparingFields;
use crate::strategy::{IntrospectionStrategy, SharedStrategy};

/// Maps child-node names to a canonical form.
pub trait NameNormalizer {
    /// The canonical form of `name`.
    fn normalize(&self, name: &str) -> String;

    /// A best guess at the original form of a canonical name, tried when
    /// the wrapped strategy enumerates no name normalising to it.
    fn denormalize(&self, _normalized: &str) -> Option<String> {
        None
    }

    /// Short label used in failure report headers.
    fn description(&self) -> String;
}

/// Canonicalizes `lower_snake` names to `lowerCamel`; camel names are kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct SnakeOrCamelCase;

impl NameNormalizer for SnakeOrCamelCase {
    fn normalize(&self, name: &str) -> String {
        if name.contains('_') {
            CaseFormat::LowerUnderscore.to(CaseFormat::LowerCamel, name)
        } else {
            name.to_string()
        }
    }

    fn denormalize(&self, normalized: &str) -> Option<String> {
        let snake = CaseFormat::LowerCamel.to(CaseFormat::LowerUnderscore, normalized);
        (snake != normalized).then_some(snake)
    }

    fn description(&self) -> String {
        "comparing camel case and snake case fields".to_string()
    }
}

/// Wraps a strategy and exposes its names in normalized form.
///
/// Enumeration emits normalized names. Reading tries the normalized name on
/// the wrapped strategy first, then every enumerated name that normalizes
/// to it, then the normalizer's denormalized guess.
pub struct ComparingNormalizedFields<N> {
    inner: SharedStrategy,
    normalizer: N,
}

impl<N: NameNormalizer> ComparingNormalizedFields<N> {
    /// Normalize the names of `inner` with `normalizer`.
    pub fn new(inner: SharedStrategy, normalizer: N) -> Self {
        Self { inner, normalizer }
    }

    /// The wrapped strategy.
    pub fn inner(&self) -> &SharedStrategy {
        &self.inner
    }
}

impl ComparingNormalizedFields<SnakeOrCamelCase> {
    /// Field comparison that matches `lowerCamel` and `lower_snake` names.
    pub fn snake_or_camel_case() -> Self {
        Self::new(Rc::new(ComparingFields), SnakeOrCamelCase)
    }
}

impl<N: NameNormalizer> IntrospectionStrategy for ComparingNormalizedFields<N> {
    fn children_node_names_of(&self, node: &Value) -> BTreeSet<String> {
        self.inner
            .children_node_names_of(node)
            .iter()
            .map(|name| self.normalizer.normalize(name))
            .collect()
    }

    fn child_node_value(&self, name: &str, node: &Value) -> IntrospectionResult<Value> {
        let first_error = match self.inner.child_node_value(name, node) {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        let originals = self.inner.children_node_names_of(node);
        if let Some(original) = originals
            .iter()
            .find(|original| original.as_str() != name && self.normalizer.normalize(original) == name)
        {
            trace!(normalized = name, original = %original, "reading denormalized name");
            return self.inner.child_node_value(original, node);
        }

        match self.normalizer.denormalize(name) {
            Some(guess) => self
                .inner
                .child_node_value(&guess, node)
                .map_err(|_| first_error),
            None => Err(first_error),
        }
    }

    fn description(&self) -> String {
        self.normalizer.description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IntrospectionError;
    use structeq_types::{Object, TypeSchema};

    fn author_dto() -> Value {
        let schema = TypeSchema::builder("AuthorDto")
            .fields(["first_name", "last_name"])
            .build();
        Value::from(
            Object::with_fields(&schema, [("first_name", "Martin"), ("last_name", "Fowler")])
                .unwrap(),
        )
    }

    #[test]
    fn enumerates_normalized_names() {
        let strategy = ComparingNormalizedFields::snake_or_camel_case();
        let names = strategy.children_node_names_of(&author_dto());
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["firstName", "lastName"]);
    }

    #[test]
    fn reads_through_original_name() {
        let strategy = ComparingNormalizedFields::snake_or_camel_case();
        assert_eq!(
            strategy.child_node_value("firstName", &author_dto()).unwrap(),
            Value::from("Martin")
        );
    }

    #[test]
    fn camel_names_read_directly() {
        let schema = TypeSchema::builder("Author").field("firstName").build();
        let node = Value::from(Object::with_fields(&schema, [("firstName", "Martin")]).unwrap());
        let strategy = ComparingNormalizedFields::snake_or_camel_case();
        assert_eq!(
            strategy.child_node_value("firstName", &node).unwrap(),
            Value::from("Martin")
        );
    }

    #[test]
    fn unresolvable_name_keeps_first_error() {
        let strategy = ComparingNormalizedFields::snake_or_camel_case();
        let err = strategy
            .child_node_value("middleName", &author_dto())
            .unwrap_err();
        assert!(matches!(err, IntrospectionError::UnknownChildNode { ref name, .. } if name == "middleName"));
    }

    #[test]
    fn denormalize_guess_only_when_different() {
        assert_eq!(SnakeOrCamelCase.denormalize("title"), None);
        assert_eq!(
            SnakeOrCamelCase.denormalize("mainAuthor").as_deref(),
            Some("main_author")
        );
    }
}
