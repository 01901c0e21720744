//! Per-path decisions derived from a validated configuration.

use regex::RegexSet;
use structeq_types::{FieldLocation, Value};
use tracing::warn;

use crate::comparator::SharedComparator;
use crate::configuration::RecursiveComparisonConfiguration;
use crate::error::{ConfigurationError, ConfigurationResult};
use crate::settings::ComparisonSettings;

/// Answers the walker's questions about a pair at a location.
///
/// Rules are matched against the location rendered without sequence
/// indices; exact rules also match the indexed rendering.
#[derive(Debug)]
pub struct ConfigurationMatcher<'c> {
    config: &'c RecursiveComparisonConfiguration,
    ignored_fields_regexes: RegexSet,
    ignored_order_regexes: RegexSet,
}

impl<'c> ConfigurationMatcher<'c> {
    /// Validate `config` and compile its regexes.
    pub fn new(config: &'c RecursiveComparisonConfiguration) -> ConfigurationResult<Self> {
        let settings = config.settings();
        Self::check_contradictions(settings)?;
        Ok(Self {
            config,
            ignored_fields_regexes: compile(&settings.ignored_fields_regexes)?,
            ignored_order_regexes: compile(&settings.ignored_collection_order_in_fields_regexes)?,
        })
    }

    fn check_contradictions(settings: &ComparisonSettings) -> ConfigurationResult<()> {
        if let Some(path) = settings
            .compared_fields
            .intersection(&settings.ignored_fields)
            .next()
        {
            warn!(path = %path, "field is both ignored and compared");
            return Err(ConfigurationError::IgnoredAndCompared { path: path.clone() });
        }
        if let Some(type_name) = settings
            .compared_types
            .intersection(&settings.ignored_types)
            .next()
        {
            warn!(type_name = %type_name, "type is both ignored and compared");
            return Err(ConfigurationError::IgnoredAndComparedType {
                type_name: type_name.clone(),
            });
        }
        Ok(())
    }

    pub fn configuration(&self) -> &'c RecursiveComparisonConfiguration {
        self.config
    }

    fn settings(&self) -> &'c ComparisonSettings {
        self.config.settings()
    }

    /// Whether the pair at `location` must be skipped entirely.
    ///
    /// The root pair is never skipped.
    pub fn should_skip(&self, location: &FieldLocation, actual: &Value, expected: &Value) -> bool {
        if location.is_root() {
            return false;
        }
        self.is_ignored_field(location)
            || !self.is_within_compared_fields(location)
            || self.is_ignored_type(actual, expected)
            || self.is_ignored_null_or_empty(actual, expected)
    }

    pub fn is_ignored_field(&self, location: &FieldLocation) -> bool {
        let rule_path = location.without_indices();
        let ignored = &self.settings().ignored_fields;
        ignored.contains(&rule_path)
            || ignored.contains(&location.to_string())
            || self.ignored_fields_regexes.is_match(&rule_path)
    }

    /// A location is within the compared fields when it is one of them, an
    /// ancestor of one, or a descendant of one.
    pub fn is_within_compared_fields(&self, location: &FieldLocation) -> bool {
        let compared = &self.settings().compared_fields;
        if compared.is_empty() || location.is_root() {
            return true;
        }
        let path = location.without_indices();
        compared.iter().any(|field| {
            path == *field
                || is_below(&path, field)
                || is_below(field, &path)
        })
    }

    /// A pair is of an ignored type when at least one side is, and the other
    /// side is either of an ignored type or null.
    pub fn is_ignored_type(&self, actual: &Value, expected: &Value) -> bool {
        let ignored = &self.settings().ignored_types;
        if ignored.is_empty() {
            return false;
        }
        let matches = |v: &Value| type_matches(v, ignored.iter().map(String::as_str));
        let nullish = |v: &Value| v.is_null() || v.is_absent();
        let (a, e) = (matches(actual), matches(expected));
        (a || e) && (a || nullish(actual)) && (e || nullish(expected))
    }

    fn is_ignored_null_or_empty(&self, actual: &Value, expected: &Value) -> bool {
        let settings = self.settings();
        (settings.ignore_all_actual_null_fields && actual.is_null())
            || (settings.ignore_all_expected_null_fields && expected.is_null())
            || (settings.ignore_all_actual_empty_optional_fields && actual.is_empty_optional())
    }

    pub fn has_compared_types(&self) -> bool {
        !self.settings().compared_types.is_empty()
    }

    /// Whether `value` is of one of the compared types.
    pub fn is_compared_type(&self, value: &Value) -> bool {
        let compared = &self.settings().compared_types;
        !compared.is_empty() && type_matches(value, compared.iter().map(String::as_str))
    }

    /// The comparator that replaces recursion for this pair, if any.
    ///
    /// A comparator registered for the path wins over one registered for the
    /// type. Type comparators apply only when both sides share the type.
    pub fn comparator_for(
        &self,
        location: &FieldLocation,
        actual: &Value,
        expected: &Value,
    ) -> Option<&'c SharedComparator> {
        let by_path = self
            .config
            .comparator_for_path(&location.without_indices())
            .or_else(|| self.config.comparator_for_path(&location.to_string()));
        if by_path.is_some() {
            return by_path;
        }
        if actual.type_name() == expected.type_name() {
            return self.config.comparator_for_type(actual.type_name());
        }
        None
    }

    /// Verdict of the type's overridden equality, when it must be used.
    pub fn overridden_equals_verdict(&self, actual: &Value, expected: &Value) -> Option<bool> {
        let settings = self.settings();
        if !settings.using_overridden_equals {
            return None;
        }
        let (a, e) = (actual.as_object()?, expected.as_object()?);
        if settings
            .ignored_overridden_equals_for_types
            .iter()
            .any(|t| a.schema().is_a(t))
        {
            return None;
        }
        let equals = a.schema().overridden_equals()?;
        Some((**equals)(&**a, &**e))
    }

    /// Whether sequences at `location` are compared as unordered collections.
    pub fn ignores_collection_order_at(&self, location: &FieldLocation) -> bool {
        let settings = self.settings();
        if settings.ignore_collection_order {
            return true;
        }
        let rule_path = location.without_indices();
        settings.ignored_collection_order_in_fields.contains(&rule_path)
            || self.ignored_order_regexes.is_match(&rule_path)
    }

    pub fn strict_type_checking(&self) -> bool {
        self.settings().strict_type_checking
    }
}

fn is_below(path: &str, ancestor: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'.'
}

fn type_matches<'a>(value: &Value, mut type_names: impl Iterator<Item = &'a str>) -> bool {
    match value {
        Value::Object(object) => type_names.any(|t| object.schema().is_a(t)),
        other => type_names.any(|t| t == other.type_name()),
    }
}

fn compile(patterns: &[String]) -> ConfigurationResult<RegexSet> {
    for pattern in patterns {
        if let Err(e) = regex::Regex::new(pattern) {
            warn!(pattern = %pattern, "invalid field regex");
            return Err(ConfigurationError::InvalidRegex {
                pattern: pattern.clone(),
                message: e.to_string(),
            });
        }
    }
    RegexSet::new(patterns.iter().map(|p| format!("^(?:{p})$"))).map_err(|e| {
        ConfigurationError::InvalidRegex {
            pattern: patterns.join(", "),
            message: e.to_string(),
        }
    })
}
