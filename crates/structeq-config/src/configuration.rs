//! The full recursive comparison configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use structeq_introspect::{DefaultIntrospection, SharedStrategy};

use crate::comparator::SharedComparator;
use crate::error::ConfigurationResult;
use crate::matcher::ConfigurationMatcher;
use crate::settings::ComparisonSettings;

/// Settings, introspection strategy, and comparators for one comparison.
///
/// Built fluently:
///
/// ```rust
/// use structeq_config::{DoubleTolerance, RecursiveComparisonConfiguration};
/// use std::rc::Rc;
///
/// let config = RecursiveComparisonConfiguration::new()
///     .ignoring_fields(["id"])
///     .ignoring_all_actual_null_fields()
///     .with_comparator_for_type(Rc::new(DoubleTolerance::new(0.01)), "float");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct RecursiveComparisonConfiguration {
    settings: ComparisonSettings,
    strategy: SharedStrategy,
    comparators_by_path: BTreeMap<String, SharedComparator>,
    comparators_by_type: BTreeMap<String, SharedComparator>,
}

impl Default for RecursiveComparisonConfiguration {
    fn default() -> Self {
        Self::from_settings(ComparisonSettings::default())
    }
}

impl RecursiveComparisonConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration with the given rules and the default strategy.
    pub fn from_settings(settings: ComparisonSettings) -> Self {
        Self {
            settings,
            strategy: Rc::new(DefaultIntrospection::new()),
            comparators_by_path: BTreeMap::new(),
            comparators_by_type: BTreeMap::new(),
        }
    }

    pub fn settings(&self) -> &ComparisonSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ComparisonSettings {
        &mut self.settings
    }

    pub fn introspection_strategy(&self) -> &SharedStrategy {
        &self.strategy
    }

    pub fn set_introspection_strategy(&mut self, strategy: SharedStrategy) {
        self.strategy = strategy;
    }

    /// Comparator registered for exactly this rule path.
    pub fn comparator_for_path(&self, path: &str) -> Option<&SharedComparator> {
        self.comparators_by_path.get(path)
    }

    /// Comparator registered for this type name.
    pub fn comparator_for_type(&self, type_name: &str) -> Option<&SharedComparator> {
        self.comparators_by_type.get(type_name)
    }

    /// Check the configuration for contradictions and bad regexes.
    pub fn validate(&self) -> ConfigurationResult<()> {
        ConfigurationMatcher::new(self).map(|_| ())
    }

    // --- builder ---

    pub fn with_introspection_strategy(mut self, strategy: SharedStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn ignoring_fields<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings
            .ignored_fields
            .extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn ignoring_fields_matching_regexes<I, S>(mut self, regexes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings
            .ignored_fields_regexes
            .extend(regexes.into_iter().map(Into::into));
        self
    }

    pub fn ignoring_types<I, S>(mut self, type_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings
            .ignored_types
            .extend(type_names.into_iter().map(Into::into));
        self
    }

    pub fn comparing_only_fields<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings
            .compared_fields
            .extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn comparing_only_fields_of_types<I, S>(mut self, type_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings
            .compared_types
            .extend(type_names.into_iter().map(Into::into));
        self
    }

    pub fn ignoring_all_actual_null_fields(mut self) -> Self {
        self.settings.ignore_all_actual_null_fields = true;
        self
    }

    pub fn ignoring_all_expected_null_fields(mut self) -> Self {
        self.settings.ignore_all_expected_null_fields = true;
        self
    }

    pub fn ignoring_all_actual_empty_optional_fields(mut self) -> Self {
        self.settings.ignore_all_actual_empty_optional_fields = true;
        self
    }

    pub fn ignoring_collection_order(mut self) -> Self {
        self.settings.ignore_collection_order = true;
        self
    }

    pub fn ignoring_collection_order_in_fields<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings
            .ignored_collection_order_in_fields
            .extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn ignoring_collection_order_in_fields_matching_regexes<I, S>(mut self, regexes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings
            .ignored_collection_order_in_fields_regexes
            .extend(regexes.into_iter().map(Into::into));
        self
    }

    pub fn with_strict_type_checking(mut self) -> Self {
        self.settings.strict_type_checking = true;
        self
    }

    pub fn using_overridden_equals(mut self) -> Self {
        self.settings.using_overridden_equals = true;
        self
    }

    pub fn ignoring_overridden_equals_for_types<I, S>(mut self, type_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings
            .ignored_overridden_equals_for_types
            .extend(type_names.into_iter().map(Into::into));
        self
    }

    /// Use `comparator` for the pairs at these paths instead of recursing.
    pub fn with_comparator_for_fields<I, S>(mut self, comparator: SharedComparator, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for path in paths {
            self.comparators_by_path
                .insert(path.into(), Rc::clone(&comparator));
        }
        self
    }

    /// Use `comparator` for every pair whose sides both have this type.
    pub fn with_comparator_for_type(
        mut self,
        comparator: SharedComparator,
        type_name: impl Into<String>,
    ) -> Self {
        self.comparators_by_type.insert(type_name.into(), comparator);
        self
    }
}

impl fmt::Debug for RecursiveComparisonConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecursiveComparisonConfiguration")
            .field("settings", &self.settings)
            .field("strategy", &self.strategy.description())
            .field("comparators_by_path", &self.comparators_by_path.keys())
            .field("comparators_by_type", &self.comparators_by_type.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::{comparator, DoubleTolerance};
    use crate::error::ConfigurationError;
    use structeq_introspect::ComparingFields;

    #[test]
    fn default_uses_hybrid_strategy() {
        let config = RecursiveComparisonConfiguration::new();
        assert_eq!(
            config.introspection_strategy().description(),
            "comparing properties then fields"
        );
    }

    #[test]
    fn builder_accumulates_rules() {
        let config = RecursiveComparisonConfiguration::new()
            .ignoring_fields(["name"])
            .ignoring_fields(["home.address"])
            .ignoring_types(["Home"])
            .ignoring_all_expected_null_fields()
            .ignoring_collection_order_in_fields(["friends"]);
        let settings = config.settings();
        assert_eq!(settings.ignored_fields.len(), 2);
        assert!(settings.ignored_types.contains("Home"));
        assert!(settings.ignore_all_expected_null_fields);
        assert!(settings.ignored_collection_order_in_fields.contains("friends"));
    }

    #[test]
    fn strategy_can_be_replaced() {
        let mut config = RecursiveComparisonConfiguration::new();
        config.set_introspection_strategy(Rc::new(ComparingFields::new()));
        assert_eq!(config.introspection_strategy().description(), "comparing fields");
    }

    #[test]
    fn comparators_are_registered_by_path_and_type() {
        let config = RecursiveComparisonConfiguration::new()
            .with_comparator_for_fields(comparator("always", |_, _| true), ["name", "home.address"])
            .with_comparator_for_type(Rc::new(DoubleTolerance::new(0.1)), "float");
        assert!(config.comparator_for_path("home.address").is_some());
        assert!(config.comparator_for_path("home").is_none());
        assert!(config.comparator_for_type("float").is_some());
        assert!(config.comparator_for_type("int").is_none());
    }

    #[test]
    fn validate_rejects_contradictions() {
        let config = RecursiveComparisonConfiguration::new()
            .comparing_only_fields(["name"])
            .ignoring_fields(["name"]);
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::IgnoredAndCompared {
                path: "name".into()
            })
        );
    }

    #[test]
    fn debug_names_the_strategy() {
        let text = format!("{:?}", RecursiveComparisonConfiguration::new());
        assert!(text.contains("comparing properties then fields"));
    }
}
