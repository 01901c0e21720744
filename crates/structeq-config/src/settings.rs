use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, ConfigurationResult};

/// The declarative part of a recursive comparison configuration.
///
/// Paths are written without sequence indices (`friends.name`, not
/// `friends[0].name`); a rule on a path applies to every element below it.
/// Regexes must match the whole path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonSettings {
    /// Paths whose pairs are skipped.
    pub ignored_fields: BTreeSet<String>,
    /// Regexes; a pair whose path matches any of them is skipped.
    pub ignored_fields_regexes: Vec<String>,
    /// Type names whose pairs are skipped.
    pub ignored_types: BTreeSet<String>,
    /// When non-empty, only these paths (and their ancestors and
    /// descendants) are traversed.
    pub compared_fields: BTreeSet<String>,
    /// When non-empty, only leaves of these types (or below a pair of
    /// these types) are compared.
    pub compared_types: BTreeSet<String>,
    /// Skip a pair whose actual side is null.
    pub ignore_all_actual_null_fields: bool,
    /// Skip a pair whose expected side is null.
    pub ignore_all_expected_null_fields: bool,
    /// Skip a pair whose actual side is an empty optional.
    pub ignore_all_actual_empty_optional_fields: bool,
    /// Compare every ordered sequence as an unordered collection.
    pub ignore_collection_order: bool,
    /// Paths whose sequences are compared as unordered collections.
    pub ignored_collection_order_in_fields: BTreeSet<String>,
    /// Regexes for paths whose sequences are compared as unordered collections.
    pub ignored_collection_order_in_fields_regexes: Vec<String>,
    /// Objects of different types are different, whatever their children.
    pub strict_type_checking: bool,
    /// Use a type's overridden equality instead of recursing into it.
    pub using_overridden_equals: bool,
    /// Types whose overridden equality is never used.
    pub ignored_overridden_equals_for_types: BTreeSet<String>,
}

impl ComparisonSettings {
    /// Settings with every rule disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings enforcing strict type checking.
    pub fn strict() -> Self {
        Self {
            strict_type_checking: true,
            ..Default::default()
        }
    }

    /// Parse settings from TOML. Missing keys take their default.
    pub fn from_toml_str(input: &str) -> ConfigurationResult<Self> {
        toml::from_str(input).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }

    /// Parse settings from JSON. Missing keys take their default.
    pub fn from_json_str(input: &str) -> ConfigurationResult<Self> {
        serde_json::from_str(input).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }

    /// Render the settings as TOML.
    pub fn to_toml_string(&self) -> ConfigurationResult<String> {
        toml::to_string(self).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_disables_everything() {
        let settings = ComparisonSettings::default();
        assert!(settings.ignored_fields.is_empty());
        assert!(!settings.strict_type_checking);
        assert!(!settings.ignore_collection_order);
        assert!(!settings.using_overridden_equals);
    }

    #[test]
    fn strict_preset() {
        assert!(ComparisonSettings::strict().strict_type_checking);
    }

    #[test]
    fn parses_partial_toml() {
        let settings = ComparisonSettings::from_toml_str(
            r#"
            ignored_fields = ["name", "neighbour.name"]
            ignored_fields_regexes = [".*Id"]
            ignore_all_actual_null_fields = true
            "#,
        )
        .unwrap();
        assert!(settings.ignored_fields.contains("neighbour.name"));
        assert_eq!(settings.ignored_fields_regexes, vec![".*Id".to_string()]);
        assert!(settings.ignore_all_actual_null_fields);
        assert!(!settings.ignore_all_expected_null_fields);
    }

    #[test]
    fn parses_json() {
        let settings =
            ComparisonSettings::from_json_str(r#"{"compared_types": ["date"], "strict_type_checking": true}"#)
                .unwrap();
        assert!(settings.compared_types.contains("date"));
        assert!(settings.strict_type_checking);
    }

    #[test]
    fn toml_roundtrip() {
        let mut settings = ComparisonSettings::strict();
        settings.ignored_types.insert("Home".into());
        let text = settings.to_toml_string().unwrap();
        assert_eq!(ComparisonSettings::from_toml_str(&text).unwrap(), settings);
    }

    #[test]
    fn rejects_malformed_input() {
        let err = ComparisonSettings::from_toml_str("ignored_fields = 3").unwrap_err();
        assert!(matches!(err, ConfigurationError::Parse(_)));
    }
}
