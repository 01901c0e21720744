use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of a [`FieldLocation`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PathSegment {
    /// A named child node (field, property, or map key).
    Field(String),
    /// A position inside an ordered sequence.
    Index(usize),
}

/// Location of a node relative to the comparison root.
///
/// Renders as node names joined by `.`, with sequence positions appended
/// as `[i]`: `neighbour.dateOfBirth`, `values[1]`, `friends[0].name`.
/// The root location renders as the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldLocation {
    segments: Vec<PathSegment>,
}

impl FieldLocation {
    /// The root location (`""`).
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns `true` for the root location.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The location of the named child of this location.
    pub fn field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// The location of the element at `index` of the sequence at this location.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// The segments, root first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The path with sequence indices removed (`friends[0].name` -> `friends.name`).
    ///
    /// Configuration rules are written against this form so that a rule on
    /// `friends.name` applies to every element of `friends`.
    pub fn without_indices(&self) -> String {
        let names: Vec<&str> = self
            .segments
            .iter()
            .filter_map(|s| match s {
                PathSegment::Field(name) => Some(name.as_str()),
                PathSegment::Index(_) => None,
            })
            .collect();
        names.join(".")
    }
}

impl fmt::Display for FieldLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => {
                    if !first {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Index(i) => write!(f, "[{i}]")?,
            }
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_empty() {
        let root = FieldLocation::root();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "");
        assert_eq!(root.without_indices(), "");
    }

    #[test]
    fn nested_fields_join_with_dots() {
        let loc = FieldLocation::root().field("neighbour").field("dateOfBirth");
        assert_eq!(loc.to_string(), "neighbour.dateOfBirth");
        assert_eq!(loc.segments().len(), 2);
    }

    #[test]
    fn indices_render_in_brackets() {
        let loc = FieldLocation::root().field("friends").index(0).field("name");
        assert_eq!(loc.to_string(), "friends[0].name");
        assert_eq!(loc.without_indices(), "friends.name");
    }

    #[test]
    fn index_at_root() {
        let loc = FieldLocation::root().index(3);
        assert_eq!(loc.to_string(), "[3]");
        assert_eq!(loc.segments(), &[PathSegment::Index(3)]);
    }

    #[test]
    fn parent_is_untouched_by_child_construction() {
        let parent = FieldLocation::root().field("phone");
        let child = parent.field("value");
        assert_eq!(parent.to_string(), "phone");
        assert_eq!(child.to_string(), "phone.value");
    }

    proptest::proptest! {
        #[test]
        fn rule_path_drops_only_indices(names in proptest::collection::vec("[a-z]{1,6}", 1..5), idx in 0usize..10) {
            let mut loc = FieldLocation::root();
            for name in &names {
                loc = loc.field(name.clone()).index(idx);
            }
            proptest::prop_assert_eq!(loc.without_indices(), names.join("."));
            proptest::prop_assert_eq!(loc.segments().len(), names.len() * 2);
        }
    }

    #[test]
    fn serde_roundtrip() {
        let loc = FieldLocation::root().field("values").index(1);
        let json = serde_json::to_string(&loc).unwrap();
        let back: FieldLocation = serde_json::from_str(&json).unwrap();
        assert_eq!(loc, back);
    }
}
