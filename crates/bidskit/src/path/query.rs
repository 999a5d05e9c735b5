//! Partial entity queries used to filter paths.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::{Datatype, EntityKey};

use super::entities::Entities;
use super::rules::normalize_value;

/// A partial description of a path: each constrained key lists the values
/// it accepts, and suffix/extension/datatype may be narrowed the same way.
///
/// An empty query matches every path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntityQuery {
    entities: BTreeMap<EntityKey, Vec<String>>,
    suffixes: Vec<String>,
    extensions: Vec<String>,
    datatypes: Vec<Datatype>,
}

impl EntityQuery {
    /// Create a query that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `value` for `key`. Repeating a key widens the accepted set.
    pub fn with(mut self, key: EntityKey, value: impl AsRef<str>) -> Self {
        let value = normalize_query_value(key, value.as_ref());
        let accepted = self.entities.entry(key).or_default();
        if !accepted.contains(&value) {
            accepted.push(value);
        }
        self
    }

    /// Accept any of `values` for `key`.
    pub fn with_any<I, V>(self, key: EntityKey, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        values.into_iter().fold(self, |query, value| query.with(key, value))
    }

    /// Accept `suffix`.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffixes.push(suffix.into());
        self
    }

    /// Accept `extension`; a missing leading dot is added.
    pub fn with_extension(mut self, extension: impl AsRef<str>) -> Self {
        let extension = extension.as_ref();
        if extension.starts_with('.') {
            self.extensions.push(extension.to_string());
        } else {
            self.extensions.push(format!(".{}", extension));
        }
        self
    }

    /// Accept `datatype`.
    pub fn with_datatype(mut self, datatype: Datatype) -> Self {
        if !self.datatypes.contains(&datatype) {
            self.datatypes.push(datatype);
        }
        self
    }

    /// Values accepted for `key`, if constrained.
    pub fn accepted(&self, key: EntityKey) -> Option<&[String]> {
        self.entities.get(&key).map(|v| v.as_slice())
    }

    /// Returns true if the query constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
            && self.suffixes.is_empty()
            && self.extensions.is_empty()
            && self.datatypes.is_empty()
    }

    /// Returns true if every constrained key has an accepted value in `entities`.
    pub fn matches_entities(&self, entities: &Entities) -> bool {
        self.entities.iter().all(|(key, accepted)| {
            entities
                .get(*key)
                .is_some_and(|value| accepted.iter().any(|a| a == value))
        })
    }

    /// Full check against the parts of a path.
    pub(crate) fn matches_parts(
        &self,
        entities: &Entities,
        suffix: Option<&str>,
        extension: Option<&str>,
        datatype: Option<Datatype>,
    ) -> bool {
        self.matches_entities(entities)
            && accepts(&self.suffixes, suffix)
            && accepts(&self.extensions, extension)
            && (self.datatypes.is_empty()
                || datatype.is_some_and(|d| self.datatypes.contains(&d)))
    }
}

fn accepts(allowed: &[String], actual: Option<&str>) -> bool {
    allowed.is_empty() || actual.is_some_and(|value| allowed.iter().any(|a| a == value))
}

// Index values are padded like stored values so "1" finds "run-01"; values
// that would fail validation are kept as given and simply never match.
fn normalize_query_value(key: EntityKey, value: &str) -> String {
    normalize_value(key, value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Entities {
        Entities::from_pairs([
            (EntityKey::Subject, "01"),
            (EntityKey::Task, "rest"),
            (EntityKey::Run, "02"),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let query = EntityQuery::new();
        assert!(query.is_empty());
        assert!(query.matches_entities(&sample()));
        assert!(query.matches_entities(&Entities::new()));
    }

    #[test]
    fn test_partial_match() {
        let query = EntityQuery::new().with(EntityKey::Subject, "01");
        assert!(query.matches_entities(&sample()));

        let query = query.with(EntityKey::Session, "a");
        assert!(!query.matches_entities(&sample()));
    }

    #[test]
    fn test_any_of_values() {
        let query = EntityQuery::new().with_any(EntityKey::Task, ["nback", "rest"]);
        assert!(query.matches_entities(&sample()));
        assert_eq!(query.accepted(EntityKey::Task).unwrap().len(), 2);
    }

    #[test]
    fn test_index_values_are_padded() {
        let query = EntityQuery::new().with(EntityKey::Run, "2");
        assert!(query.matches_entities(&sample()));
    }

    #[test]
    fn test_suffix_extension_datatype() {
        let query = EntityQuery::new()
            .with_suffix("eeg")
            .with_extension("json")
            .with_datatype(Datatype::Eeg);

        let entities = sample();
        assert!(query.matches_parts(&entities, Some("eeg"), Some(".json"), Some(Datatype::Eeg)));
        assert!(!query.matches_parts(&entities, Some("eeg"), Some(".tsv"), Some(Datatype::Eeg)));
        assert!(!query.matches_parts(&entities, None, Some(".json"), Some(Datatype::Eeg)));
        assert!(!query.matches_parts(&entities, Some("eeg"), Some(".json"), None));
    }
}
