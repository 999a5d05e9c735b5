//! Ordered, validated entity mapping.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Result;
use crate::schema::EntityKey;

use super::rules::normalize_value;

/// Entity key to value mapping, always iterated in canonical schema order.
///
/// Every stored value has passed [`normalize_value`], so no value contains
/// a reserved separator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Entities(BTreeMap<EntityKey, String>);

impl Entities {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from key/value pairs, validating each value.
    ///
    /// A key given twice keeps its last value.
    pub fn from_pairs<I, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (EntityKey, V)>,
        V: AsRef<str>,
    {
        let mut entities = Self::new();
        for (key, value) in pairs {
            entities.insert(key, value.as_ref())?;
        }
        Ok(entities)
    }

    /// Validate and store a value, returning the previous one.
    pub fn insert(&mut self, key: EntityKey, value: &str) -> Result<Option<String>> {
        let value = normalize_value(key, value)?;
        Ok(self.0.insert(key, value))
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: EntityKey) -> Option<String> {
        self.0.remove(&key)
    }

    /// Get the value for a key.
    pub fn get(&self, key: EntityKey) -> Option<&str> {
        self.0.get(&key).map(|s| s.as_str())
    }

    /// Returns true if the key is set.
    pub fn contains(&self, key: EntityKey) -> bool {
        self.0.contains_key(&key)
    }

    /// Number of keys set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no key is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Keys set, in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = EntityKey> + '_ {
        self.0.keys().copied()
    }

    /// Returns true if every entry of `other` is present here with the same value.
    pub fn is_superset_of(&self, other: &Entities) -> bool {
        other.iter().all(|(key, value)| self.get(key) == Some(value))
    }

    /// `key-value` tokens joined with `_`, in canonical order.
    pub fn to_name_tokens(&self) -> Vec<String> {
        self.iter()
            .map(|(key, value)| format!("{}-{}", key.short_name(), value))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Entities {
    type Item = (EntityKey, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (EntityKey, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_follows_schema_order() {
        let entities = Entities::from_pairs([
            (EntityKey::Run, "1"),
            (EntityKey::Task, "rest"),
            (EntityKey::Subject, "01"),
        ])
        .unwrap();

        let keys: Vec<_> = entities.keys().collect();
        assert_eq!(keys, vec![EntityKey::Subject, EntityKey::Task, EntityKey::Run]);
        assert_eq!(entities.to_name_tokens(), vec!["sub-01", "task-rest", "run-01"]);
    }

    #[test]
    fn test_insert_validates() {
        let mut entities = Entities::new();
        assert!(entities.insert(EntityKey::Task, "rest_eyes").is_err());
        assert!(entities.is_empty());

        assert_eq!(entities.insert(EntityKey::Task, "rest").unwrap(), None);
        assert_eq!(
            entities.insert(EntityKey::Task, "nback").unwrap(),
            Some("rest".to_string())
        );
        assert_eq!(entities.get(EntityKey::Task), Some("nback"));
    }

    #[test]
    fn test_superset() {
        let full = Entities::from_pairs([(EntityKey::Subject, "01"), (EntityKey::Task, "rest")]).unwrap();
        let partial = Entities::from_pairs([(EntityKey::Subject, "01")]).unwrap();
        let other = Entities::from_pairs([(EntityKey::Subject, "02")]).unwrap();

        assert!(full.is_superset_of(&partial));
        assert!(full.is_superset_of(&Entities::new()));
        assert!(!partial.is_superset_of(&full));
        assert!(!full.is_superset_of(&other));
    }
}
