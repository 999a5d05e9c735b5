//! The fixed entity table: key names and canonical order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BidsError;

/// A recognized filename entity.
///
/// Variants are declared in canonical filename order, so the derived `Ord`
/// is the serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKey {
    /// Participant label (`sub`).
    Subject,
    /// Session label (`ses`).
    Session,
    /// Task label (`task`).
    Task,
    /// Acquisition parameters label (`acq`).
    Acquisition,
    /// Run index (`run`).
    Run,
    /// Processing label (`proc`).
    Processing,
    /// Coordinate space label (`space`).
    Space,
    /// Recording label (`rec`).
    Recording,
    /// Split index for recordings stored in several files (`split`).
    Split,
    /// Free-form description label (`desc`).
    Description,
}

impl EntityKey {
    /// All entity keys in canonical order.
    pub const ALL: [EntityKey; 10] = [
        EntityKey::Subject,
        EntityKey::Session,
        EntityKey::Task,
        EntityKey::Acquisition,
        EntityKey::Run,
        EntityKey::Processing,
        EntityKey::Space,
        EntityKey::Recording,
        EntityKey::Split,
        EntityKey::Description,
    ];

    /// The abbreviated name used inside file names (e.g. `sub`).
    pub fn short_name(&self) -> &'static str {
        match self {
            EntityKey::Subject => "sub",
            EntityKey::Session => "ses",
            EntityKey::Task => "task",
            EntityKey::Acquisition => "acq",
            EntityKey::Run => "run",
            EntityKey::Processing => "proc",
            EntityKey::Space => "space",
            EntityKey::Recording => "rec",
            EntityKey::Split => "split",
            EntityKey::Description => "desc",
        }
    }

    /// The full name (e.g. `subject`).
    pub fn long_name(&self) -> &'static str {
        match self {
            EntityKey::Subject => "subject",
            EntityKey::Session => "session",
            EntityKey::Task => "task",
            EntityKey::Acquisition => "acquisition",
            EntityKey::Run => "run",
            EntityKey::Processing => "processing",
            EntityKey::Space => "space",
            EntityKey::Recording => "recording",
            EntityKey::Split => "split",
            EntityKey::Description => "description",
        }
    }

    /// Look up a key by its short name only, as it appears in file names.
    pub fn from_short_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.short_name() == name)
    }

    /// Look up a key by either its short or long name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.short_name() == name || k.long_name() == name)
    }

    /// Index entities hold non-negative integers rather than labels.
    pub fn is_index(&self) -> bool {
        matches!(self, EntityKey::Run | EntityKey::Split)
    }

    /// Comma-separated short names, used in error messages.
    pub fn allowed_short_names() -> String {
        Self::ALL
            .iter()
            .map(|k| k.short_name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

impl FromStr for EntityKey {
    type Err = BidsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| BidsError::InvalidEntity { key: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_ord() {
        let mut sorted = EntityKey::ALL;
        sorted.sort();
        assert_eq!(sorted, EntityKey::ALL);
        assert!(EntityKey::Subject < EntityKey::Session);
        assert!(EntityKey::Split < EntityKey::Description);
    }

    #[test]
    fn test_name_lookup() {
        assert_eq!(EntityKey::from_name("sub"), Some(EntityKey::Subject));
        assert_eq!(EntityKey::from_name("subject"), Some(EntityKey::Subject));
        assert_eq!(EntityKey::from_name("acq"), Some(EntityKey::Acquisition));
        assert_eq!(EntityKey::from_short_name("acquisition"), None);
        assert_eq!(EntityKey::from_name("echo"), None);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "hemi".parse::<EntityKey>().unwrap_err();
        assert!(matches!(err, BidsError::InvalidEntity { ref key } if key == "hemi"));
        assert!(err.to_string().contains("sub, ses, task"));
    }

    #[test]
    fn test_index_entities() {
        assert!(EntityKey::Run.is_index());
        assert!(EntityKey::Split.is_index());
        assert!(!EntityKey::Task.is_index());
    }
}
