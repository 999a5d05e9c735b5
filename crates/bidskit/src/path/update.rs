//! Changes applied to a `BidsPath` to produce a new one.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::schema::{Datatype, EntityKey};

/// A set of changes for [`BidsPath::update`](super::BidsPath::update).
///
/// Untouched parts keep their current value. Entity changes apply in the
/// order given, so setting and then clearing the same key clears it.
#[derive(Debug, Clone)]
pub struct PathUpdate {
    entities: Vec<(EntityKey, Option<String>)>,
    suffix: Option<Option<String>>,
    extension: Option<Option<String>>,
    datatype: Option<Option<Datatype>>,
    root: Option<Option<PathBuf>>,
    check: bool,
}

impl Default for PathUpdate {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            suffix: None,
            extension: None,
            datatype: None,
            root: None,
            check: true,
        }
    }
}

impl PathUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an entity value.
    pub fn set(mut self, key: EntityKey, value: impl Into<String>) -> Self {
        self.entities.push((key, Some(value.into())));
        self
    }

    /// Set an entity by short or long name.
    pub fn set_named(self, name: &str, value: impl Into<String>) -> Result<Self> {
        let key: EntityKey = name.parse()?;
        Ok(self.set(key, value))
    }

    /// Remove an entity.
    pub fn clear(mut self, key: EntityKey) -> Self {
        self.entities.push((key, None));
        self
    }

    pub fn set_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(Some(suffix.into()));
        self
    }

    pub fn clear_suffix(mut self) -> Self {
        self.suffix = Some(None);
        self
    }

    pub fn set_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(Some(extension.into()));
        self
    }

    pub fn clear_extension(mut self) -> Self {
        self.extension = Some(None);
        self
    }

    pub fn set_datatype(mut self, datatype: Datatype) -> Self {
        self.datatype = Some(Some(datatype));
        self
    }

    pub fn clear_datatype(mut self) -> Self {
        self.datatype = Some(None);
        self
    }

    pub fn set_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(Some(root.into()));
        self
    }

    pub fn clear_root(mut self) -> Self {
        self.root = Some(None);
        self
    }

    /// Whether a new suffix or extension must be in the known vocabularies
    /// (default: true).
    pub fn check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Returns true if nothing would change.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
            && self.suffix.is_none()
            && self.extension.is_none()
            && self.datatype.is_none()
            && self.root.is_none()
    }

    pub(crate) fn entity_changes(&self) -> &[(EntityKey, Option<String>)] {
        &self.entities
    }

    pub(crate) fn suffix_change(&self) -> Option<Option<&str>> {
        self.suffix.as_ref().map(|s| s.as_deref())
    }

    pub(crate) fn extension_change(&self) -> Option<Option<&str>> {
        self.extension.as_ref().map(|e| e.as_deref())
    }

    pub(crate) fn datatype_change(&self) -> Option<Option<Datatype>> {
        self.datatype
    }

    pub(crate) fn root_change(&self) -> Option<Option<&Path>> {
        self.root.as_ref().map(|r| r.as_deref())
    }

    pub(crate) fn is_checked(&self) -> bool {
        self.check
    }
}
