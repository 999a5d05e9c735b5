//! The validated path type and its builder.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::error::{BidsError, Result};
use crate::schema::{Datatype, EntityKey};

use super::entities::Entities;
use super::parse::{entities_from_parts, split_name};
use super::query::EntityQuery;
use super::rules::{normalize_extension, validate_suffix};
use super::update::PathUpdate;

/// A validated dataset path: ordered entities plus suffix and extension,
/// optionally anchored at a root directory and datatype.
///
/// Instances are immutable; [`BidsPath::update`] returns a new one.
///
/// ```
/// use bidskit::BidsPath;
///
/// let path = BidsPath::builder()
///     .subject("01")
///     .task("rest")
///     .suffix("eeg")
///     .extension(".json")
///     .build()
///     .unwrap();
/// assert_eq!(path.basename(), "sub-01_task-rest_eeg.json");
/// assert_eq!(BidsPath::parse(&path.basename()).unwrap(), path);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BidsPath {
    entities: Entities,
    #[serde(skip_serializing_if = "Option::is_none")]
    suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    datatype: Option<Datatype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<PathBuf>,
}

impl BidsPath {
    /// Start building a path with named entity setters.
    pub fn builder() -> BidsPathBuilder {
        BidsPathBuilder::default()
    }

    /// Construct from `(key, value)` pairs where keys are short or long
    /// entity names. Suffix and extension are checked against the known
    /// vocabularies.
    pub fn from_entities<I, K, V>(
        pairs: I,
        suffix: Option<&str>,
        extension: Option<&str>,
        root: Option<&Path>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entities = Entities::new();
        for (key, value) in pairs {
            let key: EntityKey = key.as_ref().parse()?;
            entities.insert(key, value.as_ref())?;
        }

        Self::assemble(
            entities,
            suffix.map(|s| validate_suffix(s, true)).transpose()?,
            extension.map(|e| normalize_extension(e, true)).transpose()?,
            None,
            root.map(Path::to_path_buf),
        )
    }

    /// Parse a file name such as `sub-01_task-rest_eeg.json`.
    ///
    /// Parsing accepts any well-formed suffix and extension; only the
    /// layout, entity keys, and values are validated.
    pub fn parse(name: &str) -> Result<Self> {
        let parts = split_name(name)?;
        let entities = entities_from_parts(name, &parts.entities)?;
        let suffix = parts.suffix.map(|s| validate_suffix(s, false)).transpose()?;
        let extension = parts
            .extension
            .map(|e| {
                normalize_extension(e, false).map_err(|err| BidsError::MalformedName {
                    name: name.to_string(),
                    reason: err.to_string(),
                })
            })
            .transpose()?;

        Self::assemble(entities, suffix, extension, None, None)
    }

    /// Parse a full path, recovering datatype and root from the parent
    /// directories (`root/sub-XX/ses-YY/datatype/name`).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| BidsError::MalformedName {
                name: path.display().to_string(),
                reason: "path has no UTF-8 file name".to_string(),
            })?;

        let mut bids_path = Self::parse(name)?;
        let mut dir = path.parent();

        if let Some(parent) = dir {
            if let Some(datatype) = dir_name(parent).and_then(|n| n.parse::<Datatype>().ok()) {
                bids_path.datatype = Some(datatype);
                dir = parent.parent();
            }
        }
        for prefix in ["ses-", "sub-"] {
            if let Some(parent) = dir {
                if dir_name(parent).is_some_and(|n| n.starts_with(prefix)) {
                    dir = parent.parent();
                }
            }
        }

        bids_path.root = dir
            .filter(|d| !d.as_os_str().is_empty())
            .map(Path::to_path_buf);
        Ok(bids_path)
    }

    fn assemble(
        entities: Entities,
        suffix: Option<String>,
        extension: Option<String>,
        datatype: Option<Datatype>,
        root: Option<PathBuf>,
    ) -> Result<Self> {
        let path = Self {
            entities,
            suffix,
            extension,
            datatype,
            root,
        };
        path.ensure_consistent()?;
        Ok(path)
    }

    fn ensure_consistent(&self) -> Result<()> {
        if let Some(extension) = &self.extension {
            if self.entities.is_empty() && self.suffix.is_none() {
                return Err(BidsError::InvalidExtension {
                    extension: extension.clone(),
                    reason: "an extension needs entities or a suffix to attach to".to_string(),
                });
            }
        }
        if self.entities.is_empty() && self.suffix.is_none() {
            return Err(BidsError::MalformedName {
                name: self.basename(),
                reason: "a name needs at least one entity or a suffix".to_string(),
            });
        }
        Ok(())
    }

    /// The entity mapping.
    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    /// Value of one entity.
    pub fn get(&self, key: EntityKey) -> Option<&str> {
        self.entities.get(key)
    }

    /// The `sub` label.
    pub fn subject(&self) -> Option<&str> {
        self.get(EntityKey::Subject)
    }

    /// The `ses` label.
    pub fn session(&self) -> Option<&str> {
        self.get(EntityKey::Session)
    }

    /// The `task` label.
    pub fn task(&self) -> Option<&str> {
        self.get(EntityKey::Task)
    }

    /// The zero-padded `run` index.
    pub fn run(&self) -> Option<&str> {
        self.get(EntityKey::Run)
    }

    /// The suffix, e.g. `eeg`.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// The extension, with its leading dot.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// The datatype folder, when known.
    pub fn datatype(&self) -> Option<Datatype> {
        self.datatype
    }

    /// The dataset root, when known.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// The file name: entities in canonical order, then suffix, then extension.
    pub fn basename(&self) -> String {
        let mut tokens = self.entities.to_name_tokens();
        if let Some(suffix) = &self.suffix {
            tokens.push(suffix.clone());
        }
        let mut name = tokens.join("_");
        if let Some(extension) = &self.extension {
            name.push_str(extension);
        }
        name
    }

    /// `root/sub-XX/ses-YY/datatype`, skipping unset parts.
    pub fn directory(&self) -> PathBuf {
        let mut dir = self.root.clone().unwrap_or_default();
        if let Some(subject) = self.subject() {
            dir.push(format!("sub-{}", subject));
        }
        if let Some(session) = self.session() {
            dir.push(format!("ses-{}", session));
        }
        if let Some(datatype) = self.datatype {
            dir.push(datatype.as_str());
        }
        dir
    }

    /// Full path of the file: [`directory`](Self::directory) joined with
    /// [`basename`](Self::basename).
    pub fn fpath(&self) -> PathBuf {
        self.directory().join(self.basename())
    }

    /// Return a new path with `update` applied. `self` is unchanged.
    pub fn update(&self, update: &PathUpdate) -> Result<Self> {
        let mut next = self.clone();

        for (key, value) in update.entity_changes() {
            match value {
                Some(value) => {
                    next.entities.insert(*key, value)?;
                }
                None => {
                    next.entities.remove(*key);
                }
            }
        }
        if let Some(suffix) = update.suffix_change() {
            next.suffix = suffix
                .map(|s| validate_suffix(s, update.is_checked()))
                .transpose()?;
        }
        if let Some(extension) = update.extension_change() {
            next.extension = extension
                .map(|e| normalize_extension(e, update.is_checked()))
                .transpose()?;
        }
        if let Some(datatype) = update.datatype_change() {
            next.datatype = datatype;
        }
        if let Some(root) = update.root_change() {
            next.root = root.map(Path::to_path_buf);
        }

        next.ensure_consistent()?;
        Ok(next)
    }

    /// Returns true if this path satisfies every constraint in `query`.
    pub fn matches(&self, query: &EntityQuery) -> bool {
        query.matches_parts(
            &self.entities,
            self.suffix(),
            self.extension(),
            self.datatype,
        )
    }

    /// A query requiring exactly the parts set on this path.
    pub fn to_query(&self) -> EntityQuery {
        let mut query = self
            .entities
            .iter()
            .fold(EntityQuery::new(), |q, (key, value)| q.with(key, value));
        if let Some(suffix) = &self.suffix {
            query = query.with_suffix(suffix.clone());
        }
        if let Some(extension) = &self.extension {
            query = query.with_extension(extension);
        }
        if let Some(datatype) = self.datatype {
            query = query.with_datatype(datatype);
        }
        query
    }
}

fn dir_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|s| s.to_str())
}

impl fmt::Display for BidsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.basename())
    }
}

impl FromStr for BidsPath {
    type Err = BidsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Builder for [`BidsPath`] with one setter per entity.
#[derive(Debug, Clone)]
pub struct BidsPathBuilder {
    entities: Vec<(EntityKey, String)>,
    suffix: Option<String>,
    extension: Option<String>,
    datatype: Option<Datatype>,
    root: Option<PathBuf>,
    check: bool,
}

impl Default for BidsPathBuilder {
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

impl BidsPathBuilder {
    /// Set any entity by key.
    pub fn entity(mut self, key: EntityKey, value: impl Into<String>) -> Self {
        self.entities.push((key, value.into()));
        self
    }

    pub fn subject(self, value: impl Into<String>) -> Self {
        self.entity(EntityKey::Subject, value)
    }

    pub fn session(self, value: impl Into<String>) -> Self {
        self.entity(EntityKey::Session, value)
    }

    pub fn task(self, value: impl Into<String>) -> Self {
        self.entity(EntityKey::Task, value)
    }

    pub fn acquisition(self, value: impl Into<String>) -> Self {
        self.entity(EntityKey::Acquisition, value)
    }

    pub fn run(self, value: impl Into<String>) -> Self {
        self.entity(EntityKey::Run, value)
    }

    pub fn processing(self, value: impl Into<String>) -> Self {
        self.entity(EntityKey::Processing, value)
    }

    pub fn space(self, value: impl Into<String>) -> Self {
        self.entity(EntityKey::Space, value)
    }

    pub fn recording(self, value: impl Into<String>) -> Self {
        self.entity(EntityKey::Recording, value)
    }

    pub fn split(self, value: impl Into<String>) -> Self {
        self.entity(EntityKey::Split, value)
    }

    pub fn description(self, value: impl Into<String>) -> Self {
        self.entity(EntityKey::Description, value)
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// A missing leading dot is added on build.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn datatype(mut self, datatype: Datatype) -> Self {
        self.datatype = Some(datatype);
        self
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Whether suffix and extension must come from the known vocabularies
    /// (default: true).
    pub fn check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Validate everything and produce the path.
    pub fn build(self) -> Result<BidsPath> {
        let entities = Entities::from_pairs(self.entities)?;
        let suffix = self
            .suffix
            .map(|s| validate_suffix(&s, self.check))
            .transpose()?;
        let extension = self
            .extension
            .map(|e| normalize_extension(&e, self.check))
            .transpose()?;

        BidsPath::assemble(entities, suffix, extension, self.datatype, self.root)
    }
}
