//! Recursive directory listing shared by the scanning functions.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BidsError, Result};
use crate::path::{Entities, OnError, entities_from_filename};
use crate::schema::{Datatype, EntityKey};

/// Which parts of a dataset the scanning functions look at.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directories directly under the root to skip.
    pub ignore_dirs: Vec<String>,
    /// Whether to visit names starting with `.`.
    pub include_hidden: bool,
    /// Skip any entry whose name carries one of these entity values
    /// (e.g. subject `emptyroom`).
    pub ignore_values: BTreeMap<EntityKey, Vec<String>>,
    /// Skip entries inside these datatype directories.
    pub ignore_datatypes: Vec<Datatype>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: vec!["derivatives".to_string(), "sourcedata".to_string()],
            include_hidden: false,
            ignore_values: BTreeMap::new(),
            ignore_datatypes: Vec::new(),
        }
    }
}

impl ScanConfig {
    /// A configuration that visits everything.
    pub fn unfiltered() -> Self {
        Self {
            ignore_dirs: Vec::new(),
            include_hidden: true,
            ..Self::default()
        }
    }

    /// Skip entries carrying any of `values` for `key`.
    pub fn ignore<I, V>(mut self, key: EntityKey, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.ignore_values
            .entry(key)
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Skip entries inside `datatype` directories.
    pub fn ignore_datatype(mut self, datatype: Datatype) -> Self {
        self.ignore_datatypes.push(datatype);
        self
    }

    /// Returns true if `entities` carry an ignored value.
    pub(crate) fn is_ignored(&self, entities: &Entities) -> bool {
        self.ignore_values.iter().any(|(key, values)| {
            entities
                .get(*key)
                .is_some_and(|value| values.iter().any(|v| v == value))
        })
    }
}

/// One file or directory found under the root.
#[derive(Debug, Clone)]
pub(crate) struct WalkEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    /// 1 for entries directly under the root.
    pub depth: usize,
}

/// List `root` recursively in pre-order. Within a directory, files come
/// first, then subdirectories, each sorted by name.
///
/// Entries excluded by `config` are skipped together with their contents.
/// `max_depth` limits how deep entries are listed.
pub(crate) fn walk(root: &Path, config: &ScanConfig, max_depth: Option<usize>) -> Result<Vec<WalkEntry>> {
    if !root.is_dir() {
        return Err(BidsError::Io {
            path: root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let mut entries = Vec::new();
    visit(root, 1, config, max_depth, &mut entries)?;
    Ok(entries)
}

fn visit(
    dir: &Path,
    depth: usize,
    config: &ScanConfig,
    max_depth: Option<usize>,
    out: &mut Vec<WalkEntry>,
) -> Result<()> {
    if max_depth.is_some_and(|max| depth > max) {
        return Ok(());
    }

    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(BidsError::io(dir))? {
        let entry = entry.map_err(BidsError::io(dir))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type().map_err(BidsError::io(&path))?;

        // Symlinked directories are not followed; links to files are kept.
        let is_dir = if file_type.is_symlink() {
            match fs::metadata(&path) {
                Ok(target) if target.is_file() => false,
                _ => {
                    debug!(path = %path.display(), "skipping symlink");
                    continue;
                }
            }
        } else {
            file_type.is_dir()
        };

        if is_excluded(&name, is_dir, depth, config) {
            continue;
        }

        let walk_entry = WalkEntry {
            path,
            name,
            is_dir,
            depth,
        };
        if is_dir {
            dirs.push(walk_entry);
        } else {
            files.push(walk_entry);
        }
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    dirs.sort_by(|a, b| a.name.cmp(&b.name));

    out.extend(files);
    for entry in dirs {
        let path = entry.path.clone();
        out.push(entry);
        visit(&path, depth + 1, config, max_depth, out)?;
    }
    Ok(())
}

fn is_excluded(name: &str, is_dir: bool, depth: usize, config: &ScanConfig) -> bool {
    if !config.include_hidden && name.starts_with('.') {
        return true;
    }
    if is_dir && depth == 1 && config.ignore_dirs.iter().any(|d| d == name) {
        return true;
    }
    if is_dir
        && name
            .parse::<Datatype>()
            .is_ok_and(|d| config.ignore_datatypes.contains(&d))
    {
        return true;
    }
    if !config.ignore_values.is_empty() {
        if let Ok(entities) = entities_from_filename(name, OnError::Ignore) {
            return config.is_ignored(&entities);
        }
    }
    false
}
