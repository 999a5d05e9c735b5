//! Locating files and collecting entity values across a dataset.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::path::{BidsPath, EntityQuery, OnError, entities_from_filename};
use crate::schema::{Datatype, EntityKey};

use super::walk::{ScanConfig, walk};

/// Every file under `root` whose name parses and matches `query`.
///
/// Results carry the root and datatype recovered from their location and
/// are sorted by full path. Names that do not parse are skipped.
#[instrument(skip_all, fields(root = %root.as_ref().display()))]
pub fn find_matching_paths(
    root: impl AsRef<Path>,
    query: &EntityQuery,
    config: &ScanConfig,
) -> Result<Vec<BidsPath>> {
    let root = root.as_ref();
    let mut matches = Vec::new();
    let mut skipped = 0usize;

    for entry in walk(root, config, None)? {
        if entry.is_dir {
            continue;
        }
        match BidsPath::from_path(&entry.path) {
            Ok(path) if path.matches(query) => matches.push(path),
            Ok(_) => {}
            Err(err) => {
                skipped += 1;
                debug!(path = %entry.path.display(), error = %err, "skipping unparsable name");
            }
        }
    }

    matches.sort_by_key(|p| p.fpath());
    debug!(matched = matches.len(), skipped, "search complete");
    Ok(matches)
}

/// Sorted unique values of `key` found in file and directory names.
#[instrument(skip_all, fields(root = %root.as_ref().display(), key = %key))]
pub fn entity_values(root: impl AsRef<Path>, key: EntityKey, config: &ScanConfig) -> Result<Vec<String>> {
    let mut values = BTreeSet::new();

    for entry in walk(root.as_ref(), config, None)? {
        let entities = entities_from_filename(&entry.name, OnError::Ignore)?;
        if let Some(value) = entities.get(key) {
            values.insert(value.to_string());
        }
    }

    debug!(count = values.len(), "collected entity values");
    Ok(values.into_iter().collect())
}

/// Sorted unique datatype directories found under subjects or sessions.
#[instrument(skip_all, fields(root = %root.as_ref().display()))]
pub fn datatypes(root: impl AsRef<Path>, config: &ScanConfig) -> Result<Vec<Datatype>> {
    let mut found = BTreeSet::new();

    for entry in walk(root.as_ref(), config, None)? {
        if !entry.is_dir {
            continue;
        }
        let Ok(datatype) = entry.name.parse::<Datatype>() else {
            continue;
        };
        let parent_is_container = entry
            .path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("sub-") || n.starts_with("ses-"));
        if parent_is_container {
            found.insert(datatype);
        }
    }

    Ok(found.into_iter().collect())
}
