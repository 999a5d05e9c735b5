//! Merging new fields into an existing JSON sidecar.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::error::{BidsError, Result};
use crate::path::BidsPath;

use super::{read_json_object, write_json_object};

/// Merge `entries` into the JSON sidecar at `path`.
///
/// The file must already exist and contain a JSON object. Keys in
/// `entries` overwrite existing keys; everything else, including key
/// order, is preserved.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn update_sidecar_json(path: impl AsRef<Path>, entries: &Map<String, Value>) -> Result<()> {
    let path = path.as_ref();

    if path.extension().is_none_or(|ext| ext != "json") {
        return Err(BidsError::Sidecar(format!(
            "'{}' is not a JSON sidecar",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(BidsError::Sidecar(format!(
            "sidecar '{}' does not exist",
            path.display()
        )));
    }

    let mut sidecar = read_json_object(path)?;
    for (key, value) in entries {
        sidecar.insert(key.clone(), value.clone());
    }
    write_json_object(path, &sidecar)?;

    info!(updated = entries.len(), "sidecar updated");
    Ok(())
}

/// [`update_sidecar_json`] for the file a `BidsPath` points to.
pub fn update_sidecar(bids_path: &BidsPath, entries: &Map<String, Value>) -> Result<()> {
    if bids_path.extension() != Some(".json") {
        return Err(BidsError::Sidecar(format!(
            "'{}' must have the .json extension",
            bids_path.basename()
        )));
    }
    update_sidecar_json(bids_path.fpath(), entries)
}

/// Load update entries from a JSON file containing an object.
pub fn load_entries(path: impl AsRef<Path>) -> Result<Map<String, Value>> {
    read_json_object(path.as_ref())
}
