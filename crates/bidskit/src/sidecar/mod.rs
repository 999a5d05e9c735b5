//! JSON sidecar files and the dataset description.

mod description;
mod json;

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{BidsError, Result};
use crate::replace::replace_file;

pub use description::{
    BIDS_VERSION, DESCRIPTION_FILE, DatasetDescription, DatasetType, GeneratedBy, SourceDataset,
    make_dataset_description, read_dataset_description,
};
pub use json::{load_entries, update_sidecar, update_sidecar_json};

/// Read a JSON file whose top-level value must be an object.
pub(crate) fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    let file = File::open(path).map_err(BidsError::io(path))?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(BidsError::Sidecar(format!(
            "'{}' does not contain a JSON object",
            path.display()
        ))),
    }
}

/// Write a JSON object pretty-printed with a trailing newline, replacing
/// any existing file in one rename.
pub(crate) fn write_json_object(path: &Path, map: &Map<String, Value>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(BidsError::io(parent))?;
        }
    }

    replace_file(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, map)?;
        writer.write_all(b"\n").map_err(BidsError::io(path))
    })
}
