//! Plain-text search across the files of a dataset.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{BidsError, Result};

use super::walk::{ScanConfig, walk};

/// A line containing the searched text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextMatch {
    /// File containing the line.
    pub path: PathBuf,
    /// 1-based line number.
    pub line_number: usize,
    /// The line, with surrounding whitespace trimmed.
    pub line: String,
}

/// Extensions of the sidecar and metadata files that are searched.
/// Files without an extension (`README`, `CHANGES`) are searched too.
pub const TEXT_EXTENSIONS: &[&str] = &[
    ".json", ".tsv", ".csv", ".txt", ".md", ".rst", ".vhdr", ".vmrk", ".bval", ".bvec",
];

/// Every line under `root` that contains `text`.
///
/// Only files with a [`TEXT_EXTENSIONS`] extension (or none) are opened,
/// and each is read line by line. A file stops being read at its first
/// invalid UTF-8 line.
#[instrument(skip_all, fields(root = %root.as_ref().display(), text = %text))]
pub fn search_folder_for_text(
    root: impl AsRef<Path>,
    text: &str,
    config: &ScanConfig,
) -> Result<Vec<TextMatch>> {
    let mut matches = Vec::new();

    for entry in walk(root.as_ref(), config, None)? {
        if entry.is_dir {
            continue;
        }
        if !is_text_file(&entry.name) {
            continue;
        }
        search_file(&entry.path, text, &mut matches)?;
    }

    Ok(matches)
}

fn is_text_file(name: &str) -> bool {
    match name.find('.') {
        Some(dot) => {
            let extension = name[dot..].to_ascii_lowercase();
            TEXT_EXTENSIONS.contains(&extension.as_str())
        }
        None => true,
    }
}

fn search_file(path: &Path, text: &str, matches: &mut Vec<TextMatch>) -> Result<()> {
    let file = File::open(path).map_err(BidsError::io(path))?;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                debug!(path = %path.display(), line = index + 1, "stopping at non-UTF-8 line");
                break;
            }
            Err(err) => return Err(BidsError::io(path)(err)),
        };
        if line.contains(text) {
            matches.push(TextMatch {
                path: path.to_path_buf(),
                line_number: index + 1,
                line: line.trim().to_string(),
            });
        }
    }
    Ok(())
}
