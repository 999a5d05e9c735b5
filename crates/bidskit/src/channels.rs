//! Channel status bookkeeping in `channels.tsv`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{BidsError, Result};
use crate::path::{BidsPath, PathUpdate};
use crate::replace::replace_file;

const NAME_COLUMN: &str = "name";
const STATUS_COLUMN: &str = "status";
const DESCRIPTION_COLUMN: &str = "status_description";
const NOT_AVAILABLE: &str = "n/a";

/// Whether a channel's data can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelStatus {
    Good,
    Bad,
}

impl fmt::Display for ChannelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelStatus::Good => write!(f, "good"),
            ChannelStatus::Bad => write!(f, "bad"),
        }
    }
}

impl FromStr for ChannelStatus {
    type Err = BidsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "good" => Ok(ChannelStatus::Good),
            "bad" => Ok(ChannelStatus::Bad),
            _ => Err(BidsError::InvalidArgument(format!(
                "unknown channel status '{}' (use good or bad)",
                s
            ))),
        }
    }
}

/// The `channels.tsv` that belongs to a recording path.
pub fn channels_path(bids_path: &BidsPath) -> Result<PathBuf> {
    let channels = bids_path.update(
        &PathUpdate::new()
            .set_suffix("channels")
            .set_extension(".tsv"),
    )?;
    Ok(channels.fpath())
}

/// Set `status` (and `status_description`) for each named channel.
///
/// `descriptions` is either empty, which writes `n/a`, or one entry per
/// channel. Missing status columns are added and filled with `n/a`.
/// Returns the number of rows changed.
#[instrument(skip_all, fields(path = %path.as_ref().display(), status = %status))]
pub fn mark_channels(
    path: impl AsRef<Path>,
    channels: &[&str],
    status: ChannelStatus,
    descriptions: &[&str],
) -> Result<usize> {
    let path = path.as_ref();

    if !descriptions.is_empty() && descriptions.len() != channels.len() {
        return Err(BidsError::InvalidArgument(format!(
            "got {} descriptions for {} channels",
            descriptions.len(),
            channels.len()
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
    let name_index = headers
        .iter()
        .position(|h| h == NAME_COLUMN)
        .ok_or_else(|| {
            BidsError::Sidecar(format!("'{}' has no '{}' column", path.display(), NAME_COLUMN))
        })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    }

    let status_index = ensure_column(&mut headers, &mut rows, STATUS_COLUMN);
    let description_index = ensure_column(&mut headers, &mut rows, DESCRIPTION_COLUMN);

    for (i, channel) in channels.iter().enumerate() {
        let row = rows
            .iter_mut()
            .find(|row| row.get(name_index).map(|s| s.as_str()) == Some(*channel))
            .ok_or_else(|| BidsError::UnknownChannel {
                channel: channel.to_string(),
                path: path.to_path_buf(),
            })?;
        row[status_index] = status.to_string();
        row[description_index] = descriptions
            .get(i)
            .map(|d| d.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    }

    replace_file(path, |out| {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_writer(out);
        writer.write_record(&headers)?;
        for row in &rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(BidsError::io(path))
    })?;

    info!(changed = channels.len(), "channel status updated");
    Ok(channels.len())
}

/// Return the index of `column`, appending it (filled with `n/a`) if absent.
fn ensure_column(headers: &mut Vec<String>, rows: &mut [Vec<String>], column: &str) -> usize {
    if let Some(index) = headers.iter().position(|h| h == column) {
        for row in rows.iter_mut() {
            if row.len() <= index {
                row.resize(index + 1, NOT_AVAILABLE.to_string());
            }
        }
        return index;
    }

    headers.push(column.to_string());
    let index = headers.len() - 1;
    for row in rows.iter_mut() {
        row.resize(index, NOT_AVAILABLE.to_string());
        row.push(NOT_AVAILABLE.to_string());
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CHANNELS: &str = "name\ttype\tunits\nFp1\tEEG\tuV\nFp2\tEEG\tuV\nCz\tEEG\tuV\n";

    #[test]
    fn test_mark_adds_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub-01_channels.tsv");
        fs::write(&path, CHANNELS).unwrap();

        let changed = mark_channels(&path, &["Fp2"], ChannelStatus::Bad, &["flat"]).unwrap();
        assert_eq!(changed, 1);
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["sub-01_channels.tsv"]);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "name\ttype\tunits\tstatus\tstatus_description\n\
             Fp1\tEEG\tuV\tn/a\tn/a\n\
             Fp2\tEEG\tuV\tbad\tflat\n\
             Cz\tEEG\tuV\tn/a\tn/a\n"
        );
    }

    #[test]
    fn test_mark_existing_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub-01_channels.tsv");
        fs::write(
            &path,
            "name\tstatus\tstatus_description\nFp1\tbad\tnoisy\nFp2\tgood\tn/a\n",
        )
        .unwrap();

        mark_channels(&path, &["Fp1", "Fp2"], ChannelStatus::Good, &[]).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "name\tstatus\tstatus_description\nFp1\tgood\tn/a\nFp2\tgood\tn/a\n"
        );
    }

    #[test]
    fn test_mark_unknown_channel() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub-01_channels.tsv");
        fs::write(&path, CHANNELS).unwrap();

        let err = mark_channels(&path, &["Oz"], ChannelStatus::Bad, &[]).unwrap_err();
        assert!(matches!(err, BidsError::UnknownChannel { ref channel, .. } if channel == "Oz"));
        assert_eq!(fs::read_to_string(&path).unwrap(), CHANNELS);
    }

    #[test]
    fn test_mark_description_count_mismatch() {
        let err = mark_channels("unused.tsv", &["Fp1", "Fp2"], ChannelStatus::Bad, &["x"]).unwrap_err();
        assert!(matches!(err, BidsError::InvalidArgument(_)));
    }

    #[test]
    fn test_channels_path() {
        let recording = BidsPath::builder()
            .subject("01")
            .task("rest")
            .suffix("eeg")
            .extension(".edf")
            .root("/data")
            .datatype(crate::schema::Datatype::Eeg)
            .build()
            .unwrap();
        assert_eq!(
            channels_path(&recording).unwrap(),
            PathBuf::from("/data/sub-01/eeg/sub-01_task-rest_channels.tsv")
        );
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("BAD".parse::<ChannelStatus>().unwrap(), ChannelStatus::Bad);
        assert!("maybe".parse::<ChannelStatus>().is_err());
    }
}
