//! Mark command - set channel status in channels.tsv.

use std::path::PathBuf;

use colored::Colorize;

use bidskit::channels::channels_path;
use bidskit::{BidsPath, ChannelStatus, mark_channels};

use super::CommandResult;

pub fn run(
    file: PathBuf,
    channels: Vec<String>,
    status: ChannelStatus,
    descriptions: Vec<String>,
) -> CommandResult {
    let target = resolve_channels_file(file)?;

    let channels: Vec<&str> = channels.iter().map(String::as_str).collect();
    let descriptions: Vec<&str> = descriptions.iter().map(String::as_str).collect();
    let changed = mark_channels(&target, &channels, status, &descriptions)?;

    let label = match status {
        ChannelStatus::Good => status.to_string().green(),
        ChannelStatus::Bad => status.to_string().red(),
    };
    println!(
        "Marked {} channel(s) {} in {}",
        changed.to_string().white().bold(),
        label.bold(),
        target.display()
    );
    Ok(())
}

/// Use `file` directly if it is a channels table, otherwise find the
/// channels table of the recording it names.
fn resolve_channels_file(file: PathBuf) -> bidskit::Result<PathBuf> {
    let is_channels_table = file
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with("_channels.tsv") || n == "channels.tsv");
    if is_channels_table {
        return Ok(file);
    }
    channels_path(&BidsPath::from_path(&file)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_channels_file() {
        let direct = PathBuf::from("/data/sub-01/eeg/sub-01_task-rest_channels.tsv");
        assert_eq!(resolve_channels_file(direct.clone()).unwrap(), direct);

        let recording = PathBuf::from("/data/sub-01/eeg/sub-01_task-rest_eeg.edf");
        assert_eq!(resolve_channels_file(recording).unwrap(), direct);
    }
}
