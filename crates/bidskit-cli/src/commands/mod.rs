//! CLI command implementations.

pub mod build;
pub mod datatypes;
pub mod describe;
pub mod find;
pub mod inventory;
pub mod mark;
pub mod parse;
pub mod search;
pub mod sidecar;
pub mod tree;
pub mod values;

use std::path::PathBuf;

use bidskit::{BidsPath, Dataset, ScanConfig};

use crate::cli::ScanArgs;

/// Result type shared by the command functions.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Open `root` with the scan options given on the command line.
pub fn open_dataset(root: PathBuf, args: ScanArgs) -> bidskit::Result<Dataset> {
    let mut config = if args.all {
        ScanConfig::unfiltered()
    } else {
        ScanConfig::default()
    };
    for (key, value) in args.ignore {
        config = config.ignore(key, [value]);
    }
    for datatype in args.ignore_datatypes {
        config = config.ignore_datatype(datatype);
    }
    Dataset::with_config(root, config)
}

/// Print the parts of a path, one per line.
pub fn print_path(path: &BidsPath) {
    use colored::Colorize;

    println!("{}", path.basename().white().bold());
    for (key, value) in path.entities().iter() {
        println!("  {:<12} {}", key.to_string().cyan(), value);
    }
    if let Some(suffix) = path.suffix() {
        println!("  {:<12} {}", "suffix".yellow(), suffix);
    }
    if let Some(extension) = path.extension() {
        println!("  {:<12} {}", "extension".yellow(), extension);
    }
    if let Some(datatype) = path.datatype() {
        println!("  {:<12} {}", "datatype".yellow(), datatype);
    }
    if let Some(root) = path.root() {
        println!("  {:<12} {}", "root".yellow(), root.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bidskit::EntityKey;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_dataset_applies_ignores() {
        let dir = TempDir::new().unwrap();
        for sub in ["01", "emptyroom"] {
            let eeg = dir.path().join(format!("sub-{}", sub)).join("eeg");
            fs::create_dir_all(&eeg).unwrap();
            fs::write(eeg.join(format!("sub-{}_eeg.edf", sub)), "").unwrap();
        }

        let args = ScanArgs {
            ignore: vec![(EntityKey::Subject, "emptyroom".to_string())],
            ..ScanArgs::default()
        };
        let dataset = open_dataset(dir.path().to_path_buf(), args).unwrap();
        assert_eq!(dataset.subjects().unwrap(), vec!["01"]);
    }
}
