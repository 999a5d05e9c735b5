//! Datatypes command - datatype folders present in a dataset.

use std::path::PathBuf;

use colored::Colorize;

use crate::cli::ScanArgs;

use super::{CommandResult, open_dataset};

pub fn run(root: PathBuf, scan: ScanArgs, json_output: bool) -> CommandResult {
    let dataset = open_dataset(root, scan)?;
    let datatypes = dataset.datatypes()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&datatypes)?);
        return Ok(());
    }

    if datatypes.is_empty() {
        println!("{}", "No datatype folders found".yellow());
    }
    for datatype in datatypes {
        let label = datatype.to_string();
        if datatype.is_electrophysiology() {
            println!("{}", label.cyan());
        } else {
            println!("{}", label);
        }
    }
    Ok(())
}
