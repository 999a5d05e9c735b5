//! Values command - distinct values of one entity.

use std::path::PathBuf;

use colored::Colorize;

use bidskit::EntityKey;

use crate::cli::ScanArgs;

use super::{CommandResult, open_dataset};

pub fn run(root: PathBuf, key: EntityKey, scan: ScanArgs, json_output: bool) -> CommandResult {
    let dataset = open_dataset(root, scan)?;
    let values = dataset.entity_values(key)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    if values.is_empty() {
        println!("{}", format!("No values found for '{}'", key).yellow());
        return Ok(());
    }
    for value in values {
        println!("{}", value);
    }
    Ok(())
}
