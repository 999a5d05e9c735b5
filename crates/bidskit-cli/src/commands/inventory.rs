//! Inventory command - summarize what a dataset contains.

use std::path::PathBuf;

use colored::Colorize;

use crate::cli::ScanArgs;

use super::{CommandResult, open_dataset};

pub fn run(root: PathBuf, scan: ScanArgs, json_output: bool) -> CommandResult {
    let dataset = open_dataset(root, scan)?;
    let inventory = dataset.inventory()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&inventory)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Inventory for".cyan().bold(),
        inventory.root.display().to_string().white()
    );
    println!(
        "{}",
        format!("Scanned {}", inventory.scanned_at.format("%Y-%m-%d %H:%M:%S UTC")).dimmed()
    );
    println!();

    println!("{} {}", "Files:".yellow().bold(), inventory.file_count);
    let datatypes: Vec<String> = inventory.datatypes.iter().map(|d| d.to_string()).collect();
    println!(
        "{} {}",
        "Datatypes:".yellow().bold(),
        if datatypes.is_empty() { "none".to_string() } else { datatypes.join(", ") }
    );
    println!();

    println!("{}", "Entities:".yellow().bold());
    for (key, values) in &inventory.entities {
        println!(
            "  {:<14} {} {}",
            key.to_string(),
            format!("({})", values.len()).dimmed(),
            values.join(", ")
        );
    }
    Ok(())
}
