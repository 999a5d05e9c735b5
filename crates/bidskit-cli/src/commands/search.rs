//! Search command - find text in dataset files.

use std::path::PathBuf;

use colored::Colorize;

use crate::cli::ScanArgs;

use super::{CommandResult, open_dataset};

pub fn run(root: PathBuf, text: String, scan: ScanArgs, json_output: bool) -> CommandResult {
    let dataset = open_dataset(root, scan)?;
    let matches = dataset.search(&text)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    for m in &matches {
        let highlighted = m.line.replace(&text, &text.red().bold().to_string());
        println!(
            "{}:{}: {}",
            m.path.display().to_string().cyan(),
            m.line_number.to_string().yellow(),
            highlighted
        );
    }
    if matches.is_empty() {
        println!("{}", format!("'{}' not found", text).yellow());
    }
    Ok(())
}
