//! Sidecar command - merge fields into a JSON sidecar.

use std::path::PathBuf;

use colored::Colorize;
use serde_json::{Map, Value};

use bidskit::sidecar::load_entries;
use bidskit::update_sidecar_json;

use super::CommandResult;

pub fn run(file: PathBuf, fields: Vec<(String, String)>, from: Option<PathBuf>) -> CommandResult {
    let mut entries = match from {
        Some(path) => load_entries(&path)?,
        None => Map::new(),
    };
    for (key, raw) in fields {
        entries.insert(key, field_value(&raw));
    }

    if entries.is_empty() {
        return Err("nothing to update: pass --set KEY=VALUE or --from FILE".into());
    }

    update_sidecar_json(&file, &entries)?;
    println!(
        "{} {} field(s) in {}",
        "Updated".green().bold(),
        entries.len(),
        file.display()
    );
    Ok(())
}

/// Parse `raw` as JSON, or keep it as a string when it is not valid JSON.
fn field_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value() {
        assert_eq!(field_value("50"), json!(50));
        assert_eq!(field_value("[1, 2]"), json!([1, 2]));
        assert_eq!(field_value("n/a"), json!("n/a"));
        assert_eq!(field_value("\"quoted\""), json!("quoted"));
    }
}
