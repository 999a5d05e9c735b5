//! Find command - list files matching entity constraints.

use std::path::PathBuf;

use colored::Colorize;

use bidskit::{Datatype, EntityKey, EntityQuery};

use crate::cli::ScanArgs;

use super::{CommandResult, open_dataset};

pub fn run(
    root: PathBuf,
    entities: Vec<(EntityKey, String)>,
    suffixes: Vec<String>,
    extensions: Vec<String>,
    datatypes: Vec<Datatype>,
    scan: ScanArgs,
    json_output: bool,
) -> CommandResult {
    let dataset = open_dataset(root, scan)?;

    let mut query = entities
        .into_iter()
        .fold(EntityQuery::new(), |q, (key, value)| q.with(key, value));
    query = suffixes.into_iter().fold(query, |q, s| q.with_suffix(s));
    query = extensions.into_iter().fold(query, |q, x| q.with_extension(x));
    query = datatypes.into_iter().fold(query, |q, d| q.with_datatype(d));

    let found = dataset.find(&query)?;

    if json_output {
        let paths: Vec<PathBuf> = found.iter().map(|p| p.fpath()).collect();
        println!("{}", serde_json::to_string_pretty(&paths)?);
        return Ok(());
    }

    for path in &found {
        println!("{}", path.fpath().display());
    }
    let noun = if found.len() == 1 { "match" } else { "matches" };
    eprintln!("{} {}", found.len().to_string().white().bold(), noun.dimmed());
    Ok(())
}
