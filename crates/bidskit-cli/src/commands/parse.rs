//! Parse command - split a file name into entities, suffix and extension.

use std::path::PathBuf;

use bidskit::BidsPath;

use super::{CommandResult, print_path};

pub fn run(name: PathBuf, json_output: bool) -> CommandResult {
    let path = BidsPath::from_path(&name)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&path)?);
    } else {
        print_path(&path);
    }
    Ok(())
}
