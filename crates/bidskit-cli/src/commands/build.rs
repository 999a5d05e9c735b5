//! Build command - assemble a file name from entities.

use std::path::PathBuf;

use bidskit::{BidsPath, Datatype, EntityKey};

use super::{CommandResult, print_path};

pub fn run(
    entities: Vec<(EntityKey, String)>,
    suffix: Option<String>,
    extension: Option<String>,
    datatype: Option<Datatype>,
    root: Option<PathBuf>,
    check: bool,
    json_output: bool,
) -> CommandResult {
    let mut builder = BidsPath::builder().check(check);
    for (key, value) in entities {
        builder = builder.entity(key, value);
    }
    if let Some(suffix) = suffix {
        builder = builder.suffix(suffix);
    }
    if let Some(extension) = extension {
        builder = builder.extension(extension);
    }
    if let Some(datatype) = datatype {
        builder = builder.datatype(datatype);
    }
    if let Some(root) = root {
        builder = builder.root(root);
    }
    let path = builder.build()?;

    if json_output {
        let output = serde_json::json!({
            "basename": path.basename(),
            "fpath": path.fpath(),
            "path": path,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if path.root().is_some() || path.datatype().is_some() {
        println!("{}", path.fpath().display());
    } else {
        print_path(&path);
    }
    Ok(())
}
