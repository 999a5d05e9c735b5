//! Describe command - write dataset_description.json.

use std::path::PathBuf;

use colored::Colorize;

use bidskit::sidecar::GeneratedBy;
use bidskit::{DatasetDescription, make_dataset_description};

use super::CommandResult;

pub fn run(
    root: PathBuf,
    name: Option<String>,
    authors: Vec<String>,
    license: Option<String>,
    doi: Option<String>,
    generated_by: Option<String>,
    overwrite: bool,
) -> CommandResult {
    let mut description = match name {
        Some(name) => DatasetDescription::new(name),
        None => DatasetDescription::default(),
    };
    if !authors.is_empty() {
        description = description.with_authors(authors);
    }
    if let Some(license) = license {
        description = description.with_license(license);
    }
    if let Some(doi) = doi {
        description = description.with_doi(doi);
    }
    if let Some(pipeline) = generated_by {
        description = description.derivative(GeneratedBy::new(pipeline));
    }

    let path = make_dataset_description(&root, &description, overwrite)?;
    println!("{} {}", "Wrote".green().bold(), path.display());
    Ok(())
}
