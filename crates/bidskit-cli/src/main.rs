//! bidskit CLI - naming, discovery and sidecar tooling for BIDS datasets.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Parse { name, json } => commands::parse::run(name, json),

        Commands::Build {
            entities,
            suffix,
            extension,
            datatype,
            root,
            no_check,
            json,
        } => commands::build::run(entities, suffix, extension, datatype, root, !no_check, json),

        Commands::Find {
            root,
            entities,
            suffixes,
            extensions,
            datatypes,
            scan,
            json,
        } => commands::find::run(root, entities, suffixes, extensions, datatypes, scan, json),

        Commands::Values {
            root,
            key,
            scan,
            json,
        } => commands::values::run(root, key, scan, json),

        Commands::Datatypes { root, scan, json } => commands::datatypes::run(root, scan, json),

        Commands::Tree { root, max_depth } => commands::tree::run(root, max_depth),

        Commands::Search {
            root,
            text,
            scan,
            json,
        } => commands::search::run(root, text, scan, json),

        Commands::Inventory { root, scan, json } => commands::inventory::run(root, scan, json),

        Commands::Sidecar { file, fields, from } => commands::sidecar::run(file, fields, from),

        Commands::Describe {
            root,
            name,
            authors,
            license,
            doi,
            generated_by,
            overwrite,
        } => commands::describe::run(root, name, authors, license, doi, generated_by, overwrite),

        Commands::Mark {
            file,
            channels,
            status,
            descriptions,
        } => commands::mark::run(file, channels, status, descriptions),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
