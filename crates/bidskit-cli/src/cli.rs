//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bidskit::{ChannelStatus, Datatype, EntityKey};

/// bidskit: naming, discovery and sidecar tooling for BIDS datasets
#[derive(Parser)]
#[command(name = "bidskit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a file name or path into its parts
    Parse {
        /// File name or path to parse
        #[arg(value_name = "NAME")]
        name: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a file name from entities
    Build {
        /// Entity as KEY=VALUE (short or long key name); repeatable
        #[arg(short, long = "entity", value_name = "KEY=VALUE", value_parser = parse_entity)]
        entities: Vec<(EntityKey, String)>,

        /// Suffix, e.g. "eeg"
        #[arg(short, long)]
        suffix: Option<String>,

        /// Extension, e.g. ".edf"
        #[arg(short = 'x', long)]
        extension: Option<String>,

        /// Datatype folder
        #[arg(short, long)]
        datatype: Option<Datatype>,

        /// Dataset root to prefix the full path with
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Accept suffixes and extensions outside the known vocabularies
        #[arg(long)]
        no_check: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find files matching entity constraints
    Find {
        /// Dataset root
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Required entity as KEY=VALUE; repeat a key to accept several values
        #[arg(short, long = "entity", value_name = "KEY=VALUE", value_parser = parse_entity)]
        entities: Vec<(EntityKey, String)>,

        /// Accepted suffix; repeatable
        #[arg(short, long = "suffix")]
        suffixes: Vec<String>,

        /// Accepted extension; repeatable
        #[arg(short = 'x', long = "extension")]
        extensions: Vec<String>,

        /// Accepted datatype; repeatable
        #[arg(short, long = "datatype")]
        datatypes: Vec<Datatype>,

        #[command(flatten)]
        scan: ScanArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the distinct values of one entity
    Values {
        /// Dataset root
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Entity key (short or long name)
        #[arg(value_name = "KEY")]
        key: EntityKey,

        #[command(flatten)]
        scan: ScanArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the datatype folders present
    Datatypes {
        /// Dataset root
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the directory tree
    Tree {
        /// Dataset root
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Only show this many levels below the root
        #[arg(short = 'L', long)]
        max_depth: Option<usize>,
    },

    /// Search text files for a string
    Search {
        /// Dataset root
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Text to search for
        #[arg(value_name = "TEXT")]
        text: String,

        #[command(flatten)]
        scan: ScanArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize subjects, sessions, tasks and datatypes
    Inventory {
        /// Dataset root
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Merge fields into an existing JSON sidecar
    Sidecar {
        /// Sidecar file to update
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field as KEY=VALUE; VALUE is parsed as JSON, falling back to a string
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        fields: Vec<(String, String)>,

        /// JSON file with an object of fields to merge
        #[arg(long, value_name = "JSON_FILE")]
        from: Option<PathBuf>,
    },

    /// Write dataset_description.json
    Describe {
        /// Dataset root
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Dataset name
        #[arg(short, long)]
        name: Option<String>,

        /// Author; repeatable
        #[arg(short, long = "author")]
        authors: Vec<String>,

        /// License identifier, e.g. "CC0"
        #[arg(short, long)]
        license: Option<String>,

        /// Dataset DOI ("doi:<prefix>/<id>")
        #[arg(long)]
        doi: Option<String>,

        /// Mark as a derivative generated by this pipeline
        #[arg(long, value_name = "PIPELINE")]
        generated_by: Option<String>,

        /// Replace existing fields instead of only adding missing ones
        #[arg(long)]
        overwrite: bool,
    },

    /// Mark channels good or bad in channels.tsv
    Mark {
        /// channels.tsv, or any file of the recording it belongs to
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Channel name; repeatable
        #[arg(short, long = "channel", required = true)]
        channels: Vec<String>,

        /// New status
        #[arg(short, long, default_value = "bad")]
        status: ChannelStatus,

        /// Reason per channel, in the same order as --channel
        #[arg(short, long = "description")]
        descriptions: Vec<String>,
    },
}

/// Options shared by the scanning commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Skip entries carrying KEY=VALUE (e.g. subject=emptyroom); repeatable
    #[arg(long = "ignore", value_name = "KEY=VALUE", value_parser = parse_entity)]
    pub ignore: Vec<(EntityKey, String)>,

    /// Skip this datatype folder; repeatable
    #[arg(long = "ignore-datatype", value_name = "DATATYPE")]
    pub ignore_datatypes: Vec<Datatype>,

    /// Include derivatives/, sourcedata/ and hidden files
    #[arg(long)]
    pub all: bool,
}

/// Split `KEY=VALUE` at the first `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

/// `KEY=VALUE` where KEY names an entity.
pub fn parse_entity(s: &str) -> Result<(EntityKey, String), String> {
    let (key, value) = parse_key_value(s)?;
    let key = key.parse::<EntityKey>().map_err(|e| e.to_string())?;
    Ok((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("TaskName=rest").unwrap(),
            ("TaskName".to_string(), "rest".to_string())
        );
        assert_eq!(
            parse_key_value("Note=a=b").unwrap(),
            ("Note".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_parse_entity() {
        assert_eq!(
            parse_entity("sub=01").unwrap(),
            (EntityKey::Subject, "01".to_string())
        );
        assert_eq!(
            parse_entity("session=pre").unwrap(),
            (EntityKey::Session, "pre".to_string())
        );
        assert!(parse_entity("foo=1").unwrap_err().contains("Unknown entity"));
    }

    #[test]
    fn test_find_args() {
        let cli = Cli::try_parse_from([
            "bidskit", "find", "/data", "-e", "sub=01", "-e", "task=rest", "-x", ".edf", "--ignore",
            "subject=emptyroom",
        ])
        .unwrap();
        match cli.command {
            Commands::Find {
                entities, extensions, scan, ..
            } => {
                assert_eq!(entities.len(), 2);
                assert_eq!(extensions, vec![".edf"]);
                assert_eq!(scan.ignore, vec![(EntityKey::Subject, "emptyroom".to_string())]);
            }
            _ => panic!("expected find"),
        }
    }
}
