//! bidskit: naming, discovery and sidecar tooling for BIDS datasets.
//!
//! Every file in a BIDS dataset is named from an ordered set of
//! `key-value` entities, a suffix and an extension, and lives in a
//! `sub-XX/[ses-YY/]datatype/` folder. bidskit validates and builds those
//! names, finds files by entity, and edits the JSON and TSV files that
//! describe recordings.
//!
//! # Example
//!
//! ```no_run
//! use bidskit::{BidsPath, Dataset, EntityKey, EntityQuery};
//!
//! let path: BidsPath = "sub-01_ses-a_task-rest_run-1_meg.fif".parse().unwrap();
//! assert_eq!(path.run(), Some("01"));
//!
//! let dataset = Dataset::new("/data/ds000117").unwrap();
//! let query = EntityQuery::new().with(EntityKey::Task, "rest");
//! for found in dataset.find(&query).unwrap() {
//!     println!("{}", found.fpath().display());
//! }
//! ```

pub mod channels;
pub mod error;
pub mod path;
pub mod scan;
pub mod schema;
pub mod sidecar;

mod dataset;
mod replace;

pub use channels::{ChannelStatus, mark_channels};
pub use dataset::{Dataset, DatasetInventory};
pub use error::{BidsError, Result};
pub use path::{BidsPath, BidsPathBuilder, Entities, EntityQuery, OnError, PathUpdate, entities_from_filename};
pub use scan::{ScanConfig, TextMatch, find_matching_paths, render_dir_tree, search_folder_for_text};
pub use schema::{Datatype, EntityKey};
pub use sidecar::{DatasetDescription, make_dataset_description, update_sidecar, update_sidecar_json};
