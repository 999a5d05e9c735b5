//! Parsing, validating, and building dataset file names.
//!
//! A name is a sequence of `key-value` entities in canonical order, an
//! optional suffix, and an optional extension:
//!
//! ```text
//! sub-01_ses-pre_task-rest_run-01_meg.fif
//! └────────── entities ──────────┘ └─┘└──┘
//!                               suffix  extension
//! ```

mod bids_path;
mod entities;
mod parse;
mod query;
mod rules;
mod update;

pub use bids_path::{BidsPath, BidsPathBuilder};
pub use entities::Entities;
pub use parse::{OnError, entities_from_filename};
pub use query::EntityQuery;
pub use rules::RESERVED_CHARS;
pub use update::PathUpdate;
