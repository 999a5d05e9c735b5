//! Directory scanning built on the path rules.

mod find;
mod search;
mod tree;
mod walk;

pub use find::{datatypes, entity_values, find_matching_paths};
pub use search::{TEXT_EXTENSIONS, TextMatch, search_folder_for_text};
pub use tree::render_dir_tree;
pub use walk::ScanConfig;
