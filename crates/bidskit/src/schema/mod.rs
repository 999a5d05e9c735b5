//! Entity table and naming vocabularies.

mod entity;
mod vocab;

pub use entity::EntityKey;
pub use vocab::{Datatype, KNOWN_EXTENSIONS, KNOWN_SUFFIXES, is_known_extension, is_known_suffix};
