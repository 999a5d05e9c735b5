//! Splitting file names into entities, suffix, and extension.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{BidsError, Result};
use crate::schema::EntityKey;

use super::entities::Entities;

// `key-value` tokens at the start of the stem or after an underscore.
static ENTITY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|_)([A-Za-z0-9]+)-([^_]+)").unwrap());

/// What to do with unknown or out-of-order entities while extracting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnError {
    /// Fail with an error.
    #[default]
    Raise,
    /// Log a warning and skip the token.
    Warn,
    /// Skip the token silently.
    Ignore,
}

/// The pieces of a strictly parsed file name, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NameParts<'a> {
    pub entities: Vec<(&'a str, &'a str)>,
    pub suffix: Option<&'a str>,
    pub extension: Option<&'a str>,
}

/// Split a stem at the first dot into `(stem, extension)`.
fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.find('.') {
        Some(index) => (&name[..index], Some(&name[index..])),
        None => (name, None),
    }
}

/// Split a basename into raw `key-value` tokens, suffix, and extension.
///
/// Only the layout is checked here; keys and values are validated when the
/// parts are assembled into a `BidsPath`.
pub(crate) fn split_name(name: &str) -> Result<NameParts<'_>> {
    let malformed = |reason: &str| BidsError::MalformedName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(malformed("name is empty"));
    }
    if name.contains(['/', '\\']) {
        return Err(malformed("expected a file name, found a path"));
    }

    let (stem, extension) = split_extension(name);
    if stem.is_empty() {
        return Err(malformed("name starts with an extension"));
    }

    let tokens: Vec<&str> = stem.split('_').collect();
    let last = tokens.len() - 1;
    let mut entities = Vec::with_capacity(tokens.len());
    let mut suffix = None;

    for (index, token) in tokens.iter().enumerate() {
        match token.split_once('-') {
            Some((key, value)) => {
                if key.is_empty() {
                    return Err(malformed(&format!("token '{}' has an empty key", token)));
                }
                if value.is_empty() {
                    return Err(malformed(&format!("token '{}' has an empty value", token)));
                }
                entities.push((key, value));
            }
            None if index == last => {
                if token.is_empty() {
                    return Err(malformed("suffix is empty"));
                }
                suffix = Some(*token);
            }
            None => {
                return Err(malformed(&format!(
                    "token '{}' is not a key-value pair",
                    token
                )));
            }
        }
    }

    Ok(NameParts {
        entities,
        suffix,
        extension,
    })
}

/// Convert raw tokens to validated entities, enforcing known keys, unique
/// keys, and canonical order.
pub(crate) fn entities_from_parts(name: &str, tokens: &[(&str, &str)]) -> Result<Entities> {
    let mut entities = Entities::new();
    let mut previous: Option<EntityKey> = None;

    for (raw_key, value) in tokens {
        let key = EntityKey::from_short_name(raw_key).ok_or_else(|| BidsError::InvalidEntity {
            key: raw_key.to_string(),
        })?;
        if let Some(prev) = previous {
            if key <= prev {
                return Err(BidsError::MalformedName {
                    name: name.to_string(),
                    reason: format!(
                        "entity '{}' must come before '{}'",
                        key.short_name(),
                        prev.short_name()
                    ),
                });
            }
        }
        entities.insert(key, value)?;
        previous = Some(key);
    }

    Ok(entities)
}

/// Extract every recognizable entity from a file name or path.
///
/// Unlike [`BidsPath::parse`](super::BidsPath::parse) this does not require
/// a well-formed suffix, so it also works on directory names such as
/// `sub-01` and on names from other conventions. Only the final path
/// component is inspected.
pub fn entities_from_filename(name: impl AsRef<Path>, on_error: OnError) -> Result<Entities> {
    let name = name.as_ref();
    let basename = name
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (stem, _) = split_extension(&basename);

    let mut entities = Entities::new();
    let mut previous: Option<EntityKey> = None;

    for captures in ENTITY_TOKEN.captures_iter(stem) {
        let raw_key = &captures[1];
        let value = &captures[2];

        let Some(key) = EntityKey::from_short_name(raw_key) else {
            let err = BidsError::InvalidEntity {
                key: raw_key.to_string(),
            };
            handle(on_error, err, &basename)?;
            continue;
        };

        if previous.is_some_and(|prev| key <= prev) {
            let err = BidsError::MalformedName {
                name: basename.clone(),
                reason: format!("entity '{}' is out of order", raw_key),
            };
            handle(on_error, err, &basename)?;
            continue;
        }

        if let Err(err) = entities.insert(key, value) {
            handle(on_error, err, &basename)?;
            continue;
        }
        previous = Some(key);
    }

    Ok(entities)
}

fn handle(on_error: OnError, err: BidsError, name: &str) -> Result<()> {
    match on_error {
        OnError::Raise => Err(err),
        OnError::Warn => {
            warn!(file = name, error = %err, "skipping entity");
            Ok(())
        }
        OnError::Ignore => Ok(()),
    }
}
