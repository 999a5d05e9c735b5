//! Validation rules for entity values, suffixes, and extensions.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{BidsError, Result};
use crate::schema::{self, EntityKey};

/// Characters that separate the parts of a file name or path.
pub const RESERVED_CHARS: &[char] = &['-', '_', '.', '/', '\\'];

// One or more dot-prefixed alphanumeric segments, e.g. ".tsv.gz".
static EXTENSION_SYNTAX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\.[A-Za-z0-9]+)+$").unwrap());

fn offending_char(text: &str) -> Option<char> {
    text.chars()
        .find(|c| RESERVED_CHARS.contains(c) || c.is_whitespace() || c.is_control())
}

/// Validate an entity value and return its normalized form.
///
/// Index entities (`run`, `split`) must be all digits and are zero-padded
/// to two digits.
pub fn normalize_value(key: EntityKey, value: &str) -> Result<String> {
    let invalid = |reason: String| BidsError::InvalidValue {
        key: key.short_name().to_string(),
        value: value.to_string(),
        reason,
    };

    if value.is_empty() {
        return Err(invalid("value is empty".to_string()));
    }
    if let Some(c) = offending_char(value) {
        return Err(invalid(format!("reserved character {:?}", c)));
    }

    if key.is_index() {
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("index entities must be non-negative integers".to_string()));
        }
        let index: u64 = value
            .parse()
            .map_err(|_| invalid("index is out of range".to_string()))?;
        return Ok(format!("{:02}", index));
    }

    Ok(value.to_string())
}

/// Validate a suffix; `check` additionally requires a known suffix.
pub fn validate_suffix(suffix: &str, check: bool) -> Result<String> {
    let invalid = |reason: String| BidsError::InvalidSuffix {
        suffix: suffix.to_string(),
        reason,
    };

    if suffix.is_empty() {
        return Err(invalid("suffix is empty".to_string()));
    }
    if let Some(c) = offending_char(suffix) {
        return Err(invalid(format!("reserved character {:?}", c)));
    }
    if check && !schema::is_known_suffix(suffix) {
        return Err(invalid(format!(
            "not a recognized suffix (expected one of: {})",
            schema::KNOWN_SUFFIXES.join(", ")
        )));
    }

    Ok(suffix.to_string())
}

/// Validate an extension, adding the leading dot if missing.
pub fn normalize_extension(extension: &str, check: bool) -> Result<String> {
    let normalized = if extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{}", extension)
    };

    if !EXTENSION_SYNTAX.is_match(&normalized) {
        return Err(BidsError::InvalidExtension {
            extension: extension.to_string(),
            reason: "expected dot-separated alphanumeric segments".to_string(),
        });
    }
    if check && !schema::is_known_extension(&normalized) {
        return Err(BidsError::InvalidExtension {
            extension: extension.to_string(),
            reason: "not a recognized extension".to_string(),
        });
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_rejects_reserved_chars() {
        for bad in ["a-b", "a_b", "a.b", "a/b", "a\\b", "a b", ""] {
            let err = normalize_value(EntityKey::Task, bad).unwrap_err();
            assert!(matches!(err, BidsError::InvalidValue { .. }), "{bad:?}");
        }
        assert_eq!(normalize_value(EntityKey::Task, "rest").unwrap(), "rest");
    }

    #[test]
    fn test_index_values_are_padded() {
        assert_eq!(normalize_value(EntityKey::Run, "1").unwrap(), "01");
        assert_eq!(normalize_value(EntityKey::Run, "007").unwrap(), "07");
        assert_eq!(normalize_value(EntityKey::Split, "123").unwrap(), "123");
        assert!(normalize_value(EntityKey::Run, "one").is_err());
        assert!(normalize_value(EntityKey::Run, "99999999999999999999999").is_err());
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(validate_suffix("eeg", true).unwrap(), "eeg");
        assert!(validate_suffix("custom", true).is_err());
        assert_eq!(validate_suffix("custom", false).unwrap(), "custom");
        assert!(validate_suffix("eeg_raw", false).is_err());
        assert!(validate_suffix("", false).is_err());
    }

    #[test]
    fn test_extension_rules() {
        assert_eq!(normalize_extension("json", true).unwrap(), ".json");
        assert_eq!(normalize_extension(".tsv.gz", true).unwrap(), ".tsv.gz");
        assert!(normalize_extension(".xyz", true).is_err());
        assert_eq!(normalize_extension(".xyz", false).unwrap(), ".xyz");
        assert!(normalize_extension(".", false).is_err());
        assert!(normalize_extension(".tar..gz", false).is_err());
    }
}
