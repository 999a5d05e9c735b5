//! Property-based tests for name parsing and building.
//!
//! Properties checked:
//! 1. **No panics**: parsing never crashes on any input
//! 2. **Round trip**: every constructed path reparses to itself
//! 3. **Rejection**: unknown keys and reserved characters always fail
//! 4. **Immutability**: updates never change the original path
//!
//! ```bash
//! PROPTEST_CASES=10000 cargo test -p bidskit --test property_tests
//! ```

use proptest::prelude::*;

use bidskit::path::RESERVED_CHARS;
use bidskit::{BidsError, BidsPath, EntityKey, OnError, PathUpdate, entities_from_filename};

// =============================================================================
// Test Strategies
// =============================================================================

/// Plain label values.
fn label() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,12}"
}

/// A value for `key`: digits for index entities, labels otherwise.
fn value_for(key: EntityKey) -> BoxedStrategy<String> {
    if key.is_index() {
        (0u32..1000).prop_map(|n| n.to_string()).boxed()
    } else {
        label().boxed()
    }
}

/// A random subset of entities with valid values.
fn entity_set() -> impl Strategy<Value = Vec<(EntityKey, String)>> {
    proptest::sample::subsequence(EntityKey::ALL.to_vec(), 0..=EntityKey::ALL.len())
        .prop_flat_map(|keys| {
            keys.into_iter()
                .map(|key| value_for(key).prop_map(move |v| (key, v)))
                .collect::<Vec<_>>()
        })
}

fn suffix() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-zA-Z0-9]{1,10}")
}

fn extension() -> impl Strategy<Value = Option<String>> {
    prop::option::of("(\\.[a-z0-9]{1,4}){1,2}")
}

/// Arbitrary text, weighted toward name-like characters.
fn name_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9_\\-\\.]{0,60}",
        "(sub|ses|task|run|acq|foo)-[a-z0-9]{0,5}(_[a-z]{1,4}-[a-z0-9]{0,4}){0,4}(_[a-z]{0,5})?(\\.[a-z]{0,3}){0,2}",
        any::<String>(),
    ]
}

fn build(pairs: &[(EntityKey, String)], suffix: Option<&str>, extension: Option<&str>) -> Result<BidsPath, BidsError> {
    let mut builder = BidsPath::builder().check(false);
    for (key, value) in pairs {
        builder = builder.entity(*key, value.clone());
    }
    if let Some(suffix) = suffix {
        builder = builder.suffix(suffix);
    }
    if let Some(extension) = extension {
        builder = builder.extension(extension);
    }
    builder.build()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn parse_never_panics(name in name_like()) {
        let _ = BidsPath::parse(&name);
        let _ = entities_from_filename(&name, OnError::Ignore);
    }

    #[test]
    fn constructed_paths_round_trip(
        pairs in entity_set(),
        suffix in suffix(),
        extension in extension(),
    ) {
        match build(&pairs, suffix.as_deref(), extension.as_deref()) {
            Ok(path) => {
                let reparsed = BidsPath::parse(&path.basename()).unwrap();
                prop_assert_eq!(reparsed, path);
            }
            Err(err) => {
                // Only a name with neither entities nor a suffix may fail.
                prop_assert!(pairs.is_empty() && suffix.is_none());
                let is_anchor_error = match extension {
                    Some(_) => matches!(err, BidsError::InvalidExtension { .. }),
                    None => matches!(err, BidsError::MalformedName { .. }),
                };
                prop_assert!(is_anchor_error);
            }
        }
    }

    #[test]
    fn serialized_entities_follow_canonical_order(pairs in entity_set()) {
        let path = build(&pairs, Some("eeg"), None).unwrap();
        let keys: Vec<EntityKey> = path.entities().keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(keys, sorted);
    }

    #[test]
    fn index_values_are_zero_padded(run in 0u32..10_000) {
        let path = BidsPath::builder()
            .subject("01")
            .run(run.to_string())
            .suffix("meg")
            .build()
            .unwrap();
        prop_assert_eq!(path.run().unwrap(), format!("{:02}", run));
    }

    #[test]
    fn unknown_keys_are_rejected(key in "[a-z]{1,8}", value in label()) {
        prop_assume!(EntityKey::from_short_name(&key).is_none());
        let name = format!("sub-01_{}-{}_eeg.edf", key, value);
        let is_invalid_entity = matches!(BidsPath::parse(&name), Err(BidsError::InvalidEntity { .. }));
        prop_assert!(is_invalid_entity);
    }

    #[test]
    fn reserved_chars_are_rejected(
        prefix in label(),
        index in 0..RESERVED_CHARS.len(),
        key in proptest::sample::select(EntityKey::ALL.to_vec()),
    ) {
        let value = format!("{}{}", prefix, RESERVED_CHARS[index]);
        let result = BidsPath::builder().entity(key, value).suffix("eeg").build();
        let is_invalid_value = matches!(result, Err(BidsError::InvalidValue { .. }));
        prop_assert!(is_invalid_value);
    }

    #[test]
    fn update_leaves_original_untouched(
        pairs in entity_set(),
        key in proptest::sample::select(EntityKey::ALL.to_vec()),
        replacement in "[0-9]{1,3}",
    ) {
        let original = build(&pairs, Some("eeg"), Some(".edf")).unwrap();
        let before = original.clone();

        let updated = original
            .update(&PathUpdate::new().set(key, replacement.clone()))
            .unwrap();

        prop_assert_eq!(&original, &before);
        prop_assert!(updated.get(key).is_some());
        for (other, value) in original.entities().iter() {
            if other != key {
                prop_assert_eq!(updated.get(other), Some(value));
            }
        }
    }
}
