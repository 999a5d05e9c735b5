//! Fuzz target for path updates.
//!
//! Feeds arbitrary entity values into an update and checks that a
//! successful update still yields a valid, reparsable name.

#![no_main]

use bidskit::{BidsPath, EntityKey, PathUpdate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let value = String::from_utf8_lossy(rest);
    let key = EntityKey::ALL[selector as usize % EntityKey::ALL.len()];

    let Ok(base) = BidsPath::parse("sub-01_task-rest_eeg.edf") else {
        return;
    };
    if let Ok(updated) = base.update(&PathUpdate::new().set(key, value.to_string()).check(false)) {
        let reparsed = BidsPath::parse(&updated.basename()).expect("updated name must parse");
        assert_eq!(reparsed, updated);
        assert_eq!(base.basename(), "sub-01_task-rest_eeg.edf");
    }
});
