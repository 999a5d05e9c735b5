//! Fuzz target for file name parsing.
//!
//! Parsing must never panic, and any name that parses must serialize
//! back to a name that parses to the same value.

#![no_main]

use bidskit::{BidsPath, OnError, entities_from_filename};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 4_096 {
        return;
    }

    let Ok(name) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(path) = BidsPath::parse(name) {
        let again = BidsPath::parse(&path.basename()).expect("serialized name must parse");
        assert_eq!(again, path);
    }

    let _ = entities_from_filename(name, OnError::Ignore);
    let _ = BidsPath::from_path(name);
});
