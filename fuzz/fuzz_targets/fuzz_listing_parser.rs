//! Fuzz target for the composer listing parser.
//!
//! Goal: parsing and classification should **never panic** on any input, and every name the
//! classifier returns must be a direct dependency on a `dev-` version.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_listing_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(records) = devbranch_domain::parse_listing(data) else {
        return;
    };

    let names = devbranch_domain::dev_dependency_names(&records);
    assert!(names.len() <= records.len());
    for name in &names {
        assert!(records
            .iter()
            .any(|r| &r.name == name && r.is_development_dependency()));
    }
});
