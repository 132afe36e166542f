//! Fuzz target for config parsing, resolution and the trigger gate.
//!
//! Goal: none of these should **ever panic**. Invalid TOML and invalid glob patterns must come
//! back as errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config
//! ```

#![no_main]

use arbitrary::Arbitrary;
use devbranch_settings::Overrides;
use devbranch_types::RepoPath;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct ConfigInput {
    /// Raw devbranch.toml contents.
    toml: String,
    /// Extra `--allow` values.
    allow: Vec<String>,
    /// Changed files handed to the trigger gate.
    changed: Vec<String>,
}

fuzz_target!(|input: ConfigInput| {
    // Limit input size to keep fuzzing fast
    if input.toml.len() > 4096 || input.allow.len() > 20 || input.changed.len() > 100 {
        return;
    }

    let Ok(cfg) = devbranch_settings::parse_config_toml(&input.toml) else {
        return;
    };

    let overrides = Overrides {
        allowed_packages: input.allow,
        fail_on_commit: None,
    };
    let Ok(resolved) = devbranch_settings::resolve_config(cfg, overrides) else {
        return;
    };

    let changed: Vec<RepoPath> = input
        .changed
        .iter()
        .filter(|c| c.len() <= 512)
        .map(RepoPath::new)
        .collect();
    let _ = resolved.is_triggered_by(&changed);
});
