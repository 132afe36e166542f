//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - which records count as development dependencies
//! - allow-list filtering and message ordering
//! - determinism of the verdict

use crate::engine::{NOT_ALLOWED_PREFIX, decide, evaluate};
use crate::model::DependencyRecord;
use crate::policy::GatePolicy;
use crate::test_support::listing_json;
use devbranch_types::{Context, Verdict};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// Strategies
// ============================================================================

/// Composer package names: `vendor/project`.
fn arb_package_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9-]{0,11}/[a-z][a-z0-9-]{0,11}")
        .expect("valid regex")
}

/// Tagged release versions, never starting with `dev-`.
fn arb_release_version() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..20, 0u32..50, 0u32..50).prop_map(|(a, b, c)| format!("{a}.{b}.{c}")),
        (0u32..20, 0u32..50, 0u32..50).prop_map(|(a, b, c)| format!("v{a}.{b}.{c}")),
        (0u32..20, 0u32..50).prop_map(|(a, b)| format!("{a}.{b}.x-dev")),
        (0u32..20).prop_map(|a| format!("{a}.0.0-RC1")),
    ]
}

fn arb_dev_version() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("dev-master".to_string()),
        Just("dev-main".to_string()),
        prop::string::string_regex("dev-[a-z][a-z0-9/_-]{0,15}").expect("valid regex"),
    ]
}

fn arb_version() -> impl Strategy<Value = String> {
    prop_oneof![arb_release_version(), arb_dev_version()]
}

fn arb_record() -> impl Strategy<Value = DependencyRecord> {
    (arb_package_name(), arb_version(), any::<bool>()).prop_map(|(name, version, is_direct)| {
        DependencyRecord {
            name,
            version,
            is_direct,
        }
    })
}

fn arb_context() -> impl Strategy<Value = Context> {
    prop_oneof![Just(Context::PreCommit), Just(Context::General)]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Without any `dev-` version among direct dependencies the gate passes.
    #[test]
    fn release_versions_always_pass(
        records in prop::collection::vec(
            (arb_package_name(), arb_release_version(), any::<bool>()),
            0..20,
        ),
        context in arb_context(),
        fail_on_commit in any::<bool>(),
    ) {
        let records: Vec<DependencyRecord> = records
            .into_iter()
            .map(|(name, version, is_direct)| DependencyRecord { name, version, is_direct })
            .collect();
        let policy = GatePolicy { allowed_packages: BTreeSet::new(), fail_on_commit };
        prop_assert_eq!(evaluate(&records, &policy, context).verdict, Verdict::Passed);
    }

    /// Transitive records never reach the disallowed set.
    #[test]
    fn transitive_records_never_contribute(
        names in prop::collection::vec(arb_package_name(), 1..10),
        version in arb_dev_version(),
        context in arb_context(),
    ) {
        let records: Vec<DependencyRecord> = names
            .into_iter()
            .map(|name| DependencyRecord { name, version: version.clone(), is_direct: false })
            .collect();
        let report = evaluate(&records, &GatePolicy::default(), context);
        prop_assert_eq!(report.verdict, Verdict::Passed);
        prop_assert!(report.summary.dev_dependencies.is_empty());
    }

    /// The message lists offenders in input order, unsorted.
    #[test]
    fn message_preserves_input_order(
        names in prop::collection::vec(arb_package_name(), 1..10),
        context in arb_context(),
        fail_on_commit in any::<bool>(),
    ) {
        let verdict = decide(&names, &BTreeSet::new(), context, fail_on_commit);
        let expected = format!("{NOT_ALLOWED_PREFIX}{}", names.join(", "));
        prop_assert_eq!(verdict.message(), Some(expected.as_str()));
    }

    /// Allowed names never appear in the message; everything else does.
    #[test]
    fn allow_list_removes_exactly_its_members(
        names in prop::collection::vec(arb_package_name(), 1..12),
        keep_mask in prop::collection::vec(any::<bool>(), 12),
    ) {
        let allowed: BTreeSet<String> = names
            .iter()
            .zip(keep_mask.iter())
            .filter(|(_, allow)| **allow)
            .map(|(n, _)| n.clone())
            .collect();
        let verdict = decide(&names, &allowed, Context::General, true);
        let remaining: Vec<&str> = names
            .iter()
            .filter(|n| !allowed.contains(n.as_str()))
            .map(String::as_str)
            .collect();
        if remaining.is_empty() {
            prop_assert_eq!(verdict, Verdict::Passed);
        } else {
            let expected = format!("{NOT_ALLOWED_PREFIX}{}", remaining.join(", "));
            prop_assert_eq!(verdict, Verdict::Failed(expected));
        }
    }

    /// A general run blocks on any violation, whatever `fail_on_commit` says.
    #[test]
    fn general_run_always_blocks(
        names in prop::collection::vec(arb_package_name(), 1..5),
        fail_on_commit in any::<bool>(),
    ) {
        let verdict = decide(&names, &BTreeSet::new(), Context::General, fail_on_commit);
        prop_assert!(verdict.is_blocking());
    }

    /// Same inputs, same verdict.
    #[test]
    fn decide_is_deterministic(
        names in prop::collection::vec(arb_package_name(), 0..10),
        context in arb_context(),
        fail_on_commit in any::<bool>(),
    ) {
        let allowed = BTreeSet::new();
        let first = decide(&names, &allowed, context, fail_on_commit);
        let second = decide(&names, &allowed, context, fail_on_commit);
        prop_assert_eq!(first, second);
    }

    /// Classifying the JSON rendering agrees with the record-level predicate.
    #[test]
    fn classify_matches_record_predicate(records in prop::collection::vec(arb_record(), 0..15)) {
        let entries: Vec<(&str, &str, bool)> = records
            .iter()
            .map(|r| (r.name.as_str(), r.version.as_str(), r.is_direct))
            .collect();
        let raw = listing_json(&entries);
        let classified = crate::classify(&raw).expect("generated listing parses");
        let expected: Vec<String> = records
            .iter()
            .filter(|r| r.is_direct && r.version.starts_with("dev-"))
            .map(|r| r.name.clone())
            .collect();
        prop_assert_eq!(classified, expected);
    }
}
