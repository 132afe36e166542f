//! Pure policy evaluation (no IO).
//!
//! Input: the raw JSON printed by `composer show --format=json`, plus the gate policy and the
//! execution context.
//! Output: a verdict, findings, and summary data.

#![forbid(unsafe_code)]

pub mod classify;
pub mod model;
pub mod policy;
pub mod report;

mod engine;
mod fingerprint;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod test_support;

pub use classify::{ParseError, classify, dev_dependency_names, parse_listing};
pub use engine::{
    FailureKind, NOT_ALLOWED_PREFIX, RuntimeFailure, decide, evaluate, evaluate_failure,
    failure_verdict, is_blocking, not_allowed,
};
pub use fingerprint::fingerprint_for_package;
