//! Use case orchestration for devbranch.
//!
//! This crate provides the application layer: use cases that coordinate settings, the composer
//! adapter, and the domain. It is intentionally thin and delegates heavy lifting to those layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod render;
mod report;

pub use check::{
    CheckInput, CheckOutcome, CheckOutput, evaluate_project, run_check, run_gate,
    verdict_exit_code,
};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use render::render_markdown;
pub use report::{parse_report_json, runtime_error_report, serialize_report};
