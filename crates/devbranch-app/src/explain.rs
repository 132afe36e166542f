//! `devbranch explain`: remediation text for a check ID or finding code.

use devbranch_types::explain::{self, Explanation};
use std::fmt::Write as _;

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found {
        identifier: String,
        explanation: Explanation,
    },
    NotFound {
        identifier: String,
    },
}

/// Look up `identifier` as a check ID (`composer.dev_branch`) or a code (`process_failed`).
pub fn run_explain(identifier: &str) -> ExplainOutput {
    let identifier = identifier.trim().to_string();
    match explain::lookup_explanation(&identifier) {
        Some(explanation) => ExplainOutput::Found {
            identifier,
            explanation,
        },
        None => ExplainOutput::NotFound { identifier },
    }
}

/// Terminal text for a known identifier. Examples are fenced with their own language so the
/// output can be pasted into a PR comment as-is.
pub fn format_explanation(identifier: &str, exp: &Explanation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{identifier}: {}", exp.title);
    out.push('\n');
    let _ = writeln!(out, "{}", exp.description);
    out.push('\n');

    out.push_str("How to fix:\n");
    for line in exp.remediation.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            let _ = writeln!(out, "  {line}");
        }
    }
    out.push('\n');

    let lang = exp.examples.language;
    let _ = writeln!(out, "Rejected:\n```{lang}\n{}\n```", exp.examples.before);
    out.push('\n');
    let _ = writeln!(out, "Accepted:\n```{lang}\n{}\n```", exp.examples.after);

    out
}

/// Terminal text for an unknown identifier, naming everything `explain` accepts.
pub fn format_not_found(identifier: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "devbranch has no explanation for `{identifier}`.");
    out.push('\n');
    let _ = writeln!(out, "Checks: {}", explain::all_check_ids().join(", "));
    let _ = writeln!(out, "Codes:  {}", explain::all_codes().join(", "));
    out
}
