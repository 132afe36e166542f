use crate::classify::dev_dependency_names;
use crate::fingerprint::fingerprint_for_package;
use crate::model::DependencyRecord;
use crate::policy::GatePolicy;
use crate::report::{DomainReport, ListingSummary};
use devbranch_types::{Context, Finding, Verdict, ids};
use serde_json::json;
use std::collections::BTreeSet;

/// Leading text of the policy-violation message; package names follow, joined by `", "`.
pub const NOT_ALLOWED_PREFIX: &str = "Following dev-* dependencies are not allowed: ";

/// Which failure leaf of the run produced the verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Disallowed dev dependencies were found.
    PolicyViolation,
    /// The dependency listing command could not run or exited non-zero.
    ProcessFailed,
    /// The listing ran but its output could not be parsed.
    InvalidOutput,
}

/// The listing could not be obtained or read; the policy was never evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimeFailure {
    ProcessFailed,
    InvalidOutput,
}

impl RuntimeFailure {
    pub fn kind(self) -> FailureKind {
        match self {
            RuntimeFailure::ProcessFailed => FailureKind::ProcessFailed,
            RuntimeFailure::InvalidOutput => FailureKind::InvalidOutput,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            RuntimeFailure::ProcessFailed => ids::CODE_PROCESS_FAILED,
            RuntimeFailure::InvalidOutput => ids::CODE_INVALID_OUTPUT,
        }
    }
}

/// Severity lookup for a failure.
///
/// `fail_on_commit` only applies to policy violations in the commit hook. A process failure in
/// the hook never blocks; unreadable output always does.
pub fn is_blocking(kind: FailureKind, context: Context, fail_on_commit: bool) -> bool {
    match (kind, context) {
        (FailureKind::InvalidOutput, _) => true,
        (_, Context::General) => true,
        (FailureKind::PolicyViolation, Context::PreCommit) => fail_on_commit,
        (FailureKind::ProcessFailed, Context::PreCommit) => false,
    }
}

pub fn failure_verdict(
    kind: FailureKind,
    context: Context,
    fail_on_commit: bool,
    message: String,
) -> Verdict {
    if is_blocking(kind, context, fail_on_commit) {
        Verdict::Failed(message)
    } else {
        Verdict::NonBlockingFailed(message)
    }
}

/// Dev dependencies that are not in the allow-list, in their original order.
pub fn not_allowed<'a>(dev_dependencies: &'a [String], allowed: &BTreeSet<String>) -> Vec<&'a str> {
    dev_dependencies
        .iter()
        .filter(|name| !allowed.contains(name.as_str()))
        .map(String::as_str)
        .collect()
}

/// Map classified dev dependencies to a verdict. Pure: equal inputs give equal verdicts.
pub fn decide(
    dev_dependencies: &[String],
    allowed: &BTreeSet<String>,
    context: Context,
    fail_on_commit: bool,
) -> Verdict {
    let offenders = not_allowed(dev_dependencies, allowed);
    if offenders.is_empty() {
        return Verdict::Passed;
    }

    let message = format!("{NOT_ALLOWED_PREFIX}{}", offenders.join(", "));
    failure_verdict(FailureKind::PolicyViolation, context, fail_on_commit, message)
}

/// Evaluate a parsed listing: verdict plus one finding per disallowed dependency.
pub fn evaluate(records: &[DependencyRecord], policy: &GatePolicy, context: Context) -> DomainReport {
    let dev_dependencies = dev_dependency_names(records);
    let verdict = decide(
        &dev_dependencies,
        &policy.allowed_packages,
        context,
        policy.fail_on_commit,
    );

    let severity = verdict.finding_severity();
    let findings = if verdict.is_passed() {
        Vec::new()
    } else {
        records
            .iter()
            .filter(|r| r.is_development_dependency() && !policy.is_allowed(&r.name))
            .map(|r| Finding {
                severity,
                check_id: ids::CHECK_COMPOSER_DEV_BRANCH.to_string(),
                code: ids::CODE_DEV_DEPENDENCY_NOT_ALLOWED.to_string(),
                message: format!(
                    "direct dependency '{}' is installed at development version {}",
                    r.name, r.version
                ),
                package: Some(r.name.clone()),
                help: Some(
                    "Require a tagged release, or add the package to allowed_packages."
                        .to_string(),
                ),
                fingerprint: Some(fingerprint_for_package(
                    ids::CHECK_COMPOSER_DEV_BRANCH,
                    ids::CODE_DEV_DEPENDENCY_NOT_ALLOWED,
                    &r.name,
                )),
                data: json!({
                    "package": r.name,
                    "version": r.version,
                }),
            })
            .collect()
    };

    let summary = ListingSummary {
        dependencies_scanned: saturating_count(records.len()),
        direct_dependencies: saturating_count(records.iter().filter(|r| r.is_direct).count()),
        dev_dependencies,
    };

    tracing::debug!(
        dev = summary.dev_dependencies.len(),
        findings = findings.len(),
        "evaluated dependency listing"
    );

    DomainReport {
        verdict,
        findings,
        summary,
    }
}

fn saturating_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Evaluate a run whose listing could not be obtained or read.
pub fn evaluate_failure(
    failure: RuntimeFailure,
    policy: &GatePolicy,
    context: Context,
    diagnostic: String,
) -> DomainReport {
    let verdict = failure_verdict(
        failure.kind(),
        context,
        policy.fail_on_commit,
        diagnostic.clone(),
    );

    let finding = Finding {
        severity: verdict.finding_severity(),
        check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
        code: failure.code().to_string(),
        message: diagnostic,
        package: None,
        help: Some("Run `composer show --format=json` in the project directory.".to_string()),
        fingerprint: None,
        data: serde_json::Value::Null,
    };

    DomainReport {
        verdict,
        findings: vec![finding],
        summary: ListingSummary::default(),
    }
}
