//! The `check` use case: list dependencies, evaluate policy, produce a report.

use anyhow::Context as _;
use camino::Utf8Path;
use devbranch_composer::DependencyLister;
use devbranch_domain::RuntimeFailure;
use devbranch_domain::report::DomainReport;
use devbranch_settings::{Overrides, ResolvedConfig};
use devbranch_types::{
    Context, DevbranchData, DevbranchReport, RepoPath, SCHEMA_REPORT_V1, ToolMeta, Verdict,
};
use time::OffsetDateTime;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Project directory passed to `composer show --working-dir`.
    pub working_dir: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Commit hook or general run.
    pub context: Context,
    /// Changed files, when known. `None` means "always run".
    pub changed_files: Option<Vec<RepoPath>>,
}

/// Output from an evaluated check.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: DevbranchReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

impl CheckOutput {
    pub fn verdict(&self) -> &Verdict {
        &self.report.verdict
    }
}

#[derive(Clone, Debug)]
#[allow(clippy::large_enum_variant)]
pub enum CheckOutcome {
    /// None of the changed files matched `triggered_by`; the gate did not run.
    NotTriggered { resolved_config: ResolvedConfig },
    Evaluated(CheckOutput),
}

/// Run the check use case: parse config, apply the trigger gate, evaluate, produce a report.
pub fn run_check(
    input: CheckInput<'_>,
    lister: &dyn DependencyLister,
) -> anyhow::Result<CheckOutcome> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        devbranch_settings::DevbranchConfigV1::default()
    } else {
        devbranch_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved =
        devbranch_settings::resolve_config(cfg, input.overrides).context("resolve config")?;

    if let Some(changed_files) = &input.changed_files
        && !resolved.is_triggered_by(changed_files)
    {
        tracing::info!(
            changed = changed_files.len(),
            "no changed file matches triggered_by; skipping"
        );
        return Ok(CheckOutcome::NotTriggered {
            resolved_config: resolved,
        });
    }

    let domain_report = evaluate_project(&resolved, input.context, input.working_dir, lister);
    let DomainReport {
        verdict,
        findings,
        summary,
    } = domain_report;

    let finished_at = OffsetDateTime::now_utc();

    let report = DevbranchReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "devbranch".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        context: input.context,
        verdict,
        findings,
        data: DevbranchData {
            working_dir: input.working_dir.to_string(),
            composer_file: resolved.composer_file.clone(),
            dependencies_scanned: summary.dependencies_scanned,
            direct_dependencies: summary.direct_dependencies,
            dev_dependencies: summary.dev_dependencies,
            allowed_packages: resolved.policy.allowed_packages.iter().cloned().collect(),
        },
    };

    Ok(CheckOutcome::Evaluated(CheckOutput {
        report,
        resolved_config: resolved,
    }))
}

/// Invoker -> classifier -> decision engine, for an already resolved configuration.
///
/// Every failure leaf becomes a verdict; nothing is propagated as an error.
pub fn evaluate_project(
    resolved: &ResolvedConfig,
    context: Context,
    working_dir: &Utf8Path,
    lister: &dyn DependencyLister,
) -> DomainReport {
    let policy = &resolved.policy;

    let report = match lister.list_dependencies(working_dir) {
        Err(err) => devbranch_domain::evaluate_failure(
            RuntimeFailure::ProcessFailed,
            policy,
            context,
            err.diagnostic(),
        ),
        Ok(raw) => match devbranch_domain::parse_listing(&raw) {
            Err(err) => devbranch_domain::evaluate_failure(
                RuntimeFailure::InvalidOutput,
                policy,
                context,
                err.to_string(),
            ),
            Ok(records) => devbranch_domain::evaluate(&records, policy, context),
        },
    };

    tracing::info!(
        context = context.as_str(),
        verdict = ?report.verdict,
        "dev-branch check finished"
    );
    report
}

/// The gate's single entry point: configuration + context + directory in, verdict out.
pub fn run_gate(
    resolved: &ResolvedConfig,
    context: Context,
    working_dir: &Utf8Path,
    lister: &dyn DependencyLister,
) -> Verdict {
    evaluate_project(resolved, context, working_dir, lister).verdict
}

/// Map verdict to exit code: 0 = passed or non-blocking, 2 = blocking failure.
pub fn verdict_exit_code(verdict: &Verdict) -> i32 {
    match verdict {
        Verdict::Passed => 0,
        Verdict::NonBlockingFailed(_) => 0,
        Verdict::Failed(_) => 2,
    }
}
