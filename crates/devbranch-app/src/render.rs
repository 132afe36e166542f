//! Markdown rendering of a devbranch report, for PR comments and CI summaries.

use devbranch_types::{DevbranchReport, Severity, Verdict};

pub fn render_markdown(report: &DevbranchReport) -> String {
    let mut out = String::new();

    out.push_str("# Devbranch report\n\n");
    let verdict = match report.verdict {
        Verdict::Passed => "PASS",
        Verdict::NonBlockingFailed(_) => "WARN",
        Verdict::Failed(_) => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Context: {}\n- Dependencies scanned: {} ({} direct)\n\n",
        verdict,
        report.context.as_str(),
        report.data.dependencies_scanned,
        report.data.direct_dependencies
    ));

    if let Some(message) = report.verdict.message() {
        out.push_str(&format!("> {}\n\n", message));
    }

    if !report.data.allowed_packages.is_empty() {
        out.push_str("Allowed dev packages: ");
        let allowed: Vec<String> = report
            .data
            .allowed_packages
            .iter()
            .map(|p| format!("`{p}`"))
            .collect();
        out.push_str(&allowed.join(", "));
        out.push_str("\n\n");
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");

    for f in &report.findings {
        let sev = match f.severity {
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        };

        out.push_str(&format!("- [{}] `{}` / `{}`: {}\n", sev, f.check_id, f.code, f.message));

        if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
    }

    out
}
