use anyhow::Context as _;
use devbranch_types::{
    Context, DevbranchData, DevbranchReport, Finding, SCHEMA_REPORT_V1, Severity, ToolMeta,
    Verdict, ids,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<DevbranchReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse devbranch report")
}

pub fn serialize_report(report: &DevbranchReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// Report for a run that failed before the gate could evaluate anything.
pub fn runtime_error_report(context: Context, working_dir: &str, message: &str) -> DevbranchReport {
    let now = OffsetDateTime::now_utc();

    DevbranchReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "devbranch".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        context,
        verdict: Verdict::Failed(message.to_string()),
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            package: None,
            help: Some("Fix the tool error and re-run devbranch.".to_string()),
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        data: DevbranchData {
            working_dir: working_dir.to_string(),
            ..DevbranchData::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_error_report_round_trips_through_json() {
        let report = runtime_error_report(Context::PreCommit, "/p", "bad config");
        let bytes = serialize_report(&report).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        let parsed = parse_report_json(&text).expect("parse");
        assert_eq!(parsed.verdict, Verdict::Failed("bad config".to_string()));
        assert_eq!(parsed.findings[0].code, ids::CODE_RUNTIME_ERROR);
        assert_eq!(parsed.context, Context::PreCommit);
    }

    #[test]
    fn foreign_schema_is_rejected() {
        let err = parse_report_json(r#"{"schema":"other.report.v1"}"#).expect_err("schema");
        assert!(err.to_string().contains("unknown report schema"));
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(parse_report_json("{").is_err());
    }
}
