use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for devbranch reports.
pub const SCHEMA_REPORT_V1: &str = "devbranch.report.v1";

/// Where the gate is being run from.
///
/// Only the commit hook softens violations; every other invocation is a general run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Context {
    PreCommit,
    #[default]
    General,
}

impl Context {
    pub fn as_str(self) -> &'static str {
        match self {
            Context::PreCommit => "pre-commit",
            Context::General => "general",
        }
    }
}

/// Outcome of one gate run. Exactly one is produced per invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum Verdict {
    Passed,
    /// Blocking: the enclosing operation (commit, build) must abort.
    Failed(String),
    /// Reported, but the enclosing operation may proceed.
    NonBlockingFailed(String),
}

impl Verdict {
    pub fn is_passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self, Verdict::Failed(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Verdict::Passed => None,
            Verdict::Failed(m) | Verdict::NonBlockingFailed(m) => Some(m),
        }
    }

    /// Severity that findings of a failing verdict are reported with.
    pub fn finding_severity(&self) -> Severity {
        match self {
            Verdict::Passed => Severity::Info,
            Verdict::Failed(_) => Severity::Error,
            Verdict::NonBlockingFailed(_) => Severity::Warning,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub severity: Severity,
    pub check_id: String,
    pub code: String,
    pub message: String,

    /// Composer package name the finding is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Stable identifier intended for dedup and trending: a hash of
    /// `check_id + code + package`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Devbranch-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct DevbranchData {
    pub working_dir: String,
    pub composer_file: String,

    pub dependencies_scanned: u32,
    pub direct_dependencies: u32,

    /// Direct `dev-*` dependencies, in listing order.
    pub dev_dependencies: Vec<String>,
    pub allowed_packages: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DevbranchReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub context: Context,
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    pub data: DevbranchData,
}
