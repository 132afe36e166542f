use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `devbranch.toml` schema v1.
///
/// Every key is optional; omitted keys take their defaults. Unknown keys are an error so typos
/// in a gate's configuration do not silently weaken it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DevbranchConfigV1 {
    /// Optional schema string for tooling (`devbranch.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Project manifest. Informational: the gate always queries the installed state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composer_file: Option<String>,

    /// Glob patterns of files whose change triggers the gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_by: Option<Vec<String>>,

    /// Package names allowed to stay on a `dev-*` version (exact match).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_packages: Option<Vec<String>>,

    /// Whether violations block the commit when run from the pre-commit hook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on_commit: Option<bool>,
}
