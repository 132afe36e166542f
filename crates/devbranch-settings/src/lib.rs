//! Config parsing and default/override resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod defaults;
mod model;
mod resolve;

pub use defaults::{DEFAULT_COMPOSER_FILE, DEFAULT_TRIGGERED_BY, SCHEMA_CONFIG_V1};
pub use model::DevbranchConfigV1;
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `devbranch.toml` into a typed model. Unknown keys and wrong types are rejected.
pub fn parse_config_toml(input: &str) -> anyhow::Result<DevbranchConfigV1> {
    let cfg: DevbranchConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config (defaults + file + CLI overrides).
pub fn resolve_config(
    cfg: DevbranchConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

/// JSON schema for `devbranch.toml`, for editor tooling.
pub fn config_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(DevbranchConfigV1);
    serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
}
