/// Optional `schema` value accepted in `devbranch.toml`.
pub const SCHEMA_CONFIG_V1: &str = "devbranch.config.v1";

pub const DEFAULT_COMPOSER_FILE: &str = "composer.json";

/// Files whose change should re-run the gate.
pub const DEFAULT_TRIGGERED_BY: &[&str] = &["composer.json", "composer.lock", "*.php"];

pub const DEFAULT_FAIL_ON_COMMIT: bool = true;

pub fn triggered_by() -> Vec<String> {
    DEFAULT_TRIGGERED_BY.iter().map(|s| s.to_string()).collect()
}
