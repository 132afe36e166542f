use crate::defaults::{self, DEFAULT_COMPOSER_FILE, DEFAULT_FAIL_ON_COMMIT, SCHEMA_CONFIG_V1};
use crate::model::DevbranchConfigV1;
use anyhow::Context;
use devbranch_domain::policy::GatePolicy;
use devbranch_types::RepoPath;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;

/// Command-line overrides applied on top of the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    /// Extra allowed packages; merged with the file's list.
    pub allowed_packages: Vec<String>,
    pub fail_on_commit: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub composer_file: String,
    pub triggered_by: Vec<String>,
    pub policy: GatePolicy,
    triggers: GlobSet,
}

impl ResolvedConfig {
    /// Whether any changed path matches `triggered_by`.
    ///
    /// A pattern matches either the full repo-relative path or its file name, so
    /// `composer.lock` also covers `app/composer.lock`.
    pub fn is_triggered_by(&self, changed_files: &[RepoPath]) -> bool {
        changed_files.iter().any(|path| {
            self.triggers.is_match(path.as_str())
                || path
                    .file_name()
                    .map(|name| self.triggers.is_match(name))
                    .unwrap_or(false)
        })
    }
}

pub fn resolve_config(
    cfg: DevbranchConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let composer_file = cfg
        .composer_file
        .unwrap_or_else(|| DEFAULT_COMPOSER_FILE.to_string());

    let triggered_by = cfg.triggered_by.unwrap_or_else(defaults::triggered_by);
    let triggers = build_triggers(&triggered_by)?;

    let mut allowed_packages = BTreeSet::new();
    for package in cfg
        .allowed_packages
        .unwrap_or_default()
        .into_iter()
        .chain(overrides.allowed_packages)
    {
        validate_package_name(&package)?;
        allowed_packages.insert(package);
    }

    let fail_on_commit = overrides
        .fail_on_commit
        .or(cfg.fail_on_commit)
        .unwrap_or(DEFAULT_FAIL_ON_COMMIT);

    Ok(ResolvedConfig {
        composer_file,
        triggered_by,
        policy: GatePolicy {
            allowed_packages,
            fail_on_commit,
        },
        triggers,
    })
}

fn build_triggers(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .with_context(|| format!("invalid triggered_by glob: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().context("build triggered_by globs")
}

fn validate_package_name(name: &str) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("allowed_packages entries must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;

    fn resolve_text(text: &str) -> anyhow::Result<ResolvedConfig> {
        resolve_config(parse_config_toml(text)?, Overrides::default())
    }

    #[test]
    fn empty_config_uses_defaults() {
        let resolved = resolve_text("").expect("resolve");
        assert_eq!(resolved.composer_file, "composer.json");
        assert_eq!(
            resolved.triggered_by,
            vec!["composer.json", "composer.lock", "*.php"]
        );
        assert!(resolved.policy.allowed_packages.is_empty());
        assert!(resolved.policy.fail_on_commit);
    }

    #[test]
    fn file_values_override_defaults() {
        let resolved = resolve_text(
            r#"
schema = "devbranch.config.v1"
composer_file = "app/composer.json"
triggered_by = ["composer.lock"]
allowed_packages = ["allowed/dev-package", "allowed/dev-package", "other/pkg"]
fail_on_commit = false
"#,
        )
        .expect("resolve");
        assert_eq!(resolved.composer_file, "app/composer.json");
        assert_eq!(resolved.triggered_by, vec!["composer.lock"]);
        assert_eq!(
            resolved.policy.allowed_packages.iter().collect::<Vec<_>>(),
            vec!["allowed/dev-package", "other/pkg"]
        );
        assert!(!resolved.policy.fail_on_commit);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config_toml("allowed_package = []").expect_err("typo must fail");
        assert!(err.to_string().contains("allowed_package"));
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(parse_config_toml("fail_on_commit = \"no\"").is_err());
        assert!(parse_config_toml("allowed_packages = \"a/b\"").is_err());
        assert!(parse_config_toml("triggered_by = [1, 2]").is_err());
        assert!(parse_config_toml("composer_file = 3").is_err());
    }

    #[test]
    fn unsupported_schema_is_rejected() {
        let err = resolve_text("schema = \"devbranch.config.v9\"").expect_err("schema");
        assert!(err.to_string().contains("unsupported config schema"));
    }

    #[test]
    fn invalid_trigger_glob_is_rejected() {
        let err = resolve_text("triggered_by = [\"src/[\"]").expect_err("bad glob");
        assert!(format!("{err:#}").contains("invalid triggered_by glob"));
    }

    #[test]
    fn empty_allowed_package_is_rejected() {
        assert!(resolve_text("allowed_packages = [\"\"]").is_err());
        assert!(resolve_text("allowed_packages = [\"  \"]").is_err());
    }

    #[test]
    fn allowed_packages_are_kept_verbatim() {
        let resolved = resolve_text("allowed_packages = [\" a/b\"]").expect("resolve");
        assert!(resolved.policy.is_allowed(" a/b"));
        assert!(!resolved.policy.is_allowed("a/b"));
    }

    #[test]
    fn overrides_extend_allow_list_and_win_on_flag() {
        let cfg = parse_config_toml("allowed_packages = [\"a/a\"]\nfail_on_commit = true")
            .expect("parse");
        let resolved = resolve_config(
            cfg,
            Overrides {
                allowed_packages: vec!["b/b".to_string()],
                fail_on_commit: Some(false),
            },
        )
        .expect("resolve");
        assert!(resolved.policy.is_allowed("a/a"));
        assert!(resolved.policy.is_allowed("b/b"));
        assert!(!resolved.policy.fail_on_commit);
    }

    #[test]
    fn triggers_match_path_or_file_name() {
        let resolved = resolve_text("").expect("resolve");
        assert!(resolved.is_triggered_by(&[RepoPath::new("composer.lock")]));
        assert!(resolved.is_triggered_by(&[RepoPath::new("app/composer.json")]));
        assert!(resolved.is_triggered_by(&[RepoPath::new("src/Kernel.php")]));
        assert!(!resolved.is_triggered_by(&[RepoPath::new("README.md")]));
        assert!(!resolved.is_triggered_by(&[]));
    }
}
