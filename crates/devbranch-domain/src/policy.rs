use std::collections::BTreeSet;

/// The resolved knobs the engine needs. Built once per run by `devbranch-settings`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatePolicy {
    /// Exact package names exempt from the dev-branch rule.
    pub allowed_packages: BTreeSet<String>,
    /// In the commit hook, whether violations block the commit.
    pub fail_on_commit: bool,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            allowed_packages: BTreeSet::new(),
            fail_on_commit: true,
        }
    }
}

impl GatePolicy {
    pub fn is_allowed(&self, package: &str) -> bool {
        self.allowed_packages.contains(package)
    }
}
