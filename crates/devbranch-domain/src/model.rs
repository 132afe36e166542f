use serde::Deserialize;

/// Version prefix Composer uses for branch-tracking versions (`dev-master`, `dev-feature/x`).
pub const DEV_VERSION_PREFIX: &str = "dev-";

/// Top-level shape of `composer show --format=json`.
#[derive(Clone, Debug, Deserialize)]
pub struct InstalledListing {
    pub installed: Vec<DependencyRecord>,
}

/// One entry of the `installed` list. Fields other than these three are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DependencyRecord {
    pub name: String,
    pub version: String,
    #[serde(rename = "direct-dependency")]
    pub is_direct: bool,
}

impl DependencyRecord {
    pub fn is_dev_version(&self) -> bool {
        self.version.starts_with(DEV_VERSION_PREFIX)
    }

    /// A direct dependency pinned to a development branch.
    ///
    /// Transitive packages never qualify, whatever their version.
    pub fn is_development_dependency(&self) -> bool {
        self.is_direct && self.is_dev_version()
    }
}
