use devbranch_types::{Finding, Verdict};

/// Counts taken from the dependency listing. All zero when the listing was unavailable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingSummary {
    pub dependencies_scanned: u32,
    pub direct_dependencies: u32,
    /// Direct `dev-*` dependencies in listing order, allowed or not.
    pub dev_dependencies: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    pub summary: ListingSummary,
}
