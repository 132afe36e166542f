//! Turn the raw `composer show --format=json` output into dependency records.

use crate::model::{DependencyRecord, InstalledListing};
use thiserror::Error;

/// The listing was not the JSON document we expect.
///
/// Unreadable output is a hard failure: it is never treated as an empty dependency set.
#[derive(Debug, Error)]
#[error("invalid dependency listing: {source}")]
pub struct ParseError {
    #[from]
    source: serde_json::Error,
}

/// Parse the listing, keeping every record in output order.
///
/// Input is the tool's raw stdout. Bytes that are not valid UTF-8 are a parse error.
pub fn parse_listing(raw: impl AsRef<[u8]>) -> Result<Vec<DependencyRecord>, ParseError> {
    let listing: InstalledListing = serde_json::from_slice(raw.as_ref())?;
    tracing::debug!(records = listing.installed.len(), "parsed dependency listing");
    Ok(listing.installed)
}

/// Names of direct `dev-*` dependencies, in listing order. Duplicates are kept.
pub fn dev_dependency_names(records: &[DependencyRecord]) -> Vec<String> {
    records
        .iter()
        .filter(|r| r.is_development_dependency())
        .map(|r| r.name.clone())
        .collect()
}

/// Parse and classify in one step.
pub fn classify(raw: impl AsRef<[u8]>) -> Result<Vec<String>, ParseError> {
    let records = parse_listing(raw)?;
    Ok(dev_dependency_names(&records))
}
