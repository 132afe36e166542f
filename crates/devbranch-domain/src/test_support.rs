use crate::model::DependencyRecord;
use crate::policy::GatePolicy;
use serde_json::json;
use std::collections::BTreeSet;

pub fn record(name: &str, version: &str, is_direct: bool) -> DependencyRecord {
    DependencyRecord {
        name: name.to_string(),
        version: version.to_string(),
        is_direct,
    }
}

pub fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn allowed(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn policy(allow: &[&str], fail_on_commit: bool) -> GatePolicy {
    GatePolicy {
        allowed_packages: allowed(allow),
        fail_on_commit,
    }
}

/// Render entries the way `composer show --format=json` does.
pub fn listing_json(entries: &[(&str, &str, bool)]) -> String {
    let installed: Vec<_> = entries
        .iter()
        .map(|(name, version, direct)| {
            json!({
                "name": name,
                "direct-dependency": direct,
                "homepage": null,
                "source": format!("https://github.com/{name}"),
                "version": version,
                "description": "",
                "abandoned": false,
            })
        })
        .collect();
    json!({ "installed": installed }).to_string()
}
