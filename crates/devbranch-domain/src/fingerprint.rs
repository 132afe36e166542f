use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a package finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - package name
pub fn fingerprint_for_package(check_id: &str, code: &str, package: &str) -> String {
    let canonical = [check_id, code, package].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
