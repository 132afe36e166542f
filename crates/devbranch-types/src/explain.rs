//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after examples.
    pub examples: ExamplePair,
}

/// Before and after examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Code-fence language of both snippets (`json`, `toml`, `console`).
    pub language: &'static str,
    /// Input that would trigger a finding.
    pub before: &'static str,
    /// Input that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_COMPOSER_DEV_BRANCH => Some(explain_dev_branch()),
        ids::CHECK_TOOL_RUNTIME => Some(explain_tool_runtime()),

        // Codes
        ids::CODE_DEV_DEPENDENCY_NOT_ALLOWED => Some(explain_dev_dependency_not_allowed()),
        ids::CODE_PROCESS_FAILED => Some(explain_process_failed()),
        ids::CODE_INVALID_OUTPUT => Some(explain_invalid_output()),
        ids::CODE_RUNTIME_ERROR => Some(explain_runtime_error()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[ids::CHECK_COMPOSER_DEV_BRANCH, ids::CHECK_TOOL_RUNTIME]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_DEV_DEPENDENCY_NOT_ALLOWED,
        ids::CODE_PROCESS_FAILED,
        ids::CODE_INVALID_OUTPUT,
        ids::CODE_RUNTIME_ERROR,
    ]
}

// --- Check-level explanations ---

fn explain_dev_branch() -> Explanation {
    Explanation {
        title: "No Development-Branch Dependencies",
        description: "\
Detects direct Composer dependencies installed at a development version (`dev-*`),
for example `dev-master` or `dev-feature/login`.

Development versions track a moving branch instead of a tagged release:
- The installed code changes whenever the branch moves
- Builds are not reproducible from the lock file alone
- Unreviewed upstream work can land in production unnoticed

Only direct dependencies are inspected. Packages pulled in transitively are out of
the project's hands and are never reported.",
        remediation: "\
Require a tagged release instead of a branch:
- Ask upstream to tag a release and require `^x.y`
- Fork and tag the fork if upstream cannot release

If a branch is genuinely needed, add the package to `allowed_packages` in
devbranch.toml. Matching is exact on the package name.",
        examples: ExamplePair {
            language: "json",
            before: r#"{
    "require": {
        "acme/http-client": "dev-master"
    }
}"#,
            after: r#"{
    "require": {
        "acme/http-client": "^2.4"
    }
}"#,
        },
    }
}

fn explain_tool_runtime() -> Explanation {
    Explanation {
        title: "Tool Runtime Failure",
        description: "\
The dependency listing could not be obtained, so the policy could not be evaluated.

Runtime failures are reported instead of being treated as a pass. A composer run
that fails inside the commit hook is non-blocking; in any other run it fails the
gate. Unreadable output always fails the gate.",
        remediation: "\
Run `composer show --format=json` in the project directory and fix the error it
reports (missing composer binary, missing vendor directory, broken lock file).",
        examples: ExamplePair {
            language: "console",
            before: r#"$ composer show --format=json
sh: composer: command not found"#,
            after: r#"$ composer show --format=json
{"installed": [...]}"#,
        },
    }
}

// --- Code-level explanations ---

fn explain_dev_dependency_not_allowed() -> Explanation {
    Explanation {
        title: "Development Dependency Not Allowed",
        description: "\
A direct dependency is installed at a `dev-*` version and is not listed in
`allowed_packages`.",
        remediation: "\
Pin the dependency to a tagged release, or add its exact package name to
`allowed_packages`.",
        examples: ExamplePair {
            language: "toml",
            before: r#"allowed_packages = []"#,
            after: r#"allowed_packages = ["acme/http-client"]"#,
        },
    }
}

fn explain_process_failed() -> Explanation {
    Explanation {
        title: "Dependency Listing Failed",
        description: "\
`composer show` could not be started or exited with a non-zero status. The report
carries the command's own output.",
        remediation: "\
Make sure composer is on PATH (or pass `--composer`), and that `composer install`
has been run for the project.",
        examples: ExamplePair {
            language: "console",
            before: r#"$ devbranch check --composer /missing/composer"#,
            after: r#"$ devbranch check --composer vendor/bin/composer"#,
        },
    }
}

fn explain_invalid_output() -> Explanation {
    Explanation {
        title: "Invalid Dependency Listing",
        description: "\
`composer show --format=json` succeeded but its output was not the expected JSON
document (an object with an `installed` list of name/version/direct-dependency
entries). The gate fails closed: unreadable output is never treated as \"no
dependencies\".",
        remediation: "\
Check for plugins or scripts writing to stdout, and upgrade composer to 2.x.",
        examples: ExamplePair {
            language: "console",
            before: r#"Deprecation notice: ...
{"installed": []}"#,
            after: r#"{"installed": []}"#,
        },
    }
}

fn explain_runtime_error() -> Explanation {
    Explanation {
        title: "Runtime Error",
        description: "\
devbranch itself failed before the policy could be evaluated, for example because
devbranch.toml is invalid or the report could not be written.",
        remediation: "\
Read the error printed on stderr. Configuration errors name the offending key.",
        examples: ExamplePair {
            language: "toml",
            before: r#"allowed_package = ["acme/http-client"]"#,
            after: r#"allowed_packages = ["acme/http-client"]"#,
        },
    }
}
