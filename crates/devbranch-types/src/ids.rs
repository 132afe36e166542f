//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_COMPOSER_DEV_BRANCH: &str = "composer.dev_branch";

// Codes: composer.dev_branch
pub const CODE_DEV_DEPENDENCY_NOT_ALLOWED: &str = "dev_dependency_not_allowed";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_PROCESS_FAILED: &str = "process_failed";
pub const CODE_INVALID_OUTPUT: &str = "invalid_output";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
