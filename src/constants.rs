//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and API paths so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "userdesk";

/// Crate version, as reported by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local config filename (e.g. `.userdesk.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".userdesk.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "userdesk";

/// Base URL used when neither config nor environment provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Collection path of the user resource on the remote API.
pub const USERS_PATH: &str = "/api/users";

/// Sub-resource used to toggle the blocked flag.
pub const BLOCK_SUBRESOURCE: &str = "block";

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Message shown when a failed call carries no server-provided reason.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_BASE_URL: &str = "USERDESK_BASE_URL";
pub const ENV_TOKEN: &str = "USERDESK_TOKEN";
pub const ENV_TIMEOUT: &str = "USERDESK_TIMEOUT";
pub const ENV_FORMAT: &str = "USERDESK_FORMAT";
pub const ENV_LOG: &str = "USERDESK_LOG";
