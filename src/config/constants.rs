// Project-wide constants
//
// Centralised here so endpoints and other magic values have one source of
// truth. Import via `use crate::config::constants::*;`.

/// Gemini REST API root (v1beta is where generateContent lives).
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for rewrites unless config.toml overrides it.
pub const DEFAULT_REWRITE_MODEL: &str = "gemini-3-flash-preview";

/// Directory under $HOME holding config.toml and, by default, the data files.
pub const APP_DIR_NAME: &str = ".edulog";

/// Environment variables checked, in order, for the Gemini credential.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Overrides the data directory (handy for tests and multiple classrooms).
pub const DATA_DIR_ENV_VAR: &str = "EDULOG_DATA_DIR";
