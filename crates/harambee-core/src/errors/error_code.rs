//! Stable string codes for errors crossing the library boundary.

/// Maps an error to a stable code the UI can branch on.
pub trait HarambeeErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const STORE_ERROR: &str = "STORE_ERROR";
pub const STORE_BUSY: &str = "STORE_BUSY";
pub const SCHEMA_MISSING_COLUMN: &str = "SCHEMA_MISSING_COLUMN";
pub const SCHEMA_MISSING_RELATION: &str = "SCHEMA_MISSING_RELATION";
pub const REMOTE_ERROR: &str = "REMOTE_ERROR";
pub const INVALID_QUERY: &str = "INVALID_QUERY";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CONFIG_PARSE_ERROR: &str = "CONFIG_PARSE_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
pub const FIXTURE_ERROR: &str = "FIXTURE_ERROR";
pub const THROTTLE_WRITE_FAILED: &str = "THROTTLE_WRITE_FAILED";
