//! Processor constants
//!
//! Centralized location for header values, attribute keys and defaults.

/// Servers commonly answer 403 when no browser-like agent is sent
pub const USER_AGENT_VALUE: &str = "Mozilla/5.0";
pub const CONTENT_TYPE_VALUE: &str = "application/json; charset=UTF-8";
pub const ACCEPT_VALUE: &str = "application/json";

/// Response attributes attached to routed work items
pub const ATTR_STATUS_CODE: &str = "status.code";
pub const ATTR_STATUS_MESSAGE: &str = "status.message";
pub const ATTR_RESPONSE_BODY: &str = "response.body";
pub const ATTR_HOST_URL: &str = "host.url";
pub const ATTR_MIME_TYPE: &str = "mime.type";
pub const ATTR_ERROR_MESSAGE: &str = "error.message";

/// Separator used when joining multi-valued headers and flattened header lists
pub const RECORD_DELIMITER: &str = ",";

/// Default log file written by the binary
pub const LOG_FILE_NAME: &str = "json-post.log";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
