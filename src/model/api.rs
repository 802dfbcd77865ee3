use serde::{Deserialize, Serialize};

/// Error body returned by the backend when a request is rejected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDto {
    /// Human readable error message
    pub message: String,
    /// Backend specific error code, e.g. a PostgreSQL SQLSTATE
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}
