use thiserror::Error;

/// Failures talking to the managed game backend.
///
/// Transport and decoding failures come from the HTTP layer, while `Rejected`
/// is reported by a call that succeeded in transport terms but whose payload
/// signals a business failure.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Network unreachable, connection reset, TLS failure, etc.
    #[error("Failed to send request to backend: {0}")]
    Transport(#[from] reqwest::Error),
    /// Backend answered with a non-success status code.
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    /// Response body did not match the expected shape.
    #[error("Failed to parse backend response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Backend reported a failure in its result payload.
    #[error("Backend rejected the request: {0}")]
    Rejected(String),
    /// The call did not complete within the allotted time.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),
}
