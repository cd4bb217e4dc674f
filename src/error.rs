//! Error types for the Hbooker API client.

use thiserror::Error;

/// Errors that can occur when interacting with the Hbooker API.
#[derive(Debug, Error)]
pub enum HbookerError {
    /// HTTP transport error (connection refused, timeout, TLS failure, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx HTTP status, either immediately (4xx) or after the transient
    /// 5xx retry budget was exhausted.
    #[error("HTTP status {status}")]
    Status {
        /// The final HTTP status code.
        status: u16,
    },

    /// The API returned a non-success `code` in its response envelope where
    /// the operation requires success (session probe, chapter fetch).
    ///
    /// `code` is the service's string status, e.g. `"100000"` for success.
    #[error("API error (code {code}): {message}")]
    Api {
        /// Hbooker API status code (not HTTP status).
        code: String,
        /// Human-readable `tip` message from the API.
        message: String,
    },

    /// Failed to base64-decode a response body.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decryption or payload decoding failed: bad ciphertext length, invalid
    /// PKCS7 padding, non-UTF-8 plaintext, or a malformed payload shape.
    /// Indicates a protocol desync (wrong key or server contract change).
    #[error("decode error: {0}")]
    Decode(String),

    /// Failed to parse the decrypted response as JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A login token that is not exactly 32 characters.
    #[error("login_token must be 32 characters, got {len}")]
    InvalidToken {
        /// Length of the rejected token.
        len: usize,
    },

    /// Auto-registration or session verification failed during bootstrap.
    #[error("authentication failed: {0}")]
    Auth(String),
}

/// Convenience alias for `Result<T, HbookerError>`.
pub type Result<T> = std::result::Result<T, HbookerError>;
