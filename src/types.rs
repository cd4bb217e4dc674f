//! Response envelope and the typed payloads the core flow needs.
//!
//! Every decrypted response shares this envelope:
//!
//! ```json
//! {
//!   "code": "100000",
//!   "tip": null,
//!   "data": { ...endpoint-specific fields... }
//! }
//! ```
//!
//! `code` is a *string*; `"100000"` means success and anything else is a
//! domain failure with a human-readable `tip`. Most endpoint methods return
//! the envelope with `data` as raw JSON — catalog payload shapes are the
//! service's business — but the payloads the client itself interprets
//! (registration, chapter info) get structs here.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{HbookerError, Result};

/// The service's string status code for success. Exact match, service magic.
pub const SUCCESS_CODE: &str = "100000";

/// Decrypted, JSON-decoded response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    /// Service status code, e.g. `"100000"`.
    pub code: String,
    /// Human-readable message, set on most failures.
    #[serde(default)]
    pub tip: Option<String>,
    /// Endpoint-specific payload.
    #[serde(default)]
    pub data: Value,
}

impl ApiResponse {
    /// Whether `code` is exactly [`SUCCESS_CODE`].
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// The `tip` message, or a placeholder when the service omitted it.
    pub fn message(&self) -> &str {
        self.tip.as_deref().unwrap_or("unknown error")
    }

    /// Convert a non-success envelope into its [`HbookerError::Api`] form.
    pub fn api_error(&self) -> HbookerError {
        HbookerError::Api {
            code: self.code.clone(),
            message: self.message().to_owned(),
        }
    }

    /// Return `data` if the envelope is successful, the API error otherwise.
    pub fn into_data(self) -> Result<Value> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(self.api_error())
        }
    }
}

/// Reader identity, nested in registration and profile payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct ReaderInfo {
    /// Account name issued by the service.
    #[serde(default)]
    pub account: String,
    /// Reader id, when present.
    #[serde(default)]
    pub reader_id: String,
}

/// Payload of a successful anonymous registration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationData {
    /// 32-character session token.
    #[serde(default)]
    pub login_token: String,
    pub reader_info: ReaderInfo,
}

/// Chapter detail payload (`data.chapter_info`).
///
/// `txt_content` arrives AES-encrypted under the chapter command;
/// [`chapter_content`](crate::HbookerClient::chapter_content) replaces it
/// with the decrypted text before returning.
#[derive(Debug, Clone, Deserialize)]
pub struct ChapterInfo {
    #[serde(default)]
    pub chapter_id: String,
    #[serde(default)]
    pub chapter_title: String,
    #[serde(default)]
    pub txt_content: String,
    #[serde(default)]
    pub author_say: String,
    /// Every other `chapter_info` field (word count, prices, timestamps, ...),
    /// passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_envelope() {
        let resp: ApiResponse =
            serde_json::from_str(r#"{"code":"100000","tip":null,"data":{"x":1}}"#).unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.data["x"], 1);
        assert_eq!(resp.message(), "unknown error");
    }

    #[test]
    fn parses_failure_envelope() {
        let resp: ApiResponse =
            serde_json::from_str(r#"{"code":"100002","tip":"启动参数错误"}"#).unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.message(), "启动参数错误");
        assert!(matches!(
            resp.api_error(),
            HbookerError::Api { code, .. } if code == "100002"
        ));
    }

    #[test]
    fn success_code_is_exact_match() {
        let resp: ApiResponse = serde_json::from_str(r#"{"code":"1000000"}"#).unwrap();
        assert!(!resp.is_success());
        let resp: ApiResponse = serde_json::from_str(r#"{"code":"100001"}"#).unwrap();
        assert!(!resp.is_success());
    }

    #[test]
    fn into_data_surfaces_api_error() {
        let resp: ApiResponse =
            serde_json::from_str(r#"{"code":"310001","tip":"登录超时"}"#).unwrap();
        assert!(matches!(
            resp.into_data(),
            Err(HbookerError::Api { code, message }) if code == "310001" && message == "登录超时"
        ));
    }

    #[test]
    fn chapter_info_keeps_unmodeled_fields() {
        let data = serde_json::json!({
            "chapter_id": "101",
            "chapter_title": "第一章",
            "txt_content": "binary...",
            "author_say": "",
            "word_count": "3021",
            "unit_hlb": "15"
        });
        let info: ChapterInfo = serde_json::from_value(data).unwrap();
        assert_eq!(info.chapter_id, "101");
        assert_eq!(info.extra["word_count"], "3021");
        assert_eq!(info.extra["unit_hlb"], "15");
        // Modeled fields are not duplicated into the passthrough map
        assert!(!info.extra.contains_key("chapter_title"));
    }

    #[test]
    fn parses_registration_payload() {
        let data = serde_json::json!({
            "login_token": "f".repeat(32),
            "reader_info": { "account": "书客9527", "reader_id": "8841" }
        });
        let reg: RegistrationData = serde_json::from_value(data).unwrap();
        assert_eq!(reg.login_token.len(), 32);
        assert_eq!(reg.reader_info.account, "书客9527");
    }
}
