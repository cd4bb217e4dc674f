//! Login, anonymous registration, and session bootstrap.
//!
//! # Endpoints
//!
//! ## `login` — `POST /signup/login`
//!
//! Fields: `login_name`, `passwd`. On success the payload carries a fresh
//! `login_token` and `reader_info`; committing them to the session is the
//! caller's decision (fetching credentials and adopting them are separate
//! steps).
//!
//! ## `auto_register` — `POST /signup/auto_reg_v2`
//!
//! Registers an anonymous guest device. Fields: a fresh `uuid` (platform tag
//! + pseudo-UUID), fixed `gender`/`channel` defaults, and empty `oauth_*`
//! markers. The success payload has the same shape as `login`.

use log::{info, warn};

use crate::client::HbookerClient;
use crate::crypto;
use crate::error::{HbookerError, Result};
use crate::types::{ApiResponse, RegistrationData};

const SIGNUP_LOGIN: &str = "/signup/login";
const SIGNUP_AUTO_REG: &str = "/signup/auto_reg_v2";

// Registration defaults expected by the service.
const DEVICE_PLATFORM: &str = "android";
const DEFAULT_GENDER: &str = "1";
const DEFAULT_CHANNEL: &str = "PCdownloadC";

impl HbookerClient {
    /// Create a ready, verified client.
    ///
    /// With both `account` and `login_token` supplied, they are validated and
    /// adopted directly. With either missing, an anonymous guest account is
    /// registered and its credentials adopted instead. Either way the
    /// resulting session is confirmed with a profile probe before the client
    /// is handed out.
    ///
    /// # Errors
    ///
    /// - [`HbookerError::Auth`] — registration failed, its payload was
    ///   malformed, or the server rejected the session probe
    /// - [`HbookerError::InvalidToken`] — the token (supplied or issued) is
    ///   not 32 characters
    pub fn bootstrap(account: Option<&str>, login_token: Option<&str>) -> Result<Self> {
        let client = Self::new()?;

        let (account, login_token) = match (account, login_token) {
            (Some(a), Some(t)) if !a.is_empty() && !t.is_empty() => (a.to_owned(), t.to_owned()),
            _ => extract_registration(client.auto_register()?)?,
        };

        commit_and_verify(client, account, &login_token, Self::verify_session)
    }

    /// Log in with account credentials.
    ///
    /// Returns the raw envelope; does **not** mutate the session config.
    /// Extract `data.login_token` / `data.reader_info.account` and commit
    /// them via [`config_mut`](Self::config_mut) to adopt the session.
    pub fn login(&self, login_name: &str, passwd: &str) -> Result<ApiResponse> {
        self.request(
            SIGNUP_LOGIN,
            &[("login_name", login_name), ("passwd", passwd)],
        )
    }

    /// Register an anonymous guest account for a freshly generated device id.
    pub fn auto_register(&self) -> Result<ApiResponse> {
        let uuid = registration_uuid();
        self.request(
            SIGNUP_AUTO_REG,
            &[
                ("uuid", &uuid),
                ("gender", DEFAULT_GENDER),
                ("channel", DEFAULT_CHANNEL),
                ("oauth_type", ""),
                ("oauth_union_id", ""),
                ("oauth_open_id", ""),
            ],
        )
    }

    /// Probe the session by fetching the user profile.
    ///
    /// Returns `false` without a network call when no full credentials are
    /// configured. Only a success-coded profile response counts as verified.
    pub fn verify_session(&self) -> Result<bool> {
        if !self.config().is_authenticated() {
            return Ok(false);
        }
        let resp = self.user_info()?;
        if resp.is_success() {
            info!("account {} verified", self.config().account());
            Ok(true)
        } else {
            warn!("session rejected: {}", resp.message());
            Ok(false)
        }
    }
}

/// Device identifier sent with anonymous registration.
fn registration_uuid() -> String {
    format!("{DEVICE_PLATFORM}{}", crypto::generate_uuid())
}

/// Commit credentials into the client's session, then require a successful
/// probe before handing the client out. Token validation happens before the
/// probe, so a malformed token never reaches the server.
fn commit_and_verify(
    mut client: HbookerClient,
    account: String,
    login_token: &str,
    verify: impl FnOnce(&HbookerClient) -> Result<bool>,
) -> Result<HbookerClient> {
    client.config_mut().set_account(account);
    client.config_mut().set_login_token(login_token)?;
    if !verify(&client)? {
        return Err(HbookerError::Auth(
            "account or login_token rejected by the server".into(),
        ));
    }
    Ok(client)
}

/// Pull `(account, login_token)` out of a registration envelope.
fn extract_registration(resp: ApiResponse) -> Result<(String, String)> {
    if !resp.is_success() {
        return Err(HbookerError::Auth(format!(
            "auto-registration failed: {}",
            resp.message()
        )));
    }
    let reg: RegistrationData = serde_json::from_value(resp.data)
        .map_err(|e| HbookerError::Auth(format!("malformed registration payload: {e}")))?;
    Ok((reg.reader_info.account, reg.login_token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_uuid_is_platform_tagged() {
        let uuid = registration_uuid();
        let hex = uuid.strip_prefix("android").unwrap();
        assert_eq!(hex.split('-').map(str::len).collect::<Vec<_>>(), [8, 4, 4, 4, 12]);
    }

    #[test]
    fn extracts_fresh_credentials_from_registration() {
        // Shape returned by /signup/auto_reg_v2 on success
        let resp: ApiResponse = serde_json::from_str(&format!(
            r#"{{"code":"100000","data":{{"login_token":"{}","reader_info":{{"account":"书客1","reader_id":"77"}}}}}}"#,
            "e".repeat(32)
        ))
        .unwrap();
        let (account, token) = extract_registration(resp).unwrap();
        assert_eq!(account, "书客1");
        assert_eq!(token, "e".repeat(32));
    }

    #[test]
    fn registration_failure_is_an_auth_error() {
        let resp: ApiResponse =
            serde_json::from_str(r#"{"code":"100010","tip":"注册过于频繁"}"#).unwrap();
        assert!(matches!(
            extract_registration(resp),
            Err(HbookerError::Auth(msg)) if msg.contains("注册过于频繁")
        ));
    }

    #[test]
    fn malformed_registration_payload_is_an_auth_error() {
        let resp: ApiResponse =
            serde_json::from_str(r#"{"code":"100000","data":{"login_token":"x"}}"#).unwrap();
        assert!(matches!(
            extract_registration(resp),
            Err(HbookerError::Auth(_))
        ));
    }

    #[test]
    fn bootstrap_commits_credentials_before_probing() {
        let client = HbookerClient::new().unwrap();
        let client = commit_and_verify(client, "u1".into(), &"t".repeat(32), |c| {
            // The probe must see the committed session
            assert!(c.config().is_authenticated());
            Ok(true)
        })
        .unwrap();
        assert_eq!(client.config().account(), "u1");
        assert_eq!(client.config().login_token(), "t".repeat(32));
    }

    #[test]
    fn bootstrap_fails_when_probe_rejects() {
        let client = HbookerClient::new().unwrap();
        let err =
            commit_and_verify(client, "u1".into(), &"t".repeat(32), |_| Ok(false)).unwrap_err();
        assert!(matches!(err, HbookerError::Auth(_)));
    }

    #[test]
    fn bad_token_fails_before_the_probe_runs() {
        let client = HbookerClient::new().unwrap();
        let mut probed = false;
        let err = commit_and_verify(client, "u1".into(), "short", |_| {
            probed = true;
            Ok(true)
        })
        .unwrap_err();
        assert!(matches!(err, HbookerError::InvalidToken { len: 5 }));
        assert!(!probed);
    }
}
