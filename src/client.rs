//! HTTP client for the Hbooker API.
//!
//! Every call is a `POST` with an `application/x-www-form-urlencoded` body:
//!
//! 1. Merge the endpoint's fields with the session's common parameters
//!    (account, login token, app version, device token) — explicit fields win
//!    on collision
//! 2. `POST {web_site}{endpoint}` with the resolved user-agent and the
//!    configured timeout
//! 3. Retry transient 5xx statuses (500/502/503/504) with exponential
//!    backoff, up to the configured budget; fail fast on any other non-2xx
//! 4. Base64 + AES-256-CBC decrypt the body with the shared platform key
//! 5. Parse the plaintext as a JSON [`ApiResponse`] envelope
//!
//! Decrypt and parse failures propagate as [`HbookerError::Decode`] /
//! [`HbookerError::Json`] — they mean the client and server have desynced
//! (wrong key, changed contract) and must never be swallowed.

use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::Client;

use crate::config::SessionConfig;
use crate::crypto;
use crate::error::{HbookerError, Result};
use crate::types::ApiResponse;

/// HTTP statuses treated as transient and retried.
const RETRY_STATUSES: [u16; 4] = [500, 502, 503, 504];

/// First retry delay; doubles on each subsequent retry.
const BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Blocking HTTP client for the Hbooker e-book platform API.
///
/// Holds a [`reqwest::blocking::Client`] (connections are kept alive across
/// calls) and the owning [`SessionConfig`]. Endpoint methods are implemented
/// in separate modules (`bookshelf`, `book`, `chapter`, `bookcity`, `reader`,
/// `auth`) as `impl HbookerClient` blocks.
#[derive(Debug)]
pub struct HbookerClient {
    http: Client,
    config: SessionConfig,
}

impl HbookerClient {
    /// Create an unauthenticated client with default configuration.
    ///
    /// Most callers want [`bootstrap`](Self::bootstrap), which also obtains
    /// and verifies a session.
    pub fn new() -> Result<Self> {
        Self::with_config(SessionConfig::default())
    }

    /// Create a client with an explicit [`SessionConfig`].
    pub fn with_config(config: SessionConfig) -> Result<Self> {
        // User-agent and timeout are applied per request so that config
        // changes after construction take effect.
        let http = Client::builder().build()?;
        Ok(Self { http, config })
    }

    /// The client's session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Mutable access for reconfiguration (token, host, timeout, retries).
    pub fn config_mut(&mut self) -> &mut SessionConfig {
        &mut self.config
    }

    /// Send a request to `endpoint` and return the decrypted envelope.
    ///
    /// `fields` are the endpoint-specific form fields; the session's common
    /// parameters are merged in without overriding them.
    ///
    /// # Errors
    ///
    /// - [`HbookerError::Http`] — network failure
    /// - [`HbookerError::Status`] — non-2xx status (after retries for
    ///   transient 5xx)
    /// - [`HbookerError::Base64`] / [`HbookerError::Decode`] /
    ///   [`HbookerError::Json`] — response could not be decrypted or parsed
    pub fn request(&self, endpoint: &str, fields: &[(&str, &str)]) -> Result<ApiResponse> {
        let form = build_form(&self.config, fields);
        let url = format!("{}{}", self.config.web_site(), endpoint);

        let (status, body) = with_retry(self.config.max_retry(), BACKOFF_BASE, || {
            debug!("POST {url}");
            let resp = self
                .http
                .post(&url)
                .header("User-Agent", self.config.user_agent())
                .header("Connection", "Keep-Alive")
                .timeout(self.config.timeout())
                .form(&form)
                .send()?;
            let status = resp.status().as_u16();
            Ok((status, resp.text()?))
        })?;

        if !(200..300).contains(&status) {
            return Err(HbookerError::Status { status });
        }

        let plaintext = crypto::decrypt(&body, crypto::DEFAULT_KEY)?;
        Ok(serde_json::from_str(&plaintext)?)
    }
}

/// Endpoint fields plus common parameters; explicit fields win on collision.
fn build_form(config: &SessionConfig, fields: &[(&str, &str)]) -> BTreeMap<String, String> {
    let mut form: BTreeMap<String, String> = fields
        .iter()
        .map(|&(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
    for (k, v) in config.common_params() {
        form.entry(k.to_owned()).or_insert(v);
    }
    form
}

/// Run `op` until it yields a non-transient status, retrying transient 5xx
/// statuses up to `max_retry` times with exponential backoff starting at
/// `base`. Exhausting the budget on a transient status is a
/// [`HbookerError::Status`].
fn with_retry<T>(
    max_retry: u32,
    base: Duration,
    mut op: impl FnMut() -> Result<(u16, T)>,
) -> Result<(u16, T)> {
    let mut delay = base;
    let mut attempt = 0;
    loop {
        let (status, body) = op()?;
        if !RETRY_STATUSES.contains(&status) {
            return Ok((status, body));
        }
        if attempt == max_retry {
            return Err(HbookerError::Status { status });
        }
        attempt += 1;
        warn!("transient HTTP {status}, retrying ({attempt}/{max_retry}) after {delay:?}");
        thread::sleep(delay);
        delay *= 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(statuses: &[u16]) -> impl FnMut() -> Result<(u16, String)> + '_ {
        let mut iter = statuses.iter();
        move || {
            let status = *iter.next().expect("script exhausted");
            Ok((status, format!("body-{status}")))
        }
    }

    #[test]
    fn retry_recovers_within_budget() {
        let (status, body) =
            with_retry(3, Duration::ZERO, scripted(&[503, 503, 503, 200])).unwrap();
        assert_eq!(status, 200);
        assert_eq!(body, "body-200");
    }

    #[test]
    fn retry_gives_up_after_budget() {
        let err = with_retry(3, Duration::ZERO, scripted(&[503, 503, 503, 503])).unwrap_err();
        assert!(matches!(err, HbookerError::Status { status: 503 }));
    }

    #[test]
    fn non_transient_status_is_not_retried() {
        let (status, _) = with_retry(5, Duration::ZERO, scripted(&[404])).unwrap();
        assert_eq!(status, 404);
    }

    #[test]
    fn all_transient_statuses_are_retried() {
        for s in [500, 502, 503, 504] {
            let (status, _) = with_retry(1, Duration::ZERO, scripted(&[s, 200])).unwrap();
            assert_eq!(status, 200);
        }
    }

    #[test]
    fn transport_errors_abort_immediately() {
        let mut calls = 0;
        let err = with_retry(5, Duration::ZERO, || {
            calls += 1;
            Err::<(u16, ()), _>(HbookerError::Decode("boom".into()))
        })
        .unwrap_err();
        assert!(matches!(err, HbookerError::Decode(_)));
        assert_eq!(calls, 1);
    }

    #[test]
    fn explicit_fields_win_over_common_params() {
        let mut config = SessionConfig::default();
        config.set_account("session-account");
        config.set_login_token(&"t".repeat(32)).unwrap();

        let form = build_form(&config, &[("account", "explicit"), ("book_id", "42")]);
        assert_eq!(form["account"], "explicit");
        assert_eq!(form["login_token"], "t".repeat(32));
        assert_eq!(form["book_id"], "42");
        assert_eq!(form["app_version"], "2.9.290");
        assert_eq!(form["device_token"], "ciweimao_");
    }

    #[test]
    fn anonymous_form_has_no_credentials() {
        let config = SessionConfig::default();
        let form = build_form(&config, &[("chapter_id", "7")]);
        assert!(!form.contains_key("account"));
        assert!(!form.contains_key("login_token"));
        assert_eq!(form.len(), 3);
    }
}
