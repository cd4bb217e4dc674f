//! Session configuration — identity and transport settings shared by every
//! request a client sends.
//!
//! One [`SessionConfig`] belongs to one [`HbookerClient`](crate::HbookerClient);
//! it is written by the bootstrap flow (account + login token after
//! registration or login) and read on every outbound request. Clients must
//! not share a config instance unless they intentionally pool one session.

use std::sync::OnceLock;
use std::time::Duration;

use crate::error::{HbookerError, Result};

/// Default API host.
pub const WEB_SITE: &str = "https://app.hbooker.com";

const DEFAULT_APP_VERSION: &str = "2.9.290";
const DEFAULT_DEVICE_TOKEN: &str = "ciweimao_";
const DEFAULT_USER_AGENT: &str = "Android com.kuangxiang.novel {app_version}";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
const DEFAULT_MAX_RETRY: u32 = 10;

/// Length the service issues login tokens at; anything else is malformed.
const LOGIN_TOKEN_LEN: usize = 32;

/// Per-client identity and transport settings.
#[derive(Debug)]
pub struct SessionConfig {
    account: String,
    login_token: String,
    app_version: String,
    device_token: String,
    web_site: String,
    timeout: Duration,
    max_retry: u32,
    user_agent: String,
    resolved_user_agent: OnceLock<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            account: String::new(),
            login_token: String::new(),
            app_version: DEFAULT_APP_VERSION.to_owned(),
            device_token: DEFAULT_DEVICE_TOKEN.to_owned(),
            web_site: WEB_SITE.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            max_retry: DEFAULT_MAX_RETRY,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            resolved_user_agent: OnceLock::new(),
        }
    }
}

impl SessionConfig {
    pub fn set_account(&mut self, account: impl Into<String>) {
        self.account = account.into();
    }

    /// Set the session login token.
    ///
    /// The service issues tokens of exactly 32 characters; any other length
    /// is rejected with [`HbookerError::InvalidToken`] rather than sent to
    /// the server.
    pub fn set_login_token(&mut self, login_token: &str) -> Result<()> {
        if login_token.len() != LOGIN_TOKEN_LEN {
            return Err(HbookerError::InvalidToken {
                len: login_token.len(),
            });
        }
        self.login_token = login_token.to_owned();
        Ok(())
    }

    pub fn set_app_version(&mut self, app_version: impl Into<String>) {
        self.app_version = app_version.into();
        self.resolved_user_agent = OnceLock::new();
    }

    pub fn set_device_token(&mut self, device_token: impl Into<String>) {
        self.device_token = device_token.into();
    }

    pub fn set_web_site(&mut self, web_site: impl Into<String>) {
        self.web_site = web_site.into();
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn set_max_retry(&mut self, max_retry: u32) {
        self.max_retry = max_retry;
    }

    /// Replace the user-agent template. `{app_version}` in the template is
    /// substituted on first use.
    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = user_agent.into();
        self.resolved_user_agent = OnceLock::new();
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn login_token(&self) -> &str {
        &self.login_token
    }

    pub fn web_site(&self) -> &str {
        &self.web_site
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_retry(&self) -> u32 {
        self.max_retry
    }

    /// Identity fields merged into every request body.
    ///
    /// Always carries `app_version` and `device_token`; carries `account` and
    /// `login_token` only when both are set, so a half-authenticated request
    /// never reaches the server.
    pub fn common_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("app_version", self.app_version.clone()),
            ("device_token", self.device_token.clone()),
        ];
        if self.is_authenticated() {
            params.push(("account", self.account.clone()));
            params.push(("login_token", self.login_token.clone()));
        }
        params
    }

    /// Whether both account and login token are present.
    pub fn is_authenticated(&self) -> bool {
        !self.account.is_empty() && !self.login_token.is_empty()
    }

    /// The user-agent string with `{app_version}` substituted, computed once
    /// per template/version change.
    pub fn user_agent(&self) -> &str {
        self.resolved_user_agent
            .get_or_init(|| self.user_agent.replace("{app_version}", &self.app_version))
    }
}
