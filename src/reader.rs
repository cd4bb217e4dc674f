//! Reader account APIs: profile, props, check-in, client version.
//!
//! # Endpoints
//!
//! ## `user_info` — `POST /reader/get_my_info`
//!
//! No extra fields; identified by the session's common parameters.
//! `data.reader_info` carries account, nickname, and balance fields. Doubles
//! as the session probe used by
//! [`verify_session`](crate::HbookerClient::verify_session).
//!
//! ## Check-in
//!
//! `check_in_records` lists the month's sign-in state; `check_in` performs
//! today's sign-in (`task_type=1`). Repeating a day's check-in returns a
//! non-success code with a `tip`, not an HTTP error.

use crate::client::HbookerClient;
use crate::error::Result;
use crate::types::ApiResponse;

const GET_MY_INFO: &str = "/reader/get_my_info";
const GET_PROP_INFO: &str = "/reader/get_prop_info";
const GET_SIGN_RECORD: &str = "/signup/get_sign_record";
const DO_SIGN_TASK: &str = "/signup/do_sign_task";
const GET_VERSION: &str = "/setting/get_version";

impl HbookerClient {
    /// Get the current reader's profile.
    pub fn user_info(&self) -> Result<ApiResponse> {
        self.request(GET_MY_INFO, &[])
    }

    /// Get the reader's props and point balances.
    pub fn prop_info(&self) -> Result<ApiResponse> {
        self.request(GET_PROP_INFO, &[])
    }

    /// Get the reader's check-in records.
    pub fn check_in_records(&self) -> Result<ApiResponse> {
        self.request(GET_SIGN_RECORD, &[])
    }

    /// Perform today's check-in.
    pub fn check_in(&self) -> Result<ApiResponse> {
        self.request(DO_SIGN_TASK, &[("task_type", "1")])
    }

    /// Get the latest client version advertised by the service.
    pub fn version(&self) -> Result<ApiResponse> {
        self.request(GET_VERSION, &[])
    }
}
