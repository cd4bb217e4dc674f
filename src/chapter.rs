//! Chapter APIs, including the two-phase content fetch.
//!
//! Chapter text is double-protected: the outer envelope uses the shared
//! platform key like every other response, but `txt_content` inside it is
//! encrypted again under a per-chapter *command* string. Fetching readable
//! text is therefore a two-call protocol:
//!
//! 1. `POST /chapter/get_chapter_command` with `chapter_id` →
//!    `data.command`, an opaque string valid for this chapter only
//! 2. `POST /chapter/get_cpt_ifm` with `chapter_id` + `chapter_command` →
//!    `data.chapter_info`, whose `txt_content` decrypts under the command
//!
//! Commands are fetched fresh per chapter and never cached; one command is
//! both the phase-2 request field and the AES key material.

use serde_json::Value;

use crate::client::HbookerClient;
use crate::crypto;
use crate::error::{HbookerError, Result};
use crate::types::{ApiResponse, ChapterInfo};

const GET_CHAPTER_COMMAND: &str = "/chapter/get_chapter_command";
const GET_CPT_IFM: &str = "/chapter/get_cpt_ifm";
const CHAPTER_BUY: &str = "/chapter/buy";
const GET_UPDATED_CHAPTER_BY_DIVISION: &str = "/chapter/get_updated_chapter_by_division_new";
const GET_CHAPTER_UPDATE: &str = "/chapter/get_updated_chapter_by_division_id";

impl HbookerClient {
    /// Fetch the decryption command for a chapter (phase 1).
    pub fn chapter_command(&self, chapter_id: &str) -> Result<ApiResponse> {
        self.request(GET_CHAPTER_COMMAND, &[("chapter_id", chapter_id)])
    }

    /// Fetch the raw chapter detail (phase 2); `txt_content` stays encrypted.
    pub fn chapter_detail(&self, chapter_id: &str, chapter_command: &str) -> Result<ApiResponse> {
        self.request(
            GET_CPT_IFM,
            &[
                ("chapter_id", chapter_id),
                ("chapter_command", chapter_command),
            ],
        )
    }

    /// Fetch a chapter and return it with `txt_content` decrypted.
    ///
    /// Runs the full two-phase protocol: fetch the chapter command, fetch the
    /// detail with it, then decrypt the text using the command as key
    /// material. Independent per chapter; nothing is cached across calls.
    ///
    /// # Errors
    ///
    /// - [`HbookerError::Api`] — either phase returned a non-success code
    ///   (e.g. chapter not purchased); carries the server's `tip`
    /// - [`HbookerError::Decode`] — the command or chapter payload is
    ///   malformed, or the text fails to decrypt
    pub fn chapter_content(&self, chapter_id: &str) -> Result<ChapterInfo> {
        let resp = self.chapter_command(chapter_id)?;
        let command = extract_command(&resp)?;

        let resp = self.chapter_detail(chapter_id, &command)?;
        if !resp.is_success() {
            return Err(resp.api_error());
        }
        decrypt_chapter_info(&resp.data, &command)
    }

    /// Fetch purchase info for a chapter.
    pub fn buy_chapter(&self, chapter_id: &str) -> Result<ApiResponse> {
        self.request(CHAPTER_BUY, &[("chapter_id", chapter_id)])
    }

    /// List updated chapters for a book, grouped by division.
    pub fn updated_chapter_by_division(&self, book_id: &str) -> Result<ApiResponse> {
        self.request(GET_UPDATED_CHAPTER_BY_DIVISION, &[("book_id", book_id)])
    }

    /// List chapters updated in a division since `last_update_time`
    /// (Unix seconds as a string; `"0"` for everything).
    pub fn chapter_update(&self, division_id: &str, last_update_time: &str) -> Result<ApiResponse> {
        self.request(
            GET_CHAPTER_UPDATE,
            &[
                ("division_id", division_id),
                ("last_update_time", last_update_time),
            ],
        )
    }
}

/// Pull the opaque command string out of a phase-1 envelope.
fn extract_command(resp: &ApiResponse) -> Result<String> {
    if !resp.is_success() {
        return Err(resp.api_error());
    }
    resp.data["command"]
        .as_str()
        .filter(|c| !c.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| HbookerError::Decode("chapter command missing from response".into()))
}

/// Parse `data.chapter_info` and decrypt its text under `command`.
fn decrypt_chapter_info(data: &Value, command: &str) -> Result<ChapterInfo> {
    let info = data
        .get("chapter_info")
        .cloned()
        .ok_or_else(|| HbookerError::Decode("chapter_info missing from response".into()))?;
    let mut info: ChapterInfo = serde_json::from_value(info)
        .map_err(|e| HbookerError::Decode(format!("malformed chapter_info: {e}")))?;
    info.txt_content = crypto::decrypt(&info.txt_content, command)?;
    Ok(info)
}
