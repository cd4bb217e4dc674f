//! Book detail, division, review, and fan-funding APIs.
//!
//! # Endpoints
//!
//! ## `book_info` — `POST /book/get_info_by_id`
//!
//! Fields: `book_id` plus empty placement markers (`recommend`,
//! `carousel_position`, `tab_type`, `module_id`) the service expects to be
//! present even when unused. `data.book_info` carries title, author, status,
//! word count.
//!
//! ## `division_list` — `POST /book/get_division_list`
//!
//! Fields: `book_id`. `data.division_list` is the book's volume structure.
//!
//! ## Reviews
//!
//! `review_list` → `review_comment_list` → `comment_reply_list` walk the
//! discussion tree one level at a time, each paged with `page`/`count`.

use crate::client::HbookerClient;
use crate::error::Result;
use crate::types::ApiResponse;

const GET_INFO_BY_ID: &str = "/book/get_info_by_id";
const GET_DIVISION_LIST: &str = "/book/get_division_list";
const GET_REVIEW_LIST: &str = "/book/get_review_list";
const GET_REVIEW_COMMENT_LIST: &str = "/book/get_review_comment_list";
const GET_REVIEW_COMMENT_REPLY_LIST: &str = "/book/get_review_comment_reply_list";
const GET_MONEY_FANS_LIST: &str = "/book/get_money_fans_list";

impl HbookerClient {
    /// Get book metadata by id.
    pub fn book_info(&self, book_id: &str) -> Result<ApiResponse> {
        self.request(
            GET_INFO_BY_ID,
            &[
                ("book_id", book_id),
                ("recommend", ""),
                ("carousel_position", ""),
                ("tab_type", ""),
                ("module_id", ""),
            ],
        )
    }

    /// List a book's divisions (volumes).
    pub fn division_list(&self, book_id: &str) -> Result<ApiResponse> {
        self.request(GET_DIVISION_LIST, &[("book_id", book_id)])
    }

    /// List reviews for a book. `review_type` selects the tab (1 = hottest).
    pub fn review_list(
        &self,
        book_id: &str,
        page: u32,
        count: u32,
        review_type: u32,
    ) -> Result<ApiResponse> {
        let (page, count, review_type) =
            (page.to_string(), count.to_string(), review_type.to_string());
        self.request(
            GET_REVIEW_LIST,
            &[
                ("book_id", book_id),
                ("count", &count),
                ("page", &page),
                ("type", &review_type),
            ],
        )
    }

    /// List comments under a review.
    pub fn review_comment_list(
        &self,
        review_id: &str,
        page: u32,
        count: u32,
    ) -> Result<ApiResponse> {
        let (page, count) = (page.to_string(), count.to_string());
        self.request(
            GET_REVIEW_COMMENT_LIST,
            &[("review_id", review_id), ("count", &count), ("page", &page)],
        )
    }

    /// List replies under a review comment.
    pub fn comment_reply_list(
        &self,
        comment_id: &str,
        page: u32,
        count: u32,
    ) -> Result<ApiResponse> {
        let (page, count) = (page.to_string(), count.to_string());
        self.request(
            GET_REVIEW_COMMENT_REPLY_LIST,
            &[
                ("comment_id", comment_id),
                ("count", &count),
                ("page", &page),
            ],
        )
    }

    /// List a book's fan-funding ranking.
    pub fn fans_list(&self, book_id: &str, page: u32, count: u32) -> Result<ApiResponse> {
        let (page, count) = (page.to_string(), count.to_string());
        self.request(
            GET_MONEY_FANS_LIST,
            &[("book_id", book_id), ("count", &count), ("page", &page)],
        )
    }
}
