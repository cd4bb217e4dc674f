//! Book city (catalog browsing) APIs: tag browse, search, rankings,
//! discounts.
//!
//! All list endpoints page with `page` (0-based) and `count`.

use crate::client::HbookerClient;
use crate::error::Result;
use crate::types::ApiResponse;

const GET_TAG_BOOK_LIST: &str = "/bookcity/get_tag_book_list";
const GET_FILTER_SEARCH_BOOK_LIST: &str = "/bookcity/get_filter_search_book_list";
const GET_RANK_BOOK_LIST: &str = "/bookcity/get_rank_book_list";
const GET_DIS_DATA: &str = "/bookcity/get_dis_data";

impl HbookerClient {
    /// Browse books carrying a tag.
    pub fn books_by_tag(&self, tag: &str, page: u32, count: u32) -> Result<ApiResponse> {
        let (page, count) = (page.to_string(), count.to_string());
        self.request(
            GET_TAG_BOOK_LIST,
            &[("tag", tag), ("page", &page), ("count", &count), ("type", "0")],
        )
    }

    /// Full-text search over the catalog.
    pub fn search(&self, keyword: &str, page: u32, count: u32) -> Result<ApiResponse> {
        let (page, count) = (page.to_string(), count.to_string());
        self.request(
            GET_FILTER_SEARCH_BOOK_LIST,
            &[
                ("key", keyword),
                ("page", &page),
                ("count", &count),
                ("category_index", "0"),
            ],
        )
    }

    /// Ranking list. `time_type` is e.g. `"week"`, `order` e.g.
    /// `"fans_value"`.
    pub fn rank_list(
        &self,
        time_type: &str,
        order: &str,
        page: u32,
        count: u32,
    ) -> Result<ApiResponse> {
        let (page, count) = (page.to_string(), count.to_string());
        self.request(
            GET_RANK_BOOK_LIST,
            &[
                ("time_type", time_type),
                ("order", order),
                ("page", &page),
                ("count", &count),
            ],
        )
    }

    /// Current discount placements.
    pub fn discount_list(&self) -> Result<ApiResponse> {
        self.request(GET_DIS_DATA, &[("theme_type", "NORMAL")])
    }
}
