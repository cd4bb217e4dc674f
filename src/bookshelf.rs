//! Bookshelf APIs.
//!
//! # Endpoints
//!
//! ## `shelf_list` — `POST /bookshelf/get_shelf_list`
//!
//! No extra fields. `data.shelf_list` is the reader's shelves.
//!
//! ## `shelf_book_list` — `POST /bookshelf/get_shelf_book_list`
//!
//! Fields: `shelf_id`, `last_mod_time` (Unix seconds as a string, `"0"` for
//! everything), `direction` (`"prev"` or `"next"`). `data.book_list` is a
//! page of shelf entries ordered by modification time.

use crate::client::HbookerClient;
use crate::error::Result;
use crate::types::ApiResponse;

const GET_SHELF_LIST: &str = "/bookshelf/get_shelf_list";
const GET_SHELF_BOOK_LIST: &str = "/bookshelf/get_shelf_book_list";

impl HbookerClient {
    /// List the reader's shelves.
    pub fn shelf_list(&self) -> Result<ApiResponse> {
        self.request(GET_SHELF_LIST, &[])
    }

    /// List books on a shelf, paged by modification time.
    pub fn shelf_book_list(
        &self,
        shelf_id: &str,
        last_mod_time: &str,
        direction: &str,
    ) -> Result<ApiResponse> {
        self.request(
            GET_SHELF_BOOK_LIST,
            &[
                ("shelf_id", shelf_id),
                ("last_mod_time", last_mod_time),
                ("direction", direction),
            ],
        )
    }
}
