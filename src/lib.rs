//! Hbooker (ciweimao) e-book platform API client library.
//!
//! Provides authenticated access to the Hbooker app API: bookshelf, catalog
//! browsing, chapter content, check-in, reviews, and rankings.
//!
//! # Authentication
//!
//! Every call carries the session's common parameters (account, 32-character
//! login token, app version, device token). [`HbookerClient::bootstrap`]
//! either adopts supplied credentials or auto-registers an anonymous guest
//! account, then verifies the session with a profile probe:
//!
//! ```no_run
//! use hbooker_api::HbookerClient;
//!
//! // Anonymous guest session
//! let client = HbookerClient::bootstrap(None, None).unwrap();
//!
//! // Existing credentials
//! let client = HbookerClient::bootstrap(Some("书客123"), Some("32-char-token...")).unwrap();
//!
//! let chapter = client.chapter_content("100123456").unwrap();
//! println!("{}", chapter.txt_content);
//! ```
//!
//! # API endpoint mapping
//!
//! | Method | Endpoint | Description |
//! |---|---|---|
//! | [`HbookerClient::login`] | `/signup/login` | Credential login |
//! | [`HbookerClient::auto_register`] | `/signup/auto_reg_v2` | Anonymous registration |
//! | [`HbookerClient::shelf_list`] | `/bookshelf/get_shelf_list` | Reader's shelves |
//! | [`HbookerClient::shelf_book_list`] | `/bookshelf/get_shelf_book_list` | Books on a shelf |
//! | [`HbookerClient::book_info`] | `/book/get_info_by_id` | Book metadata |
//! | [`HbookerClient::division_list`] | `/book/get_division_list` | Volume structure |
//! | [`HbookerClient::updated_chapter_by_division`] | `/chapter/get_updated_chapter_by_division_new` | Chapter list |
//! | [`HbookerClient::chapter_update`] | `/chapter/get_updated_chapter_by_division_id` | Division updates |
//! | [`HbookerClient::chapter_content`] | (two-phase) | Decrypted chapter text |
//! | [`HbookerClient::buy_chapter`] | `/chapter/buy` | Chapter purchase info |
//! | [`HbookerClient::books_by_tag`] | `/bookcity/get_tag_book_list` | Tag browse |
//! | [`HbookerClient::search`] | `/bookcity/get_filter_search_book_list` | Catalog search |
//! | [`HbookerClient::rank_list`] | `/bookcity/get_rank_book_list` | Rankings |
//! | [`HbookerClient::review_list`] | `/book/get_review_list` | Book reviews |
//! | [`HbookerClient::review_comment_list`] | `/book/get_review_comment_list` | Review comments |
//! | [`HbookerClient::comment_reply_list`] | `/book/get_review_comment_reply_list` | Comment replies |
//! | [`HbookerClient::fans_list`] | `/book/get_money_fans_list` | Fan funding |
//! | [`HbookerClient::discount_list`] | `/bookcity/get_dis_data` | Discounts |
//! | [`HbookerClient::user_info`] | `/reader/get_my_info` | Profile / session probe |
//! | [`HbookerClient::prop_info`] | `/reader/get_prop_info` | Props and points |
//! | [`HbookerClient::check_in_records`] | `/signup/get_sign_record` | Check-in history |
//! | [`HbookerClient::check_in`] | `/signup/do_sign_task` | Daily check-in |
//! | [`HbookerClient::version`] | `/setting/get_version` | Client version |
//!
//! # Encryption
//!
//! Every response body is base64 AES-256-CBC ciphertext (zero IV, PKCS7)
//! under `SHA-256` of a shared platform secret; chapter text is encrypted a
//! second time under a per-chapter command. See [`crypto`].
//!
//! # Logging
//!
//! Emits request traces and retry warnings through the [`log`] facade;
//! install any `log` backend to see them.

mod auth;
mod book;
mod bookcity;
mod bookshelf;
mod chapter;
pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
mod reader;
pub mod types;

pub use client::HbookerClient;
pub use config::SessionConfig;
pub use error::{HbookerError, Result};
pub use types::{ApiResponse, ChapterInfo};
