//! 官報ポータル スクレイパーモジュール
//!
//! 前月の官報PDFリンクを検索結果テーブルから取得する

mod page;
mod scraper;
pub mod script;
mod types;

pub use page::PortalPage;
pub use scraper::PortalScraper;
pub use types::{PortalSelectors, DEFAULT_PAGE_ROWS};
