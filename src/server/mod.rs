//! 官報の保存・取得API
//!
//! - `POST /gazettes/` 登録（URLが重複していれば既存レコードを返す）
//! - `GET /gazettes/?month&year&skip&limit` 一覧・年月絞り込み

mod api;
mod store;

pub use api::{router, ApiError, AppState, MONTH_YEAR_REQUIRED};
pub use store::{GazetteStore, InMemoryGazetteStore, StoreError};
