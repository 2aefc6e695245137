//! ダウンロード・アップロードの並行処理
//!
//! どちらも1件ごとに独立しており、失敗したファイルは結果から除外されるだけで
//! バッチ全体は中断しない。

mod download;
pub mod pool;
mod upload;

pub use download::{file_name_for, Downloader};
pub use upload::{UploadedFile, Uploader};
