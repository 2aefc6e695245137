//! 官報スクレイパーライブラリ
//!
//! - 官報ポータルで前月分を検索し、PDFリンクを取得
//! - PDFをダウンロードして保存先へ再アップロード
//! - 公開日とURLを保存APIに登録
//! - 保存API（登録・一覧・年月絞り込み）のサーバー実装
//!
//! # ワークフロー使用例
//!
//! ```rust,ignore
//! use gazette_scraper::{ScraperConfig, WorkflowRequest, WorkflowService};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScraperConfig::new("https://portal.example/diario", "https://files.example/upload")
//!         .with_browser_url("http://localhost:9222")
//!         .with_download_path("./downloads");
//!
//!     let mut service = WorkflowService::new(config).unwrap();
//!     let report = service.call(WorkflowRequest::previous_month()).await.unwrap();
//!     println!("stored: {}", report.stored);
//! }
//! ```
//!
//! # 保存API使用例
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gazette_scraper::server::{router, AppState, InMemoryGazetteStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = router(AppState::new(Arc::new(InMemoryGazetteStore::new())));
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod api_client;
pub mod config;
pub mod error;
pub mod gazette;
pub mod logging;
pub mod period;
pub mod portal;
pub mod server;
pub mod service;
pub mod traits;
pub mod transfer;
pub mod workflow;

// 主要な型をリエクスポート
pub use api_client::StorageClient;
pub use config::{ScraperConfig, ServerConfig};
pub use error::ScraperError;
pub use gazette::{Gazette, GazetteQuery, NewGazette};
pub use period::TargetMonth;
pub use portal::{PortalScraper, PortalSelectors};
pub use service::{WorkflowRequest, WorkflowService};
pub use traits::{FileFetcher, FileUploader, GazetteSink, LinkSource};
pub use transfer::{Downloader, UploadedFile, Uploader};
pub use workflow::{publication_date_from_filename, HaltReason, Workflow, WorkflowReport};
