use std::path::PathBuf;
use std::time::Duration;

use crate::error::ScraperError;

pub const DEFAULT_BROWSER_URL: &str = "http://browser:9222";
pub const DEFAULT_API_BASE_URL: &str = "http://app:8000/api";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// ソースサイトに負荷をかけないよう控えめにする
pub const DEFAULT_DOWNLOAD_WORKERS: usize = 2;
pub const DEFAULT_UPLOAD_WORKERS: usize = 5;

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// 官報ポータルの検索ページ
    pub target_url: String,
    /// リモートブラウザの DevTools エンドポイント
    pub browser_url: String,
    /// PDFのアップロード先
    pub upload_url: String,
    /// 保存APIのベースURL
    pub api_base_url: String,
    pub download_path: PathBuf,
    pub search_timeout: Duration,
    pub pagination_timeout: Duration,
    /// ダウンロード・アップロード・API呼び出し1件あたりのタイムアウト
    pub http_timeout: Duration,
    pub download_workers: usize,
    pub upload_workers: usize,
    /// 検索失敗時にスクリーンショットをログ出力
    pub debug: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            target_url: String::new(),
            browser_url: DEFAULT_BROWSER_URL.to_string(),
            upload_url: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            download_path: PathBuf::from("./downloads"),
            search_timeout: Duration::from_secs(15),
            pagination_timeout: Duration::from_secs(10),
            http_timeout: Duration::from_secs(120),
            download_workers: DEFAULT_DOWNLOAD_WORKERS,
            upload_workers: DEFAULT_UPLOAD_WORKERS,
            debug: false,
        }
    }
}

impl ScraperConfig {
    pub fn new(target_url: impl Into<String>, upload_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            upload_url: upload_url.into(),
            ..Default::default()
        }
    }

    /// 環境変数（と .env）から読み込む
    pub fn from_env() -> Result<Self, ScraperError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// キー参照関数から設定を構築する
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScraperError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ScraperError::Config(format!("{} is not set", key)))
        };
        let parsed = |key: &str| -> Result<Option<u64>, ScraperError> {
            lookup(key)
                .map(|v| {
                    v.trim()
                        .parse::<u64>()
                        .map_err(|e| ScraperError::Config(format!("{}: {}", key, e)))
                })
                .transpose()
        };

        let mut config = Self::new(required("TARGET_URL")?, required("UPLOAD_URL")?);

        if let Some(url) = lookup("BROWSER_URL") {
            config.browser_url = url;
        }
        if let Some(url) = lookup("API_BASE_URL") {
            config.api_base_url = url;
        }
        if let Some(path) = lookup("DOWNLOAD_PATH") {
            config.download_path = PathBuf::from(path);
        }
        if let Some(secs) = parsed("SEARCH_TIMEOUT_SECS")? {
            config.search_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parsed("PAGINATION_TIMEOUT_SECS")? {
            config.pagination_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parsed("HTTP_TIMEOUT_SECS")? {
            config.http_timeout = Duration::from_secs(secs);
        }
        if let Some(n) = parsed("DOWNLOAD_WORKERS")? {
            config.download_workers = (n as usize).max(1);
        }
        if let Some(n) = parsed("UPLOAD_WORKERS")? {
            config.upload_workers = (n as usize).max(1);
        }
        if let Some(flag) = lookup("SCRAPER_DEBUG") {
            config.debug = matches!(flag.trim(), "1" | "true" | "TRUE" | "yes");
        }

        Ok(config)
    }

    pub fn with_browser_url(mut self, url: impl Into<String>) -> Self {
        self.browser_url = url.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_download_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.download_path = path.into();
        self
    }

    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    pub fn with_workers(mut self, download: usize, upload: usize) -> Self {
        self.download_workers = download.max(1);
        self.upload_workers = upload.max(1);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// 保存APIサーバーの設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        }
    }
}
