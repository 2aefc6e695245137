//! tracing-subscriber の初期化

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::ScraperError;

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// 指定時はコンソールに加えてファイルにも出力する
    pub file: Option<PathBuf>,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            file: std::env::var("LOG_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

/// `RUST_LOG` が無ければ info レベル
pub fn init(config: &LogConfig) -> Result<(), ScraperError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init()
        .map_err(|e| ScraperError::Config(format!("ログ初期化エラー: {}", e)))
}
