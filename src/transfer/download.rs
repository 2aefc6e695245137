//! PDFダウンロード（ストリーミング書き込み）

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::{Client, Url};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::error::ScraperError;
use crate::traits::FileFetcher;

use super::pool::run_bounded;

pub struct Downloader {
    client: Client,
    download_dir: PathBuf,
    workers: usize,
}

impl Downloader {
    pub fn new(client: Client, download_dir: impl Into<PathBuf>, workers: usize) -> Self {
        Self {
            client,
            download_dir: download_dir.into(),
            workers: workers.max(1),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// 1ファイルをダウンロード
    pub async fn download_file(&self, url: &str) -> Result<PathBuf, ScraperError> {
        download_one(self.client.clone(), self.download_dir.clone(), url.to_string()).await
    }
}

/// URLの最後のパスセグメントを保存ファイル名にする
pub fn file_name_for(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .last()
        .map(str::to_string)
}

async fn download_one(client: Client, dir: PathBuf, url: String) -> Result<PathBuf, ScraperError> {
    let file_name = file_name_for(&url)
        .ok_or_else(|| ScraperError::Download(format!("ファイル名を決定できません: {}", url)))?;
    let save_path = dir.join(file_name);

    let response = client.get(&url).send().await?.error_for_status()?;

    if let Err(e) = stream_to_file(response, &save_path).await {
        if let Err(rm) = tokio::fs::remove_file(&save_path).await {
            debug!("Failed to remove partial file {:?}: {}", save_path, rm);
        }
        return Err(e);
    }

    debug!("Downloaded {} -> {:?}", url, save_path);
    Ok(save_path)
}

async fn stream_to_file(mut response: reqwest::Response, path: &Path) -> Result<(), ScraperError> {
    let mut file = tokio::fs::File::create(path).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

#[async_trait]
impl FileFetcher for Downloader {
    async fn fetch_all(&self, urls: Vec<String>) -> Vec<PathBuf> {
        info!("Starting concurrent download of {} files...", urls.len());

        if let Err(e) = tokio::fs::create_dir_all(&self.download_dir).await {
            warn!(
                "Cannot create download directory {:?}: {}",
                self.download_dir, e
            );
            return Vec::new();
        }

        let client = self.client.clone();
        let dir = self.download_dir.clone();
        let paths = run_bounded(urls, self.workers, move |url: String| {
            let client = client.clone();
            let dir = dir.clone();
            async move {
                match download_one(client, dir, url.clone()).await {
                    Ok(path) => Some(path),
                    Err(e) => {
                        warn!("Error downloading {}: {}", url, e);
                        None
                    }
                }
            }
        })
        .await;

        info!("Finished downloading. {} files saved.", paths.len());
        paths
    }
}
