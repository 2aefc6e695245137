//! 保存先へのマルチパートアップロード

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use tracing::{debug, info, warn};

use crate::error::ScraperError;
use crate::traits::FileUploader;

use super::pool::run_bounded;

const PDF_MIME: &str = "application/pdf";

/// アップロード済みファイル（ローカルパスと公開URLの対応）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub path: PathBuf,
    pub url: String,
}

impl UploadedFile {
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

pub struct Uploader {
    client: Client,
    upload_url: String,
    workers: usize,
}

impl Uploader {
    pub fn new(client: Client, upload_url: impl Into<String>, workers: usize) -> Self {
        Self {
            client,
            upload_url: upload_url.into(),
            workers: workers.max(1),
        }
    }

    pub async fn upload_file(&self, path: &Path) -> Result<UploadedFile, ScraperError> {
        upload_one(
            self.client.clone(),
            self.upload_url.clone(),
            path.to_path_buf(),
        )
        .await
    }
}

async fn upload_one(
    client: Client,
    upload_url: String,
    path: PathBuf,
) -> Result<UploadedFile, ScraperError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ScraperError::Upload(format!("ファイル名が取得できません: {:?}", path)))?
        .to_string();

    let file = tokio::fs::File::open(&path).await?;
    let length = file.metadata().await?.len();
    let part = Part::stream_with_length(Body::from(file), length)
        .file_name(file_name)
        .mime_str(PDF_MIME)?;
    let form = Form::new().part("file", part);

    let response = client
        .post(&upload_url)
        .multipart(form)
        .send()
        .await?
        .error_for_status()?;

    let url = response.text().await?.trim().to_string();
    if url.is_empty() {
        return Err(ScraperError::Upload(format!(
            "アップロード先が空のURLを返しました: {:?}",
            path
        )));
    }

    debug!("Uploaded {:?} -> {}", path, url);
    Ok(UploadedFile { path, url })
}

#[async_trait]
impl FileUploader for Uploader {
    async fn upload_all(&self, paths: Vec<PathBuf>) -> Vec<UploadedFile> {
        info!("Starting concurrent upload of {} files...", paths.len());

        let client = self.client.clone();
        let upload_url = self.upload_url.clone();
        let uploaded = run_bounded(paths, self.workers, move |path: PathBuf| {
            let client = client.clone();
            let upload_url = upload_url.clone();
            async move {
                let shown = path.display().to_string();
                match upload_one(client, upload_url, path).await {
                    Ok(file) => Some(file),
                    Err(e) => {
                        warn!("Error uploading {}: {}", shown, e);
                        None
                    }
                }
            }
        })
        .await;

        info!("Finished uploading. {} files uploaded.", uploaded.len());
        uploaded
    }
}
