//! スクレイプ → アップロード → 保存 の順次実行

use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::error::ScraperError;
use crate::period::TargetMonth;
use crate::traits::{FileFetcher, FileUploader, GazetteSink, LinkSource};
use crate::transfer::UploadedFile;

use super::date::publication_date_from_filename;

/// 後続ステージを実行せずに終了した理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    NoDownloads,
    NoUploads,
}

/// ワークフロー実行結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    pub target: TargetMonth,
    pub links_found: usize,
    pub downloaded: usize,
    pub uploaded: usize,
    pub stored: usize,
    /// 公開日を解析できず保存しなかったファイル名
    pub skipped: Vec<String>,
    pub store_failed: usize,
    pub halted: Option<HaltReason>,
}

impl WorkflowReport {
    fn new(target: TargetMonth) -> Self {
        Self {
            target,
            links_found: 0,
            downloaded: 0,
            uploaded: 0,
            stored: 0,
            skipped: Vec::new(),
            store_failed: 0,
            halted: None,
        }
    }
}

pub struct Workflow {
    source: Box<dyn LinkSource>,
    fetcher: Box<dyn FileFetcher>,
    uploader: Box<dyn FileUploader>,
    sink: Box<dyn GazetteSink>,
    keep_downloads: bool,
}

impl Workflow {
    pub fn new(
        source: Box<dyn LinkSource>,
        fetcher: Box<dyn FileFetcher>,
        uploader: Box<dyn FileUploader>,
        sink: Box<dyn GazetteSink>,
    ) -> Self {
        Self {
            source,
            fetcher,
            uploader,
            sink,
            keep_downloads: false,
        }
    }

    /// アップロード後もダウンロードしたファイルを残す
    pub fn with_keep_downloads(mut self, keep: bool) -> Self {
        self.keep_downloads = keep;
        self
    }

    pub async fn run(&mut self, target: TargetMonth) -> Result<WorkflowReport, ScraperError> {
        info!("Starting the full gazette workflow for {}...", target);
        let mut report = WorkflowReport::new(target);

        // Step 1: スクレイプとダウンロード
        info!("Step 1: Starting scraping process...");
        let links = match self.source.execute(target).await {
            Ok(links) => links,
            Err(e) => {
                error!("A critical error occurred during scraping: {}", e);
                return Err(e);
            }
        };
        report.links_found = links.len();

        let downloaded = self.fetcher.fetch_all(links).await;
        report.downloaded = downloaded.len();
        info!(
            "Step 1: Scraping complete. Downloaded {} of {} files.",
            report.downloaded, report.links_found
        );

        if downloaded.is_empty() {
            warn!("No files downloaded. Skipping upload and storage steps.");
            report.halted = Some(HaltReason::NoDownloads);
            return Ok(report);
        }

        // Step 2: アップロード
        info!("Step 2: Starting upload process...");
        let uploaded = self.uploader.upload_all(downloaded.clone()).await;
        report.uploaded = uploaded.len();
        info!("Step 2: Upload complete. Uploaded {} files.", report.uploaded);

        if !self.keep_downloads {
            remove_downloads(&downloaded).await;
        }

        if uploaded.is_empty() {
            warn!("No files uploaded. Skipping storage step.");
            report.halted = Some(HaltReason::NoUploads);
            return Ok(report);
        }

        // Step 3: 保存APIに登録
        info!("Step 3: Storing uploaded URLs via API...");
        self.store_all(&uploaded, &mut report).await;

        info!(
            "Full workflow completed: stored={}, skipped={}, failed={}",
            report.stored,
            report.skipped.len(),
            report.store_failed
        );
        Ok(report)
    }

    async fn store_all(&self, uploaded: &[UploadedFile], report: &mut WorkflowReport) {
        for file in uploaded {
            let file_name = file.file_name().unwrap_or_default();

            let publication_date = match publication_date_from_filename(file_name) {
                Ok(date) => date,
                Err(e) => {
                    warn!("{}. Skipping storage for {}.", e, file.url);
                    report.skipped.push(file_name.to_string());
                    continue;
                }
            };

            if !report.target.contains(publication_date) {
                debug!(
                    "{} is dated {}, outside {}",
                    file_name, publication_date, report.target
                );
            }

            match self.sink.store_gazette(publication_date, &file.url).await {
                Ok(()) => report.stored += 1,
                Err(e) => {
                    warn!("Error storing URL {} via API: {}", file.url, e);
                    report.store_failed += 1;
                }
            }
        }
    }
}

async fn remove_downloads(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = tokio::fs::remove_file(path).await {
            debug!("Failed to remove {:?}: {}", path, e);
        }
    }
}
