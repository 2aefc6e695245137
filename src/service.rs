use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tower::Service;
use tracing::info;

use crate::api_client::StorageClient;
use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::period::TargetMonth;
use crate::portal::PortalScraper;
use crate::transfer::{Downloader, Uploader};
use crate::workflow::{Workflow, WorkflowReport};

/// ワークフロー実行リクエスト
#[derive(Debug, Clone)]
pub struct WorkflowRequest {
    pub target: TargetMonth,
    pub keep_downloads: bool,
}

impl WorkflowRequest {
    /// 実行日の前月を対象にする
    pub fn previous_month() -> Self {
        Self::for_month(TargetMonth::previous())
    }

    pub fn for_month(target: TargetMonth) -> Self {
        Self {
            target,
            keep_downloads: false,
        }
    }

    pub fn with_keep_downloads(mut self, keep: bool) -> Self {
        self.keep_downloads = keep;
        self
    }
}

/// tower::Serviceを実装したワークフローサービス
#[derive(Debug, Clone)]
pub struct WorkflowService {
    config: ScraperConfig,
    client: reqwest::Client,
}

impl WorkflowService {
    pub fn new(config: ScraperConfig) -> Result<Self, ScraperError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// 設定から各ステージを組み立てる
    pub fn build_workflow(&self) -> Workflow {
        Workflow::new(
            Box::new(PortalScraper::new(self.config.clone())),
            Box::new(Downloader::new(
                self.client.clone(),
                self.config.download_path.clone(),
                self.config.download_workers,
            )),
            Box::new(Uploader::new(
                self.client.clone(),
                self.config.upload_url.clone(),
                self.config.upload_workers,
            )),
            Box::new(StorageClient::new(
                self.client.clone(),
                self.config.api_base_url.clone(),
            )),
        )
    }
}

impl Service<WorkflowRequest> for WorkflowService {
    type Response = WorkflowReport;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: WorkflowRequest) -> Self::Future {
        info!("ワークフローリクエスト受信: target={}", req.target);

        let mut workflow = self.build_workflow().with_keep_downloads(req.keep_downloads);

        Box::pin(async move {
            let report = workflow.run(req.target).await?;

            info!(
                "ワークフロー完了: target={}, links={}, stored={}",
                report.target, report.links_found, report.stored
            );

            Ok(report)
        })
    }
}
