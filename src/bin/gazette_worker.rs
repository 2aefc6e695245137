//! 前月分の官報を取得・アップロード・登録する（1回実行）

use std::process::ExitCode;

use gazette_scraper::logging::{self, LogConfig};
use gazette_scraper::{ScraperConfig, WorkflowRequest, WorkflowService};
use tower::Service;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = logging::init(&LogConfig::from_env()) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let config = match ScraperConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut service = match WorkflowService::new(config) {
        Ok(service) => service,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match service.call(WorkflowRequest::previous_month()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
