//! スクレイパーが使うページ操作

use async_trait::async_trait;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use serde_json::Value;

use crate::error::ScraperError;

/// ブラウザタブに対する操作
#[async_trait]
pub trait PortalPage: Send + Sync {
    /// URLを開いてナビゲーション完了まで待つ
    async fn goto(&self, url: &str) -> Result<(), ScraperError>;

    /// スクリプトを評価し、戻り値をJSONで返す
    async fn evaluate(&self, script: String) -> Result<Value, ScraperError>;

    async fn click(&self, selector: &str) -> Result<(), ScraperError>;

    /// PNG画像（ページ全体）
    async fn screenshot(&self) -> Result<Vec<u8>, ScraperError>;

    async fn close(&self) -> Result<(), ScraperError>;
}

#[async_trait]
impl PortalPage for Page {
    async fn goto(&self, url: &str) -> Result<(), ScraperError> {
        Page::goto(self, url)
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;
        self.wait_for_navigation()
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;
        Ok(())
    }

    async fn evaluate(&self, script: String) -> Result<Value, ScraperError> {
        Page::evaluate(self, script)
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?
            .into_value::<Value>()
            .map_err(|e| ScraperError::JavaScript(e.to_string()))
    }

    async fn click(&self, selector: &str) -> Result<(), ScraperError> {
        self.find_element(selector)
            .await
            .map_err(|e| ScraperError::ElementNotFound(format!("{}: {}", selector, e)))?
            .click()
            .await
            .map_err(|e| ScraperError::Navigation(format!("{} クリック: {}", selector, e)))?;
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, ScraperError> {
        Page::screenshot(self, ScreenshotParams::builder().full_page(true).build())
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))
    }

    async fn close(&self) -> Result<(), ScraperError> {
        Page::close(self.clone())
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))
    }
}
