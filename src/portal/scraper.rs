//! 官報ポータル スクレイパー実装
//!
//! リモートブラウザに接続し、前月で検索した結果テーブルからPDFリンクを集める

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use futures::StreamExt;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::period::TargetMonth;
use crate::traits::LinkSource;

use super::page::PortalPage;
use super::script;
use super::types::{PortalSelectors, DEFAULT_PAGE_ROWS};

/// 条件ポーリングの間隔（ミリ秒）
const POLL_INTERVAL_MS: u64 = 250;
/// 検索フォーム表示待ちのタイムアウト（秒）
const FORM_READY_TIMEOUT_SECS: u64 = 10;

pub struct PortalScraper {
    config: ScraperConfig,
    selectors: PortalSelectors,
    browser: Option<Browser>,
    page: Option<Box<dyn PortalPage>>,
}

impl PortalScraper {
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            config,
            selectors: PortalSelectors::default(),
            browser: None,
            page: None,
        }
    }

    pub fn with_selectors(mut self, selectors: PortalSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    fn get_page(&self) -> Result<&dyn PortalPage, ScraperError> {
        self.page
            .as_deref()
            .ok_or_else(|| ScraperError::BrowserInit("ブラウザが初期化されていません".into()))
    }

    /// 条件式が true になるまで待機（タイムアウトなら false）
    ///
    /// 応答しない評価もタイムアウトに含める。
    async fn wait_until(&self, page: &dyn PortalPage, condition: &str, limit: Duration) -> bool {
        let start = Instant::now();

        loop {
            let remaining = limit.saturating_sub(start.elapsed());
            match timeout(remaining, page.evaluate(condition.to_string())).await {
                Ok(Ok(val)) => {
                    if val.as_bool().unwrap_or(false) {
                        debug!("Condition met after {:?}", start.elapsed());
                        return true;
                    }
                }
                Ok(Err(e)) => debug!("Condition check error: {}", e),
                Err(_) => {
                    debug!("Condition check got no answer within {:?}", limit);
                    return false;
                }
            }

            if start.elapsed() >= limit {
                return false;
            }
            sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
        }
    }

    async fn select_option(
        &self,
        page: &dyn PortalPage,
        select_name: &str,
        value: &str,
    ) -> Result<(), ScraperError> {
        let result = page.evaluate(script::select_option(select_name, value)).await?;

        match result.as_str() {
            Some(script::SELECT_OK) => {
                debug!("Selected {}={}", select_name, value);
                Ok(())
            }
            Some(script::SELECT_NO_OPTION) => Err(ScraperError::ElementNotFound(format!(
                "select[name='{}'] に値 {} の選択肢がありません",
                select_name, value
            ))),
            Some(_) => Err(ScraperError::ElementNotFound(format!(
                "select[name='{}']",
                select_name
            ))),
            None => Err(ScraperError::JavaScript(format!(
                "select[name='{}'] の結果が文字列ではありません: {}",
                select_name, result
            ))),
        }
    }

    /// 月・年を選択して検索し、結果が表示されるまで待機
    async fn perform_search(
        &self,
        page: &dyn PortalPage,
        target: TargetMonth,
    ) -> Result<(), ScraperError> {
        info!("Performing search for month/year: {}", target);

        let month_select = script::element_exists(&format!(
            "select[name='{}']",
            self.selectors.month_select
        ));
        if !self
            .wait_until(page, &month_select, Duration::from_secs(FORM_READY_TIMEOUT_SECS))
            .await
        {
            return Err(ScraperError::ElementNotFound(format!(
                "検索フォーム (select[name='{}'])",
                self.selectors.month_select
            )));
        }

        self.select_option(page, &self.selectors.month_select, &target.month_value())
            .await?;
        self.select_option(page, &self.selectors.year_select, &target.year_value())
            .await?;

        page.click(&self.selectors.submit_button).await?;
        debug!("検索ボタンクリック完了");

        let marker = target.link_marker();
        if !self
            .wait_until(
                page,
                &script::link_text_contains(&marker),
                self.config.search_timeout,
            )
            .await
        {
            self.log_screenshot(page, "search timeout").await;
            return Err(ScraperError::Timeout(format!(
                "検索結果 ({}) が{}秒以内に表示されませんでした",
                marker,
                self.config.search_timeout.as_secs()
            )));
        }

        info!("Search successful and results loaded.");
        Ok(())
    }

    /// 表示件数を増やしてページ数を減らす
    async fn widen_pagination(&self, page: &dyn PortalPage) -> Result<(), ScraperError> {
        debug!(
            "Changing pagination to show {} results per page.",
            self.selectors.page_length_value
        );
        self.select_option(
            page,
            &self.selectors.page_length_select,
            &self.selectors.page_length_value,
        )
        .await?;

        let reloaded = script::row_count_exceeds(&self.selectors.result_rows, DEFAULT_PAGE_ROWS);
        if !self
            .wait_until(page, &reloaded, self.config.pagination_timeout)
            .await
        {
            return Err(ScraperError::Timeout(format!(
                "表示件数変更後も{}行以下です",
                DEFAULT_PAGE_ROWS
            )));
        }

        debug!("Table successfully reloaded with more entries.");
        Ok(())
    }

    async fn collect_links(&self, page: &dyn PortalPage) -> Result<Vec<String>, ScraperError> {
        debug!("Finding all PDF links on the page...");
        let value = page
            .evaluate(script::link_hrefs(&self.selectors.result_links))
            .await?;
        let json = value.as_str().ok_or_else(|| {
            ScraperError::JavaScript(format!("リンク一覧が文字列ではありません: {}", value))
        })?;

        let links =
            script::parse_hrefs(json).map_err(|e| ScraperError::JavaScript(e.to_string()))?;
        info!("Found {} PDF links.", links.len());
        Ok(links)
    }

    /// デバッグモード時のみスクリーンショットをログ出力
    async fn log_screenshot(&self, page: &dyn PortalPage, label: &str) {
        if !self.config.debug {
            return;
        }
        match page.screenshot().await {
            Ok(screenshot) => {
                use base64::Engine;
                let encoded = base64::engine::general_purpose::STANDARD.encode(&screenshot);
                debug!("Screenshot ({}): data:image/png;base64,{}", label, encoded);
            }
            Err(e) => debug!("Failed to take screenshot: {}", e),
        }
    }
}

#[async_trait]
impl LinkSource for PortalScraper {
    async fn initialize(&mut self) -> Result<(), ScraperError> {
        info!("Connecting to remote browser at {}", self.config.browser_url);

        let (browser, mut handler) = Browser::connect(self.config.browser_url.as_str())
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        // ブラウザイベントハンドラをバックグラウンドで実行（エラーでも止めない）
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler error: {}", e);
                }
            }
            debug!("Browser handler finished");
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        self.browser = Some(browser);
        self.page = Some(Box::new(page));

        info!("Successfully connected to remote browser.");
        Ok(())
    }

    async fn find_links(&mut self, target: TargetMonth) -> Result<Vec<String>, ScraperError> {
        let page = self.get_page()?;

        debug!("Navigating to {}", self.config.target_url);
        page.goto(&self.config.target_url).await?;

        self.perform_search(page, target).await?;

        // 結果が少ないと表示件数セレクトが効かないことがある
        if let Err(e) = self.widen_pagination(page).await {
            warn!(
                "Could not change pagination to {}. This may happen with few results: {}",
                self.selectors.page_length_value, e
            );
        }

        self.collect_links(page).await
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        debug!("Closing browser session.");

        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                debug!("Failed to close page: {}", e);
            }
        }
        self.browser = None;

        Ok(())
    }
}
