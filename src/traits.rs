use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ScraperError;
use crate::period::TargetMonth;
use crate::transfer::UploadedFile;

/// 検索結果からPDFリンクを集めるスクレイパー
#[async_trait]
pub trait LinkSource: Send + Sync {
    /// ブラウザ接続
    async fn initialize(&mut self) -> Result<(), ScraperError>;

    /// 対象月で検索してPDFリンクを取得
    async fn find_links(&mut self, target: TargetMonth) -> Result<Vec<String>, ScraperError>;

    /// リソース解放
    async fn close(&mut self) -> Result<(), ScraperError>;

    /// 一括実行（initialize → find_links → close）
    ///
    /// 検索が失敗してもセッションは閉じる。
    async fn execute(&mut self, target: TargetMonth) -> Result<Vec<String>, ScraperError> {
        self.initialize().await?;
        let links = self.find_links(target).await;
        self.close().await?;
        links
    }
}

/// URL一覧をローカルに取得する
#[async_trait]
pub trait FileFetcher: Send + Sync {
    /// 成功したファイルのパスのみ返す
    async fn fetch_all(&self, urls: Vec<String>) -> Vec<PathBuf>;
}

/// ローカルファイルを保存先に再アップロードする
#[async_trait]
pub trait FileUploader: Send + Sync {
    /// 成功したファイルのみ返す
    async fn upload_all(&self, paths: Vec<PathBuf>) -> Vec<UploadedFile>;
}

/// 公開日とURLの記録先
#[async_trait]
pub trait GazetteSink: Send + Sync {
    async fn store_gazette(
        &self,
        publication_date: NaiveDate,
        url: &str,
    ) -> Result<(), ScraperError>;
}
