//! 保存APIクライアント

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, info};

use crate::error::ScraperError;
use crate::gazette::{Gazette, GazetteQuery, NewGazette};
use crate::traits::GazetteSink;

#[derive(Debug, Clone)]
pub struct StorageClient {
    client: Client,
    base_url: String,
}

impl StorageClient {
    /// `base_url` は `http://app:8000/api` のようなAPIルート
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/gazettes/", self.base_url)
    }

    async fn post_gazette(&self, gazette: &NewGazette) -> Result<reqwest::Response, ScraperError> {
        let response = self.client.post(self.endpoint()).json(gazette).send().await?;
        check_status(response).await
    }

    /// 官報を登録（既存URLなら既存レコードが返る）
    pub async fn create_gazette(&self, gazette: &NewGazette) -> Result<Gazette, ScraperError> {
        let response = self.post_gazette(gazette).await?;
        Ok(response.json::<Gazette>().await?)
    }

    pub async fn list_gazettes(&self, query: &GazetteQuery) -> Result<Vec<Gazette>, ScraperError> {
        let response = self
            .client
            .get(self.endpoint())
            .query(query)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json::<Vec<Gazette>>().await?)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ScraperError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ScraperError::Api {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl GazetteSink for StorageClient {
    async fn store_gazette(
        &self,
        publication_date: NaiveDate,
        url: &str,
    ) -> Result<(), ScraperError> {
        let gazette = NewGazette {
            url: url.to_string(),
            publication_date,
        };
        // 2xx なら保存成功。レスポンス本文の形式には依存しない
        let response = self.post_gazette(&gazette).await?;
        debug!("Storage API answered {}", response.status());
        info!("Stored {} ({})", url, publication_date);
        Ok(())
    }
}
