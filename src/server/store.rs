//! 官報レコードの保存先

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Datelike;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::gazette::{Gazette, NewGazette};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("保存先エラー: {0}")]
    Backend(String),
}

#[async_trait]
pub trait GazetteStore: Send + Sync {
    /// 登録（同じURLが既にあれば既存レコードを返す）
    async fn create(&self, gazette: NewGazette) -> Result<Gazette, StoreError>;

    async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Gazette>, StoreError>;

    /// 公開日の年月で絞り込み
    async fn list_by_month(&self, month: u32, year: i32) -> Result<Vec<Gazette>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}

#[derive(Default)]
struct InMemoryState {
    /// id 昇順
    records: Vec<Gazette>,
    by_url: HashMap<String, usize>,
    next_id: u64,
}

/// プロセス内メモリに保持するストア
#[derive(Default)]
pub struct InMemoryGazetteStore {
    state: RwLock<InMemoryState>,
}

impl InMemoryGazetteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GazetteStore for InMemoryGazetteStore {
    async fn create(&self, gazette: NewGazette) -> Result<Gazette, StoreError> {
        let mut state = self.state.write().await;

        if let Some(&idx) = state.by_url.get(&gazette.url) {
            info!(
                "Gazette with URL {} already exists. Skipping creation.",
                gazette.url
            );
            return Ok(state.records[idx].clone());
        }

        state.next_id += 1;
        let record = Gazette {
            id: state.next_id,
            url: gazette.url,
            publication_date: gazette.publication_date,
        };
        let idx = state.records.len();
        state.by_url.insert(record.url.clone(), idx);
        state.records.push(record.clone());

        info!("Created new gazette entry for URL: {}", record.url);
        Ok(record)
    }

    async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Gazette>, StoreError> {
        let state = self.state.read().await;
        Ok(state.records.iter().skip(skip).take(limit).cloned().collect())
    }

    async fn list_by_month(&self, month: u32, year: i32) -> Result<Vec<Gazette>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .records
            .iter()
            .filter(|g| g.publication_date.month() == month && g.publication_date.year() == year)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.state.read().await.records.len())
    }
}
