//! 官報レコードの型定義

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// 保存済みの官報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gazette {
    pub id: u64,
    pub url: String,
    #[serde(deserialize_with = "date_or_datetime")]
    pub publication_date: NaiveDate,
}

/// `2025-07-15` と `2025-07-15T00:00:00`（タイムゾーン付きも可）のどちらも日付として読む
fn date_or_datetime<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = raw.parse::<NaiveDateTime>() {
        return Ok(datetime.date());
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| serde::de::Error::custom(format!("invalid publication_date: {}", raw)))
}

/// 登録リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGazette {
    pub url: String,
    pub publication_date: NaiveDate,
}

/// 一覧取得の条件
///
/// `month` と `year` は両方指定した場合のみ絞り込みになる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GazetteQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl GazetteQuery {
    pub const DEFAULT_LIMIT: usize = 100;

    pub fn month(month: u32, year: i32) -> Self {
        Self {
            month: Some(month),
            year: Some(year),
            ..Default::default()
        }
    }

    pub fn page(skip: usize, limit: usize) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
            ..Default::default()
        }
    }
}
