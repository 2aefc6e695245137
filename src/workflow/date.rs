//! ファイル名からの公開日抽出

use chrono::NaiveDate;
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::error::ScraperError;

static DATE_TOKEN: OnceCell<Regex> = OnceCell::new();

/// ファイル名中の最初の8桁数字（YYYYMMDD）を公開日として解釈する
pub fn publication_date_from_filename(file_name: &str) -> Result<NaiveDate, ScraperError> {
    let re = DATE_TOKEN.get_or_init(|| Regex::new(r"(\d{8})").expect("date token regex"));

    let token = re
        .captures(file_name)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            ScraperError::DateParse(format!("YYYYMMDD が見つかりません: {}", file_name))
        })?;

    NaiveDate::parse_from_str(token, "%Y%m%d")
        .map_err(|e| ScraperError::DateParse(format!("{} ({}): {}", file_name, token, e)))
}
