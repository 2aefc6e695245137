//! 検索対象月（前月）の計算

use chrono::{Datelike, Local, NaiveDate};

/// 検索対象の年月
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetMonth {
    pub month: u32,
    pub year: i32,
}

impl TargetMonth {
    pub fn new(month: u32, year: i32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { month, year })
    }

    /// 指定日の前月
    pub fn previous_of(date: NaiveDate) -> Self {
        if date.month() == 1 {
            Self {
                month: 12,
                year: date.year() - 1,
            }
        } else {
            Self {
                month: date.month() - 1,
                year: date.year(),
            }
        }
    }

    /// 実行日（ローカル時刻）の前月
    pub fn previous() -> Self {
        Self::previous_of(Local::now().date_naive())
    }

    /// フォームの月セレクト値（"07"）
    pub fn month_value(&self) -> String {
        format!("{:02}", self.month)
    }

    /// フォームの年セレクト値（"2025"）
    pub fn year_value(&self) -> String {
        format!("{:04}", self.year)
    }

    /// 検索結果リンクに含まれるはずの文字列（"/07/2025"）
    pub fn link_marker(&self) -> String {
        format!("/{}/{}", self.month_value(), self.year_value())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }
}

impl std::fmt::Display for TargetMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}
