//! ポータル画面の要素定義

/// 検索フォームと結果テーブルのセレクタ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalSelectors {
    /// 月セレクトの name 属性
    pub month_select: String,
    /// 年セレクトの name 属性
    pub year_select: String,
    pub submit_button: String,
    /// 表示件数セレクトの name 属性
    pub page_length_select: String,
    pub page_length_value: String,
    pub result_rows: String,
    pub result_links: String,
}

impl Default for PortalSelectors {
    fn default() -> Self {
        Self {
            month_select: "mes".to_string(),
            year_select: "ano".to_string(),
            submit_button: "form[data-request='onTest'] button[type='submit']".to_string(),
            page_length_select: "example_length".to_string(),
            page_length_value: "100".to_string(),
            result_rows: "table#example tbody tr".to_string(),
            result_links: "table#example tbody tr td a".to_string(),
        }
    }
}

/// 表示件数変更の成否を判定する行数（デフォルトのページサイズ）
pub const DEFAULT_PAGE_ROWS: usize = 10;
