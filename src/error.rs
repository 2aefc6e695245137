use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("ブラウザ初期化エラー: {0}")]
    BrowserInit(String),

    #[error("ナビゲーションエラー: {0}")]
    Navigation(String),

    #[error("JavaScript実行エラー: {0}")]
    JavaScript(String),

    #[error("タイムアウト: {0}")]
    Timeout(String),

    #[error("要素が見つかりません: {0}")]
    ElementNotFound(String),

    #[error("ダウンロードエラー: {0}")]
    Download(String),

    #[error("アップロードエラー: {0}")]
    Upload(String),

    #[error("保存APIエラー: status={status}, body={body}")]
    Api { status: u16, body: String },

    #[error("公開日を解析できません: {0}")]
    DateParse(String),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイル操作エラー: {0}")]
    FileIO(#[from] std::io::Error),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = ScraperError::Api {
            status: 422,
            body: "bad".into(),
        };
        assert_eq!(err.to_string(), "保存APIエラー: status=422, body=bad");
    }
}
