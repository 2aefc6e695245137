//! ワークフロー（スクレイプ → アップロード → 保存）
//!
//! ステージは必ず順番に実行され、前段の結果が空なら後段は実行しない。
//! ファイル単位の失敗（ダウンロード・アップロード・公開日解析・保存）はログに残して
//! スキップし、ブラウザ接続や検索の失敗はワークフロー全体を中断する。

mod date;
mod runner;

pub use date::publication_date_from_filename;
pub use runner::{HaltReason, Workflow, WorkflowReport};
