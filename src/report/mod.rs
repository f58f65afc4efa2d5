pub mod asset;
pub mod endpoints;
pub mod history;
pub mod positions;
pub mod sink;
pub mod symbols;

use std::io::Write;

use thiserror::Error;

pub use sink::{Reporter, Route};

use crate::config::settings::{APP_KEY_VAR, APP_SECRET_VAR};

pub const CREDENTIALS_URL: &str = "https://www.webull.co.jp/center";
pub const API_DOC_URL: &str = "https://developer.webull.co.jp/api-doc/";

/// The report has already explained why it stopped; callers only need to
/// exit with a failure status.
#[derive(Debug, Error)]
#[error("report aborted: {reason}")]
pub struct Aborted {
    pub reason: String,
}

impl Aborted {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

pub fn rule(ch: char, width: usize) -> String {
    ch.to_string().repeat(width)
}

/// How to supply the credentials, written to both sinks.
pub fn write_missing_credentials<W: Write>(reporter: &mut Reporter<W>, missing: &[&str]) {
    reporter.line("## ❌ エラー: APIキーとシークレットが設定されていません");
    reporter.blank();
    if !missing.is_empty() {
        reporter.line(format!("未設定: {}", missing.join(", ")));
        reporter.blank();
    }
    reporter.line("### 設定方法");
    reporter.blank();
    reporter.line("#### 1. .envファイルを使用(推奨)");
    reporter.blank();
    reporter.line("実行ディレクトリに.envファイルを作成し、以下の内容を記載:");
    reporter.blank();
    reporter.line("```");
    reporter.line(format!("{}=your_actual_key", APP_KEY_VAR));
    reporter.line(format!("{}=your_actual_secret", APP_SECRET_VAR));
    reporter.line("```");
    reporter.blank();
    reporter.line("#### 2. 環境変数を使用");
    reporter.blank();
    reporter.line("```bash");
    reporter.line(format!("export {}='your_actual_key'", APP_KEY_VAR));
    reporter.line(format!("export {}='your_actual_secret'", APP_SECRET_VAR));
    reporter.line("```");
    reporter.blank();
    reporter.line("### APIキーの取得方法");
    reporter.blank();
    reporter.line(format!("{} でOpenAPIを申請してください", CREDENTIALS_URL));
    reporter.blank();
}
