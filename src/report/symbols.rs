use std::{io::Write, path::Path};

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use tracing::warn;

use super::{API_DOC_URL, CREDENTIALS_URL, Reporter, rule};
use crate::config::{
    EnvFile, Settings,
    settings::{APP_KEY_VAR, APP_SECRET_VAR},
};

const WIDTH: usize = 80;

/// Market whose symbol listing is assessed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Market {
    Us,
    Jp,
}

impl Market {
    fn file_title(&self) -> &'static str {
        match self {
            Market::Us => "米国株銘柄一覧取得スクリプト実行結果",
            Market::Jp => "日本株銘柄取得スクリプト実行結果",
        }
    }

    fn banner(&self) -> &'static str {
        match self {
            Market::Us => "米国株銘柄一覧取得スクリプト - 実行可否調査",
            Market::Jp => "Webull Japan OpenAPI - 日本株銘柄取得の実行可否調査",
        }
    }

    fn findings(&self) -> &'static [&'static str] {
        match self {
            Market::Us => US_FINDINGS,
            Market::Jp => JP_FINDINGS,
        }
    }

    fn alternatives(&self) -> &'static [&'static str] {
        match self {
            Market::Us => US_ALTERNATIVES,
            Market::Jp => JP_ALTERNATIVES,
        }
    }
}

const US_FINDINGS: &[&str] = &[
    "### 対応市場",
    "",
    "> **U.S. stocks and ETFs.**",
    "",
    "Webull Japan OpenAPIは**米国株とETFの取引・データ取得をサポート**しています。",
    "ただし、これは**銘柄一覧を取得できる**という意味ではありません。",
    "",
    "### 利用可能な機能(既知の銘柄シンボルに対して)",
    "",
    "1. **Trading Management** (取引管理): 注文作成・変更・キャンセル、注文履歴照会",
    "2. **Market Information** (マーケット情報): リアルタイム相場、ローソク足",
    "3. **Account Information** (口座情報): 口座残高、保有ポジション",
    "4. **Real-time Subscriptions** (リアルタイム配信): 注文ステータス変更通知",
    "5. **Trading Calendar** (取引カレンダー): 取引日確認",
    "",
    "**すべての機能で共通**: ティッカーシンボル(例: AAPL、TSLA)を**事前に知っている必要**があります。",
    "",
    "### 提供されていないエンドポイント",
    "",
    "- **銘柄一覧取得** (Symbol List / Instrument List)",
    "- **銘柄検索** (Symbol Search)",
    "- **取引所別銘柄リスト** (Exchange-specific Symbol List)",
    "",
    "| 機能 | 一般的なAPI | Webull API |",
    "|------|------------|-----------|",
    "| 銘柄一覧取得 | ✅ 可能 | ❌ 不可能 |",
    "| 銘柄検索 | ✅ 可能 | ❌ 不可能 |",
    "| 既知銘柄の取引 | ✅ 可能 | ✅ 可能 |",
    "| 既知銘柄のデータ取得 | ✅ 可能 | ✅ 可能 |",
];

const JP_FINDINGS: &[&str] = &[
    "### 対応市場",
    "",
    "公式ドキュメントの「Market Supported」セクションには:",
    "",
    "> **U.S. stocks and ETFs.**",
    "",
    "と明記されており、**現時点では米国株とETFのみがサポート対象**となっています。",
    "日本株に関する明示的なエンドポイントやパラメータの記載は確認できませんでした。",
    "",
    "### 存在しないエンドポイント",
    "",
    "- **銘柄一覧取得エンドポイント** (Instrument List/Symbol List)",
    "- **銘柄検索エンドポイント** (Symbol Search)",
    "- **市場別銘柄一覧取得** (Market-specific Symbol List)",
    "- **銘柄発見機能** (Symbol Discovery)",
    "",
    "### API利用の前提条件",
    "",
    "1. Webullアプリへの登録",
    "2. ウィブル証券口座の開設",
    "3. OpenAPI利用申請",
    "4. アプリケーション作成とAPIキー生成",
    "",
    "**注意**: 取引/相場の権限は最終的にユーザーの取引権限に依存します。",
];

const US_ALTERNATIVES: &[&str] = &[
    "1. **Webullアプリで銘柄を確認**してから、APIで取引",
    "2. **ティッカーシンボルを事前に把握** (AAPL、TSLAなど)",
    "3. **外部の銘柄リストを参照**し、その後Webull APIでデータ取得や取引を実行",
];

const JP_ALTERNATIVES: &[&str] = &[
    "1. **外部データソースとの組み合わせ**: JPX(日本取引所グループ)の公開データから銘柄リストを取得",
    "2. **静的な銘柄リストの管理**: 取引対象の銘柄コード(例: 7203 トヨタ自動車)を手元で管理",
    "3. **Webullアプリからの情報収集**: アプリの銘柄情報を元にマスターデータを作成",
];

pub fn run<W: Write>(market: Market, env_file: &Path, reporter: &mut Reporter<W>) -> Result<()> {
    let env_file = EnvFile::load(env_file)?;
    let configured = Settings::from_env_file(&env_file)
        .inspect_err(|err| warn!("{}", err))
        .is_ok();

    render_report(market, configured, reporter, Local::now().naive_local());
    Ok(())
}

/// Feasibility report for listing the symbols of `market`. Missing
/// credentials only produce a warning section.
pub fn render_report<W: Write>(market: Market, configured: bool, reporter: &mut Reporter<W>, now: NaiveDateTime) {
    reporter.file_only(format!("# {}", market.file_title()));
    reporter.file_only("");
    reporter.file_only(format!("実行日時: {}", now.format("%Y年%m月%d日 %H:%M:%S")));
    reporter.file_only("");
    reporter.file_only("---");
    reporter.file_only("");

    reporter.line(rule('=', WIDTH));
    reporter.line(market.banner());
    reporter.line(rule('=', WIDTH));
    reporter.blank();

    reporter.line("## 1. 環境設定の確認");
    reporter.blank();
    if configured {
        reporter.line("### ✓ APIキーの設定を確認しました");
    } else {
        reporter.line("### ⚠️ APIキーが設定されていません");
        reporter.blank();
        reporter.line("`.env`ファイルに以下の設定が必要です:");
        reporter.blank();
        reporter.line("```");
        reporter.line(format!("{}=your_app_key_here", APP_KEY_VAR));
        reporter.line(format!("{}=your_app_secret_here", APP_SECRET_VAR));
        reporter.line("```");
        reporter.line(format!("APIキーは {} で申請できます。", CREDENTIALS_URL));
    }
    reporter.blank();

    reporter.line("## 2. Webull Japan OpenAPI 仕様確認");
    reporter.blank();
    reporter.line(format!("公式ドキュメント({})を確認した結果:", API_DOC_URL));
    reporter.blank();
    for line in market.findings() {
        reporter.line(*line);
    }
    reporter.blank();

    reporter.line("## 3. 結論");
    reporter.blank();
    reporter.line("### ❌ 実装不可能");
    reporter.blank();
    reporter.line("**Webull Japan OpenAPIには銘柄一覧を動的に取得する機能が実装されていない**ため、");
    reporter.line("APIだけで全銘柄リストを取得することはできません。");
    reporter.blank();

    reporter.line("## 4. 代替手段");
    reporter.blank();
    for line in market.alternatives() {
        reporter.line(*line);
    }
    reporter.blank();
    reporter.line(format!("**最新情報は公式ドキュメント({})で確認してください。**", API_DOC_URL));
    reporter.blank();

    reporter.line(rule('=', WIDTH));
    reporter.line("調査完了");
    reporter.line(rule('=', WIDTH));
}
