use std::io::Write;

use anyhow::Result;
use chrono::{Local, NaiveDateTime};

use super::{API_DOC_URL, Reporter, rule};
use crate::api::webull::paths;

const WIDTH: usize = 100;

#[derive(Clone, Copy, Debug)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: &'static str,
    pub path: &'static str,
    /// The `WebullClient` method that calls this endpoint, if any.
    pub client_method: Option<&'static str>,
    pub description: &'static str,
    pub parameters: &'static [&'static str],
    pub response: &'static str,
    pub frequency_limit: Option<&'static str>,
    /// Set only for endpoints the platform does not offer.
    pub status: Option<&'static str>,
}

impl Endpoint {
    pub fn is_available(&self) -> bool {
        self.status.is_none()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Category {
    pub title: &'static str,
    pub description: &'static str,
    pub note: Option<&'static str>,
    pub endpoints: &'static [Endpoint],
}

const fn endpoint(
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    parameters: &'static [&'static str],
    response: &'static str,
) -> Endpoint {
    Endpoint {
        name,
        method,
        path,
        client_method: None,
        description,
        parameters,
        response,
        frequency_limit: None,
        status: None,
    }
}

const fn unavailable(name: &'static str, description: &'static str, status: &'static str) -> Endpoint {
    Endpoint {
        name,
        method: "N/A",
        path: "未実装",
        client_method: None,
        description,
        parameters: &["N/A"],
        response: "N/A",
        frequency_limit: None,
        status: Some(status),
    }
}

pub const CATALOGUE: &[Category] = &[
    Category {
        title: "口座管理 (Account Management)",
        description: "口座情報の取得と管理",
        note: None,
        endpoints: &[
            Endpoint {
                client_method: Some("WebullClient::get_app_subscriptions"),
                ..endpoint(
                    "口座購読情報の取得",
                    "GET",
                    paths::SUBSCRIPTIONS,
                    "APIアプリケーションに紐づく口座情報の一覧を取得",
                    &[],
                    "口座ID、購読ID、ステータスなど",
                )
            },
            endpoint(
                "口座詳細情報の取得",
                "GET",
                "/account/{account_id}",
                "指定した口座の詳細情報を取得",
                &["account_id: 口座ID"],
                "口座詳細情報",
            ),
            Endpoint {
                client_method: Some("WebullClient::get_account_balance"),
                ..endpoint(
                    "口座残高の取得",
                    "GET",
                    paths::ACCOUNT_BALANCE,
                    "口座の現金残高、購買力、総資産額などを取得",
                    &["account_id: 口座ID", "total_asset_currency: 集計通貨"],
                    "現金残高、購買力、総資産額など",
                )
            },
            Endpoint {
                client_method: Some("WebullClient::get_account_positions"),
                ..endpoint(
                    "口座ポジションの取得",
                    "GET",
                    paths::ACCOUNT_POSITIONS,
                    "保有している株式ポジション情報を取得",
                    &[
                        "account_id: 口座ID",
                        "page_size: 1ページの件数",
                        "last_instrument_id: 前ページ最後の銘柄ID",
                    ],
                    "銘柄、数量、平均取得価格、現在価格など",
                )
            },
        ],
    },
    Category {
        title: "注文管理 (Order Management)",
        description: "注文の作成、変更、キャンセル、照会",
        note: None,
        endpoints: &[
            endpoint(
                "注文の作成",
                "POST",
                "/order",
                "新規注文を作成(成行、指値、逆指値など)",
                &[
                    "account_id: 口座ID",
                    "order_params: 注文パラメータ(銘柄、数量、価格、注文タイプなど)",
                ],
                "注文ID、クライアント注文ID、ステータス",
            ),
            endpoint(
                "注文の変更",
                "PUT",
                "/order/{order_id}",
                "既存注文の価格や数量を変更",
                &["account_id: 口座ID", "order_id: 注文ID", "new_params: 変更パラメータ"],
                "変更後の注文情報",
            ),
            endpoint(
                "注文のキャンセル",
                "DELETE",
                "/order/{order_id}",
                "指定した注文をキャンセル",
                &["account_id: 口座ID", "order_id: 注文ID"],
                "キャンセル結果",
            ),
            endpoint(
                "注文詳細の取得",
                "GET",
                "/order/{order_id}",
                "指定した注文の詳細情報を取得",
                &["account_id: 口座ID", "client_order_id: クライアント注文ID"],
                "注文の詳細情報、ステータス、約定情報など",
            ),
            Endpoint {
                client_method: Some("WebullClient::list_today_orders"),
                ..endpoint(
                    "当日注文一覧の取得",
                    "GET",
                    paths::TODAY_ORDERS,
                    "当日の注文履歴をページ単位で取得",
                    &[
                        "account_id: 口座ID",
                        "page_size: 1ページの件数(最大100)",
                        "last_client_order_id: 前ページ最後のクライアント注文ID",
                    ],
                    "注文のリスト",
                )
            },
            endpoint(
                "未約定注文の取得",
                "GET",
                "/orders/open",
                "現在有効な未約定注文を取得",
                &["account_id: 口座ID"],
                "未約定注文のリスト",
            ),
        ],
    },
    Category {
        title: "マーケットデータ (Market Data) - GRPC",
        description: "株式情報とマーケットデータの取得",
        note: Some("※現在、HTTP経由のマーケットデータリクエストは未サポート。GRPCプロトコルを使用。"),
        endpoints: &[
            Endpoint {
                frequency_limit: Some("60回/分"),
                ..endpoint(
                    "銘柄情報の取得",
                    "GRPC",
                    "/instrument",
                    "銘柄コードリストから銘柄の基本情報を取得",
                    &[
                        "symbols: 銘柄コードのリスト (例: ['AAPL', 'TSLA'])",
                        "category: カテゴリ (例: 'US_STOCK')",
                    ],
                    "銘柄名、ISIN、取引所、セクターなど",
                )
            },
            Endpoint {
                frequency_limit: Some("1回/秒"),
                ..endpoint(
                    "マーケットスナップショット",
                    "GRPC",
                    "/market-data/snapshot",
                    "銘柄の最新価格情報をバッチ取得",
                    &["symbols: 銘柄コードのリスト", "category: カテゴリ"],
                    "最新価格、出来高、高値、安値など",
                )
            },
            endpoint(
                "ローソク足データ",
                "GRPC",
                "/market-data/bars",
                "指定期間のローソク足データを取得",
                &[
                    "symbol: 銘柄コード",
                    "category: カテゴリ",
                    "timeframe: 時間足(1m, 5m, 1d等)",
                    "count: データ件数",
                ],
                "OHLCV(始値、高値、安値、終値、出来高)データ",
            ),
        ],
    },
    Category {
        title: "リアルタイム購読 (Real-time Subscriptions)",
        description: "注文ステータスとマーケットデータのリアルタイム受信",
        note: None,
        endpoints: &[
            endpoint(
                "注文イベント購読",
                "GRPC",
                "/trade-events",
                "注文ステータス変更のリアルタイム通知を受信",
                &["account_ids: 監視する口座IDのリスト"],
                "注文作成、約定、キャンセル等のイベント通知",
            ),
            endpoint(
                "マーケットデータ購読",
                "MQTT",
                "/quotes/subscribe",
                "銘柄の価格変動をリアルタイムで受信",
                &[
                    "symbol: 監視する銘柄コード",
                    "category: カテゴリ",
                    "subscribe_type: 購読タイプ(SNAPSHOT等)",
                ],
                "リアルタイムの価格更新情報",
            ),
        ],
    },
    Category {
        title: "取引カレンダー (Trading Calendar)",
        description: "市場の営業日情報",
        note: None,
        endpoints: &[endpoint(
            "取引カレンダーの取得",
            "GET",
            "/trade/calendar",
            "指定期間の取引日と休場日を取得",
            &["market: 市場コード(US等)", "start_date: 開始日", "end_date: 終了日"],
            "取引日のリスト、休場日情報",
        )],
    },
    Category {
        title: "現在利用不可のエンドポイント",
        description: "将来実装予定または条件付きで利用可能",
        note: Some("※これらのエンドポイントは現在Webull Japan OpenAPIではサポートされていません"),
        endpoints: &[
            unavailable(
                "入出金履歴の取得",
                "口座の入出金取引履歴を取得",
                "❌ 未実装 - カスタマーサポートへの問い合わせが必要",
            ),
            unavailable(
                "全銘柄リストの取得",
                "取引可能な全銘柄のリストを取得",
                "❌ 未実装 - 銘柄コード指定が必要",
            ),
            unavailable("銘柄検索", "キーワードで銘柄を検索", "❌ 未実装"),
        ],
    },
];

/// Total and available endpoint counts.
pub fn counts(catalogue: &[Category]) -> (usize, usize) {
    let total = catalogue.iter().map(|category| category.endpoints.len()).sum();
    let available = catalogue
        .iter()
        .flat_map(|category| category.endpoints)
        .filter(|endpoint| endpoint.is_available())
        .count();
    (total, available)
}

pub fn run<W: Write>(reporter: &mut Reporter<W>) -> Result<()> {
    reporter.console("");
    reporter.console(rule('=', WIDTH));
    reporter.console("Webull Japan OpenAPI - 全エンドポイント一覧表示ツール");
    reporter.console(rule('=', WIDTH));
    reporter.console("");

    render_catalogue(reporter, CATALOGUE, Local::now().naive_local());
    Ok(())
}

pub fn render_catalogue<W: Write>(reporter: &mut Reporter<W>, catalogue: &[Category], now: NaiveDateTime) {
    reporter.line(rule('=', WIDTH));
    reporter.line("Webull Japan OpenAPI - 全エンドポイント一覧");
    reporter.line(rule('=', WIDTH));
    reporter.blank();
    reporter.line(format!("生成日時: {}", now.format("%Y-%m-%d %H:%M:%S")));
    reporter.line(format!("公式ドキュメント: {}", API_DOC_URL));
    reporter.blank();
    reporter.line(rule('=', WIDTH));
    reporter.blank();

    for (category_num, category) in catalogue.iter().enumerate() {
        let category_num = category_num + 1;
        reporter.blank();
        reporter.line(rule('=', WIDTH));
        reporter.line(format!("{}. {}", category_num, category.title));
        reporter.line(rule('=', WIDTH));
        reporter.line(format!("説明: {}", category.description));
        if let Some(note) = category.note {
            reporter.line(format!("注意: {}", note));
        }
        reporter.blank();
        reporter.line(rule('-', WIDTH));

        for (endpoint_num, endpoint) in category.endpoints.iter().enumerate() {
            write_endpoint(reporter, category_num, endpoint_num + 1, endpoint);
        }
    }

    write_summary(reporter, catalogue);
}

fn write_endpoint<W: Write>(reporter: &mut Reporter<W>, category_num: usize, endpoint_num: usize, endpoint: &Endpoint) {
    reporter.blank();
    reporter.line(format!("  [{}-{}] {}", category_num, endpoint_num, endpoint.name));
    reporter.line(format!("  {}", rule('─', WIDTH - 4)));
    reporter.line(format!("  HTTPメソッド    : {}", endpoint.method));
    reporter.line(format!("  パス           : {}", endpoint.path));
    reporter.line(format!(
        "  クライアント   : {}",
        endpoint.client_method.unwrap_or("未対応")
    ));
    reporter.line(format!("  説明           : {}", endpoint.description));
    if endpoint.parameters.is_empty() {
        reporter.line("  パラメータ     : なし");
    } else {
        reporter.line("  パラメータ     :");
        for param in endpoint.parameters {
            reporter.line(format!("                   - {}", param));
        }
    }
    reporter.line(format!("  レスポンス     : {}", endpoint.response));
    if let Some(limit) = endpoint.frequency_limit {
        reporter.line(format!("  頻度制限       : {}", limit));
    }
    if let Some(status) = endpoint.status {
        reporter.line(format!("  ステータス     : {}", status));
    }
    reporter.blank();
}

fn write_summary<W: Write>(reporter: &mut Reporter<W>, catalogue: &[Category]) {
    let (total, available) = counts(catalogue);

    reporter.blank();
    reporter.line(rule('=', WIDTH));
    reporter.line("サマリー");
    reporter.line(rule('=', WIDTH));
    reporter.blank();
    reporter.line(format!("総エンドポイント数        : {}", total));
    reporter.line(format!("実装済みエンドポイント数  : {}", available));
    reporter.line(format!("未実装エンドポイント数    : {}", total - available));
    reporter.blank();
    reporter.line("プロトコル別の分類:");
    reporter.line("  - HTTP  : 口座管理、注文管理、取引カレンダー");
    reporter.line("  - GRPC  : マーケットデータ取得、注文イベント購読");
    reporter.line("  - MQTT  : リアルタイムマーケットデータ購読");
    reporter.blank();
    reporter.line(rule('=', WIDTH));
    reporter.line("重要な注意事項");
    reporter.line(rule('=', WIDTH));
    reporter.blank();

    let notes = [
        ("米国株の全銘柄リストを直接取得するAPIは存在しません", "銘柄コードを指定して個別に情報を取得する必要があります"),
        ("入出金履歴の取得APIは未実装です", "Webullモバイルアプリまたはカスタマーサポートへの問い合わせが必要"),
        ("マーケットデータのHTTPリクエストは現在未サポート", "GRPCプロトコルを使用する必要があります"),
        ("APIキーの有効期限はデフォルトで45日間", "期限切れ前にリセットが必要です"),
        ("API呼び出しには頻度制限があります", "各エンドポイントの制限を確認してください"),
    ];
    for (idx, (note, hint)) in notes.iter().enumerate() {
        reporter.line(format!("{}. {}", idx + 1, note));
        reporter.line(format!("   → {}", hint));
        reporter.blank();
    }
    reporter.line(rule('=', WIDTH));
    reporter.blank();
}
