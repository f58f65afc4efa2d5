use std::{collections::BTreeMap, io::Write, path::Path};

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::{Aborted, Reporter};
use crate::{
    api::{
        TradingApi, WebullClient,
        utils::{fetch_today_orders, first_account_id},
    },
    config::{
        EnvFile, Settings,
        settings::{APP_KEY_VAR, APP_SECRET_VAR},
    },
    format::{format_decimal, raw_string},
    models::{Code, Label, Order, OrderSide},
};

pub async fn run<W: Write>(env_file: &Path, reporter: &mut Reporter<W>) -> Result<()> {
    let now = Local::now().naive_local();
    write_header(reporter, now);

    reporter.console("📋 環境変数の確認...");
    let env_file = EnvFile::load(env_file)?;
    let settings = match Settings::from_env_file(&env_file) {
        Ok(settings) => settings,
        Err(err) => {
            write_missing_credentials(reporter);
            return Err(err.into());
        }
    };
    reporter.console("✓ 認証情報を読み込みました");
    reporter.blank();
    info!("Using app key {}", settings.masked_app_key());

    reporter.console("🔧 API接続を初期化中...");
    let client = WebullClient::new(settings);
    reporter.console("✓ API接続を初期化しました");
    reporter.blank();

    render_history(&client, reporter, now.date()).await
}

pub fn write_header<W: Write>(reporter: &mut Reporter<W>, now: NaiveDateTime) {
    reporter.line("# Webull Japan OpenAPI - 当日取引履歴");
    reporter.blank();
    reporter.line(format!(
        "**実行日時**: {}",
        now.format("%Y年%m月%d日 %H:%M:%S")
    ));
    reporter.blank();
    reporter.line("---");
    reporter.blank();
}

fn write_missing_credentials<W: Write>(reporter: &mut Reporter<W>) {
    reporter.line(format!(
        "✗ エラー: .envファイルに{}と{}を設定してください",
        APP_KEY_VAR, APP_SECRET_VAR
    ));
    reporter.blank();
    reporter.line("## エラー");
    reporter.blank();
    reporter.line(format!(
        "環境変数 `{}` と `{}` が設定されていません。",
        APP_KEY_VAR, APP_SECRET_VAR
    ));
    reporter.blank();
    reporter.line(".envファイルを作成し、以下の形式で認証情報を設定してください:");
    reporter.blank();
    reporter.line("```");
    reporter.line(format!("{}=your_app_key_here", APP_KEY_VAR));
    reporter.line(format!("{}=your_app_secret_here", APP_SECRET_VAR));
    reporter.line("```");
}

fn write_failure<W: Write>(reporter: &mut Reporter<W>, message: &str) -> anyhow::Error {
    reporter.blank();
    reporter.line("## エラー");
    reporter.blank();
    reporter.line(message);
    Aborted::new(message).into()
}

/// Today's orders of the first account, newest first, followed by per
/// status and per side counts.
pub async fn render_history<A, W>(api: &A, reporter: &mut Reporter<W>, today: NaiveDate) -> Result<()>
where
    A: TradingApi,
    W: Write,
{
    reporter.console("🔍 アカウント情報を取得中...");
    let account_id = match first_account_id(api).await {
        Ok(Some(account_id)) => account_id,
        Ok(None) => {
            reporter.console("✗ アカウントが見つかりません");
            return Err(write_failure(reporter, "アカウントIDの取得に失敗しました。"));
        }
        Err(err) => {
            reporter.console(format!("✗ アカウントID取得エラー: {}", err));
            return Err(write_failure(reporter, "アカウントIDの取得に失敗しました。"));
        }
    };
    let masked: String = account_id.chars().take(8).collect();
    reporter.console(format!("✓ アカウントID: {}...", masked));
    reporter.blank();

    reporter.console("📊 当日の注文履歴を取得中...");
    let records = match fetch_today_orders(api, &account_id).await {
        Ok(records) => records,
        Err(err) => {
            reporter.console(format!("✗ 注文履歴取得エラー: {}", err));
            return Err(write_failure(reporter, "注文履歴の取得に失敗しました。"));
        }
    };
    reporter.console(format!("✓ {}件の注文を取得しました", records.len()));
    reporter.blank();

    let mut orders: Vec<Order> = records.iter().map(Order::from_record).collect();
    orders.sort_by(|a, b| b.create_time_key().cmp(a.create_time_key()));
    debug!("{} orders after sorting", orders.len());

    reporter.line("## 取引履歴サマリー");
    reporter.blank();
    reporter.line(format!("- **取得件数**: {}件", orders.len()));
    reporter.line(format!("- **対象日**: {}", today.format("%Y年%m月%d日")));
    reporter.blank();

    if orders.is_empty() {
        reporter.line("## 注文情報");
        reporter.blank();
        reporter.line("当日の注文履歴はありません。");
        reporter.blank();
    } else {
        reporter.line("## 注文一覧");
        reporter.blank();
        for (idx, order) in orders.iter().enumerate() {
            write_order(reporter, idx + 1, order);
        }
        reporter.line("---");
        reporter.blank();
        write_statistics(reporter, &orders);
    }

    reporter.line("---");
    reporter.blank();
    reporter.line("## 注意事項");
    reporter.blank();
    reporter.line("- このデータは**当日の注文履歴**のみを表示しています");
    reporter.line("- Webull Japan OpenAPIには過去の取引履歴を取得するエンドポイントが存在しません");
    reporter.line("- より詳細な取引履歴が必要な場合は、Webullアプリまたはウェブサイトをご利用ください");
    reporter.blank();

    Ok(())
}

fn write_order<W: Write>(reporter: &mut Reporter<W>, idx: usize, order: &Order) {
    let currency = order.currency().as_str();
    let positive = |value: &Option<Decimal>| value.filter(|value| *value > Decimal::ZERO);

    reporter.line(format!("### 注文 #{}", idx));
    reporter.blank();
    reporter.line(format!(
        "- **銘柄**: {} ({})",
        order.symbol(),
        order.instrument_name()
    ));
    reporter.line(format!("- **売買**: {}", order.side()));
    reporter.line(format!("- **注文種別**: {}", order.order_type()));
    reporter.line(format!("- **ステータス**: {}", order.status()));
    reporter.line(format!(
        "- **注文数量**: {}",
        raw_string(order.quantity().as_ref())
    ));
    if let Some(filled) = positive(order.filled_quantity()) {
        reporter.line(format!("- **約定数量**: {}", filled.normalize()));
    }
    if order.is_limit() {
        if let Some(limit_price) = positive(order.limit_price()) {
            reporter.line(format!(
                "- **指値価格**: {} {}",
                currency,
                format_decimal(limit_price, currency)
            ));
        }
    }
    if let Some(avg_price) = positive(order.avg_filled_price()) {
        reporter.line(format!(
            "- **平均約定価格**: {} {}",
            currency,
            format_decimal(avg_price, currency)
        ));
    }
    if let Some(created_at) = order.created_at_display() {
        reporter.line(format!("- **注文日時**: {}", created_at));
    }
    reporter.line(format!("- **注文ID**: `{}`", order.client_order_id()));
    reporter.blank();
}

fn write_statistics<W: Write>(reporter: &mut Reporter<W>, orders: &[Order]) {
    reporter.line("## 統計情報");
    reporter.blank();

    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    for order in orders {
        *by_status.entry(order.status().to_string()).or_default() += 1;
    }
    reporter.line("### ステータス別件数");
    reporter.blank();
    for (status, count) in &by_status {
        reporter.line(format!("- **{}**: {}件", status, count));
    }
    reporter.blank();

    let count_side = |side: OrderSide| {
        orders
            .iter()
            .filter(|order| *order.side() == Code::Known(side))
            .count()
    };
    reporter.line("### 売買別件数");
    reporter.blank();
    reporter.line(format!(
        "- **{}注文**: {}件",
        OrderSide::Buy.label(),
        count_side(OrderSide::Buy)
    ));
    reporter.line(format!(
        "- **{}注文**: {}件",
        OrderSide::Sell.label(),
        count_side(OrderSide::Sell)
    ));
    reporter.blank();
}
