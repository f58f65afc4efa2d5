use std::{io::Write, path::Path};

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info};

use super::{Aborted, Reporter, rule, write_missing_credentials};
use crate::{
    api::{TradingApi, WebullClient, dto::BalanceDto, utils::PAGE_SIZE},
    config::{ConfigError, EnvFile, Settings},
    format::{USD, format_amount, format_money, format_percent, raw_string},
    models::{Position, Record, normalize_records, retain_held},
};

const WIDTH: usize = 60;

pub async fn run<W: Write>(env_file: &Path, reporter: &mut Reporter<W>) -> Result<()> {
    write_header(reporter, Local::now().naive_local());

    let env_file = EnvFile::load(env_file)?;
    let settings = match Settings::from_env_file(&env_file) {
        Ok(settings) => settings,
        Err(err) => {
            let ConfigError::MissingCredentials { missing } = &err;
            write_missing_credentials(reporter, missing);
            return Err(err.into());
        }
    };
    info!("Using app key {}", settings.masked_app_key());

    let client = WebullClient::new(settings);
    render_assets(&client, reporter).await?;
    write_footer(reporter);

    Ok(())
}

pub fn write_header<W: Write>(reporter: &mut Reporter<W>, now: NaiveDateTime) {
    reporter.line("# Webull Japan - 資産情報レポート");
    reporter.blank();
    reporter.line(format!(
        "**生成日時**: {}",
        now.format("%Y年%m月%d日 %H:%M:%S")
    ));
    reporter.blank();
    reporter.line("---");
    reporter.blank();
}

pub fn write_footer<W: Write>(reporter: &mut Reporter<W>) {
    reporter.blank();
    reporter.line("---");
    reporter.blank();
    reporter.line("*このレポートは自動生成されました*");
}

/// Accounts, balances and held positions. A failing balance or position
/// call is reported and the next section still runs.
pub async fn render_assets<A, W>(api: &A, reporter: &mut Reporter<W>) -> Result<()>
where
    A: TradingApi,
    W: Write,
{
    reporter.line(rule('=', WIDTH));
    reporter.line("Webull Japan - 資産情報表示");
    reporter.line(rule('=', WIDTH));
    reporter.blank();

    reporter.line("📋 口座情報を取得中...");
    let response = api.get_app_subscriptions().await?;
    if !response.is_success() {
        reporter.line(format!(
            "❌ エラー: 口座情報の取得に失敗しました (ステータスコード: {})",
            response.status()
        ));
        reporter.line(format!("レスポンス: {}", response.body()));
        return Err(Aborted::new("account subscriptions request failed").into());
    }

    let accounts = normalize_records(response.json()?);
    if accounts.is_empty() {
        reporter.line("❌ エラー: 有効な口座が見つかりませんでした");
        return Err(Aborted::new("no accounts").into());
    }
    reporter.line(format!("✅ {}件の口座が見つかりました", accounts.len()));
    reporter.blank();

    for (idx, account) in accounts.iter().enumerate() {
        render_account(api, reporter, idx + 1, account).await;
    }

    reporter.blank();
    reporter.line(rule('=', WIDTH));
    reporter.line("✅ 資産情報の取得が完了しました");
    reporter.line(rule('=', WIDTH));
    reporter.blank();

    Ok(())
}

async fn render_account<A, W>(api: &A, reporter: &mut Reporter<W>, idx: usize, account: &Record)
where
    A: TradingApi,
    W: Write,
{
    let account_id = account
        .get("account_id")
        .filter(|id| !id.is_null())
        .map(|id| raw_string(Some(id)));

    reporter.blank();
    reporter.line(rule('=', WIDTH));
    reporter.line(format!("## 口座 #{}", idx));
    reporter.line(rule('=', WIDTH));
    reporter.line(format!(
        "**口座ID**: {}",
        account_id.as_deref().unwrap_or("N/A")
    ));
    reporter.blank();

    let others: Vec<(&String, &Value)> = account
        .iter()
        .filter(|(key, _)| key.as_str() != "account_id")
        .collect();
    if !others.is_empty() {
        reporter.line("### その他の口座情報");
        for (key, value) in others {
            reporter.line(format!("- {}: {}", key, raw_string(Some(value))));
        }
        reporter.blank();
    }

    let Some(account_id) = account_id else {
        reporter.line("⚠️  口座IDが取得できないため残高とポジションを表示できません");
        reporter.blank();
        return;
    };

    reporter.line("### 💰 口座残高");
    if let Err(err) = render_balance(api, reporter, &account_id).await {
        debug!("balance for account #{}: {:?}", idx, err);
        reporter.blank();
        reporter.line(format!("⚠️  残高取得中にエラーが発生しました: {}", err));
        reporter.blank();
    }

    reporter.line("### 📈 保有ポジション");
    if let Err(err) = render_positions(api, reporter, &account_id).await {
        debug!("positions for account #{}: {:?}", idx, err);
        reporter.blank();
        reporter.line(format!("⚠️  ポジション取得中にエラーが発生しました: {}", err));
        reporter.blank();
    }
}

async fn render_balance<A, W>(api: &A, reporter: &mut Reporter<W>, account_id: &str) -> Result<()>
where
    A: TradingApi,
    W: Write,
{
    let response = api.get_account_balance(account_id, USD).await?;
    if !response.is_success() {
        reporter.blank();
        reporter.line(format!(
            "⚠️  残高情報の取得に失敗しました (ステータスコード: {})",
            response.status()
        ));
        reporter.line(format!("レスポンス: {}", response.body()));
        reporter.blank();
        return Ok(());
    }

    let balance: BalanceDto = response.json()?;

    if let Some(id) = balance.account_id_display() {
        reporter.blank();
        reporter.line(format!("**口座ID**: {}", id));
        reporter.blank();
    }

    for asset in balance.account_currency_assets() {
        let currency = asset.currency_code();
        reporter.line(format!("#### 💱 {} 建て", currency));
        reporter.blank();
        reporter.line("| 項目 | 金額 |");
        reporter.line("|------|------|");
        let rows = [
            ("総現金", asset.total_cash()),
            ("確定現金", asset.settled_cash()),
            ("未確定現金", asset.unsettled_cash()),
            ("凍結資金", asset.frozen_cash()),
            ("出金可能額", asset.available_to_withdraw()),
            ("買付余力", asset.stock_power()),
        ];
        for (label, value) in rows {
            reporter.line(format!(
                "| {} | {} |",
                label,
                format_amount(value.as_ref(), currency)
            ));
        }
        reporter.blank();
    }

    if !balance.other().is_empty() {
        reporter.line("#### その他の残高情報");
        reporter.blank();
        for (key, value) in balance.other() {
            reporter.line(format!("- {}: {}", key, raw_string(Some(value))));
        }
        reporter.blank();
    }

    Ok(())
}

async fn render_positions<A, W>(api: &A, reporter: &mut Reporter<W>, account_id: &str) -> Result<()>
where
    A: TradingApi,
    W: Write,
{
    let response = api.get_account_positions(account_id, PAGE_SIZE, None).await?;
    if !response.is_success() {
        reporter.blank();
        reporter.line(format!(
            "⚠️  ポジション情報の取得に失敗しました (ステータスコード: {})",
            response.status()
        ));
        reporter.blank();
        return Ok(());
    }

    let held = retain_held(normalize_records(response.json()?));
    if held.is_empty() {
        reporter.blank();
        reporter.line("📭 保有ポジションはありません");
        reporter.blank();
        return Ok(());
    }

    reporter.blank();
    reporter.line(format!("🎯 **保有銘柄**: {}件", held.len()));
    reporter.blank();

    for (idx, record) in held.iter().enumerate() {
        write_position(reporter, idx + 1, &Position::from_record(record));
    }

    Ok(())
}

fn write_position<W: Write>(reporter: &mut Reporter<W>, idx: usize, position: &Position) {
    reporter.line(format!("#### 銘柄 #{}: {}", idx, position.symbol()));
    reporter.blank();
    if let Some(name) = position.name() {
        reporter.line(format!("**銘柄名**: {}", name));
        reporter.blank();
    }
    reporter.line("| 項目 | 値 |");
    reporter.line("|------|------|");
    reporter.line(format!("| 数量 | {} |", raw_string(position.quantity().as_ref())));

    match priced_rows(position) {
        Ok(rows) => {
            for row in rows {
                reporter.line(row);
            }
        }
        Err(err) => {
            debug!("{}: falling back to raw values: {}", position.symbol(), err);
            let raw = [
                ("取得単価", position.cost_price()),
                ("現在価格", position.last_price()),
                ("評価額", position.market_value()),
            ];
            for (label, value) in raw {
                if let Some(value) = value.as_ref().filter(|value| is_truthy(value)) {
                    reporter.line(format!("| {} | {} |", label, raw_string(Some(value))));
                }
            }
        }
    }
    reporter.blank();
}

fn priced_rows(position: &Position) -> Result<Vec<String>> {
    let currency = position.currency().as_str();
    let cost = position.cost_price_value()?;
    let last = position.last_price_value()?;
    let market_value = position.market_value_value()?;
    let profit_loss = position.profit_loss()?;

    let mut rows = Vec::new();
    if last > Decimal::ZERO {
        rows.push(format!("| 現在価格 | {} |", format_money(last, currency)));
    }
    if cost > Decimal::ZERO {
        rows.push(format!("| 取得単価 | {} |", format_money(cost, currency)));
    }
    if market_value > Decimal::ZERO {
        rows.push(format!("| 評価額 | {} |", format_money(market_value, currency)));
    }
    if let Some(profit_loss) = profit_loss {
        let marker = if profit_loss.amount().is_sign_negative() && !profit_loss.amount().is_zero() {
            "📉"
        } else {
            "📈"
        };
        rows.push(format!(
            "| 損益 | {} {} ({}) |",
            marker,
            format_money(*profit_loss.amount(), currency),
            format_percent(*profit_loss.percent())
        ));
    }

    Ok(rows)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
