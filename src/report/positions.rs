use std::{io::Write, path::Path};

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::{Aborted, Reporter, rule, write_missing_credentials};
use crate::{
    api::{
        ApiError, TradingApi, WebullClient,
        utils::{fetch_held_positions, first_account_id},
    },
    config::{ConfigError, EnvFile, Settings},
    format::{format_amount, format_decimal, format_percent, format_quantity},
    models::{Position, Record, fields},
};

const WIDTH: usize = 100;
const NAME_WIDTH: usize = 28;

pub async fn run<W: Write>(env_file: &Path, reporter: &mut Reporter<W>) -> Result<()> {
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

    write_header(reporter, Local::now().naive_local());
    let client = WebullClient::new(settings);
    render_positions(&client, reporter).await?;

    reporter.blank();
    reporter.line("処理が正常に完了しました。");
    Ok(())
}

pub fn write_header<W: Write>(reporter: &mut Reporter<W>, now: NaiveDateTime) {
    reporter.line("# Webull ポジション表示レポート");
    reporter.blank();
    reporter.line(format!("実行日時: {}", now.format("%Y-%m-%d %H:%M:%S")));
    reporter.blank();
    reporter.line(rule('=', WIDTH));
    reporter.line("Webull Japan OpenAPI - ポジション情報取得");
    reporter.line(rule('=', WIDTH));
}

/// Every held position of the first account: a summary table followed by
/// one detail block per position.
pub async fn render_positions<A, W>(api: &A, reporter: &mut Reporter<W>) -> Result<()>
where
    A: TradingApi,
    W: Write,
{
    reporter.blank();
    reporter.line("アカウント情報を取得しています...");
    let account_id = match first_account_id(api).await {
        Ok(Some(account_id)) => account_id,
        Ok(None) => {
            reporter.line("エラー: アカウントIDが取得できませんでした。");
            return Err(Aborted::new("no account id").into());
        }
        Err(err) => {
            write_request_error(reporter, "アカウント情報", &err);
            return Err(Aborted::new("account subscriptions request failed").into());
        }
    };
    reporter.line("✓ アカウントIDを取得しました");

    reporter.blank();
    reporter.line("ポジション情報を取得しています...");
    let positions = match fetch_held_positions(api, &account_id).await {
        Ok(records) => records
            .iter()
            .map(|record| (Position::from_record(record), record_extras(record)))
            .collect::<Vec<_>>(),
        Err(err) => {
            write_request_error(reporter, "ポジション情報", &err);
            Vec::new()
        }
    };
    reporter.line(format!(
        "✓ ポジション情報の取得が完了しました({}件)",
        positions.len()
    ));

    if positions.is_empty() {
        reporter.blank();
        reporter.line("現在保有しているポジションはありません。");
        return Ok(());
    }

    write_table(reporter, positions.iter().map(|(position, _)| position));

    reporter.blank();
    reporter.line("詳細情報:");
    reporter.line(rule('=', WIDTH));
    for (idx, (position, extras)) in positions.iter().enumerate() {
        write_detail(reporter, idx + 1, position, extras);
    }

    Ok(())
}

fn write_request_error<W: Write>(reporter: &mut Reporter<W>, what: &str, err: &anyhow::Error) {
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Status { status, body, .. }) => {
            reporter.line(format!(
                "エラー: {}の取得に失敗しました (ステータスコード: {})",
                what, status
            ));
            reporter.line(format!("レスポンス: {}", body));
        }
        None => {
            debug!("{}: {:?}", what, err);
            reporter.line(format!(
                "エラー: {}の取得中に例外が発生しました - {}",
                what, err
            ));
        }
    }
}

/// Which optional amounts the API sent for a position.
#[derive(Debug, Default)]
struct Extras {
    market_value: bool,
    unrealized_profit_loss: bool,
    realized_profit_loss: bool,
}

fn record_extras(record: &Record) -> Extras {
    Extras {
        market_value: fields::MARKET_VALUE.is_present(record),
        unrealized_profit_loss: fields::UNREALIZED_PROFIT_LOSS.is_present(record),
        realized_profit_loss: fields::REALIZED_PROFIT_LOSS.is_present(record),
    }
}

fn write_table<'a, W, I>(reporter: &mut Reporter<W>, positions: I)
where
    W: Write,
    I: Iterator<Item = &'a Position>,
{
    reporter.blank();
    reporter.line(rule('=', WIDTH));
    reporter.line("現在のポジション一覧");
    reporter.line(rule('=', WIDTH));
    reporter.blank();
    reporter.line(format!(
        "{} {} {} {} {} {}",
        pad("No.", 4),
        pad("Symbol", 8),
        pad("銘柄名", 30),
        pad("数量", 10),
        pad("平均取得価格", 15),
        pad("現在価格", 15)
    ));
    reporter.line(rule('-', WIDTH));

    let mut total = 0;
    for (idx, position) in positions.enumerate() {
        let currency = position.currency().as_str();
        let name = truncate_name(position.name().as_deref().unwrap_or("N/A"));
        reporter.line(format!(
            "{} {} {} {} {} {}",
            pad(&(idx + 1).to_string(), 4),
            pad(position.symbol(), 8),
            pad(&name, 30),
            pad(&format_quantity(position.quantity().as_ref()), 10),
            pad(&format_amount(position.cost_price().as_ref(), currency), 15),
            pad(&format_amount(position.last_price().as_ref(), currency), 15)
        ));
        total += 1;
    }

    reporter.line(rule('-', WIDTH));
    reporter.blank();
    reporter.line(format!("合計ポジション数: {}", total));
    reporter.line(rule('=', WIDTH));
}

fn write_detail<W: Write>(reporter: &mut Reporter<W>, idx: usize, position: &Position, extras: &Extras) {
    let currency = position.currency().as_str();
    let or_na = |value: &Option<String>| value.clone().unwrap_or_else(|| String::from("N/A"));

    reporter.blank();
    reporter.line(format!("--- ポジション {} ---", idx));
    reporter.line(format!("Symbol: {}", position.symbol()));
    reporter.line(format!("銘柄名: {}", or_na(position.name())));
    reporter.line(format!("Instrument ID: {}", or_na(position.instrument_id())));
    reporter.line(format!("Instrument Type: {}", or_na(position.instrument_type())));
    reporter.line(format!(
        "保有数量: {}",
        format_quantity(position.quantity().as_ref())
    ));
    reporter.line(format!(
        "平均取得価格: {} {}",
        format_amount(position.cost_price().as_ref(), currency),
        currency
    ));
    reporter.line(format!(
        "現在価格: {} {}",
        format_amount(position.last_price().as_ref(), currency),
        currency
    ));

    match position.valuation() {
        Ok(valuation) => {
            reporter.line(format!(
                "評価額: {} {}",
                format_decimal(*valuation.market_value(), currency),
                currency
            ));
            let profit_loss = *valuation.profit_loss();
            let sign = if profit_loss >= Decimal::ZERO { "+" } else { "" };
            reporter.line(format!(
                "評価損益: {}{} {} ({})",
                sign,
                format_decimal(profit_loss, currency),
                currency,
                format_percent(*valuation.profit_loss_percent())
            ));
        }
        Err(err) => reporter.line(format!("評価額・損益: 計算エラー ({})", err)),
    }

    if extras.market_value {
        reporter.line(format!(
            "市場評価額: {} {}",
            format_amount(position.market_value().as_ref(), currency),
            currency
        ));
    }
    if extras.unrealized_profit_loss {
        reporter.line(format!(
            "未実現損益: {} {}",
            format_amount(position.unrealized_profit_loss().as_ref(), currency),
            currency
        ));
    }
    if extras.realized_profit_loss {
        reporter.line(format!(
            "実現損益: {} {}",
            format_amount(position.realized_profit_loss().as_ref(), currency),
            currency
        ));
    }
    reporter.line(rule('-', WIDTH));
}

/// Names longer than the column are cut and marked with `...`.
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        let head: String = name.chars().take(NAME_WIDTH - 1).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

/// Left-aligns `text` in a column of `width` characters.
fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

