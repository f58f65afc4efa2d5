use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use super::{
    client::TradingApi,
    dto::{HoldingsPageDto, OrdersPageDto},
};
use crate::models::{Record, normalize_records, retain_held};

pub const PAGE_SIZE: u32 = 100;

/// Account subscriptions as records, in the order the API returns them.
pub async fn fetch_subscriptions<A: TradingApi>(api: &A) -> Result<Vec<Record>> {
    let response = api
        .get_app_subscriptions()
        .await?
        .error_for_status("account subscriptions")?;
    Ok(normalize_records(response.json()?))
}

/// Id of the first subscribed account, if any.
pub async fn first_account_id<A: TradingApi>(api: &A) -> Result<Option<String>> {
    let subscriptions = fetch_subscriptions(api).await?;
    Ok(subscriptions
        .first()
        .and_then(|account| account.get("account_id"))
        .and_then(|id| match id {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }))
}

/// Every held position, following `last_instrument_id` until the API
/// reports no further page.
pub async fn fetch_held_positions<A: TradingApi>(api: &A, account_id: &str) -> Result<Vec<Record>> {
    let mut held = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let response = api
            .get_account_positions(account_id, PAGE_SIZE, cursor.as_deref())
            .await?
            .error_for_status("account positions")?;
        let page: HoldingsPageDto = response.json()?;

        let holdings = normalize_records(Value::Array(page.holdings().clone()));
        let next_cursor = holdings
            .last()
            .and_then(|holding| holding.get("instrument_id"))
            .and_then(|id| match id {
                Value::String(id) => Some(id.clone()),
                Value::Number(id) => Some(id.to_string()),
                _ => None,
            });
        let page_len = holdings.len();
        held.extend(retain_held(holdings));

        debug!(
            "positions page: {} holdings, has_next={}",
            page_len,
            page.has_next()
        );

        match next_cursor {
            Some(next) if *page.has_next() && page_len > 0 => cursor = Some(next),
            _ => break,
        }
    }

    Ok(held)
}

/// All of today's orders, following `client_order_id` until a short or
/// empty page.
pub async fn fetch_today_orders<A: TradingApi>(api: &A, account_id: &str) -> Result<Vec<Record>> {
    let mut orders = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let response = api
            .list_today_orders(account_id, PAGE_SIZE, cursor.as_deref())
            .await?
            .error_for_status("today's orders")?;
        let page: OrdersPageDto = response.json()?;
        let records = normalize_records(Value::Array(page.data().clone()));

        if records.is_empty() {
            break;
        }

        let page_len = records.len();
        cursor = records
            .last()
            .and_then(|order| order.get("client_order_id"))
            .and_then(Value::as_str)
            .map(str::to_string);
        orders.extend(records);

        debug!("orders page: {} orders", page_len);

        if page_len < PAGE_SIZE as usize || cursor.is_none() {
            break;
        }
    }

    Ok(orders)
}
