use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDateTime};
use derive_getters::Getters;
use rust_decimal::Decimal;
use serde_json::Value;
use strum_macros::{EnumIter, EnumString};

use super::Record;
use crate::format::{USD, decimal_from_value};

/// Japanese display label for an API code.
pub trait Label {
    fn label(&self) -> &'static str;
}

#[derive(Clone, Copy, Debug, EnumIter, EnumString, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum OrderSide {
    #[strum(serialize = "BUY")]
    Buy,
    #[strum(serialize = "SELL")]
    Sell,
}

impl Label for OrderSide {
    fn label(&self) -> &'static str {
        match self {
            OrderSide::Buy => "買",
            OrderSide::Sell => "売",
        }
    }
}

#[derive(Clone, Copy, Debug, EnumIter, EnumString, Eq, Hash, PartialEq)]
pub enum OrderType {
    #[strum(serialize = "LIMIT")]
    Limit,
    #[strum(serialize = "MARKET")]
    Market,
    #[strum(serialize = "STOP")]
    Stop,
    #[strum(serialize = "STOP_LIMIT")]
    StopLimit,
}

impl Label for OrderType {
    fn label(&self) -> &'static str {
        match self {
            OrderType::Limit => "指値",
            OrderType::Market => "成行",
            OrderType::Stop => "逆指値",
            OrderType::StopLimit => "逆指値(指値)",
        }
    }
}

#[derive(Clone, Copy, Debug, EnumIter, EnumString, Eq, Hash, PartialEq)]
pub enum OrderStatus {
    Working,
    Filled,
    Cancelled,
    Rejected,
    PendingCancel,
    PartialFilled,
    Failed,
}

impl Label for OrderStatus {
    fn label(&self) -> &'static str {
        match self {
            OrderStatus::Working => "処理中",
            OrderStatus::Filled => "約定",
            OrderStatus::Cancelled => "キャンセル",
            OrderStatus::Rejected => "拒否",
            OrderStatus::PendingCancel => "キャンセル待ち",
            OrderStatus::PartialFilled => "一部約定",
            OrderStatus::Failed => "失敗",
        }
    }
}

/// A known code, or the raw string the API sent when it is not one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Code<T> {
    Known(T),
    Unknown(String),
}

impl<T: FromStr> Code<T> {
    pub fn parse(raw: &str) -> Self {
        match T::from_str(raw) {
            Ok(code) => Code::Known(code),
            Err(_) => Code::Unknown(raw.to_string()),
        }
    }
}

impl<T: Label> Code<T> {
    pub fn label(&self) -> &str {
        match self {
            Code::Known(code) => code.label(),
            Code::Unknown(raw) => raw,
        }
    }
}

impl<T: Label> fmt::Display for Code<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, Getters)]
pub struct Order {
    symbol: String,
    instrument_name: String,
    side: Code<OrderSide>,
    order_type: Code<OrderType>,
    status: Code<OrderStatus>,
    quantity: Option<Value>,
    filled_quantity: Option<Decimal>,
    limit_price: Option<Decimal>,
    avg_filled_price: Option<Decimal>,
    currency: String,
    create_time: Option<String>,
    client_order_id: String,
}

impl Order {
    pub fn from_record(record: &Record) -> Self {
        let text = |key: &str, default: &str| {
            record
                .get(key)
                .and_then(|value| match value {
                    Value::String(text) => Some(text.clone()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .unwrap_or_else(|| default.to_string())
        };
        let decimal = |key: &str| record.get(key).and_then(decimal_from_value);

        Self {
            symbol: text("symbol", "N/A"),
            instrument_name: text("instrument_name", "N/A"),
            side: Code::parse(&text("side", "N/A")),
            order_type: Code::parse(&text("order_type", "N/A")),
            status: Code::parse(&text("status", "N/A")),
            quantity: record.get("qty").cloned(),
            filled_quantity: decimal("filled_qty"),
            limit_price: decimal("limit_price"),
            avg_filled_price: decimal("avg_filled_price"),
            currency: text("currency", USD),
            create_time: record
                .get("create_time")
                .and_then(Value::as_str)
                .filter(|time| !time.is_empty())
                .map(str::to_string),
            client_order_id: text("client_order_id", "N/A"),
        }
    }

    pub fn is_limit(&self) -> bool {
        self.order_type == Code::Known(OrderType::Limit)
    }

    /// `create_time` as `%Y-%m-%d %H:%M:%S`, or verbatim when it is not an
    /// ISO-8601 timestamp.
    pub fn created_at_display(&self) -> Option<String> {
        self.create_time.as_deref().map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|parsed| parsed.naive_local())
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
                .map(|parsed| parsed.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|_| raw.to_string())
        })
    }

    /// Sort key: newest first when sorted descending.
    pub fn create_time_key(&self) -> &str {
        self.create_time.as_deref().unwrap_or("")
    }
}
