use anyhow::{Result, anyhow};
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use super::{Record, fields};
use crate::format::{USD, decimal_from_value};

/// Outcome of reading a position's quantity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QuantityCheck {
    Positive,
    NotPositive,
    Unparsable,
}

impl QuantityCheck {
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => QuantityCheck::NotPositive,
            Some(Value::Bool(flag)) => Self::from_sign(*flag),
            Some(Value::String(text)) if text.is_empty() => QuantityCheck::NotPositive,
            Some(Value::Array(items)) if items.is_empty() => QuantityCheck::NotPositive,
            Some(Value::Object(map)) if map.is_empty() => QuantityCheck::NotPositive,
            Some(value) => match decimal_from_value(value) {
                Some(quantity) => Self::from_sign(quantity > Decimal::ZERO),
                None => QuantityCheck::Unparsable,
            },
        }
    }

    fn from_sign(positive: bool) -> Self {
        if positive {
            QuantityCheck::Positive
        } else {
            QuantityCheck::NotPositive
        }
    }

    /// Unparsable quantities are kept so that odd payloads still show up.
    pub fn is_held(&self) -> bool {
        !matches!(self, QuantityCheck::NotPositive)
    }
}

/// Keeps the records whose quantity is strictly positive or unreadable.
pub fn retain_held(records: Vec<Record>) -> Vec<Record> {
    records
        .into_iter()
        .filter(|record| QuantityCheck::of(fields::QUANTITY.value(record)).is_held())
        .collect()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProfitLossSource {
    Reported,
    Computed,
}

#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct ProfitLoss {
    amount: Decimal,
    percent: Decimal,
    source: ProfitLossSource,
}

/// Market value and profit/loss derived from quantity, cost and last price.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct Valuation {
    market_value: Decimal,
    profit_loss: Decimal,
    profit_loss_percent: Decimal,
}

#[derive(Clone, Debug, Getters)]
pub struct Position {
    symbol: String,
    name: Option<String>,
    instrument_id: Option<String>,
    instrument_type: Option<String>,
    currency: String,
    quantity: Option<Value>,
    cost_price: Option<Value>,
    last_price: Option<Value>,
    market_value: Option<Value>,
    unrealized_profit_loss: Option<Value>,
    unrealized_profit_loss_rate: Option<Value>,
    realized_profit_loss: Option<Value>,
}

impl Position {
    pub fn from_record(record: &Record) -> Self {
        let value = |field: fields::Field| field.value(record).cloned();

        Self {
            symbol: fields::SYMBOL
                .text(record)
                .unwrap_or_else(|| String::from("N/A")),
            name: fields::NAME.text(record),
            instrument_id: fields::INSTRUMENT_ID.text(record),
            instrument_type: fields::INSTRUMENT_TYPE.text(record),
            currency: fields::CURRENCY
                .text(record)
                .filter(|currency| !currency.is_empty())
                .unwrap_or_else(|| USD.to_string()),
            quantity: value(fields::QUANTITY),
            cost_price: value(fields::COST_PRICE),
            last_price: value(fields::LAST_PRICE),
            market_value: value(fields::MARKET_VALUE),
            unrealized_profit_loss: value(fields::UNREALIZED_PROFIT_LOSS),
            unrealized_profit_loss_rate: value(fields::UNREALIZED_PROFIT_LOSS_RATE),
            realized_profit_loss: value(fields::REALIZED_PROFIT_LOSS),
        }
    }

    pub fn quantity_value(&self) -> Result<Decimal> {
        number_or_zero(self.quantity.as_ref(), "quantity")
    }

    pub fn cost_price_value(&self) -> Result<Decimal> {
        number_or_zero(self.cost_price.as_ref(), "cost price")
    }

    pub fn last_price_value(&self) -> Result<Decimal> {
        number_or_zero(self.last_price.as_ref(), "last price")
    }

    pub fn market_value_value(&self) -> Result<Decimal> {
        number_or_zero(self.market_value.as_ref(), "market value")
    }

    /// Profit/loss as reported by the API when both the amount and the rate
    /// are present, otherwise computed from cost and last price when all of
    /// cost, last price and quantity are positive.
    pub fn profit_loss(&self) -> Result<Option<ProfitLoss>> {
        if let (Some(amount), Some(rate)) = (
            self.unrealized_profit_loss.as_ref(),
            self.unrealized_profit_loss_rate.as_ref(),
        ) {
            let amount = number(amount, "unrealized profit/loss")?;
            let rate = number(rate, "unrealized profit/loss rate")?;
            return Ok(Some(ProfitLoss::new(
                amount,
                rate * dec!(100),
                ProfitLossSource::Reported,
            )));
        }

        let cost = self.cost_price_value()?;
        let last = self.last_price_value()?;
        let quantity = self.quantity_value()?;

        if cost > Decimal::ZERO && last > Decimal::ZERO && quantity > Decimal::ZERO {
            let amount = (last - cost) * quantity;
            let percent = (last - cost) / cost * dec!(100);
            return Ok(Some(ProfitLoss::new(
                amount,
                percent,
                ProfitLossSource::Computed,
            )));
        }

        Ok(None)
    }

    /// Market value as quantity x last price. The percentage is zero when
    /// the cost price is zero.
    pub fn valuation(&self) -> Result<Valuation> {
        let quantity = self.quantity_value()?;
        let last = self.last_price_value()?;
        let cost = self.cost_price_value()?;

        let profit_loss = (last - cost) * quantity;
        let profit_loss_percent = if cost.is_zero() {
            Decimal::ZERO
        } else {
            (last - cost) / cost * dec!(100)
        };

        Ok(Valuation::new(last * quantity, profit_loss, profit_loss_percent))
    }
}

fn number_or_zero(value: Option<&Value>, what: &str) -> Result<Decimal> {
    match value {
        None | Some(Value::Null) => Ok(Decimal::ZERO),
        Some(Value::String(text)) if text.is_empty() => Ok(Decimal::ZERO),
        Some(value) => number(value, what),
    }
}

fn number(value: &Value, what: &str) -> Result<Decimal> {
    decimal_from_value(value).ok_or_else(|| anyhow!("Invalid {} '{}'", what, value))
}
