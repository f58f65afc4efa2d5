use serde_json::Value;

use super::Record;

/// A logical attribute and the source keys that may carry it, in priority
/// order. A dotted key (`ticker.symbol`) walks into a nested object.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub keys: &'static [&'static str],
}

/// The value chosen for a field together with the key it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolved<'a> {
    pub key: &'static str,
    pub value: &'a Value,
}

pub const SYMBOL: Field = Field {
    name: "symbol",
    keys: &["ticker.symbol", "symbol"],
};
pub const NAME: Field = Field {
    name: "name",
    keys: &["ticker.name", "instrument_name"],
};
pub const QUANTITY: Field = Field {
    name: "quantity",
    keys: &["position", "quantity", "qty"],
};
pub const MARKET_VALUE: Field = Field {
    name: "market_value",
    keys: &["marketValue", "market_value"],
};
pub const COST_PRICE: Field = Field {
    name: "cost_price",
    keys: &["costPrice", "cost_price", "cost"],
};
pub const LAST_PRICE: Field = Field {
    name: "last_price",
    keys: &["lastPrice", "last_price"],
};
pub const UNREALIZED_PROFIT_LOSS: Field = Field {
    name: "unrealized_profit_loss",
    keys: &["unrealizedProfitLoss", "unrealized_profit_loss"],
};
pub const UNREALIZED_PROFIT_LOSS_RATE: Field = Field {
    name: "unrealized_profit_loss_rate",
    keys: &["unrealizedProfitLossRate", "unrealized_profit_loss_rate"],
};
pub const REALIZED_PROFIT_LOSS: Field = Field {
    name: "realized_profit_loss",
    keys: &["realizedProfitLoss", "realized_profit_loss"],
};
pub const CURRENCY: Field = Field {
    name: "currency",
    keys: &["currency"],
};
pub const INSTRUMENT_ID: Field = Field {
    name: "instrument_id",
    keys: &["instrument_id", "instrumentId"],
};
pub const INSTRUMENT_TYPE: Field = Field {
    name: "instrument_type",
    keys: &["instrument_type", "instrumentType"],
};

impl Field {
    /// First present, non-null candidate. Later candidates are not consulted
    /// once one matches, even if they disagree.
    pub fn resolve<'a>(&self, record: &'a Record) -> Option<Resolved<'a>> {
        self.keys.iter().find_map(|key| {
            lookup(record, key)
                .filter(|value| !value.is_null())
                .map(|value| Resolved { key: *key, value })
        })
    }

    pub fn value<'a>(&self, record: &'a Record) -> Option<&'a Value> {
        self.resolve(record).map(|resolved| resolved.value)
    }

    pub fn text(&self, record: &Record) -> Option<String> {
        self.value(record).map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }

    pub fn is_present(&self, record: &Record) -> bool {
        self.resolve(record).is_some()
    }
}

fn lookup<'a>(record: &'a Record, key: &str) -> Option<&'a Value> {
    let mut parts = key.split('.');
    let first = record.get(parts.next()?)?;
    parts.try_fold(first, |current, part| current.as_object()?.get(part))
}
