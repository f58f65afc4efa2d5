use derive_getters::Getters;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::format::raw_string;

#[derive(Clone, Debug, Deserialize, Getters)]
pub struct BalanceDto {
    account_id: Option<Value>,
    #[serde(default)]
    account_currency_assets: Vec<CurrencyAssetDto>,
    #[serde(flatten)]
    other: Map<String, Value>,
}

impl BalanceDto {
    pub fn account_id_display(&self) -> Option<String> {
        self.account_id
            .as_ref()
            .filter(|id| !id.is_null())
            .map(|id| raw_string(Some(id)))
    }
}

#[derive(Clone, Debug, Deserialize, Getters)]
pub struct CurrencyAssetDto {
    currency: Option<String>,
    total_cash: Option<Value>,
    settled_cash: Option<Value>,
    unsettled_cash: Option<Value>,
    frozen_cash: Option<Value>,
    available_to_withdraw: Option<Value>,
    stock_power: Option<Value>,
}

impl CurrencyAssetDto {
    pub fn currency_code(&self) -> &str {
        self.currency.as_deref().unwrap_or("N/A")
    }
}

/// One page of `/account/positions`.
#[derive(Clone, Debug, Default, Deserialize, Getters)]
pub struct HoldingsPageDto {
    #[serde(default)]
    holdings: Vec<Value>,
    #[serde(default)]
    has_next: bool,
}

/// One page of today's orders.
#[derive(Clone, Debug, Default, Deserialize, Getters)]
pub struct OrdersPageDto {
    #[serde(default)]
    data: Vec<Value>,
}
