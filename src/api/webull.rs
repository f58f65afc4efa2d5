use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue},
};
use tracing::debug;

use super::{
    client::{ApiResponse, TradingApi},
    signer,
};
use crate::config::Settings;

pub mod paths {
    pub const SUBSCRIPTIONS: &str = "/app/subscriptions/list";
    pub const ACCOUNT_BALANCE: &str = "/account/balance";
    pub const ACCOUNT_POSITIONS: &str = "/account/positions";
    pub const TODAY_ORDERS: &str = "/trade/orders/list-today";
}

/// Signed HTTP client for the Webull Japan OpenAPI.
#[derive(Clone, Debug)]
pub struct WebullClient {
    client: Client,
    settings: Settings,
}

impl WebullClient {
    pub fn new(settings: Settings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    async fn get(&self, path: &str, query: Vec<(&str, String)>) -> Result<ApiResponse> {
        let host = self.settings.endpoint().as_str();
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let nonce = signer::nonce();

        let mut sign_params: BTreeMap<String, String> = query
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();
        let auth_headers = [
            ("x-app-key", self.settings.app_key().clone()),
            ("x-signature-algorithm", signer::SIGNATURE_ALGORITHM.to_string()),
            ("x-signature-version", signer::SIGNATURE_VERSION.to_string()),
            ("x-signature-nonce", nonce),
            ("x-timestamp", timestamp),
        ];
        for (name, value) in &auth_headers {
            sign_params.insert(name.to_string(), value.clone());
        }
        sign_params.insert(String::from("host"), host.to_string());

        let string_to_sign = signer::string_to_sign(path, &sign_params, None);
        let signature = signer::sign(self.settings.app_secret(), &string_to_sign)?;

        let mut headers = HeaderMap::new();
        for (name, value) in auth_headers {
            headers.insert(name, HeaderValue::from_str(&value)?);
        }
        headers.insert("x-signature", HeaderValue::from_str(&signature)?);
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let url = format!("https://{}{}", host, path);
        debug!("GET {} {:?}", url, query);

        let res = self
            .client
            .get(&url)
            .headers(headers)
            .query(&query)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", path))?;

        let status = res.status().as_u16();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", path))?;

        debug!("{} -> {}", path, status);

        Ok(ApiResponse::new(status, body))
    }
}

impl TradingApi for WebullClient {
    async fn get_app_subscriptions(&self) -> Result<ApiResponse> {
        self.get(paths::SUBSCRIPTIONS, Vec::new()).await
    }

    async fn get_account_balance(
        &self,
        account_id: &str,
        total_asset_currency: &str,
    ) -> Result<ApiResponse> {
        let query = vec![
            ("account_id", account_id.to_string()),
            ("total_asset_currency", total_asset_currency.to_string()),
        ];
        self.get(paths::ACCOUNT_BALANCE, query).await
    }

    async fn get_account_positions(
        &self,
        account_id: &str,
        page_size: u32,
        last_instrument_id: Option<&str>,
    ) -> Result<ApiResponse> {
        let mut query = vec![
            ("account_id", account_id.to_string()),
            ("page_size", page_size.to_string()),
        ];
        if let Some(last_instrument_id) = last_instrument_id {
            query.push(("last_instrument_id", last_instrument_id.to_string()));
        }
        self.get(paths::ACCOUNT_POSITIONS, query).await
    }

    async fn list_today_orders(
        &self,
        account_id: &str,
        page_size: u32,
        last_client_order_id: Option<&str>,
    ) -> Result<ApiResponse> {
        let mut query = vec![
            ("account_id", account_id.to_string()),
            ("page_size", page_size.to_string()),
        ];
        if let Some(last_client_order_id) = last_client_order_id {
            query.push(("last_client_order_id", last_client_order_id.to_string()));
        }
        self.get(paths::TODAY_ORDERS, query).await
    }
}
