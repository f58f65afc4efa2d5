use anyhow::{Context, Result};
use derive_getters::Getters;
use derive_new::new;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{operation} failed with status {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },
}

/// Status code and raw body of one API call.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct ApiResponse {
    status: u16,
    body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(&self.body)
            .with_context(|| format!("Failed to decode response body: {}", self.body))
    }

    pub fn error_for_status(self, operation: &'static str) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                operation,
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// The account and order queries the reports rely on.
///
/// Transport failures are errors; a response with a non-success status is
/// returned as-is so callers can report the code and body.
#[allow(async_fn_in_trait)]
pub trait TradingApi {
    async fn get_app_subscriptions(&self) -> Result<ApiResponse>;

    async fn get_account_balance(
        &self,
        account_id: &str,
        total_asset_currency: &str,
    ) -> Result<ApiResponse>;

    async fn get_account_positions(
        &self,
        account_id: &str,
        page_size: u32,
        last_instrument_id: Option<&str>,
    ) -> Result<ApiResponse>;

    async fn list_today_orders(
        &self,
        account_id: &str,
        page_size: u32,
        last_client_order_id: Option<&str>,
    ) -> Result<ApiResponse>;
}
