pub mod client;
pub mod dto;
pub mod signer;
pub mod utils;
pub mod webull;

pub use client::{ApiError, ApiResponse, TradingApi};
pub use webull::WebullClient;
