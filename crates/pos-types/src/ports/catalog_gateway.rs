use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::Catalog;
use crate::domain::payment::PaymentMethod;

/// Failures crossing the backend boundary. None of these are fatal; the
/// caller keeps its state and may retry.
#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(String),

    /// The backend refused the order (e.g. a stock race lost server-side).
    /// Carries the server-provided message verbatim.
    #[error("{0}")]
    Rejected(String),
}

/// One order line as posted to `POST /api/orders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: i64,
    pub quantity: u32,
}

/// The order payload: `{cart, payment_method, amount_received}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub cart: Vec<OrderLine>,
    pub payment_method: PaymentMethod,
    pub amount_received: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderReceipt {
    pub transaction_code: String,
}

/// Outbound port to the POS backend: one catalog fetch, one order submit.
#[async_trait]
pub trait CatalogGateway: Send + Sync + 'static {
    async fn load_catalog(&self) -> Result<Catalog, GatewayError>;
    async fn submit_order(&self, draft: OrderDraft) -> Result<OrderReceipt, GatewayError>;
}
