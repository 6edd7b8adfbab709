use serde::{Deserialize, Serialize};

/// Accepted payment methods. Qris is an exact-amount path: the received
/// amount always equals the grand total, so no change is computed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Qris,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Qris => "qris",
        }
    }
}
