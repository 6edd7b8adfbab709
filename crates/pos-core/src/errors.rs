use pos_types::domain::cart::CartError;
use pos_types::ports::catalog_gateway::GatewayError;
use thiserror::Error;

/// Application-level failures. All are recoverable: state is left untouched
/// and the user may retry the action.
#[derive(Error, Debug)]
pub enum PosError {
    /// A mutation was rejected (stock exceeded, insufficient cash, empty
    /// cart). Shown to the user as a transient warning.
    #[error("{0}")]
    Validation(String),

    /// An operation arrived in the wrong checkout state.
    #[error("invalid state: {0}")]
    State(String),

    /// The backend call failed (transport, decode, or server rejection).
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl From<CartError> for PosError {
    fn from(e: CartError) -> Self {
        Self::Validation(e.to_string())
    }
}
