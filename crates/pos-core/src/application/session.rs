use pos_types::domain::cart::{Cart, Totals};
use pos_types::domain::catalog::Catalog;
use pos_types::domain::payment::PaymentMethod;
use pos_types::ports::catalog_gateway::{CatalogGateway, OrderDraft, OrderLine, OrderReceipt};

use crate::application::checkout::{CheckoutSession, CheckoutState};
use crate::errors::PosError;

/// The whole terminal session behind one gateway: catalog snapshot, running
/// cart, and checkout lifecycle.
///
/// Single logical actor; every mutation happens on a discrete user event or
/// network completion, and callers re-render from the view models after each
/// call.
pub struct PosSession<G: CatalogGateway> {
    gateway: G,
    catalog: Catalog,
    cart: Cart,
    checkout: CheckoutState,
}

impl<G: CatalogGateway> PosSession<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            catalog: Catalog::default(),
            cart: Cart::new(),
            checkout: CheckoutState::Closed,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn checkout(&self) -> &CheckoutState {
        &self.checkout
    }

    pub fn totals(&self) -> Totals {
        self.cart.totals()
    }

    /// Replace the catalog snapshot. On failure the previous snapshot is
    /// kept; the error is logged and returned for an optional notice, never
    /// treated as fatal.
    pub async fn load_catalog(&mut self) -> Result<(), PosError> {
        match self.gateway.load_catalog().await {
            Ok(catalog) => {
                tracing::info!(
                    products = catalog.products.len(),
                    categories = catalog.categories.len(),
                    "catalog loaded"
                );
                self.catalog = catalog;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("catalog load failed: {e}");
                Err(e.into())
            }
        }
    }

    /// Add one unit of a product, capped at stock for managed products.
    pub fn add_to_cart(&mut self, product_id: i64) -> Result<(), PosError> {
        let product = self
            .catalog
            .product(product_id)
            .ok_or_else(|| PosError::Validation(format!("Unknown product {product_id}")))?
            .clone();
        self.cart.add(&product).map_err(|e| {
            tracing::warn!(product_id, "add rejected: {e}");
            PosError::from(e)
        })
    }

    /// Adjust a line by `delta`; dropping to zero removes the line.
    pub fn update_quantity(&mut self, product_id: i64, delta: i32) -> Result<(), PosError> {
        self.cart.update_quantity(product_id, delta).map_err(|e| {
            tracing::warn!(product_id, delta, "quantity change rejected: {e}");
            PosError::from(e)
        })
    }

    /// Open the payment dialog, snapshotting the grand total.
    pub fn open_checkout(&mut self) -> Result<(), PosError> {
        if self.cart.is_empty() {
            return Err(PosError::Validation("Cart is empty".into()));
        }
        match self.checkout {
            CheckoutState::Closed => {
                self.checkout = CheckoutState::Open(CheckoutSession::open(self.totals().total));
                Ok(())
            }
            _ => Err(PosError::State("checkout already open".into())),
        }
    }

    /// Discard the checkout session. The cart is untouched.
    pub fn close_checkout(&mut self) -> Result<(), PosError> {
        match self.checkout {
            CheckoutState::Open(_) => {
                self.checkout = CheckoutState::Closed;
                Ok(())
            }
            CheckoutState::Submitting(_) => {
                Err(PosError::State("submission in flight".into()))
            }
            CheckoutState::Closed => Ok(()),
        }
    }

    pub fn select_payment(&mut self, method: PaymentMethod) -> Result<(), PosError> {
        match &mut self.checkout {
            CheckoutState::Open(session) => {
                session.select_method(method);
                Ok(())
            }
            _ => Err(PosError::State("checkout is not open".into())),
        }
    }

    pub fn enter_amount(&mut self, raw: &str) -> Result<(), PosError> {
        match &mut self.checkout {
            CheckoutState::Open(session) => {
                session.enter_amount(raw);
                Ok(())
            }
            _ => Err(PosError::State("checkout is not open".into())),
        }
    }

    /// Post the order. Success clears the cart, closes checkout and reloads
    /// the catalog to pick up decremented stock; failure reopens the session
    /// with cart and amounts untouched so the user can retry.
    pub async fn submit_order(&mut self) -> Result<OrderReceipt, PosError> {
        let session = match &self.checkout {
            CheckoutState::Open(s) if s.confirm_enabled() => s.clone(),
            CheckoutState::Open(_) => {
                return Err(PosError::Validation("Insufficient payment".into()))
            }
            CheckoutState::Submitting(_) => {
                return Err(PosError::State("submission already in flight".into()))
            }
            CheckoutState::Closed => {
                return Err(PosError::State("checkout is not open".into()))
            }
        };

        let draft = OrderDraft {
            cart: self
                .cart
                .lines()
                .map(|l| OrderLine {
                    product_id: l.product.id,
                    quantity: l.quantity,
                })
                .collect(),
            payment_method: session.method(),
            amount_received: session.amount_received(),
        };

        self.checkout = CheckoutState::Submitting(session.clone());
        match self.gateway.submit_order(draft).await {
            Ok(receipt) => {
                tracing::info!(code = %receipt.transaction_code, "order accepted");
                self.cart.clear();
                self.checkout = CheckoutState::Closed;
                // Refresh stock; a failed refresh only logs, the sale stands.
                let _ = self.load_catalog().await;
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!("order submit failed: {e}");
                self.checkout = CheckoutState::Open(session);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pos_backend::memory::InMemoryBackend;
    use pos_types::domain::catalog::{Category, Product};
    use pos_types::ports::catalog_gateway::GatewayError;

    fn seeded_backend() -> InMemoryBackend {
        InMemoryBackend::seeded(
            vec![
                Product {
                    id: 1,
                    category_id: 1,
                    category_name: Some("Food".into()),
                    name: "Nasi Goreng".into(),
                    price: 10_000,
                    is_inventory_managed: true,
                    stock_quantity: 5,
                    image_url: None,
                },
                Product {
                    id: 2,
                    category_id: 2,
                    category_name: Some("Drinks".into()),
                    name: "Es Teh".into(),
                    price: 5_000,
                    is_inventory_managed: false,
                    stock_quantity: 0,
                    image_url: None,
                },
            ],
            vec![
                Category { id: 1, name: "Food".into() },
                Category { id: 2, name: "Drinks".into() },
            ],
        )
    }

    async fn loaded_session() -> PosSession<InMemoryBackend> {
        let mut s = PosSession::new(seeded_backend());
        s.load_catalog().await.unwrap();
        s
    }

    #[tokio::test]
    async fn add_unknown_product_is_rejected() {
        let mut s = loaded_session().await;
        let err = s.add_to_cart(99).unwrap_err();
        assert!(matches!(err, PosError::Validation(_)));
        assert!(s.cart().is_empty());
    }

    #[tokio::test]
    async fn stock_cap_holds_across_session_ops() {
        let mut s = loaded_session().await;
        for _ in 0..5 {
            s.add_to_cart(1).unwrap();
        }
        assert!(matches!(s.add_to_cart(1), Err(PosError::Validation(_))));
        assert_eq!(s.cart().quantity_of(1), 5);
        assert!(matches!(s.update_quantity(1, 1), Err(PosError::Validation(_))));
        assert_eq!(s.cart().quantity_of(1), 5);
    }

    #[tokio::test]
    async fn open_checkout_requires_items_and_snapshots_total() {
        let mut s = loaded_session().await;
        assert!(matches!(s.open_checkout(), Err(PosError::Validation(_))));

        s.add_to_cart(1).unwrap();
        s.add_to_cart(1).unwrap();
        s.open_checkout().unwrap();
        match s.checkout() {
            CheckoutState::Open(session) => assert_eq!(session.grand_total(), 22_000),
            other => panic!("expected open checkout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn close_preserves_cart() {
        let mut s = loaded_session().await;
        s.add_to_cart(1).unwrap();
        s.open_checkout().unwrap();
        s.close_checkout().unwrap();
        assert_eq!(*s.checkout(), CheckoutState::Closed);
        assert_eq!(s.cart().quantity_of(1), 1);
    }

    #[tokio::test]
    async fn cash_submit_requires_sufficient_amount() {
        let mut s = loaded_session().await;
        s.add_to_cart(1).unwrap();
        s.open_checkout().unwrap();
        s.enter_amount("5000").unwrap();
        let err = s.submit_order().await.unwrap_err();
        assert!(matches!(err, PosError::Validation(_)));
        // Still open, cart untouched.
        assert!(s.checkout().is_open());
        assert_eq!(s.cart().quantity_of(1), 1);
    }

    #[tokio::test]
    async fn successful_submit_clears_cart_and_refreshes_stock() {
        let mut s = loaded_session().await;
        s.add_to_cart(1).unwrap();
        s.add_to_cart(1).unwrap();
        s.open_checkout().unwrap();
        s.select_payment(PaymentMethod::Qris).unwrap();

        let receipt = s.submit_order().await.unwrap();
        assert!(receipt.transaction_code.starts_with("TRX-"));
        assert!(s.cart().is_empty());
        assert_eq!(*s.checkout(), CheckoutState::Closed);
        // Reloaded catalog shows the decremented stock.
        assert_eq!(s.catalog().product(1).unwrap().stock_quantity, 3);
    }

    #[tokio::test]
    async fn unmanaged_product_sells_without_stock_checks() {
        let mut s = loaded_session().await;
        s.add_to_cart(2).unwrap();
        s.add_to_cart(2).unwrap();
        s.open_checkout().unwrap();
        s.enter_amount("11000").unwrap();
        let receipt = s.submit_order().await.unwrap();
        assert!(!receipt.transaction_code.is_empty());
        assert!(s.cart().is_empty());
    }

    #[tokio::test]
    async fn server_rejection_reopens_checkout() {
        let mut s = loaded_session().await;
        s.add_to_cart(1).unwrap();
        s.open_checkout().unwrap();
        // Force a server-side rejection: zero the backend stock behind the
        // session's back, then pay exactly.
        s.gateway.set_stock(1, 0);
        s.select_payment(PaymentMethod::Qris).unwrap();

        let err = s.submit_order().await.unwrap_err();
        assert!(matches!(err, PosError::Gateway(GatewayError::Rejected(_))));
        assert!(s.checkout().is_open());
        assert_eq!(s.cart().quantity_of(1), 1);
    }
}
