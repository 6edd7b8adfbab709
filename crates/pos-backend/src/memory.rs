use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use dashmap::DashMap;
use uuid::Uuid;

use pos_types::domain::cart::tax_on;
use pos_types::domain::catalog::{Catalog, Category, Product};
use pos_types::ports::catalog_gateway::{CatalogGateway, GatewayError, OrderDraft, OrderReceipt};

/// An accepted order, kept for inspection in tests.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub transaction_code: String,
    pub draft: OrderDraft,
    pub grand_total: i64,
    pub change: i64,
}

/// In-memory POS backend: a seeded catalog plus an order log.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    products: Arc<DashMap<i64, Product>>,
    categories: Arc<Vec<Category>>,
    orders: Arc<DashMap<String, PlacedOrder>>,
}

impl InMemoryBackend {
    pub fn seeded(products: Vec<Product>, categories: Vec<Category>) -> Self {
        let map = DashMap::new();
        for p in products {
            map.insert(p.id, p);
        }
        Self {
            products: Arc::new(map),
            categories: Arc::new(categories),
            orders: Arc::new(DashMap::new()),
        }
    }

    /// Overwrite a product's stock, e.g. to simulate a stock race lost to
    /// another terminal.
    pub fn set_stock(&self, product_id: i64, stock_quantity: u32) {
        if let Some(mut p) = self.products.get_mut(&product_id) {
            p.stock_quantity = stock_quantity;
        }
    }

    pub fn orders(&self) -> Vec<PlacedOrder> {
        self.orders.iter().map(|kv| kv.value().clone()).collect()
    }

    fn transaction_code() -> String {
        let date = Local::now().format("%Y%m%d");
        let suffix = Uuid::new_v4().simple().to_string()[..4].to_uppercase();
        format!("TRX-{date}-{suffix}")
    }
}

#[async_trait]
impl CatalogGateway for InMemoryBackend {
    async fn load_catalog(&self) -> Result<Catalog, GatewayError> {
        let mut products: Vec<Product> =
            self.products.iter().map(|kv| kv.value().clone()).collect();
        products.sort_by_key(|p| p.id);
        Ok(Catalog {
            products,
            categories: self.categories.as_ref().clone(),
        })
    }

    async fn submit_order(&self, draft: OrderDraft) -> Result<OrderReceipt, GatewayError> {
        if draft.cart.is_empty() {
            return Err(GatewayError::Rejected("Cart is empty".into()));
        }

        // Aggregate duplicate lines per product so the stock check sees the
        // cumulative quantity, then validate everything before touching
        // stock; a rejection leaves the catalog unchanged.
        let mut required: BTreeMap<i64, u32> = BTreeMap::new();
        for line in &draft.cart {
            *required.entry(line.product_id).or_default() += line.quantity;
        }

        let mut total = 0i64;
        for (&product_id, &quantity) in &required {
            let product = self.products.get(&product_id).ok_or_else(|| {
                GatewayError::Rejected(format!("Product ID {product_id} not found."))
            })?;
            if product.is_inventory_managed && product.stock_quantity < quantity {
                return Err(GatewayError::Rejected(format!(
                    "Insufficient stock for {}. Available: {}",
                    product.name, product.stock_quantity
                )));
            }
            total += product.price * i64::from(quantity);
        }

        let grand_total = total + tax_on(total);
        let change = draft.amount_received - grand_total;
        if change < 0 {
            return Err(GatewayError::Rejected(format!(
                "Insufficient payment. Total: {}, Received: {}",
                grand_total, draft.amount_received
            )));
        }

        for (&product_id, &quantity) in &required {
            if let Some(mut product) = self.products.get_mut(&product_id) {
                if product.is_inventory_managed {
                    product.stock_quantity -= quantity;
                }
            }
        }

        let transaction_code = Self::transaction_code();
        tracing::info!(code = %transaction_code, grand_total, "order placed");
        self.orders.insert(
            transaction_code.clone(),
            PlacedOrder {
                transaction_code: transaction_code.clone(),
                draft,
                grand_total,
                change,
            },
        );
        Ok(OrderReceipt { transaction_code })
    }
}
