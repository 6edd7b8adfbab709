//! Gateway selection: a configured API URL talks HTTP, no URL runs the
//! seeded in-memory backend.

use async_trait::async_trait;

use pos_backend::memory::InMemoryBackend;
use pos_client::PosClient;
use pos_types::domain::catalog::{Catalog, Category, Product};
use pos_types::ports::catalog_gateway::{CatalogGateway, GatewayError, OrderDraft, OrderReceipt};

pub enum AnyGateway {
    Http(PosClient),
    Memory(InMemoryBackend),
}

pub fn build_gateway(api_url: Option<&str>) -> anyhow::Result<AnyGateway> {
    match api_url {
        Some(url) => {
            tracing::info!(url, "using HTTP backend");
            Ok(AnyGateway::Http(PosClient::new(url)?))
        }
        None => {
            tracing::info!("POS_API_URL not set, using in-memory demo backend");
            Ok(AnyGateway::Memory(demo_backend()))
        }
    }
}

#[async_trait]
impl CatalogGateway for AnyGateway {
    async fn load_catalog(&self) -> Result<Catalog, GatewayError> {
        match self {
            Self::Http(client) => client.load_catalog().await,
            Self::Memory(backend) => backend.load_catalog().await,
        }
    }

    async fn submit_order(&self, draft: OrderDraft) -> Result<OrderReceipt, GatewayError> {
        match self {
            Self::Http(client) => client.submit_order(draft).await,
            Self::Memory(backend) => backend.submit_order(draft).await,
        }
    }
}

fn demo_product(
    id: i64,
    category_id: i64,
    name: &str,
    price: i64,
    stock: Option<u32>,
) -> Product {
    Product {
        id,
        category_id,
        category_name: None,
        name: name.into(),
        price,
        is_inventory_managed: stock.is_some(),
        stock_quantity: stock.unwrap_or(0),
        image_url: None,
    }
}

fn demo_backend() -> InMemoryBackend {
    InMemoryBackend::seeded(
        vec![
            demo_product(1, 1, "Nasi Goreng", 18_000, Some(10)),
            demo_product(2, 1, "Mie Ayam", 15_000, Some(6)),
            demo_product(3, 1, "Ayam Geprek", 20_000, Some(0)),
            demo_product(4, 2, "Es Teh", 5_000, None),
            demo_product(5, 2, "Kopi Susu", 12_000, None),
        ],
        vec![
            Category { id: 1, name: "Food".into() },
            Category { id: 2, name: "Drinks".into() },
        ],
    )
}
