pub mod catalog_gateway;
