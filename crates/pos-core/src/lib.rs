//! pos-core: application layer of the POS terminal client.
//!
//! Owns the session state (catalog snapshot, cart, checkout) behind the
//! `CatalogGateway` port, plus pure view-model functions so front ends stay
//! imperative shells over precomputed display data.

pub mod config;
pub mod errors;

pub mod application;
pub mod view;

pub use pos_types::{domain, ports};
