//! pos-backend: in-memory implementation of the catalog gateway.
//!
//! Stands in for the real POS backend in tests and offline runs, applying
//! the same order validation the server does (unknown product, insufficient
//! stock, insufficient payment) and decrementing stock on accepted orders.

pub mod memory;

pub use memory::InMemoryBackend;
