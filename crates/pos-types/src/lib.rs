//! pos-types: domain model and outbound port for the POS terminal client.

pub mod domain;
pub mod ports;
