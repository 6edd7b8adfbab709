pub mod checkout;
pub mod session;
