//! Pure view models: functions of session state to display data, with no
//! rendering in them. Front ends draw these and route events back into the
//! session.

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use cart::{cart_view, CartLineView, CartView};
pub use catalog::{catalog_view, CatalogView, CategoryFilter, FilterButton, ProductCard};
pub use checkout::{checkout_view, CheckoutView};
