use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Product;

/// Tax applied on top of the cart subtotal, in percent.
pub const TAX_RATE_PERCENT: i64 = 10;

/// Shared tax policy: round-half-up on whole-rupiah amounts.
///
/// Every place that shows or charges tax goes through this function, so the
/// cart summary and the checkout snapshot cannot disagree.
pub fn tax_on(subtotal: i64) -> i64 {
    (subtotal * TAX_RATE_PERCENT + 50) / 100
}

/// Format a rupiah amount for display ("Rp 15.000", dot-grouped, no
/// decimals).
pub fn format_idr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Insufficient stock! Only {available} left.")]
    InsufficientStock { available: u32 },
}

/// One cart entry. The product is snapshotted at add time; quantity is
/// always >= 1 (a line that would drop to zero is removed from the cart).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> i64 {
        self.product.price * i64::from(self.quantity)
    }
}

/// The running cart: at most one line per product id.
///
/// For inventory-managed products the quantity never exceeds
/// `stock_quantity`; both mutation paths reject the change instead of
/// clamping.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: BTreeMap<i64, CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, product_id: i64) -> u32 {
        self.lines.get(&product_id).map_or(0, |l| l.quantity)
    }

    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    /// Add one unit of `product`, creating the line at quantity 1 when
    /// absent.
    pub fn add(&mut self, product: &Product) -> Result<(), CartError> {
        if product.is_inventory_managed && self.quantity_of(product.id) >= product.stock_quantity {
            return Err(CartError::InsufficientStock {
                available: product.stock_quantity,
            });
        }
        self.lines
            .entry(product.id)
            .and_modify(|l| l.quantity += 1)
            .or_insert_with(|| CartLine {
                product: product.clone(),
                quantity: 1,
            });
        Ok(())
    }

    /// Adjust a line by `delta`. No-op without a line; a result <= 0 removes
    /// the line; an increase past stock on a managed product is rejected.
    pub fn update_quantity(&mut self, product_id: i64, delta: i32) -> Result<(), CartError> {
        let Some(line) = self.lines.get_mut(&product_id) else {
            return Ok(());
        };
        let new_qty = i64::from(line.quantity) + i64::from(delta);
        if new_qty <= 0 {
            self.lines.remove(&product_id);
            return Ok(());
        }
        let new_qty = new_qty as u32;
        if delta > 0 && line.product.is_inventory_managed && new_qty > line.product.stock_quantity {
            return Err(CartError::InsufficientStock {
                available: line.product.stock_quantity,
            });
        }
        line.quantity = new_qty;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn totals(&self) -> Totals {
        Totals::of(self)
    }
}

/// Subtotal, tax and grand total for a cart. Depends only on the current
/// lines, never on mutation history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

impl Totals {
    pub fn of(cart: &Cart) -> Self {
        let subtotal = cart.lines().map(CartLine::line_total).sum();
        let tax = tax_on(subtotal);
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}
