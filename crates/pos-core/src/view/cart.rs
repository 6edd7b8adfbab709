use pos_types::domain::cart::{format_idr, Cart, CartLine};

/// One cart row: name, unit breakdown, line total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub product_id: i64,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product.id,
            name: line.product.name.clone(),
            unit_price: format_idr(line.product.price),
            quantity: line.quantity,
            line_total: format_idr(line.line_total()),
        }
    }
}

/// Cart panel data. An empty cart shows a placeholder and disables the
/// checkout button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub tax_label: String,
    pub tax: String,
    pub total: String,
    pub checkout_enabled: bool,
    pub placeholder: Option<&'static str>,
}

pub fn cart_view(cart: &Cart) -> CartView {
    let totals = cart.totals();
    let empty = cart.is_empty();
    CartView {
        lines: cart.lines().map(CartLineView::from).collect(),
        subtotal: format_idr(totals.subtotal),
        tax_label: "Tax (10%)".into(),
        tax: format_idr(totals.tax),
        total: format_idr(totals.total),
        checkout_enabled: !empty,
        placeholder: empty.then_some("Cart is empty"),
    }
}
