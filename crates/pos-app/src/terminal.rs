//! Terminal rendering adapter: draws the precomputed view models and routes
//! commands into the session. All decisions live in pos-core; this module
//! only prints and parses.

use std::io::{self, BufRead, Write};

use pos_core::application::session::PosSession;
use pos_core::errors::PosError;
use pos_core::view::{
    cart_view, catalog_view, checkout_view, CartView, CatalogView, CategoryFilter, CheckoutView,
};
use pos_types::domain::payment::PaymentMethod;
use pos_types::ports::catalog_gateway::{CatalogGateway, GatewayError};

#[derive(Clone, Copy)]
enum Notice {
    Info,
    Success,
    Error,
}

impl Notice {
    fn label(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
        }
    }
}

fn notify(kind: Notice, message: &str) {
    println!("[{}] {}", kind.label(), message);
}

fn render_catalog(view: &CatalogView) {
    let filters: Vec<String> = view
        .filters
        .iter()
        .map(|f| {
            if f.selected {
                format!("[{}]", f.label)
            } else {
                f.label.clone()
            }
        })
        .collect();
    println!("\n--- Catalog ({}) ---", filters.join(" "));
    for card in &view.cards {
        let status = if card.out_of_stock {
            "  OUT OF STOCK".to_string()
        } else {
            card.stock_label
                .as_ref()
                .map(|s| format!("  ({s})"))
                .unwrap_or_default()
        };
        let badge = if card.in_cart > 0 {
            format!("  [in cart: {}]", card.in_cart)
        } else {
            String::new()
        };
        println!("  #{} {}  {}{}{}", card.product_id, card.name, card.price, status, badge);
    }
}

fn render_cart(view: &CartView) {
    println!("\n--- Cart ---");
    if let Some(placeholder) = view.placeholder {
        println!("  {placeholder}");
        return;
    }
    for line in &view.lines {
        println!(
            "  #{} {}  {} x {}  = {}",
            line.product_id, line.name, line.unit_price, line.quantity, line.line_total
        );
    }
    println!("  Subtotal: {}", view.subtotal);
    println!("  {}: {}", view.tax_label, view.tax);
    println!("  Total: {}", view.total);
}

fn render_checkout(view: &CheckoutView) {
    if !view.visible {
        return;
    }
    println!("\n--- Checkout ---");
    println!("  Total due: {}", view.total_display);
    if let Some(method) = view.method {
        println!("  Payment method: {}", method.as_str());
    }
    println!("  Received: {}", view.amount_received);
    println!("  Change: {}", view.change_display);
    if view.validation_visible {
        println!("  ! Amount received is less than the total");
    }
    if view.confirm_enabled {
        println!("  (type 'confirm' to place the order)");
    }
}

fn print_help() {
    println!(
        "\nCommands:\n  \
         filter all|<category_id>   show the grid for a category\n  \
         add <product_id>           add one unit to the cart\n  \
         inc <product_id>           increase a cart line\n  \
         dec <product_id>           decrease a cart line\n  \
         checkout                   open the payment dialog\n  \
         pay cash|qris              choose a payment method\n  \
         amount <n>                 enter cash received\n  \
         confirm                    place the order\n  \
         cancel                     close the payment dialog\n  \
         reload                     refetch the catalog\n  \
         quit"
    );
}

fn int_arg<'a>(mut parts: impl Iterator<Item = &'a str>) -> Option<i64> {
    parts.next().and_then(|s| s.parse().ok())
}

/// Drive a session from stdin until EOF or `quit`.
pub async fn run<G: CatalogGateway>(mut session: PosSession<G>) -> anyhow::Result<()> {
    if let Err(e) = session.load_catalog().await {
        // Non-blocking: the terminal starts on an empty grid.
        notify(Notice::Error, &format!("Could not load catalog: {e}"));
    }

    let mut filter = CategoryFilter::All;
    render_catalog(&catalog_view(session.catalog(), filter, session.cart()));
    render_cart(&cart_view(session.cart()));
    print_help();

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("\npos> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "filter" => {
                filter = match parts.next() {
                    Some("all") | None => CategoryFilter::All,
                    Some(arg) => match arg.parse() {
                        Ok(id) => CategoryFilter::Category(id),
                        Err(_) => {
                            notify(Notice::Info, "usage: filter all|<category_id>");
                            continue;
                        }
                    },
                };
                render_catalog(&catalog_view(session.catalog(), filter, session.cart()));
            }
            "add" => {
                let Some(id) = int_arg(parts) else {
                    notify(Notice::Info, "usage: add <product_id>");
                    continue;
                };
                if let Err(e) = session.add_to_cart(id) {
                    notify(Notice::Error, &e.to_string());
                }
                render_catalog(&catalog_view(session.catalog(), filter, session.cart()));
                render_cart(&cart_view(session.cart()));
            }
            "inc" | "dec" => {
                let Some(id) = int_arg(parts) else {
                    notify(Notice::Info, "usage: inc|dec <product_id>");
                    continue;
                };
                let delta = if command == "inc" { 1 } else { -1 };
                if let Err(e) = session.update_quantity(id, delta) {
                    notify(Notice::Error, &e.to_string());
                }
                render_cart(&cart_view(session.cart()));
            }
            "checkout" => {
                match session.open_checkout() {
                    Ok(()) => render_checkout(&checkout_view(session.checkout())),
                    Err(e) => notify(Notice::Error, &e.to_string()),
                }
            }
            "pay" => {
                let method = match parts.next() {
                    Some("cash") => PaymentMethod::Cash,
                    Some("qris") => PaymentMethod::Qris,
                    _ => {
                        notify(Notice::Info, "usage: pay cash|qris");
                        continue;
                    }
                };
                match session.select_payment(method) {
                    Ok(()) => render_checkout(&checkout_view(session.checkout())),
                    Err(e) => notify(Notice::Error, &e.to_string()),
                }
            }
            "amount" => {
                let raw = parts.next().unwrap_or("");
                match session.enter_amount(raw) {
                    Ok(()) => render_checkout(&checkout_view(session.checkout())),
                    Err(e) => notify(Notice::Error, &e.to_string()),
                }
            }
            "confirm" => match session.submit_order().await {
                Ok(receipt) => {
                    notify(
                        Notice::Success,
                        &format!("Order Successful! TRX: {}", receipt.transaction_code),
                    );
                    render_catalog(&catalog_view(session.catalog(), filter, session.cart()));
                    render_cart(&cart_view(session.cart()));
                }
                Err(PosError::Gateway(GatewayError::Transport(_))) => {
                    notify(Notice::Error, "Failed to submit order.");
                    render_checkout(&checkout_view(session.checkout()));
                }
                Err(e) => {
                    notify(Notice::Error, &e.to_string());
                    render_checkout(&checkout_view(session.checkout()));
                }
            },
            "cancel" => {
                if let Err(e) = session.close_checkout() {
                    notify(Notice::Error, &e.to_string());
                }
                render_cart(&cart_view(session.cart()));
            }
            "reload" => {
                if let Err(e) = session.load_catalog().await {
                    notify(Notice::Error, &format!("Could not load catalog: {e}"));
                }
                render_catalog(&catalog_view(session.catalog(), filter, session.cart()));
            }
            "help" => print_help(),
            "quit" | "exit" => break,
            _ => notify(Notice::Info, "unknown command, try 'help'"),
        }
    }

    Ok(())
}
