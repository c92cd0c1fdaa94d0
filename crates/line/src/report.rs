//! Plain-text rendering of stock and orders.
//!
//! Column width is worked out here, over whatever set of entities is being
//! printed, rather than tracked by the entities themselves.

use fulfill_inventory::Stock;
use fulfill_orders::Order;

/// Width of the name column: the longest stock name or customer name.
pub fn field_width<'a>(
    stocks: impl IntoIterator<Item = &'a Stock>,
    orders: impl IntoIterator<Item = &'a Order>,
) -> usize {
    let stock_width = stocks.into_iter().map(|s| s.name().len()).max().unwrap_or(0);
    let order_width = orders.into_iter().map(|o| o.customer().len()).max().unwrap_or(0);
    stock_width.max(order_width)
}

/// `name [serial]`, with quantity and description when `full`.
pub fn render_stock(stock: &Stock, width: usize, full: bool) -> String {
    let mut line = format!("{:<width$} [{:<5}]", stock.name(), stock.serial_number());
    if full {
        line.push_str(&format!(
            " Quantity {:<3} Description: {}",
            stock.quantity(),
            stock.description()
        ));
    }
    line
}

/// Counter dump for one stock, one `label: value` line each.
pub fn render_validation(stock: &Stock) -> String {
    format!(
        " name: {}\n serial number: {}\n quantity: {}",
        stock.name(),
        stock.serial_number(),
        stock.quantity()
    )
}

/// Order header followed by one line per request.
///
/// Without `detail` each request shows only its item name. With `detail` it
/// shows the stamped serial number (0 if none) and FILLED or MISSING.
pub fn render_order(order: &Order, width: usize, detail: bool) -> String {
    let indent = " ".repeat((width + 1).max(4));
    let mut lines = vec![format!("{:<width$} [{}]", order.customer(), order.product())];
    for request in order.requests() {
        if detail {
            let status = if request.is_filled() { "FILLED" } else { "MISSING" };
            lines.push(format!(
                "{indent}[{}] {} - {status}",
                request.serial_number().unwrap_or(0),
                request.name()
            ));
        } else {
            lines.push(format!("{indent}{}", request.name()));
        }
    }
    lines.join("\n")
}
