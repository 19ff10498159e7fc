use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style, Width},
    Table, Tabled,
};

use crate::models::{product::Product, receipt::Receipt};

pub const ID_WIDTH: usize = 12;
pub const NAME_WIDTH: usize = 35;
pub const PRICE_WIDTH: usize = 12;

const RULE: &str = "=========================================================================================";

/// Which rows a product listing shows, and in what order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingOrder {
    #[default]
    Insertion,
    Reverse,
    /// Newest first, skipping the first-inserted entry. Kept for parity with
    /// older store listings; totals are unaffected.
    Legacy,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown listing order '{0}', expected insertion, reverse or legacy")]
pub struct UnknownListingOrder(pub String);

impl FromStr for ListingOrder {
    type Err = UnknownListingOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "insertion" => Ok(ListingOrder::Insertion),
            "reverse" => Ok(ListingOrder::Reverse),
            "legacy" => Ok(ListingOrder::Legacy),
            other => Err(UnknownListingOrder(other.to_string())),
        }
    }
}

impl fmt::Display for ListingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingOrder::Insertion => write!(f, "insertion"),
            ListingOrder::Reverse => write!(f, "reverse"),
            ListingOrder::Legacy => write!(f, "legacy"),
        }
    }
}

impl ListingOrder {
    pub fn arrange<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        match self {
            ListingOrder::Insertion => products.iter().collect(),
            ListingOrder::Reverse => products.iter().rev().collect(),
            ListingOrder::Legacy => products.iter().skip(1).rev().collect(),
        }
    }
}

#[derive(Tabled)]
struct ProductTableRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
}

pub fn format_product_table(products: &[&Product]) -> String {
    let rows: Vec<ProductTableRow> = products
        .iter()
        .map(|product| ProductTableRow {
            id: product.id.clone(),
            name: product.name.clone(),
            price: format_price(product.price),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Alignment::left())
        .with(Modify::new(Columns::single(0)).with(Width::increase(ID_WIDTH)))
        .with(Modify::new(Columns::single(1)).with(Width::increase(NAME_WIDTH)))
        .with(Modify::new(Columns::single(2)).with(Width::increase(PRICE_WIDTH)));

    table.to_string()
}

/// Listing framed by rules, as shown for the catalog, the cart and receipts.
pub fn format_listing(products: &[Product], order: ListingOrder) -> String {
    let rows = order.arrange(products);
    format!("{}\n{}\n{}", RULE, format_product_table(&rows), RULE)
}

pub fn format_receipt(receipt: &Receipt, order: ListingOrder) -> String {
    let mut output = String::new();

    output.push_str("Your receipt:\n");
    output.push_str(&format!("Receipt #: {}\n", receipt.short_number()));
    output.push_str(&format!("Date: {}\n", format_date(&receipt.issued_at)));
    output.push_str(&format_listing(&receipt.items, order));
    output.push('\n');
    output.push_str(&format!("Your total is: {}\n", format_money(receipt.total)));
    output.push_str(&format!("Cash received: {}\n", format_money(receipt.tendered)));

    let change = receipt.change();
    if !change.is_zero() {
        output.push_str(&format!("Your change is: {}\n", format_money(change)));
    }
    output.push_str("Thank you!\n");
    output.push_str(RULE);

    output
}

/// Table cell rendering: two decimals, no currency symbol.
pub fn format_price(price: Decimal) -> String {
    format!("{:.2}", price)
}

/// Summary line rendering, e.g. `$39.98`.
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}
