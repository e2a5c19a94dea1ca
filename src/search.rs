//! Case-insensitive list filters for customers and parts. Ticket and invoice
//! filters live next to their lifecycles.

use crate::model::{Customer, Part};
use crate::store::Store;

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

pub fn customers<'a>(store: &'a Store, term: Option<&str>) -> Vec<&'a Customer> {
    let term = term.map(str::to_lowercase);
    store
        .customers
        .iter()
        .filter(|c| {
            term.as_deref()
                .is_none_or(|term| contains(&c.name, term) || contains(&c.email, term))
        })
        .collect()
}

pub fn parts<'a>(
    store: &'a Store,
    term: Option<&str>,
    category: Option<&str>,
    low_stock_only: bool,
) -> Vec<&'a Part> {
    let term = term.map(str::to_lowercase);
    store
        .parts
        .iter()
        .filter(|p| category.is_none_or(|c| p.category.eq_ignore_ascii_case(c)))
        .filter(|p| !low_stock_only || p.is_low_stock())
        .filter(|p| {
            term.as_deref()
                .is_none_or(|term| contains(&p.name, term) || contains(&p.sku, term))
        })
        .collect()
}
