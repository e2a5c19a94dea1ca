use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{InvoiceStatus, Part, RepairTicket, TicketStatus};
use crate::store::Store;

pub const RECENT_TICKETS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub active_repairs: usize,
    pub completed: usize,
    pub open_invoices: Decimal,
    pub low_stock_parts: usize,
}

pub fn dashboard_stats(store: &Store) -> DashboardStats {
    let count = |status| store.tickets.iter().filter(|t| t.status == status).count();
    DashboardStats {
        active_repairs: count(TicketStatus::InProgress),
        completed: count(TicketStatus::Ready),
        open_invoices: store
            .invoices
            .iter()
            .filter(|i| i.status == InvoiceStatus::Issued)
            .fold(Decimal::ZERO, |acc, i| acc.saturating_add(i.total)),
        low_stock_parts: store.parts.iter().filter(|p| p.is_low_stock()).count(),
    }
}

pub fn low_stock_parts(store: &Store) -> Vec<&Part> {
    store.parts.iter().filter(|p| p.is_low_stock()).collect()
}

pub fn recent_tickets(store: &Store) -> Vec<&RepairTicket> {
    crate::tickets::recent(store, RECENT_TICKETS)
}
