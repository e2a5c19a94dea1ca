use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::model::{CustomerInfo, Invoice, InvoiceStatus};
use crate::store::{next_id, Store};
use crate::totals::InvoiceDraft;

/// Header fields of an invoice being created; lines come from the draft.
#[derive(Debug, Clone, Default)]
pub struct InvoiceHeader {
    pub ticket_id: String,
    pub customer_info: CustomerInfo,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
}

pub fn create_invoice(
    store: &mut Store,
    header: InvoiceHeader,
    draft: InvoiceDraft,
    payment_terms_days: u32,
    now: DateTime<Utc>,
) -> Result<Invoice> {
    if draft.is_empty() {
        return Err(AppError::InvalidInput("invoice has no items or labor".into()));
    }
    if header.customer_info.name.trim().is_empty() {
        return Err(AppError::InvalidInput("invoice needs a customer".into()));
    }

    let due_date = header.due_date.unwrap_or_else(|| {
        let today = now.date_naive();
        today
            .checked_add_days(Days::new(payment_terms_days.into()))
            .unwrap_or(today)
    });
    let (items, labor, totals) = draft.into_lines();
    let invoice = Invoice {
        id: next_id("INV-", now, |id| store.invoices.contains(id)),
        ticket_id: header.ticket_id,
        customer_info: header.customer_info,
        items,
        labor,
        subtotal: totals.subtotal,
        tax: totals.tax,
        total: totals.total,
        status: header.status,
        payment_method: None,
        payment_date: None,
        due_date,
        notes: header.notes.filter(|n| !n.trim().is_empty()),
        created_at: now,
        updated_at: now,
    };
    store.add_invoice(invoice.clone());
    info!(invoice = %invoice.id, total = %invoice.total, status = invoice.status.key(), "invoice created");
    Ok(invoice)
}

pub fn find_invoice<'a>(store: &'a Store, id: &str) -> Result<&'a Invoice> {
    store
        .invoices
        .get(id)
        .ok_or_else(|| AppError::not_found("invoice", id))
}

/// Moves an invoice to `status`. Marking it paid records the payment date
/// and method when given.
pub fn set_status(
    store: &mut Store,
    id: &str,
    status: InvoiceStatus,
    payment_method: Option<String>,
    now: DateTime<Utc>,
) -> Result<Invoice> {
    if !store.update_invoice_status(id, status, now) {
        return Err(AppError::not_found("invoice", id));
    }
    if status == InvoiceStatus::Paid {
        let mut invoice = find_invoice(store, id)?.clone();
        invoice.payment_date = Some(now.date_naive());
        invoice.payment_method = payment_method.or(invoice.payment_method);
        store.update_invoice(invoice);
    }
    info!(invoice = %id, status = status.key(), "invoice status updated");
    find_invoice(store, id).cloned()
}

pub fn delete_invoice(store: &mut Store, id: &str) -> Result<Invoice> {
    store
        .delete_invoice(id)
        .ok_or_else(|| AppError::not_found("invoice", id))
}

pub fn search<'a>(
    store: &'a Store,
    term: Option<&str>,
    status: Option<InvoiceStatus>,
) -> Vec<&'a Invoice> {
    let term = term.map(str::to_lowercase);
    store
        .invoices
        .iter()
        .filter(|inv| status.is_none_or(|s| inv.status == s))
        .filter(|inv| {
            term.as_deref().is_none_or(|term| {
                inv.id.to_lowercase().contains(term)
                    || inv.customer_info.name.to_lowercase().contains(term)
            })
        })
        .collect()
}

/// References from the invoice that point at records no longer in the store.
pub fn dangling_references(store: &Store, invoice: &Invoice) -> Vec<String> {
    let mut dangling = Vec::new();
    if !invoice.ticket_id.is_empty() && !store.tickets.contains(&invoice.ticket_id) {
        dangling.push(format!("ticket {}", invoice.ticket_id));
    }
    for item in &invoice.items {
        if !item.part_id.is_empty() && !store.parts.contains(&item.part_id) {
            dangling.push(format!("part {}", item.part_id));
        }
    }
    if !dangling.is_empty() {
        warn!(invoice = %invoice.id, refs = ?dangling, "invoice references missing records");
    }
    dangling
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::model::Part;
    use crate::store::tests::SharedStorage;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn header(name: &str, status: InvoiceStatus) -> InvoiceHeader {
        InvoiceHeader {
            ticket_id: "T-1".into(),
            customer_info: CustomerInfo {
                name: name.into(),
                ..Default::default()
            },
            status,
            ..Default::default()
        }
    }

    fn screen() -> Part {
        Part {
            id: "P-1".into(),
            name: "Display iPhone 13".into(),
            sku: "SCR-13".into(),
            category: "screens".into(),
            description: String::new(),
            price: dec!(50),
            cost: dec!(30),
            quantity: 4,
            min_quantity: 1,
            supplier: String::new(),
            location: String::new(),
            last_ordered: None,
            compatibility: vec![],
        }
    }

    fn draft() -> InvoiceDraft {
        let mut draft = InvoiceDraft::new();
        let row = draft.add_item().unwrap();
        draft.select_part(row, &screen()).unwrap();
        draft.set_item_quantity(row, 2).unwrap();
        let labor = draft.add_labor().unwrap();
        draft.set_labor_description(labor, "Displaytausch").unwrap();
        draft
    }

    #[test]
    fn test_create_invoice_copies_draft_totals() {
        let mut store = Store::in_memory();
        let invoice = create_invoice(&mut store, header("John Smith", InvoiceStatus::Draft), draft(), 14, now()).unwrap();

        assert_eq!(invoice.id, "INV-1710504000000");
        assert_eq!(invoice.subtotal, dec!(160));
        assert_eq!(invoice.tax, dec!(30.40));
        assert_eq!(invoice.total, dec!(190.40));
        assert_eq!(invoice.due_date, NaiveDate::from_ymd_opt(2024, 3, 29).unwrap());
        assert_eq!(store.invoices.len(), 1);
    }

    #[test]
    fn test_invoice_survives_storage_reload_unchanged() {
        let shared = SharedStorage::default();
        let mut store = Store::load(Box::new(shared.clone()));
        let mut lines = InvoiceDraft::new();
        let labor = lines.add_labor().unwrap();
        lines.set_labor_hours(labor, dec!(1.123456789)).unwrap();
        lines.set_labor_rate(labor, dec!(45.987654321)).unwrap();
        let row = lines.add_item().unwrap();
        lines.set_item_unit_price(row, dec!(999999.999)).unwrap();
        lines.set_item_quantity(row, 999).unwrap();
        let created = create_invoice(&mut store, header("John Smith", InvoiceStatus::Issued), lines, 14, now()).unwrap();

        let reloaded = Store::load(Box::new(shared));
        let invoice = reloaded.invoices.get(&created.id).unwrap();
        assert_eq!(invoice, &created);
        let charge = &invoice.labor[0];
        assert_eq!(charge.total, charge.hours * charge.rate_per_hour);
        assert_eq!(invoice.total, invoice.subtotal + invoice.tax);
    }

    #[test]
    fn test_empty_draft_is_rejected() {
        let mut store = Store::in_memory();
        let err = create_invoice(&mut store, header("John Smith", InvoiceStatus::Draft), InvoiceDraft::new(), 14, now())
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(store.invoices.is_empty());
    }

    #[test]
    fn test_mark_paid_records_payment() {
        let mut store = Store::in_memory();
        let invoice = create_invoice(&mut store, header("John Smith", InvoiceStatus::Issued), draft(), 14, now()).unwrap();
        let later = now() + chrono::Duration::days(3);

        let paid = set_status(&mut store, &invoice.id, InvoiceStatus::Paid, Some("Karte".into()), later).unwrap();

        assert_eq!(paid.status, InvoiceStatus::Paid);
        assert_eq!(paid.updated_at, later);
        assert_eq!(paid.payment_date, Some(later.date_naive()));
        assert_eq!(paid.payment_method.as_deref(), Some("Karte"));
        assert_eq!(paid.total, invoice.total);
    }

    #[test]
    fn test_status_on_unknown_invoice_fails() {
        let mut store = Store::in_memory();
        let err = set_status(&mut store, "INV-0", InvoiceStatus::Paid, None, now()).unwrap_err();
        assert!(matches!(err, AppError::NotFound { kind: "invoice", .. }));
    }

    #[test]
    fn test_search_by_term_and_status() {
        let mut store = Store::in_memory();
        create_invoice(&mut store, header("John Smith", InvoiceStatus::Draft), draft(), 14, now()).unwrap();
        create_invoice(&mut store, header("Sarah Johnson", InvoiceStatus::Issued), draft(), 14, now()).unwrap();

        assert_eq!(search(&store, Some("SARAH"), None).len(), 1);
        assert_eq!(search(&store, Some("inv-"), None).len(), 2);
        assert_eq!(search(&store, None, Some(InvoiceStatus::Draft)).len(), 1);
        assert!(search(&store, Some("sarah"), Some(InvoiceStatus::Draft)).is_empty());
    }

    #[test]
    fn test_dangling_references_are_reported_not_rejected() {
        let mut store = Store::in_memory();
        let invoice = create_invoice(&mut store, header("John Smith", InvoiceStatus::Draft), draft(), 14, now()).unwrap();

        let dangling = dangling_references(&store, &invoice);
        assert_eq!(dangling, vec!["ticket T-1".to_string(), "part P-1".to_string()]);

        store.add_part(screen());
        assert_eq!(dangling_references(&store, &invoice), vec!["ticket T-1".to_string()]);
    }
}
