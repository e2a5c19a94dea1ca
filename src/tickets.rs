//! Repair ticket creation and the flat status lifecycle.
//!
//! Status changes are unguarded: any of the four states may follow any
//! other, including moving backwards. Each change stamps `updated_at` and
//! mirrors the full ticket list.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::{AppError, Result};
use crate::model::{CustomerInfo, DeviceInfo, Priority, RepairInfo, RepairTicket, TicketStatus};
use crate::store::{next_id, Store};

/// Form data submitted for a new ticket.
#[derive(Debug, Clone, Default)]
pub struct TicketInput {
    pub customer_id: Option<String>,
    pub device_id: Option<String>,
    pub priority: Priority,
    pub customer_info: CustomerInfo,
    pub device_info: DeviceInfo,
    pub repair_info: RepairInfo,
    pub estimated_cost: Decimal,
    pub estimated_time: String,
}

pub fn create_ticket(store: &mut Store, input: TicketInput, now: DateTime<Utc>) -> RepairTicket {
    let ticket = RepairTicket {
        id: next_id("T-", now, |id| store.tickets.contains(id)),
        customer_id: input.customer_id,
        device_id: input.device_id,
        status: TicketStatus::New,
        priority: input.priority,
        customer_info: input.customer_info,
        device_info: input.device_info,
        repair_info: input.repair_info,
        estimated_cost: input.estimated_cost,
        estimated_time: input.estimated_time,
        created_at: now,
        updated_at: now,
    };
    store.add_ticket(ticket.clone());
    info!(ticket = %ticket.id, "repair ticket created");
    ticket
}

pub fn find_ticket<'a>(store: &'a Store, id: &str) -> Result<&'a RepairTicket> {
    store
        .tickets
        .get(id)
        .ok_or_else(|| AppError::not_found("ticket", id))
}

/// Sets the ticket status and stamps `updated_at`; every other field is left as is.
pub fn set_status(
    store: &mut Store,
    id: &str,
    status: TicketStatus,
    now: DateTime<Utc>,
) -> Result<RepairTicket> {
    let mut ticket = find_ticket(store, id)?.clone();
    let previous = ticket.status;
    if status.rank() < previous.rank() {
        info!(ticket = %id, from = previous.key(), to = status.key(), "ticket moved back in lifecycle");
    }

    ticket.status = status;
    ticket.updated_at = now;
    store.update_ticket(ticket.clone());
    info!(ticket = %id, from = previous.key(), to = status.key(), "ticket status updated");
    Ok(ticket)
}

pub fn delete_ticket(store: &mut Store, id: &str) -> Result<RepairTicket> {
    store
        .delete_ticket(id)
        .ok_or_else(|| AppError::not_found("ticket", id))
}

/// Case-insensitive match on customer name, device model or ticket id.
pub fn matches_search(ticket: &RepairTicket, term: &str) -> bool {
    let term = term.to_lowercase();
    ticket.customer_info.name.to_lowercase().contains(&term)
        || ticket.device_info.model.to_lowercase().contains(&term)
        || ticket.id.to_lowercase().contains(&term)
}

pub fn search<'a>(store: &'a Store, term: Option<&str>) -> Vec<&'a RepairTicket> {
    store
        .tickets
        .iter()
        .filter(|t| term.is_none_or(|term| matches_search(t, term)))
        .collect()
}

/// The most recently created tickets, newest first.
pub fn recent(store: &Store, limit: usize) -> Vec<&RepairTicket> {
    store.tickets.iter().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::model::DeviceType;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    fn input(name: &str, model: &str) -> TicketInput {
        TicketInput {
            customer_info: CustomerInfo {
                name: name.into(),
                phone: "+1234567890".into(),
                email: "john@example.com".into(),
                ..Default::default()
            },
            device_info: DeviceInfo {
                device_type: DeviceType::Phone,
                brand: "iPhone".into(),
                model: model.into(),
                serial_number: "123456789".into(),
                condition: "Used, minor scratches".into(),
            },
            repair_info: RepairInfo {
                problem_description: "Cracked screen, touch not working".into(),
                required_parts: "iPhone 13 Pro Screen Assembly".into(),
                warranty: true,
                warranty_period: "90 days".into(),
                ..Default::default()
            },
            estimated_cost: dec!(150),
            estimated_time: "2-3 days".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_ticket_starts_new_and_is_prepended() {
        let mut store = Store::in_memory();
        let first = create_ticket(&mut store, input("John Smith", "13 Pro"), t0());
        let second = create_ticket(&mut store, input("Sarah Johnson", "Galaxy S21"), t0());

        assert_eq!(first.status, TicketStatus::New);
        assert_eq!(first.created_at, first.updated_at);
        assert_eq!(first.id, "T-1710496800000");
        assert_ne!(first.id, second.id);
        assert_eq!(store.tickets.as_slice()[0].id, second.id);
    }

    #[test]
    fn test_status_change_only_touches_status_and_updated_at() {
        let mut store = Store::in_memory();
        let ticket = create_ticket(&mut store, input("John Smith", "13 Pro"), t0());
        let later = t0() + Duration::hours(3);

        let updated = set_status(&mut store, &ticket.id, TicketStatus::Ready, later).unwrap();

        assert_eq!(updated.status, TicketStatus::Ready);
        assert_eq!(updated.updated_at, later);
        let expected = RepairTicket {
            status: TicketStatus::Ready,
            updated_at: later,
            ..ticket
        };
        assert_eq!(find_ticket(&store, &expected.id).unwrap(), &expected);
    }

    #[test]
    fn test_every_status_is_reflected_on_next_read() {
        let mut store = Store::in_memory();
        let ticket = create_ticket(&mut store, input("John Smith", "13 Pro"), t0());
        // includes skipping ahead and moving backwards
        let sequence = [
            TicketStatus::Closed,
            TicketStatus::New,
            TicketStatus::Ready,
            TicketStatus::InProgress,
            TicketStatus::InProgress,
        ];
        for (i, status) in sequence.into_iter().enumerate() {
            let at = t0() + Duration::minutes(i as i64 + 1);
            set_status(&mut store, &ticket.id, status, at).unwrap();
            let read = find_ticket(&store, &ticket.id).unwrap();
            assert_eq!(read.status, status);
            assert_eq!(read.updated_at, at);
        }
    }

    #[test]
    fn test_status_change_is_persisted() {
        let shared = crate::store::tests::SharedStorage::default();
        let mut store = Store::load(Box::new(shared.clone()));
        let ticket = create_ticket(&mut store, input("John Smith", "13 Pro"), t0());
        set_status(&mut store, &ticket.id, TicketStatus::Closed, t0()).unwrap();

        let mut reloaded = Store::load(Box::new(shared));
        reloaded.reload_tickets();
        assert_eq!(find_ticket(&reloaded, &ticket.id).unwrap().status, TicketStatus::Closed);
    }

    #[test]
    fn test_unknown_ticket_is_not_found() {
        let mut store = Store::in_memory();
        let err = set_status(&mut store, "T-0", TicketStatus::Ready, t0()).unwrap_err();
        assert!(matches!(err, AppError::NotFound { kind: "ticket", .. }));
        assert!(store.tickets.is_empty());
    }

    #[test]
    fn test_search_matches_name_model_and_id() {
        let mut store = Store::in_memory();
        let john = create_ticket(&mut store, input("John Smith", "13 Pro"), t0());
        create_ticket(&mut store, input("Sarah Johnson", "Galaxy S21"), t0());

        assert_eq!(search(&store, Some("sarah")).len(), 1);
        assert_eq!(search(&store, Some("GALAXY")).len(), 1);
        assert_eq!(search(&store, Some(&john.id.to_lowercase()))[0].id, john.id);
        assert_eq!(search(&store, Some("john")).len(), 2);
        assert_eq!(search(&store, None).len(), 2);
        assert!(search(&store, Some("pixel")).is_empty());
    }

    #[test]
    fn test_recent_takes_newest_first() {
        let mut store = Store::in_memory();
        for i in 0..5 {
            create_ticket(&mut store, input(&format!("Kunde {i}"), "X"), t0() + Duration::seconds(i));
        }
        let recent = recent(&store, 3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].customer_info.name, "Kunde 4");
    }
}
