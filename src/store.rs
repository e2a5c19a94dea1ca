//! Process-wide record store mirrored to key/value storage.
//!
//! Each collection is written wholesale under its own key after every
//! mutating action. Mirroring is best-effort: a failed write is logged and
//! the in-memory state stays authoritative for the rest of the run.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{
    Customer, Device, InventoryItem, Invoice, InvoiceStatus, Part, Record, RepairTicket,
    SessionUser, Theme, User,
};

pub const KEY_CUSTOMERS: &str = "customers";
pub const KEY_DEVICES: &str = "devices";
pub const KEY_TICKETS: &str = "repairTickets";
pub const KEY_INVENTORY: &str = "inventory";
pub const KEY_PARTS: &str = "parts";
pub const KEY_INVOICES: &str = "invoices";
pub const KEY_USERS: &str = "users";
pub const KEY_THEME: &str = "theme";
pub const KEY_SESSION: &str = "session";

/// String key/value storage, the local-storage equivalent.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FileStorage { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        // readers only ever see a complete snapshot
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// An ordered list of records with the add/update/delete/set vocabulary.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection { items: Vec::new() }
    }
}

impl<T: Record> Collection<T> {
    pub fn from_vec(items: Vec<T>) -> Self {
        Collection { items }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn add(&mut self, record: T) {
        self.items.push(record);
    }

    pub fn add_front(&mut self, record: T) {
        self.items.insert(0, record);
    }

    /// Replaces the record with the same id. Returns `false` (and changes
    /// nothing) when no such record exists.
    pub fn update(&mut self, record: T) -> bool {
        match self.items.iter().position(|r| r.id() == record.id()) {
            Some(index) => {
                self.items[index] = record;
                true
            }
            None => false,
        }
    }

    /// Removes the record with the given id, returning it when present.
    pub fn delete(&mut self, id: &str) -> Option<T> {
        let index = self.items.iter().position(|r| r.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn set(&mut self, items: Vec<T>) {
        self.items = items;
    }
}

/// Generates `<prefix><epoch millis>`, bumping the number until it is not
/// taken in `taken`.
pub fn next_id(prefix: &str, now: DateTime<Utc>, taken: impl Fn(&str) -> bool) -> String {
    let mut millis = now.timestamp_millis();
    loop {
        let id = format!("{prefix}{millis}");
        if !taken(&id) {
            return id;
        }
        millis += 1;
    }
}

pub struct Store {
    storage: Box<dyn Storage>,
    pub customers: Collection<Customer>,
    pub devices: Collection<Device>,
    pub tickets: Collection<RepairTicket>,
    pub inventory: Collection<InventoryItem>,
    pub parts: Collection<Part>,
    pub invoices: Collection<Invoice>,
    pub users: Collection<User>,
    theme: Theme,
    session: Option<SessionUser>,
}

fn load_key<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "storage: failed to read snapshot");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "storage: ignoring unreadable snapshot");
            None
        }
    }
}

impl Store {
    /// Loads every collection from storage; missing or unreadable keys start empty.
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let s = storage.as_ref();
        let store = Store {
            customers: Collection::from_vec(load_key(s, KEY_CUSTOMERS).unwrap_or_default()),
            devices: Collection::from_vec(load_key(s, KEY_DEVICES).unwrap_or_default()),
            tickets: Collection::from_vec(load_key(s, KEY_TICKETS).unwrap_or_default()),
            inventory: Collection::from_vec(load_key(s, KEY_INVENTORY).unwrap_or_default()),
            parts: Collection::from_vec(load_key(s, KEY_PARTS).unwrap_or_default()),
            invoices: Collection::from_vec(load_key(s, KEY_INVOICES).unwrap_or_default()),
            users: Collection::from_vec(load_key(s, KEY_USERS).unwrap_or_default()),
            theme: load_key(s, KEY_THEME).unwrap_or_default(),
            session: load_key(s, KEY_SESSION),
            storage,
        };
        debug!(
            customers = store.customers.len(),
            tickets = store.tickets.len(),
            invoices = store.invoices.len(),
            parts = store.parts.len(),
            "store loaded"
        );
        store
    }

    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStorage::new()))
    }

    fn mirror<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(Into::into)
            .and_then(|json| self.storage.set(key, &json));
        if let Err(e) = result {
            warn!(key, error = %e, "storage: failed to mirror snapshot");
        }
    }

    pub fn persist_customers(&self) {
        self.mirror(KEY_CUSTOMERS, self.customers.as_slice());
    }

    pub fn persist_devices(&self) {
        self.mirror(KEY_DEVICES, self.devices.as_slice());
    }

    pub fn persist_tickets(&self) {
        self.mirror(KEY_TICKETS, self.tickets.as_slice());
    }

    pub fn persist_inventory(&self) {
        self.mirror(KEY_INVENTORY, self.inventory.as_slice());
    }

    pub fn persist_parts(&self) {
        self.mirror(KEY_PARTS, self.parts.as_slice());
    }

    pub fn persist_invoices(&self) {
        self.mirror(KEY_INVOICES, self.invoices.as_slice());
    }

    pub fn persist_users(&self) {
        self.mirror(KEY_USERS, self.users.as_slice());
    }

    // --- customers -------------------------------------------------------

    pub fn add_customer(&mut self, customer: Customer) {
        self.customers.add(customer);
        self.persist_customers();
    }

    pub fn update_customer(&mut self, customer: Customer) -> bool {
        let found = self.customers.update(customer);
        self.persist_customers();
        found
    }

    pub fn delete_customer(&mut self, id: &str) -> Option<Customer> {
        let removed = self.customers.delete(id);
        self.persist_customers();
        removed
    }

    pub fn set_customers(&mut self, customers: Vec<Customer>) {
        self.customers.set(customers);
        self.persist_customers();
    }

    // --- devices ---------------------------------------------------------

    pub fn add_device(&mut self, device: Device) {
        self.devices.add(device);
        self.persist_devices();
    }

    pub fn update_device(&mut self, device: Device) -> bool {
        let found = self.devices.update(device);
        self.persist_devices();
        found
    }

    pub fn delete_device(&mut self, id: &str) -> Option<Device> {
        let removed = self.devices.delete(id);
        self.persist_devices();
        removed
    }

    pub fn set_devices(&mut self, devices: Vec<Device>) {
        self.devices.set(devices);
        self.persist_devices();
    }

    // --- tickets ---------------------------------------------------------

    /// New tickets go to the front of the list.
    pub fn add_ticket(&mut self, ticket: RepairTicket) {
        self.tickets.add_front(ticket);
        self.persist_tickets();
    }

    pub fn update_ticket(&mut self, ticket: RepairTicket) -> bool {
        let found = self.tickets.update(ticket);
        if found {
            self.persist_tickets();
        }
        found
    }

    pub fn delete_ticket(&mut self, id: &str) -> Option<RepairTicket> {
        let removed = self.tickets.delete(id);
        self.persist_tickets();
        removed
    }

    pub fn set_tickets(&mut self, tickets: Vec<RepairTicket>) {
        self.tickets.set(tickets);
        self.persist_tickets();
    }

    /// Re-reads the ticket list from storage, keeping the current list when
    /// nothing is stored.
    pub fn reload_tickets(&mut self) {
        if let Some(tickets) = load_key(self.storage.as_ref(), KEY_TICKETS) {
            self.tickets.set(tickets);
        }
    }

    // --- inventory -------------------------------------------------------

    pub fn add_inventory_item(&mut self, item: InventoryItem) {
        self.inventory.add(item);
        self.persist_inventory();
    }

    pub fn update_inventory_item(&mut self, item: InventoryItem) -> bool {
        let found = self.inventory.update(item);
        self.persist_inventory();
        found
    }

    pub fn delete_inventory_item(&mut self, id: &str) -> Option<InventoryItem> {
        let removed = self.inventory.delete(id);
        self.persist_inventory();
        removed
    }

    pub fn set_inventory(&mut self, items: Vec<InventoryItem>) {
        self.inventory.set(items);
        self.persist_inventory();
    }

    // --- parts -----------------------------------------------------------

    pub fn add_part(&mut self, part: Part) {
        self.parts.add(part);
        self.persist_parts();
    }

    pub fn update_part(&mut self, part: Part) -> bool {
        let found = self.parts.update(part);
        self.persist_parts();
        found
    }

    pub fn update_part_quantity(&mut self, id: &str, quantity: u32) -> bool {
        let found = match self.parts.get_mut(id) {
            Some(part) => {
                part.quantity = quantity;
                true
            }
            None => false,
        };
        self.persist_parts();
        found
    }

    pub fn delete_part(&mut self, id: &str) -> Option<Part> {
        let removed = self.parts.delete(id);
        self.persist_parts();
        removed
    }

    pub fn set_parts(&mut self, parts: Vec<Part>) {
        self.parts.set(parts);
        self.persist_parts();
    }

    // --- invoices --------------------------------------------------------

    pub fn add_invoice(&mut self, invoice: Invoice) {
        self.invoices.add(invoice);
        self.persist_invoices();
    }

    pub fn update_invoice(&mut self, invoice: Invoice) -> bool {
        let found = self.invoices.update(invoice);
        self.persist_invoices();
        found
    }

    pub fn update_invoice_status(&mut self, id: &str, status: InvoiceStatus, now: DateTime<Utc>) -> bool {
        let found = match self.invoices.get_mut(id) {
            Some(invoice) => {
                invoice.status = status;
                invoice.updated_at = now;
                true
            }
            None => false,
        };
        self.persist_invoices();
        found
    }

    pub fn delete_invoice(&mut self, id: &str) -> Option<Invoice> {
        let removed = self.invoices.delete(id);
        self.persist_invoices();
        removed
    }

    pub fn set_invoices(&mut self, invoices: Vec<Invoice>) {
        self.invoices.set(invoices);
        self.persist_invoices();
    }

    // --- users, session, settings ----------------------------------------

    pub fn add_user(&mut self, user: User) {
        self.users.add(user);
        self.persist_users();
    }

    pub fn session(&self) -> Option<&SessionUser> {
        self.session.as_ref()
    }

    pub fn set_session(&mut self, user: Option<SessionUser>) {
        match &user {
            Some(user) => self.mirror(KEY_SESSION, user),
            None => {
                if let Err(e) = self.storage.remove(KEY_SESSION) {
                    warn!(error = %e, "storage: failed to clear session");
                }
            }
        }
        self.session = user;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.mirror(KEY_THEME, &theme);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::rc::Rc;

    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::model::{DeviceInfo, DeviceType};

    /// Storage shared between two stores, to observe what a fresh process would load.
    #[derive(Clone, Default)]
    pub(crate) struct SharedStorage(pub Rc<MemoryStorage>);

    impl Storage for SharedStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> Result<()> {
            self.0.remove(key)
        }
    }

    fn device(id: &str, model: &str) -> Device {
        Device {
            id: id.into(),
            info: DeviceInfo {
                device_type: DeviceType::Phone,
                brand: "Apple".into(),
                model: model.into(),
                serial_number: "SN".into(),
                condition: "gut".into(),
            },
        }
    }

    fn part(id: &str, quantity: u32) -> Part {
        Part {
            id: id.into(),
            name: "Akku".into(),
            sku: "BAT-1".into(),
            category: "batteries".into(),
            description: String::new(),
            price: dec!(39.90),
            cost: dec!(20),
            quantity,
            min_quantity: 2,
            supplier: String::new(),
            location: String::new(),
            last_ordered: None,
            compatibility: vec![],
        }
    }

    #[test]
    fn test_collection_update_unknown_id_is_noop() {
        let mut devices = Collection::from_vec(vec![device("1", "13 Pro")]);
        assert!(!devices.update(device("2", "Pixel 8")));
        assert_eq!(devices.len(), 1);
        assert_eq!(devices.get("1").unwrap().info.model, "13 Pro");

        assert!(devices.update(device("1", "14")));
        assert_eq!(devices.get("1").unwrap().info.model, "14");
    }

    #[test]
    fn test_collection_delete_and_set() {
        let mut devices = Collection::from_vec(vec![device("1", "a"), device("2", "b")]);
        assert_eq!(devices.delete("1").map(|d| d.id), Some("1".to_string()));
        assert!(devices.delete("1").is_none());
        devices.set(vec![device("9", "z")]);
        assert_eq!(devices.as_slice().len(), 1);
        assert!(devices.contains("9"));
    }

    #[test]
    fn test_next_id_skips_taken_ids() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let taken = ["T-1700000000000", "T-1700000000001"];
        let id = next_id("T-", now, |id| taken.contains(&id));
        assert_eq!(id, "T-1700000000002");
    }

    #[test]
    fn test_mutations_are_mirrored_to_storage() {
        let shared = SharedStorage::default();
        let mut store = Store::load(Box::new(shared.clone()));
        store.add_device(device("1", "13 Pro"));
        store.add_part(part("P-1", 5));
        assert!(store.update_part_quantity("P-1", 1));
        store.set_theme(Theme::Dark);

        let reloaded = Store::load(Box::new(shared));
        assert_eq!(reloaded.devices.len(), 1);
        assert_eq!(reloaded.parts.get("P-1").unwrap().quantity, 1);
        assert!(reloaded.parts.get("P-1").unwrap().is_low_stock());
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn test_wholesale_replace_persists_every_collection() {
        let shared = SharedStorage::default();
        let mut store = Store::load(Box::new(shared.clone()));
        store.add_device(device("1", "13 Pro"));
        store.set_devices(vec![device("7", "Pixel 8"), device("8", "S21")]);
        store.set_parts(vec![part("P-1", 3)]);
        store.set_customers(vec![]);
        store.set_tickets(vec![]);
        store.set_inventory(vec![]);
        store.set_invoices(vec![]);

        let reloaded = Store::load(Box::new(shared.clone()));
        assert_eq!(reloaded.devices.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(), ["7", "8"]);
        assert_eq!(reloaded.parts.len(), 1);
        for key in [KEY_CUSTOMERS, KEY_TICKETS, KEY_INVENTORY, KEY_INVOICES] {
            assert_eq!(shared.0.get(key).unwrap().as_deref(), Some("[]"));
        }
    }

    #[test]
    fn test_unreadable_snapshot_starts_empty() {
        let storage = MemoryStorage::new();
        storage.set(KEY_CUSTOMERS, "{not json").unwrap();
        let store = Store::load(Box::new(storage));
        assert!(store.customers.is_empty());
    }

    #[test]
    fn test_session_round_trip_and_logout() {
        let shared = SharedStorage::default();
        let mut store = Store::load(Box::new(shared.clone()));
        store.set_session(Some(SessionUser {
            id: "1".into(),
            name: "John Doe".into(),
            email: "admin@repair.com".into(),
            role: crate::model::Role::Admin,
        }));
        assert!(Store::load(Box::new(shared.clone())).session().is_some());

        store.set_session(None);
        assert!(Store::load(Box::new(shared)).session().is_none());
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::open(dir.path().join("storage")).unwrap();
        assert_eq!(storage.get("customers").unwrap(), None);
        storage.set("customers", "[]").unwrap();
        assert_eq!(storage.get("customers").unwrap().as_deref(), Some("[]"));
        assert!(storage.dir().join("customers.json").exists());
        storage.remove("customers").unwrap();
        storage.remove("customers").unwrap();
        assert_eq!(storage.get("customers").unwrap(), None);
    }
}
