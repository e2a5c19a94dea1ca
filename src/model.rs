use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A record that lives in one of the store collections.
pub trait Record {
    fn id(&self) -> &str;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(impl Record for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_record!(Customer, Device, RepairTicket, InventoryItem, Part, Invoice, User);

// ==========================================
// Customers & Devices
// ==========================================

/// Customer snapshot embedded in tickets and invoices.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub devices: Vec<DeviceType>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn info(&self) -> CustomerInfo {
        CustomerInfo {
            id: Some(self.id.clone()),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            company: None,
            tax_id: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    #[default]
    Phone,
    Computer,
    Tablet,
}

impl DeviceType {
    pub const ALL: [DeviceType; 3] = [DeviceType::Phone, DeviceType::Computer, DeviceType::Tablet];

    pub fn key(self) -> &'static str {
        match self {
            DeviceType::Phone => "phone",
            DeviceType::Computer => "computer",
            DeviceType::Tablet => "tablet",
        }
    }
}

/// Device description, used both as a stored record and as the ticket snapshot.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub condition: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    #[serde(flatten)]
    pub info: DeviceInfo,
}

// ==========================================
// Repair Tickets
// ==========================================

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    New,
    #[value(name = "in_progress")]
    InProgress,
    Ready,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::New,
        TicketStatus::InProgress,
        TicketStatus::Ready,
        TicketStatus::Closed,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TicketStatus::New => "new",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Ready => "ready",
            TicketStatus::Closed => "closed",
        }
    }

    /// Position along new → in_progress → ready → closed.
    pub fn rank(self) -> u8 {
        match self {
            TicketStatus::New => 0,
            TicketStatus::InProgress => 1,
            TicketStatus::Ready => 2,
            TicketStatus::Closed => 3,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn key(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

fn default_warranty_period() -> String {
    "30 days".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RepairInfo {
    pub problem_description: String,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub solution: Option<String>,
    #[serde(default)]
    pub required_parts: String,
    #[serde(default)]
    pub technical_notes: Option<String>,
    #[serde(default)]
    pub warranty: bool,
    #[serde(default = "default_warranty_period")]
    pub warranty_period: String,
    #[serde(default)]
    pub estimated_completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub technician_id: Option<String>,
}

impl Default for RepairInfo {
    fn default() -> Self {
        RepairInfo {
            problem_description: String::new(),
            diagnosis: None,
            solution: None,
            required_parts: String::new(),
            technical_notes: None,
            warranty: false,
            warranty_period: default_warranty_period(),
            estimated_completion_date: None,
            completed_date: None,
            technician_id: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RepairTicket {
    pub id: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: Priority,
    pub customer_info: CustomerInfo,
    pub device_info: DeviceInfo,
    pub repair_info: RepairInfo,
    #[serde(default)]
    pub estimated_cost: Decimal,
    #[serde(default)]
    pub estimated_time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// Inventory & Parts
// ==========================================

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub min_quantity: u32,
    pub price: Decimal,
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}

pub const PART_CATEGORIES: [&str; 4] = ["screens", "batteries", "parts", "accessories"];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub cost: Decimal,
    pub quantity: u32,
    pub min_quantity: u32,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub last_ordered: Option<NaiveDate>,
    #[serde(default)]
    pub compatibility: Vec<String>,
}

impl Part {
    /// Soft alert only; nothing prevents stock from dropping below the threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}

// ==========================================
// Invoices
// ==========================================

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    #[serde(default)]
    pub part_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LaborCharge {
    pub description: String,
    pub hours: Decimal,
    pub rate_per_hour: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Issued,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 4] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Issued,
        InvoiceStatus::Paid,
        InvoiceStatus::Cancelled,
    ];

    pub fn key(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Issued => "issued",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    #[serde(default)]
    pub ticket_id: String,
    pub customer_info: CustomerInfo,
    pub items: Vec<InvoiceItem>,
    pub labor: Vec<LaborCharge>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// Users & Settings
// ==========================================

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Technician,
    #[default]
    Receptionist,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Technician => "Techniker",
            Role::Receptionist => "Empfang",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub password_hash: String,
}

/// The logged-in user as kept in the session, without credentials.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        SessionUser {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}
