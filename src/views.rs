//! Terminal tables for listings, detail views and the dashboard.

use comfy_table::{Attribute, Cell, Color, Table};

use crate::i18n::{self, format_currency, format_date, format_timestamp, t};
use crate::model::{
    Customer, Device, InventoryItem, Invoice, InvoiceStatus, Part, RepairTicket, SessionUser,
    Theme, TicketStatus,
};
use crate::settings::CompanySettings;
use crate::stats::DashboardStats;

/// Colors that stay readable on the chosen terminal background.
struct Palette {
    accent: Color,
    good: Color,
    bad: Color,
    warn: Color,
    muted: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            accent: Color::Rgb { r: 25, g: 118, b: 210 },
            good: Color::Rgb { r: 4, g: 120, b: 87 },
            bad: Color::Rgb { r: 185, g: 28, b: 28 },
            warn: Color::Rgb { r: 180, g: 95, b: 6 },
            muted: Color::Rgb { r: 110, g: 110, b: 110 },
        },
        Theme::Dark => Palette {
            accent: Color::Rgb { r: 100, g: 181, b: 246 },
            good: Color::Rgb { r: 129, g: 199, b: 132 },
            bad: Color::Rgb { r: 239, g: 154, b: 154 },
            warn: Color::Rgb { r: 255, g: 183, b: 77 },
            muted: Color::Rgb { r: 189, g: 189, b: 189 },
        },
    }
}

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|l| Cell::new(t(l)).add_attribute(Attribute::Bold))
        .collect()
}

fn ticket_status_cell(status: TicketStatus, theme: Theme) -> Cell {
    let p = palette(theme);
    let color = match status {
        TicketStatus::New => p.accent,
        TicketStatus::InProgress => p.warn,
        TicketStatus::Ready => p.good,
        TicketStatus::Closed => p.muted,
    };
    Cell::new(i18n::ticket_status(status)).fg(color)
}

fn invoice_status_cell(status: InvoiceStatus, theme: Theme) -> Cell {
    let p = palette(theme);
    let color = match status {
        InvoiceStatus::Draft => p.muted,
        InvoiceStatus::Issued => p.warn,
        InvoiceStatus::Paid => p.good,
        InvoiceStatus::Cancelled => p.bad,
    };
    Cell::new(i18n::invoice_status(status)).fg(color)
}

fn stock_cell(quantity: u32, min_quantity: u32, theme: Theme) -> Cell {
    let p = palette(theme);
    if quantity == 0 {
        Cell::new(format!("{quantity} ({})", t("Out of Stock"))).fg(p.bad)
    } else if quantity <= min_quantity {
        Cell::new(format!("{quantity} ({})", t("Low Stock"))).fg(p.warn)
    } else {
        Cell::new(quantity)
    }
}

pub fn customers_table(customers: &[&Customer]) -> Table {
    let mut table = Table::new();
    table.set_header(header(&["ID", "Name", "Email", "Phone", "Devices", "Created"]));
    for c in customers {
        let devices: Vec<&str> = c.devices.iter().map(|d| i18n::device_type(*d)).collect();
        table.add_row(vec![
            Cell::new(&c.id),
            Cell::new(&c.name),
            Cell::new(&c.email),
            Cell::new(&c.phone),
            Cell::new(devices.join(", ")),
            Cell::new(format_date(c.created_at.date_naive())),
        ]);
    }
    table
}

pub fn devices_table(devices: &[&Device]) -> Table {
    let mut table = Table::new();
    table.set_header(header(&["ID", "Type", "Brand", "Model", "Serial Number", "Condition"]));
    for d in devices {
        table.add_row(vec![
            Cell::new(&d.id),
            Cell::new(i18n::device_type(d.info.device_type)),
            Cell::new(&d.info.brand),
            Cell::new(&d.info.model),
            Cell::new(&d.info.serial_number),
            Cell::new(&d.info.condition),
        ]);
    }
    table
}

pub fn tickets_table(tickets: &[&RepairTicket], theme: Theme) -> Table {
    let mut table = Table::new();
    table.set_header(header(&["ID", "Customer", "Device", "Status", "Priority", "Estimated Cost", "Last updated"]));
    for ticket in tickets {
        table.add_row(vec![
            Cell::new(&ticket.id),
            Cell::new(&ticket.customer_info.name),
            Cell::new(format!("{} {}", ticket.device_info.brand, ticket.device_info.model)),
            ticket_status_cell(ticket.status, theme),
            Cell::new(t(ticket.priority.key())),
            Cell::new(format_currency(ticket.estimated_cost)),
            Cell::new(format_timestamp(ticket.updated_at)),
        ]);
    }
    table
}

pub fn ticket_detail(ticket: &RepairTicket, theme: Theme) -> Table {
    let repair = &ticket.repair_info;
    let mut table = Table::new();
    let mut row = |label: &str, value: Cell| {
        table.add_row(vec![Cell::new(t(label)).add_attribute(Attribute::Bold), value]);
    };

    row("ID", Cell::new(&ticket.id));
    row("Status", ticket_status_cell(ticket.status, theme));
    row("Priority", Cell::new(t(ticket.priority.key())));
    row("Customer", Cell::new(&ticket.customer_info.name));
    row("Phone", Cell::new(&ticket.customer_info.phone));
    row("Email", Cell::new(&ticket.customer_info.email));
    row("Type", Cell::new(i18n::device_type(ticket.device_info.device_type)));
    row("Device", Cell::new(format!("{} {}", ticket.device_info.brand, ticket.device_info.model)));
    row("Serial Number", Cell::new(&ticket.device_info.serial_number));
    row("Condition", Cell::new(&ticket.device_info.condition));
    row("Problem Description", Cell::new(&repair.problem_description));
    if !repair.required_parts.is_empty() {
        row("Required Parts", Cell::new(&repair.required_parts));
    }
    if let Some(notes) = &repair.technical_notes {
        row("Technical Notes", Cell::new(notes));
    }
    row(
        "Warranty",
        Cell::new(if repair.warranty { repair.warranty_period.as_str() } else { "-" }),
    );
    row("Estimated Cost", Cell::new(format_currency(ticket.estimated_cost)));
    row("Estimated Time", Cell::new(&ticket.estimated_time));
    row("Created", Cell::new(format_timestamp(ticket.created_at)));
    row("Last updated", Cell::new(format_timestamp(ticket.updated_at)));
    table
}

pub fn inventory_table(items: &[&InventoryItem], theme: Theme) -> Table {
    let mut table = Table::new();
    table.set_header(header(&["ID", "Name", "Category", "Quantity", "Min Quantity", "Price"]));
    for item in items {
        table.add_row(vec![
            Cell::new(&item.id),
            Cell::new(&item.name),
            Cell::new(t(&item.category)),
            stock_cell(item.quantity, item.min_quantity, theme),
            Cell::new(item.min_quantity),
            Cell::new(format_currency(item.price)),
        ]);
    }
    table
}

pub fn parts_table(parts: &[&Part], theme: Theme) -> Table {
    let mut table = Table::new();
    table.set_header(header(&["ID", "Name", "SKU", "Category", "Quantity", "Min Quantity", "Price", "Location"]));
    for part in parts {
        table.add_row(vec![
            Cell::new(&part.id),
            Cell::new(&part.name),
            Cell::new(&part.sku),
            Cell::new(t(&part.category)),
            stock_cell(part.quantity, part.min_quantity, theme),
            Cell::new(part.min_quantity),
            Cell::new(format_currency(part.price)),
            Cell::new(&part.location),
        ]);
    }
    table
}

pub fn invoices_table(invoices: &[&Invoice], theme: Theme) -> Table {
    let mut table = Table::new();
    table.set_header(header(&["ID", "Customer", "Status", "Total", "Due", "Created"]));
    for invoice in invoices {
        table.add_row(vec![
            Cell::new(&invoice.id),
            Cell::new(&invoice.customer_info.name),
            invoice_status_cell(invoice.status, theme),
            Cell::new(format_currency(invoice.total)),
            Cell::new(format_date(invoice.due_date)),
            Cell::new(format_date(invoice.created_at.date_naive())),
        ]);
    }
    table
}

/// Items and labor lines with the totals block underneath.
pub fn invoice_lines(invoice: &Invoice) -> Table {
    let mut table = Table::new();
    table.set_header(header(&["Pos.", "Name", "Quantity", "Price", "Total"]));
    for (i, item) in invoice.items.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&item.name),
            Cell::new(item.quantity),
            Cell::new(format_currency(item.unit_price)),
            Cell::new(format_currency(item.total)),
        ]);
    }
    for labor in &invoice.labor {
        table.add_row(vec![
            Cell::new(""),
            Cell::new(&labor.description),
            Cell::new(format!("{} h", labor.hours.normalize())),
            Cell::new(format_currency(labor.rate_per_hour)),
            Cell::new(format_currency(labor.total)),
        ]);
    }
    totals_rows(&mut table, invoice);
    table
}

fn totals_rows(table: &mut Table, invoice: &Invoice) {
    let blank = || Cell::new("");
    table.add_row(vec![blank(), blank(), blank(), Cell::new("Zwischensumme"), Cell::new(format_currency(invoice.subtotal))]);
    table.add_row(vec![blank(), blank(), blank(), Cell::new("MwSt. (19%)"), Cell::new(format_currency(invoice.tax))]);
    table.add_row(vec![
        blank(),
        blank(),
        blank(),
        Cell::new("Gesamtbetrag").add_attribute(Attribute::Bold),
        Cell::new(format_currency(invoice.total)).add_attribute(Attribute::Bold),
    ]);
}

pub fn dashboard(stats: &DashboardStats, theme: Theme) -> Table {
    let p = palette(theme);
    let mut table = Table::new();
    table.set_header(header(&["Active Repairs", "Completed Today", "Open Invoices", "Parts (Low)"]));
    let low = Cell::new(stats.low_stock_parts);
    table.add_row(vec![
        Cell::new(stats.active_repairs).fg(p.warn),
        Cell::new(stats.completed).fg(p.good),
        Cell::new(format_currency(stats.open_invoices)).fg(p.accent),
        if stats.low_stock_parts > 0 { low.fg(p.bad) } else { low },
    ]);
    table
}

pub fn company(company: &CompanySettings, theme: Theme, user: Option<&SessionUser>) -> Table {
    let mut table = Table::new();
    let mut row = |label: &str, value: String| {
        table.add_row(vec![Cell::new(t(label)).add_attribute(Attribute::Bold), Cell::new(value)]);
    };
    row("Name", company.name.clone());
    row("Address", company.address.clone());
    row("Phone", company.phone.clone());
    row("Email", company.email.clone());
    row("IBAN", company.bank.iban.clone());
    row("BIC", company.bank.bic.clone());
    row("Stundensatz", format_currency(company.invoice.labor_rate));
    row("Zahlungsziel", format!("{} Tage", company.invoice.payment_terms_days));
    row("Dark Mode", if theme == Theme::Dark { "an" } else { "aus" }.to_string());
    if let Some(user) = user {
        row("Benutzer", format!("{} ({})", user.name, user.role.label()));
    }
    table
}
