mod auth;
mod document;
mod error;
mod export;
mod i18n;
mod invoices;
mod model;
mod notify;
mod search;
mod settings;
mod stats;
mod store;
mod tickets;
mod totals;
mod views;
mod wizard;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::document::{open_and_reveal, DocumentOutcome, DocumentRenderer, DocumentTarget};
use crate::error::AppError;
use crate::i18n::t;
use crate::model::{
    Customer, Device, DeviceInfo, InventoryItem, InvoiceStatus, Part, Record, Theme, TicketStatus,
};
use crate::settings::{load_company, save_company, CompanySettings, DataDirs};
use crate::store::{next_id, Collection, FileStorage, Store};

// ==========================================
// Command line
// ==========================================

#[derive(Parser)]
#[command(name = "repair-desk", version, about = "Reparaturverwaltung für Handy- und Computerwerkstätten")]
struct Cli {
    /// Data directory (overrides the configured one)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configure data directory
    Config,
    /// Log in (prompts for anything not given)
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Log out
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Show repair, invoice and stock figures
    Dashboard,
    /// Manage customers
    Customer {
        #[command(subcommand)]
        action: CustomerCmd,
    },
    /// Manage devices
    Device {
        #[command(subcommand)]
        action: DeviceCmd,
    },
    /// Manage repair tickets
    Ticket {
        #[command(subcommand)]
        action: TicketCmd,
    },
    /// Manage simple stock items
    Inventory {
        #[command(subcommand)]
        action: InventoryCmd,
    },
    /// Manage spare parts
    Part {
        #[command(subcommand)]
        action: PartCmd,
    },
    /// Manage invoices
    Invoice {
        #[command(subcommand)]
        action: InvoiceCmd,
    },
    /// Theme, company details and repair terms
    Settings {
        #[command(subcommand)]
        action: SettingsCmd,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserCmd,
    },
}

#[derive(Subcommand, Debug)]
enum CustomerCmd {
    Add,
    List {
        /// Filter by name or email
        #[arg(short, long)]
        search: Option<String>,
    },
    Edit { id: Option<String> },
    Delete {
        id: Option<String>,
        #[arg(short, long)]
        yes: bool,
    },
    /// Export all customers as CSV
    Export,
}

#[derive(Subcommand, Debug)]
enum DeviceCmd {
    Add,
    List,
    Edit { id: Option<String> },
    Delete {
        id: Option<String>,
        #[arg(short, long)]
        yes: bool,
    },
    Export,
}

#[derive(Subcommand, Debug)]
enum TicketCmd {
    /// Create a new repair ticket
    New,
    List {
        /// Filter by customer name, device model or ticket id
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        status: Option<TicketStatus>,
    },
    Show { id: Option<String> },
    /// Change the ticket status
    Status {
        id: Option<String>,
        #[arg(value_enum)]
        status: Option<TicketStatus>,
    },
    /// Print the ticket, or save it as PDF with --save
    Print {
        id: Option<String>,
        #[arg(long)]
        save: bool,
    },
    Delete {
        id: Option<String>,
        #[arg(short, long)]
        yes: bool,
    },
    Export,
}

#[derive(Subcommand, Debug)]
enum InventoryCmd {
    Add,
    List {
        /// Only items at or below their minimum quantity
        #[arg(long)]
        low: bool,
    },
    Edit { id: Option<String> },
    Delete {
        id: Option<String>,
        #[arg(short, long)]
        yes: bool,
    },
    Export,
}

#[derive(Subcommand, Debug)]
enum PartCmd {
    Add,
    List {
        /// Filter by name or SKU
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        low: bool,
    },
    Edit { id: Option<String> },
    /// Set the quantity on hand
    Stock { id: Option<String>, quantity: Option<u32> },
    Delete {
        id: Option<String>,
        #[arg(short, long)]
        yes: bool,
    },
    Export,
}

#[derive(Subcommand, Debug)]
enum InvoiceCmd {
    /// Create an invoice from parts and labor
    New,
    List {
        /// Filter by invoice id or customer name
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        status: Option<InvoiceStatus>,
    },
    Show { id: Option<String> },
    Status {
        id: Option<String>,
        #[arg(value_enum)]
        status: Option<InvoiceStatus>,
        /// Payment method when marking as paid
        #[arg(long)]
        method: Option<String>,
    },
    /// Drafts are saved as PDF, other invoices printed, unless overridden
    Print {
        id: Option<String>,
        #[arg(long, conflicts_with = "print")]
        save: bool,
        #[arg(long)]
        print: bool,
    },
    Delete {
        id: Option<String>,
        #[arg(short, long)]
        yes: bool,
    },
    Export,
}

#[derive(Subcommand, Debug)]
enum SettingsCmd {
    Show,
    /// Set the theme, or toggle it when none is given
    Theme {
        #[arg(value_enum)]
        theme: Option<Theme>,
    },
    /// Edit company details used on documents
    Company,
    /// Replace the repair terms
    Terms,
}

#[derive(Subcommand, Debug)]
enum UserCmd {
    /// Register a local user
    Add,
}

impl Commands {
    fn needs_session(&self) -> bool {
        !matches!(
            self,
            Commands::Config | Commands::Login { .. } | Commands::User { action: UserCmd::Add }
        )
    }
}

// ==========================================
// Main Function
// ==========================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help().ok();
        return ExitCode::SUCCESS;
    };

    let mut log_guard = None;
    match run(cli.data_dir, command, &mut log_guard) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("command failed: {e:#}");
            let key = e
                .downcast_ref::<AppError>()
                .map(AppError::user_message)
                .unwrap_or("Operation failed");
            notify::error(key);
            ExitCode::FAILURE
        }
    }
}

/// Console output only when `RUST_LOG` is set; the daily file always logs.
fn init_logging(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    fs::create_dir_all(log_dir).with_context(|| format!("creating log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "repair-desk.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_filter(EnvFilter::new("info,repair_desk=debug"));
    let console_layer = EnvFilter::try_from_default_env()
        .ok()
        .map(|filter| fmt::layer().with_writer(std::io::stderr).with_target(true).with_filter(filter));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("installing tracing subscriber")?;
    Ok(guard)
}

/// Returns the data root and whether commands need a session. An explicit
/// `--data-dir` never consults the host settings and always requires login.
fn resolve_data_root(data_dir: Option<PathBuf>) -> anyhow::Result<(PathBuf, bool)> {
    if let Some(dir) = data_dir {
        return Ok((dir, true));
    }
    let app_settings = match settings::load_settings() {
        Some(s) => s,
        None => settings::setup_config_wizard()?,
    };
    let root = PathBuf::from(settings::expand_home_dir(&app_settings.data_root));
    Ok((root, app_settings.require_login))
}

/// `log_guard` outlives this call so failures can still be written by `main`.
fn run(data_dir: Option<PathBuf>, command: Commands, log_guard: &mut Option<WorkerGuard>) -> anyhow::Result<()> {
    if let Commands::Config = command {
        let app_settings = settings::setup_config_wizard()?;
        notify::success_with("Saved successfully", &app_settings.data_root);
        return Ok(());
    }

    let (root, require_login) = resolve_data_root(data_dir)?;
    let dirs = DataDirs::new(root);
    fs::create_dir_all(&dirs.root)
        .with_context(|| format!("creating data directory {}", dirs.root.display()))?;
    *log_guard = Some(init_logging(&dirs.logs())?);
    info!(version = env!("CARGO_PKG_VERSION"), root = %dirs.root.display(), ?command, "repair-desk starting");

    let storage = FileStorage::open(dirs.storage()).context("opening storage")?;
    let mut store = Store::load(Box::new(storage));

    if require_login && command.needs_session() {
        auth::require_session(&store)?;
    }

    let mut app = App { dirs, store: &mut store };
    app.dispatch(command)
}

// ==========================================
// Command handlers
// ==========================================

struct App<'a> {
    dirs: DataDirs,
    store: &'a mut Store,
}

/// Uses the given id or lets the user pick one from the collection.
fn choose<T: Record>(
    id: Option<String>,
    prompt: &str,
    items: &Collection<T>,
    label: impl Fn(&T) -> String,
) -> anyhow::Result<String> {
    match id {
        Some(id) => Ok(id),
        None => {
            let options = items.iter().map(|r| (r.id().to_string(), label(r))).collect();
            Ok(wizard::pick(prompt, options)?)
        }
    }
}

fn confirm_delete(what: &str, yes: bool) -> anyhow::Result<()> {
    if yes || wizard::confirm(&format!("{what} wirklich löschen?"))? {
        Ok(())
    } else {
        Err(AppError::Cancelled.into())
    }
}

fn now() -> DateTime<Utc> {
    Utc::now()
}

impl App<'_> {
    fn dispatch(&mut self, command: Commands) -> anyhow::Result<()> {
        match command {
            Commands::Config => Ok(()),
            Commands::Login { email, password } => self.login(email, password),
            Commands::Logout => {
                auth::logout(self.store);
                notify::success("Logged out successfully");
                Ok(())
            }
            Commands::Whoami => {
                let user = auth::require_session(self.store)?;
                println!("👤 {} <{}> ({})", user.name, user.email, user.role.label());
                Ok(())
            }
            Commands::Dashboard => self.dashboard(),
            Commands::Customer { action } => self.customer(action),
            Commands::Device { action } => self.device(action),
            Commands::Ticket { action } => self.ticket(action),
            Commands::Inventory { action } => self.inventory(action),
            Commands::Part { action } => self.part(action),
            Commands::Invoice { action } => self.invoice(action),
            Commands::Settings { action } => self.settings(action),
            Commands::User { action: UserCmd::Add } => {
                let new_user = wizard::user_wizard()?;
                let user = auth::register(self.store, new_user, now())?;
                notify::success_with("Registration successful", &user.email);
                Ok(())
            }
        }
    }

    fn company(&self) -> anyhow::Result<CompanySettings> {
        let path = self.dirs.company_file();
        load_company(&path).with_context(|| format!("loading {}", path.display()))
    }

    fn login(&mut self, email: Option<String>, password: Option<String>) -> anyhow::Result<()> {
        let (email, password) = match (email, password) {
            (Some(email), Some(password)) => (email, password),
            _ => wizard::login_prompt()?,
        };
        let user = auth::login(self.store, &email, &password)?;
        notify::success_with("Login successful", format!("{} ({})", user.name, user.role.label()));
        Ok(())
    }

    fn dashboard(&self) -> anyhow::Result<()> {
        let theme = self.store.theme();
        let figures = stats::dashboard_stats(self.store);
        println!("\n--- {} ---", t("Dashboard"));
        println!("{}", views::dashboard(&figures, theme));

        println!("\n--- {} ---", t("Recent Tickets"));
        let recent = stats::recent_tickets(self.store);
        if recent.is_empty() {
            notify::info("No recent tickets");
        } else {
            println!("{}", views::tickets_table(&recent, theme));
        }

        let low = stats::low_stock_parts(self.store);
        if !low.is_empty() {
            println!("\n--- {} ---", t("Low Stock"));
            println!("{}", views::parts_table(&low, theme));
        }
        Ok(())
    }

    fn export<T: serde::Serialize>(&self, records: &[T], name: &str) -> anyhow::Result<()> {
        let path = export::export_csv(records, &self.dirs.exports(), name)?;
        notify::success_with("Export successful", path.display());
        Ok(())
    }

    // --- customers & devices ---------------------------------------------

    fn customer(&mut self, action: CustomerCmd) -> anyhow::Result<()> {
        match action {
            CustomerCmd::Add => {
                let at = now();
                let blank = Customer {
                    id: next_id("", at, |id| self.store.customers.contains(id)),
                    name: String::new(),
                    email: String::new(),
                    phone: String::new(),
                    address: None,
                    devices: vec![],
                    created_at: at,
                };
                let customer = wizard::customer_wizard(blank)?;
                info!(customer = %customer.id, "customer added");
                self.store.add_customer(customer);
                notify::success("Customer added successfully");
            }
            CustomerCmd::List { search } => {
                let found = search::customers(self.store, search.as_deref());
                println!("{}", views::customers_table(&found));
            }
            CustomerCmd::Edit { id } => {
                let id = choose(id, "Kunde:", &self.store.customers, |c| format!("{} | {}", c.name, c.email))?;
                let current = self.store.customers.get(&id).cloned().ok_or_else(|| AppError::not_found("customer", &id))?;
                let customer = wizard::customer_wizard(current)?;
                self.store.update_customer(customer);
                notify::success("Customer updated successfully");
            }
            CustomerCmd::Delete { id, yes } => {
                let id = choose(id, "Kunde:", &self.store.customers, |c| format!("{} | {}", c.name, c.email))?;
                confirm_delete(&format!("Kunde {id}"), yes)?;
                self.store.delete_customer(&id).ok_or_else(|| AppError::not_found("customer", &id))?;
                notify::success("Deleted successfully");
            }
            CustomerCmd::Export => self.export(self.store.customers.as_slice(), export::CUSTOMERS_EXPORT)?,
        }
        Ok(())
    }

    fn device(&mut self, action: DeviceCmd) -> anyhow::Result<()> {
        let label = |d: &Device| format!("{} {} | {}", d.info.brand, d.info.model, d.info.serial_number);
        match action {
            DeviceCmd::Add => {
                let blank = Device {
                    id: next_id("", now(), |id| self.store.devices.contains(id)),
                    info: DeviceInfo::default(),
                };
                let device = wizard::device_wizard(blank)?;
                self.store.add_device(device);
                notify::success("Device added successfully");
            }
            DeviceCmd::List => {
                let all: Vec<&Device> = self.store.devices.iter().collect();
                println!("{}", views::devices_table(&all));
            }
            DeviceCmd::Edit { id } => {
                let id = choose(id, "Gerät:", &self.store.devices, label)?;
                let current = self.store.devices.get(&id).cloned().ok_or_else(|| AppError::not_found("device", &id))?;
                let device = wizard::device_wizard(current)?;
                self.store.update_device(device);
                notify::success("Saved successfully");
            }
            DeviceCmd::Delete { id, yes } => {
                let id = choose(id, "Gerät:", &self.store.devices, label)?;
                confirm_delete(&format!("Gerät {id}"), yes)?;
                self.store.delete_device(&id).ok_or_else(|| AppError::not_found("device", &id))?;
                notify::success("Deleted successfully");
            }
            DeviceCmd::Export => self.export(self.store.devices.as_slice(), export::DEVICES_EXPORT)?,
        }
        Ok(())
    }

    // --- tickets ---------------------------------------------------------

    fn pick_ticket(&self, id: Option<String>) -> anyhow::Result<String> {
        choose(id, "Auftrag:", &self.store.tickets, |t| {
            format!("{} | {} | {} {} | {}", t.id, t.customer_info.name, t.device_info.brand, t.device_info.model, i18n::ticket_status(t.status))
        })
    }

    fn ticket(&mut self, action: TicketCmd) -> anyhow::Result<()> {
        let theme = self.store.theme();
        match action {
            TicketCmd::New => {
                let input = wizard::ticket_wizard(self.store)?;
                let ticket = tickets::create_ticket(self.store, input, now());
                notify::success_with("Repair ticket created successfully", &ticket.id);
            }
            TicketCmd::List { search, status } => {
                let found: Vec<_> = tickets::search(self.store, search.as_deref())
                    .into_iter()
                    .filter(|ticket| status.is_none_or(|s| ticket.status == s))
                    .collect();
                println!("{}", views::tickets_table(&found, theme));
            }
            TicketCmd::Show { id } => {
                let id = self.pick_ticket(id)?;
                let ticket = tickets::find_ticket(self.store, &id)?;
                println!("{}", views::ticket_detail(ticket, theme));
            }
            TicketCmd::Status { id, status } => {
                let id = self.pick_ticket(id)?;
                let current = tickets::find_ticket(self.store, &id)?.status;
                let status = match status {
                    Some(s) => s,
                    None => wizard::select_ticket_status(current)?,
                };
                tickets::set_status(self.store, &id, status, now())?;
                // read back what was persisted
                self.store.reload_tickets();
                let stored = tickets::find_ticket(self.store, &id)?;
                notify::success_with("Status updated successfully", i18n::ticket_status(stored.status));
            }
            TicketCmd::Print { id, save } => {
                let id = self.pick_ticket(id)?;
                let ticket = tickets::find_ticket(self.store, &id)?.clone();
                let company = self.company()?;
                let target = if save { DocumentTarget::Save } else { DocumentTarget::Print };
                notify::info(if save { "Generating PDF..." } else { "Preparing ticket for printing..." });
                let renderer = DocumentRenderer::new(&company, self.dirs.templates(), self.dirs.output());
                let outcome = renderer.ticket(&ticket, target).map_err(AppError::from)?;
                report_document(outcome);
            }
            TicketCmd::Delete { id, yes } => {
                let id = self.pick_ticket(id)?;
                confirm_delete(&format!("Auftrag {id}"), yes)?;
                tickets::delete_ticket(self.store, &id)?;
                notify::success("Deleted successfully");
            }
            TicketCmd::Export => self.export(self.store.tickets.as_slice(), export::TICKETS_EXPORT)?,
        }
        Ok(())
    }

    // --- stock -----------------------------------------------------------

    fn inventory(&mut self, action: InventoryCmd) -> anyhow::Result<()> {
        let theme = self.store.theme();
        let label = |i: &InventoryItem| format!("{} | {} | {}", i.name, t(&i.category), i.quantity);
        match action {
            InventoryCmd::Add => {
                let blank = InventoryItem {
                    id: next_id("", now(), |id| self.store.inventory.contains(id)),
                    name: String::new(),
                    category: String::new(),
                    quantity: 0,
                    min_quantity: 0,
                    price: Default::default(),
                };
                let item = wizard::inventory_wizard(blank)?;
                self.store.add_inventory_item(item);
                notify::success("Item added successfully");
            }
            InventoryCmd::List { low } => {
                let items: Vec<&InventoryItem> =
                    self.store.inventory.iter().filter(|i| !low || i.is_low_stock()).collect();
                println!("{}", views::inventory_table(&items, theme));
            }
            InventoryCmd::Edit { id } => {
                let id = choose(id, "Artikel:", &self.store.inventory, label)?;
                let current = self.store.inventory.get(&id).cloned().ok_or_else(|| AppError::not_found("item", &id))?;
                let item = wizard::inventory_wizard(current)?;
                self.store.update_inventory_item(item);
                notify::success("Saved successfully");
            }
            InventoryCmd::Delete { id, yes } => {
                let id = choose(id, "Artikel:", &self.store.inventory, label)?;
                confirm_delete(&format!("Artikel {id}"), yes)?;
                self.store.delete_inventory_item(&id).ok_or_else(|| AppError::not_found("item", &id))?;
                notify::success("Deleted successfully");
            }
            InventoryCmd::Export => self.export(self.store.inventory.as_slice(), export::INVENTORY_EXPORT)?,
        }
        Ok(())
    }

    fn part(&mut self, action: PartCmd) -> anyhow::Result<()> {
        let theme = self.store.theme();
        let label = |p: &Part| format!("{} ({}) | Bestand {}", p.name, p.sku, p.quantity);
        match action {
            PartCmd::Add => {
                let blank = Part {
                    id: next_id("P-", now(), |id| self.store.parts.contains(id)),
                    name: String::new(),
                    sku: String::new(),
                    category: model::PART_CATEGORIES[0].to_string(),
                    description: String::new(),
                    price: Default::default(),
                    cost: Default::default(),
                    quantity: 0,
                    min_quantity: 1,
                    supplier: String::new(),
                    location: String::new(),
                    last_ordered: None,
                    compatibility: vec![],
                };
                let part = wizard::part_wizard(blank)?;
                self.store.add_part(part);
                notify::success("Part added successfully");
            }
            PartCmd::List { search, category, low } => {
                let found = search::parts(self.store, search.as_deref(), category.as_deref(), low);
                println!("{}", views::parts_table(&found, theme));
            }
            PartCmd::Edit { id } => {
                let id = choose(id, "Ersatzteil:", &self.store.parts, label)?;
                let current = self.store.parts.get(&id).cloned().ok_or_else(|| AppError::not_found("part", &id))?;
                let part = wizard::part_wizard(current)?;
                self.store.update_part(part);
                notify::success("Saved successfully");
            }
            PartCmd::Stock { id, quantity } => {
                let id = choose(id, "Ersatzteil:", &self.store.parts, label)?;
                let current = self.store.parts.get(&id).ok_or_else(|| AppError::not_found("part", &id))?;
                let quantity = match quantity {
                    Some(q) => q,
                    None => inquire::CustomType::<u32>::new("Neuer Bestand:")
                        .with_default(current.quantity)
                        .prompt()
                        .map_err(AppError::from)?,
                };
                self.store.update_part_quantity(&id, quantity);
                if let Some(part) = self.store.parts.get(&id).filter(|p| p.is_low_stock()) {
                    warn!(part = %part.id, quantity = part.quantity, min = part.min_quantity, "part below reorder threshold");
                    notify::warning(format!("{}: {} ({} / {})", t("Low Stock"), part.name, part.quantity, part.min_quantity));
                }
                notify::success("Stock updated successfully");
            }
            PartCmd::Delete { id, yes } => {
                let id = choose(id, "Ersatzteil:", &self.store.parts, label)?;
                confirm_delete(&format!("Ersatzteil {id}"), yes)?;
                self.store.delete_part(&id).ok_or_else(|| AppError::not_found("part", &id))?;
                notify::success("Deleted successfully");
            }
            PartCmd::Export => self.export(self.store.parts.as_slice(), export::PARTS_EXPORT)?,
        }
        Ok(())
    }

    // --- invoices --------------------------------------------------------

    fn pick_invoice(&self, id: Option<String>) -> anyhow::Result<String> {
        choose(id, "Rechnung:", &self.store.invoices, |i| {
            format!("{} | {} | {} | {}", i.id, i.customer_info.name, i18n::format_currency(i.total), i18n::invoice_status(i.status))
        })
    }

    fn invoice(&mut self, action: InvoiceCmd) -> anyhow::Result<()> {
        let theme = self.store.theme();
        match action {
            InvoiceCmd::New => {
                let company = self.company()?;
                let (header, draft) = wizard::invoice_wizard(self.store, &company)?;
                let invoice = invoices::create_invoice(self.store, header, draft, company.invoice.payment_terms_days, now())?;
                notify::success_with("Invoice created successfully", format!("{} ({})", invoice.id, i18n::format_currency(invoice.total)));
            }
            InvoiceCmd::List { search, status } => {
                let found = invoices::search(self.store, search.as_deref(), status);
                println!("{}", views::invoices_table(&found, theme));
            }
            InvoiceCmd::Show { id } => {
                let id = self.pick_invoice(id)?;
                let invoice = invoices::find_invoice(self.store, &id)?;
                println!(
                    "🧾 {} | {} | {} | {}: {}",
                    invoice.id,
                    invoice.customer_info.name,
                    i18n::invoice_status(invoice.status),
                    t("Due"),
                    i18n::format_date(invoice.due_date)
                );
                println!("{}", views::invoice_lines(invoice));
                for reference in invoices::dangling_references(self.store, invoice) {
                    notify::warning(format!("{}: {reference}", t("Record not found")));
                }
            }
            InvoiceCmd::Status { id, status, method } => {
                let id = self.pick_invoice(id)?;
                let current = invoices::find_invoice(self.store, &id)?.status;
                let status = match status {
                    Some(s) => s,
                    None => wizard::select_invoice_status(current)?,
                };
                let method = match (status, method) {
                    (InvoiceStatus::Paid, None) => Some(wizard::payment_method()?),
                    (_, method) => method,
                };
                let invoice = invoices::set_status(self.store, &id, status, method, now())?;
                notify::success_with("Status updated successfully", i18n::invoice_status(invoice.status));
            }
            InvoiceCmd::Print { id, save, print } => {
                let id = self.pick_invoice(id)?;
                let invoice = invoices::find_invoice(self.store, &id)?.clone();
                let target = if save {
                    DocumentTarget::Save
                } else if print {
                    DocumentTarget::Print
                } else {
                    DocumentTarget::default_for_invoice(invoice.status)
                };
                debug!(invoice = %invoice.id, ?target, "rendering invoice");
                let company = self.company()?;
                notify::info("Generating PDF...");
                let renderer = DocumentRenderer::new(&company, self.dirs.templates(), self.dirs.output());
                let outcome = renderer.invoice(&invoice, target).map_err(AppError::from)?;
                report_document(outcome);
            }
            InvoiceCmd::Delete { id, yes } => {
                let id = self.pick_invoice(id)?;
                confirm_delete(&format!("Rechnung {id}"), yes)?;
                invoices::delete_invoice(self.store, &id)?;
                notify::success("Deleted successfully");
            }
            InvoiceCmd::Export => self.export(self.store.invoices.as_slice(), export::INVOICES_EXPORT)?,
        }
        Ok(())
    }

    // --- settings --------------------------------------------------------

    fn settings(&mut self, action: SettingsCmd) -> anyhow::Result<()> {
        let path = self.dirs.company_file();
        match action {
            SettingsCmd::Show => {
                let company = self.company()?;
                println!("{}", views::company(&company, self.store.theme(), self.store.session()));
                println!("\nGeschäftsbedingungen:");
                for line in company.terms_lines() {
                    println!("   {line}");
                }
            }
            SettingsCmd::Theme { theme } => {
                let theme = theme.unwrap_or(match self.store.theme() {
                    Theme::Light => Theme::Dark,
                    Theme::Dark => Theme::Light,
                });
                self.store.set_theme(theme);
                notify::success_with("Saved successfully", format!("{}: {}", t("Dark Mode"), if theme == Theme::Dark { "an" } else { "aus" }));
            }
            SettingsCmd::Company => {
                let company = wizard::company_wizard(self.company()?)?;
                save_company(&path, &company)?;
                info!(company = %slug::slugify(&company.name), "company settings saved");
                notify::success("Saved successfully");
            }
            SettingsCmd::Terms => {
                let mut company = self.company()?;
                company.terms = wizard::terms_wizard(&company.terms_lines())?;
                save_company(&path, &company)?;
                notify::success("Saved successfully");
            }
        }
        Ok(())
    }
}

fn report_document(outcome: DocumentOutcome) {
    match outcome {
        DocumentOutcome::Saved(path) => {
            notify::success_with("PDF downloaded successfully", path.display());
            open_and_reveal(&path);
        }
        DocumentOutcome::Printed => notify::success("Print job sent successfully"),
    }
}
