//! Interactive forms built on inquire.

use std::sync::LazyLock;

use chrono::Local;
use inquire::validator::Validation;
use inquire::{Confirm, CustomUserError, DateSelect, MultiSelect, Password, Select, Text};
use regex::Regex;
use rust_decimal::Decimal;

use crate::auth::NewUser;
use crate::error::{AppError, Result};
use crate::i18n::{self, format_currency, t};
use crate::invoices::InvoiceHeader;
use crate::notify;
use crate::model::{
    Customer, CustomerInfo, Device, DeviceInfo, DeviceType, InventoryItem, InvoiceStatus, Part,
    Priority, RepairInfo, Role, TicketStatus, PART_CATEGORIES,
};
use crate::settings::CompanySettings;
use crate::store::Store;
use crate::tickets::TicketInput;
use crate::totals::{InvoiceDraft, INPUT_DP, MAX_AMOUNT, MAX_HOURS, MAX_QUANTITY};

const NEW_CUSTOMER_OPT: &str = "➕ Neuer Kunde";
const NEW_DEVICE_OPT: &str = "➕ Neues Gerät";
const NO_TICKET_OPT: &str = "— ohne Auftrag —";

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email.trim()))
}

/// Accepts `12,50` as well as `12.50`.
pub fn parse_decimal(input: &str) -> Option<Decimal> {
    input.trim().replace(',', ".").parse().ok()
}

fn optional(input: String) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

fn email_validator(input: &str) -> std::result::Result<Validation, CustomUserError> {
    if is_valid_email(input) {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid("Bitte eine gültige E-Mail-Adresse eingeben".into()))
    }
}

fn required(input: &str) -> std::result::Result<Validation, CustomUserError> {
    if input.trim().is_empty() {
        Ok(Validation::Invalid("Pflichtfeld".into()))
    } else {
        Ok(Validation::Valid)
    }
}

fn decimal_validator(input: &str) -> std::result::Result<Validation, CustomUserError> {
    match parse_decimal(input) {
        Some(v) if v.is_sign_negative() || v > MAX_AMOUNT => Ok(Validation::Invalid(
            format!("Bitte einen Betrag zwischen 0 und {} eingeben", format_currency(MAX_AMOUNT)).into(),
        )),
        Some(v) if v.scale() > INPUT_DP => Ok(Validation::Invalid("Höchstens zwei Nachkommastellen".into())),
        Some(_) => Ok(Validation::Valid),
        None => Ok(Validation::Invalid("Bitte einen Betrag eingeben, z. B. 12,50".into())),
    }
}

fn hours_validator(input: &str) -> std::result::Result<Validation, CustomUserError> {
    match parse_decimal(input) {
        Some(v) if v <= Decimal::ZERO || v > MAX_HOURS => Ok(Validation::Invalid(
            format!("Bitte Stunden größer 0 und höchstens {MAX_HOURS} eingeben").into(),
        )),
        Some(v) if v.scale() > INPUT_DP => Ok(Validation::Invalid("Höchstens zwei Nachkommastellen".into())),
        Some(_) => Ok(Validation::Valid),
        None => Ok(Validation::Invalid("Bitte eine Zahl eingeben, z. B. 1,5".into())),
    }
}

fn count_validator(input: &str) -> std::result::Result<Validation, CustomUserError> {
    match input.trim().parse::<u32>() {
        Ok(_) => Ok(Validation::Valid),
        Err(_) => Ok(Validation::Invalid("Bitte eine ganze Zahl ≥ 0 eingeben".into())),
    }
}

fn quantity_validator(input: &str) -> std::result::Result<Validation, CustomUserError> {
    match input.trim().parse::<u32>() {
        Ok(q) if (1..=MAX_QUANTITY).contains(&q) => Ok(Validation::Valid),
        _ => Ok(Validation::Invalid(format!("Bitte eine Menge von 1 bis {MAX_QUANTITY} eingeben").into())),
    }
}

fn prompt_parsed(
    label: &str,
    default: Decimal,
    validator: fn(&str) -> std::result::Result<Validation, CustomUserError>,
) -> Result<Decimal> {
    let default = default.normalize().to_string().replace('.', ",");
    let answer = Text::new(label)
        .with_default(&default)
        .with_validator(validator)
        .prompt()?;
    parse_decimal(&answer).ok_or_else(|| AppError::InvalidInput(format!("not a number: {answer}")))
}

fn prompt_decimal(label: &str, default: Decimal) -> Result<Decimal> {
    prompt_parsed(label, default, decimal_validator)
}

fn prompt_hours(label: &str, default: Decimal) -> Result<Decimal> {
    prompt_parsed(label, default, hours_validator)
}

fn prompt_counted(
    label: &str,
    default: u32,
    validator: fn(&str) -> std::result::Result<Validation, CustomUserError>,
) -> Result<u32> {
    let answer = Text::new(label)
        .with_default(&default.to_string())
        .with_validator(validator)
        .prompt()?;
    answer
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("not a count: {answer}")))
}

/// Stock counts, where 0 is allowed.
fn prompt_count(label: &str, default: u32) -> Result<u32> {
    prompt_counted(label, default, count_validator)
}

/// Invoice line quantities, at least 1.
fn prompt_quantity(label: &str, default: u32) -> Result<u32> {
    prompt_counted(label, default, quantity_validator)
}

fn prompt_text(label: &str, default: &str) -> Result<String> {
    Ok(Text::new(label).with_default(default).prompt()?.trim().to_string())
}

fn prompt_required(label: &str, default: &str) -> Result<String> {
    Ok(Text::new(label)
        .with_default(default)
        .with_validator(required)
        .prompt()?
        .trim()
        .to_string())
}

fn prompt_optional(label: &str, default: Option<&str>) -> Result<Option<String>> {
    Ok(optional(Text::new(label).with_default(default.unwrap_or("")).prompt()?))
}

fn select_device_type(default: DeviceType) -> Result<DeviceType> {
    let labels: Vec<&str> = DeviceType::ALL.iter().map(|d| i18n::device_type(*d)).collect();
    let start = DeviceType::ALL.iter().position(|d| *d == default).unwrap_or(0);
    let choice = Select::new("Gerätetyp:", labels).with_starting_cursor(start).raw_prompt()?;
    Ok(DeviceType::ALL[choice.index])
}

/// Picks one id out of `(id, label)` pairs.
pub fn pick(prompt: &str, options: Vec<(String, String)>) -> Result<String> {
    if options.is_empty() {
        return Err(AppError::NoData);
    }
    let labels: Vec<String> = options.iter().map(|(_, label)| label.clone()).collect();
    let choice = Select::new(prompt, labels).raw_prompt()?;
    Ok(options[choice.index].0.clone())
}

pub fn confirm(question: &str) -> Result<bool> {
    Ok(Confirm::new(question).with_default(false).prompt()?)
}

// ==========================================
// Customers & Devices
// ==========================================

/// Fills `base` from prompts; every field defaults to its current value.
pub fn customer_wizard(mut base: Customer) -> Result<Customer> {
    println!("\n--- {} ---", t("Customer Information"));
    base.name = prompt_required("Name:", &base.name)?;
    base.email = Text::new("E-Mail:")
        .with_default(&base.email)
        .with_validator(email_validator)
        .prompt()?
        .trim()
        .to_string();
    base.phone = prompt_required("Telefon:", &base.phone)?;
    base.address = prompt_optional("Adresse (optional):", base.address.as_deref())?;

    let labels: Vec<&str> = DeviceType::ALL.iter().map(|d| i18n::device_type(*d)).collect();
    let selected: Vec<usize> = DeviceType::ALL
        .iter()
        .enumerate()
        .filter(|(_, d)| base.devices.contains(d))
        .map(|(i, _)| i)
        .collect();
    let chosen = MultiSelect::new("Geräte des Kunden:", labels)
        .with_default(&selected)
        .raw_prompt()?;
    base.devices = chosen.into_iter().map(|o| DeviceType::ALL[o.index]).collect();
    Ok(base)
}

fn device_info_wizard(base: DeviceInfo) -> Result<DeviceInfo> {
    Ok(DeviceInfo {
        device_type: select_device_type(base.device_type)?,
        brand: prompt_required("Marke:", &base.brand)?,
        model: prompt_required("Modell:", &base.model)?,
        serial_number: prompt_text("Seriennummer:", &base.serial_number)?,
        condition: prompt_text("Zustand:", &base.condition)?,
    })
}

pub fn device_wizard(mut base: Device) -> Result<Device> {
    println!("\n--- {} ---", t("Device Information"));
    base.info = device_info_wizard(base.info)?;
    Ok(base)
}

// ==========================================
// Tickets
// ==========================================

fn customer_snapshot(store: &Store) -> Result<(Option<String>, CustomerInfo)> {
    let mut options = vec![NEW_CUSTOMER_OPT.to_string()];
    options.extend(store.customers.iter().map(|c| format!("{} | {} | {}", c.name, c.phone, c.id)));
    let choice = Select::new("Kunde auswählen (tippen zum Filtern):", options).raw_prompt()?;

    if choice.index == 0 {
        println!("\n--- {} ---", t("Customer Information"));
        let info = CustomerInfo {
            name: prompt_required("Name:", "")?,
            phone: prompt_required("Telefon:", "")?,
            email: Text::new("E-Mail:").with_validator(email_validator).prompt()?.trim().to_string(),
            address: prompt_optional("Adresse (optional):", None)?,
            ..Default::default()
        };
        return Ok((None, info));
    }
    let customer = &store.customers.as_slice()[choice.index - 1];
    Ok((Some(customer.id.clone()), customer.info()))
}

fn device_snapshot(store: &Store) -> Result<(Option<String>, DeviceInfo)> {
    let mut options = vec![NEW_DEVICE_OPT.to_string()];
    options.extend(
        store
            .devices
            .iter()
            .map(|d| format!("{} {} | {} | {}", d.info.brand, d.info.model, d.info.serial_number, d.id)),
    );
    let choice = Select::new("Gerät auswählen:", options).raw_prompt()?;

    if choice.index == 0 {
        println!("\n--- {} ---", t("Device Information"));
        return Ok((None, device_info_wizard(DeviceInfo::default())?));
    }
    let device = &store.devices.as_slice()[choice.index - 1];
    Ok((Some(device.id.clone()), device.info.clone()))
}

pub fn ticket_wizard(store: &Store) -> Result<TicketInput> {
    let (customer_id, customer_info) = customer_snapshot(store)?;
    let (device_id, device_info) = device_snapshot(store)?;

    println!("\n--- {} ---", t("Repair Information"));
    let problem_description = prompt_required("Problembeschreibung:", "")?;
    let required_parts = prompt_text("Benötigte Teile:", "")?;
    let technical_notes = prompt_optional("Technische Notizen (optional):", None)?;

    let priorities = [Priority::Low, Priority::Medium, Priority::High];
    let labels: Vec<&str> = priorities.iter().map(|p| t(p.key())).collect();
    let priority = priorities[Select::new("Priorität:", labels).with_starting_cursor(1).raw_prompt()?.index];

    let warranty = Confirm::new("Mit Garantie?").with_default(true).prompt()?;
    let warranty_period = if warranty {
        prompt_text("Garantiezeitraum:", &RepairInfo::default().warranty_period)?
    } else {
        RepairInfo::default().warranty_period
    };

    let estimated_cost = prompt_decimal("Geschätzte Kosten (€):", Decimal::ZERO)?;
    let estimated_time = prompt_text("Geschätzte Zeit:", "")?;
    let estimated_completion_date = if Confirm::new("Fertigstellungstermin festlegen?").with_default(false).prompt()? {
        Some(
            DateSelect::new("Voraussichtlich fertig am:")
                .with_default(Local::now().date_naive())
                .prompt()?,
        )
    } else {
        None
    };

    Ok(TicketInput {
        customer_id,
        device_id,
        priority,
        customer_info,
        device_info,
        repair_info: RepairInfo {
            problem_description,
            required_parts,
            technical_notes,
            warranty,
            warranty_period,
            estimated_completion_date,
            ..Default::default()
        },
        estimated_cost,
        estimated_time,
    })
}

pub fn select_ticket_status(current: TicketStatus) -> Result<TicketStatus> {
    let labels: Vec<&str> = TicketStatus::ALL.iter().map(|s| i18n::ticket_status(*s)).collect();
    let start = TicketStatus::ALL.iter().position(|s| *s == current).unwrap_or(0);
    let choice = Select::new("Neuer Status:", labels).with_starting_cursor(start).raw_prompt()?;
    Ok(TicketStatus::ALL[choice.index])
}

// ==========================================
// Stock
// ==========================================

pub fn inventory_wizard(mut base: InventoryItem) -> Result<InventoryItem> {
    println!("\n--- {} ---", t("Inventory"));
    base.name = prompt_required("Name:", &base.name)?;
    base.category = prompt_required("Kategorie:", &base.category)?;
    base.quantity = prompt_count("Menge:", base.quantity)?;
    base.min_quantity = prompt_count("Mindestmenge:", base.min_quantity)?;
    base.price = prompt_decimal("Preis (€):", base.price)?;
    Ok(base)
}

pub fn part_wizard(mut base: Part) -> Result<Part> {
    println!("\n--- {} ---", t("Parts"));
    base.name = prompt_required("Name:", &base.name)?;
    base.sku = prompt_required("Artikelnummer (SKU):", &base.sku)?;

    let labels: Vec<&str> = PART_CATEGORIES.iter().map(|c| t(*c)).collect();
    let start = PART_CATEGORIES.iter().position(|c| *c == base.category).unwrap_or(0);
    let choice = Select::new("Kategorie:", labels).with_starting_cursor(start).raw_prompt()?;
    base.category = PART_CATEGORIES[choice.index].to_string();

    base.description = prompt_text("Beschreibung:", &base.description)?;
    base.price = prompt_decimal("Verkaufspreis (€):", base.price)?;
    base.cost = prompt_decimal("Einkaufspreis (€):", base.cost)?;
    base.quantity = prompt_count("Menge:", base.quantity)?;
    base.min_quantity = prompt_count("Mindestmenge:", base.min_quantity)?;
    base.supplier = prompt_text("Lieferant:", &base.supplier)?;
    base.location = prompt_text("Lagerort:", &base.location)?;
    let compatibility = prompt_text("Kompatibel mit (kommagetrennt):", &base.compatibility.join(", "))?;
    base.compatibility = split_list(&compatibility);
    if Confirm::new("Letztes Bestelldatum setzen?").with_default(false).prompt()? {
        base.last_ordered = Some(
            DateSelect::new("Zuletzt bestellt:")
                .with_default(base.last_ordered.unwrap_or_else(|| Local::now().date_naive()))
                .prompt()?,
        );
    }
    Ok(base)
}

pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ==========================================
// Invoices
// ==========================================

#[derive(Clone, Copy)]
enum EditorAction {
    AddPart,
    AddCustom,
    AddLabor,
    RemoveItem,
    RemoveLabor,
    Finish,
    Abort,
}

impl EditorAction {
    fn label(self) -> &'static str {
        match self {
            EditorAction::AddPart => "➕ Ersatzteil hinzufügen",
            EditorAction::AddCustom => "➕ Freie Position hinzufügen",
            EditorAction::AddLabor => "🛠  Arbeitsleistung hinzufügen",
            EditorAction::RemoveItem => "🗑  Position entfernen",
            EditorAction::RemoveLabor => "🗑  Arbeitsleistung entfernen",
            EditorAction::Finish => "✅ Fertig",
            EditorAction::Abort => "❌ Abbrechen",
        }
    }
}

fn print_running_totals(draft: &InvoiceDraft) {
    let totals = draft.totals();
    println!(
        "   Zwischensumme {} | MwSt. (19%) {} | Gesamt {}",
        format_currency(totals.subtotal),
        format_currency(totals.tax),
        format_currency(totals.total)
    );
}

/// Runs one editor action. Returns `true` once the user is done.
fn apply_action(store: &Store, draft: &mut InvoiceDraft, action: EditorAction) -> Result<bool> {
    match action {
        EditorAction::AddPart => {
            let options: Vec<(String, String)> = store
                .parts
                .iter()
                .map(|p| (p.id.clone(), format!("{} ({}) | {} | Bestand {}", p.name, p.sku, format_currency(p.price), p.quantity)))
                .collect();
            if options.is_empty() {
                println!("⚠️  Keine Ersatzteile vorhanden.");
                return Ok(false);
            }
            let id = pick("Ersatzteil:", options)?;
            let part = store.parts.get(&id).ok_or_else(|| AppError::not_found("part", &id))?;
            let row = draft.add_item()?;
            draft.select_part(row, part)?;
            draft.set_item_quantity(row, prompt_quantity("Menge:", 1)?)?;
        }
        EditorAction::AddCustom => {
            let row = draft.add_item()?;
            draft.set_item_name(row, prompt_required("Bezeichnung:", "")?)?;
            draft.set_item_quantity(row, prompt_quantity("Menge:", 1)?)?;
            draft.set_item_unit_price(row, prompt_decimal("Einzelpreis (€):", Decimal::ZERO)?)?;
        }
        EditorAction::AddLabor => {
            let row = draft.add_labor()?;
            draft.set_labor_description(row, prompt_required("Beschreibung:", "")?)?;
            draft.set_labor_hours(row, prompt_hours("Stunden:", draft.labor()[row].hours)?)?;
            let rate = prompt_decimal("Stundensatz (€):", draft.labor()[row].rate_per_hour)?;
            draft.set_labor_rate(row, rate)?;
        }
        EditorAction::RemoveItem => {
            let labels: Vec<String> = draft
                .items()
                .iter()
                .map(|i| format!("{} × {} = {}", i.quantity, i.name, format_currency(i.total)))
                .collect();
            let index = Select::new("Position entfernen:", labels).raw_prompt()?.index;
            draft.remove_item(index)?;
        }
        EditorAction::RemoveLabor => {
            let labels: Vec<String> = draft
                .labor()
                .iter()
                .map(|l| format!("{} ({} h) = {}", l.description, l.hours.normalize(), format_currency(l.total)))
                .collect();
            let index = Select::new("Arbeitsleistung entfernen:", labels).raw_prompt()?.index;
            draft.remove_labor(index)?;
        }
        EditorAction::Finish => return Ok(true),
        EditorAction::Abort => return Err(AppError::Cancelled),
    }
    Ok(false)
}

fn invoice_lines_editor(store: &Store, draft: &mut InvoiceDraft) -> Result<()> {
    println!("\n--- Rechnungspositionen ---");
    loop {
        print_running_totals(draft);
        let mut actions = vec![EditorAction::AddPart, EditorAction::AddCustom, EditorAction::AddLabor];
        if !draft.items().is_empty() {
            actions.push(EditorAction::RemoveItem);
        }
        if !draft.labor().is_empty() {
            actions.push(EditorAction::RemoveLabor);
        }
        actions.extend([EditorAction::Finish, EditorAction::Abort]);
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let action = actions[Select::new("Aktion:", labels).raw_prompt()?.index];

        // a rejected line is dropped and the editor keeps going
        let before = draft.clone();
        match apply_action(store, draft, action) {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(AppError::InvalidInput(reason)) => {
                *draft = before;
                notify::warning(format!("{}: {reason}", t("Invalid input")));
            }
            Err(e) => return Err(e),
        }
    }
}

pub fn invoice_wizard(store: &Store, company: &CompanySettings) -> Result<(InvoiceHeader, InvoiceDraft)> {
    let mut options = vec![NO_TICKET_OPT.to_string()];
    options.extend(
        store
            .tickets
            .iter()
            .map(|t| format!("{} | {} | {} {}", t.id, t.customer_info.name, t.device_info.brand, t.device_info.model)),
    );
    let choice = Select::new("Zu Auftrag:", options).raw_prompt()?;

    let (ticket_id, customer_info) = if choice.index == 0 {
        let (_, info) = customer_snapshot(store)?;
        (String::new(), info)
    } else {
        let ticket = &store.tickets.as_slice()[choice.index - 1];
        (ticket.id.clone(), ticket.customer_info.clone())
    };

    let mut draft = InvoiceDraft::with_labor_rate(company.invoice.labor_rate);
    invoice_lines_editor(store, &mut draft)?;

    let statuses = [InvoiceStatus::Draft, InvoiceStatus::Issued];
    let labels: Vec<&str> = statuses.iter().map(|s| i18n::invoice_status(*s)).collect();
    let status = statuses[Select::new("Status:", labels).raw_prompt()?.index];
    let notes = prompt_optional("Anmerkungen (optional):", None)?;

    Ok((
        InvoiceHeader {
            ticket_id,
            customer_info,
            status,
            notes,
            due_date: None,
        },
        draft,
    ))
}

pub fn select_invoice_status(current: InvoiceStatus) -> Result<InvoiceStatus> {
    let labels: Vec<&str> = InvoiceStatus::ALL.iter().map(|s| i18n::invoice_status(*s)).collect();
    let start = InvoiceStatus::ALL.iter().position(|s| *s == current).unwrap_or(0);
    let choice = Select::new("Neuer Status:", labels).with_starting_cursor(start).raw_prompt()?;
    Ok(InvoiceStatus::ALL[choice.index])
}

pub fn payment_method() -> Result<String> {
    let options = vec!["Bar", "Karte", "Überweisung", "PayPal"];
    Ok(Select::new("Zahlungsart:", options).prompt()?.to_string())
}

// ==========================================
// Users & Settings
// ==========================================

pub fn login_prompt() -> Result<(String, String)> {
    let email = Text::new("E-Mail:").with_validator(email_validator).prompt()?;
    let password = Password::new("Passwort:").without_confirmation().prompt()?;
    Ok((email, password))
}

pub fn user_wizard() -> Result<NewUser> {
    println!("\n--- Neuer Benutzer ---");
    let name = prompt_required("Name:", "")?;
    let email = Text::new("E-Mail:").with_validator(email_validator).prompt()?;
    let roles = [Role::Admin, Role::Technician, Role::Receptionist];
    let labels: Vec<&str> = roles.iter().map(|r| r.label()).collect();
    let role = roles[Select::new("Rolle:", labels).with_starting_cursor(1).raw_prompt()?.index];
    let password = Password::new("Passwort:").without_confirmation().prompt()?;
    let password_confirmation = Password::new("Passwort bestätigen:").without_confirmation().prompt()?;
    Ok(NewUser {
        name,
        email,
        role,
        password,
        password_confirmation,
    })
}

pub fn company_wizard(mut company: CompanySettings) -> Result<CompanySettings> {
    println!("\n--- {} ---", t("Company Information"));
    company.name = prompt_required("Firmenname:", &company.name)?;
    company.tagline = prompt_text("Untertitel:", &company.tagline)?;
    company.address = prompt_required("Adresse:", &company.address)?;
    company.phone = prompt_required("Telefon:", &company.phone)?;
    company.email = Text::new("E-Mail:")
        .with_default(&company.email)
        .with_validator(email_validator)
        .prompt()?
        .trim()
        .to_string();
    company.bank.iban = prompt_required("IBAN:", &company.bank.iban)?;
    company.bank.bic = prompt_required("BIC:", &company.bank.bic)?;
    company.invoice.labor_rate = prompt_decimal("Stundensatz (€):", company.invoice.labor_rate)?;
    company.invoice.payment_terms_days = prompt_count("Zahlungsziel (Tage):", company.invoice.payment_terms_days)?;
    Ok(company)
}

/// Collects terms line by line; an empty line finishes.
pub fn terms_wizard(current: &[&str]) -> Result<String> {
    println!("\n--- Geschäftsbedingungen ---");
    for line in current {
        println!("   {line}");
    }
    println!("(Neue Bedingungen zeilenweise eingeben, leere Zeile zum Beenden)");
    let mut lines = Vec::new();
    loop {
        let line = Text::new(&format!("{}.", lines.len() + 1)).prompt()?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(format!("{}. {}", lines.len() + 1, line.trim()));
    }
    if lines.is_empty() {
        return Err(AppError::Cancelled);
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("john@example.com"));
        assert!(is_valid_email("  sarah.j@repair.de "));
        assert!(!is_valid_email("john@example"));
        assert!(!is_valid_email("john example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_parse_decimal_accepts_comma() {
        assert_eq!(parse_decimal("12,50"), Some(dec!(12.50)));
        assert_eq!(parse_decimal(" 60 "), Some(dec!(60)));
        assert_eq!(parse_decimal("zwölf"), None);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("iPhone 13, iPhone 13 Pro,, "), vec!["iPhone 13", "iPhone 13 Pro"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_optional_trims() {
        assert_eq!(optional("  ".into()), None);
        assert_eq!(optional(" Berlin ".into()), Some("Berlin".into()));
    }

    fn accepts(validator: fn(&str) -> std::result::Result<Validation, CustomUserError>, input: &str) -> bool {
        matches!(validator(input), Ok(Validation::Valid))
    }

    #[test]
    fn test_line_quantity_and_hours_reject_zero() {
        assert!(!accepts(quantity_validator, "0"));
        assert!(accepts(quantity_validator, "1"));
        assert!(!accepts(quantity_validator, "10001"));
        assert!(accepts(count_validator, "0"));

        assert!(!accepts(hours_validator, "0"));
        assert!(!accepts(hours_validator, "0,00"));
        assert!(accepts(hours_validator, "1,5"));
        assert!(!accepts(hours_validator, "1001"));
    }

    #[test]
    fn test_amounts_are_bounded_to_cents() {
        assert!(accepts(decimal_validator, "12,50"));
        assert!(accepts(decimal_validator, "0"));
        assert!(!accepts(decimal_validator, "12,505"));
        assert!(!accepts(decimal_validator, "-1"));
        assert!(!accepts(decimal_validator, "79228162514264337593543950335"));
        assert!(!accepts(hours_validator, "1,123456789"));
    }
}
