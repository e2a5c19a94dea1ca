//! Static German string table and locale formatting.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{DateTime, Local, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::model::{DeviceType, InvoiceStatus, TicketStatus};
use crate::totals::round2;

const TRANSLATIONS: &[(&str, &str)] = &[
    // notifications
    ("Print job sent successfully", "Druckauftrag erfolgreich gesendet"),
    ("PDF downloaded successfully", "PDF erfolgreich heruntergeladen"),
    ("Failed to print ticket", "Drucken des Auftrags fehlgeschlagen"),
    ("Failed to generate PDF", "PDF-Generierung fehlgeschlagen"),
    ("Preparing ticket for printing...", "Bereite Auftrag zum Drucken vor..."),
    ("Generating PDF...", "Generiere PDF..."),
    ("Status updated successfully", "Status erfolgreich aktualisiert"),
    ("Failed to update status", "Statusaktualisierung fehlgeschlagen"),
    ("Ticket not found", "Auftrag nicht gefunden"),
    ("Record not found", "Eintrag nicht gefunden"),
    ("Customer added successfully", "Kunde erfolgreich hinzugefügt"),
    ("Customer updated successfully", "Kunde erfolgreich aktualisiert"),
    ("Device added successfully", "Gerät erfolgreich hinzugefügt"),
    ("Item added successfully", "Artikel erfolgreich hinzugefügt"),
    ("Part added successfully", "Ersatzteil erfolgreich hinzugefügt"),
    ("Stock updated successfully", "Bestand erfolgreich aktualisiert"),
    ("Repair ticket created successfully", "Reparaturauftrag erfolgreich erstellt"),
    ("Invoice created successfully", "Rechnung erfolgreich erstellt"),
    ("Deleted successfully", "Erfolgreich gelöscht"),
    ("Saved successfully", "Erfolgreich gespeichert"),
    ("Export successful", "Export erfolgreich"),
    ("No data to export", "Keine Daten zum Exportieren"),
    ("No data to print", "Keine Daten zum Drucken"),
    ("Invalid input", "Ungültige Eingabe"),
    ("Operation cancelled", "Vorgang abgebrochen"),
    ("Operation failed", "Vorgang fehlgeschlagen"),
    ("Please log in first", "Bitte zuerst anmelden"),
    ("Login successful", "Anmeldung erfolgreich"),
    ("Invalid credentials", "Ungültige Anmeldedaten"),
    ("Logged out successfully", "Erfolgreich abgemeldet"),
    ("Registration successful", "Registrierung erfolgreich"),
    ("Passwords do not match", "Passwörter stimmen nicht überein"),
    // general
    ("Dashboard", "Dashboard"),
    ("Customers", "Kunden"),
    ("Devices", "Geräte"),
    ("Repair Tickets", "Reparaturaufträge"),
    ("Inventory", "Inventar"),
    ("Parts", "Ersatzteile"),
    ("Invoices", "Rechnungen"),
    ("Settings", "Einstellungen"),
    ("Name", "Name"),
    ("Email", "E-Mail"),
    ("Phone", "Telefon"),
    ("Address", "Adresse"),
    ("Status", "Status"),
    ("Created", "Erstellt"),
    ("Last updated", "Zuletzt aktualisiert"),
    ("Customer", "Kunde"),
    ("Device", "Gerät"),
    ("Total", "Gesamt"),
    ("Due", "Fällig"),
    // statuses
    ("new", "Neu"),
    ("in_progress", "In Bearbeitung"),
    ("ready", "Fertig"),
    ("closed", "Abgeschlossen"),
    ("draft", "Entwurf"),
    ("issued", "Ausgestellt"),
    ("paid", "Bezahlt"),
    ("cancelled", "Storniert"),
    // dashboard
    ("Active Repairs", "Aktive Reparaturen"),
    ("Completed Today", "Heute abgeschlossen"),
    ("Open Invoices", "Offene Rechnungen"),
    ("Parts (Low)", "Ersatzteile (Niedrig)"),
    ("Recent Tickets", "Aktuelle Aufträge"),
    ("No recent tickets", "Keine aktuellen Aufträge"),
    // ticket details
    ("Customer Information", "Kundeninformationen"),
    ("Device Information", "Geräteinformationen"),
    ("Repair Information", "Reparaturinformationen"),
    ("Problem Description", "Problembeschreibung"),
    ("Required Parts", "Benötigte Teile"),
    ("Technical Notes", "Technische Notizen"),
    ("Warranty", "Garantie"),
    ("Estimated Cost", "Geschätzte Kosten"),
    ("Estimated Time", "Geschätzte Zeit"),
    ("Priority", "Priorität"),
    ("Low", "Niedrig"),
    ("Medium", "Mittel"),
    ("High", "Hoch"),
    // devices & stock
    ("Brand", "Marke"),
    ("Model", "Modell"),
    ("Serial Number", "Seriennummer"),
    ("Condition", "Zustand"),
    ("Type", "Typ"),
    ("Price", "Preis"),
    ("Quantity", "Menge"),
    ("Category", "Kategorie"),
    ("Min Quantity", "Mindestmenge"),
    ("Low Stock", "Geringer Bestand"),
    ("Out of Stock", "Nicht vorrätig"),
    ("In Stock", "Vorrätig"),
    ("phone", "Handy"),
    ("computer", "Computer"),
    ("tablet", "Tablet"),
    ("screens", "Bildschirme"),
    ("batteries", "Akkus"),
    ("parts", "Ersatzteile"),
    ("accessories", "Zubehör"),
    // settings
    ("Company Information", "Firmeninformationen"),
    ("Dark Mode", "Dunkelmodus"),
];

static TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| TRANSLATIONS.iter().copied().collect());

/// Looks up the German text for `key`, falling back to the key itself.
pub fn t(key: &str) -> &str {
    match TABLE.get(key) {
        Some(text) => *text,
        None => key,
    }
}

pub fn ticket_status(status: TicketStatus) -> &'static str {
    TABLE.get(status.key()).copied().unwrap_or("")
}

pub fn invoice_status(status: InvoiceStatus) -> &'static str {
    TABLE.get(status.key()).copied().unwrap_or("")
}

pub fn device_type(device_type: DeviceType) -> &'static str {
    TABLE.get(device_type.key()).copied().unwrap_or("")
}

/// `1234.5` → `1.234,50 €`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round2(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}{},{} €", if negative { "-" } else { "" }, grouped, frac_part)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%d.%m.%Y, %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_lookup_falls_back_to_key() {
        assert_eq!(t("Customers"), "Kunden");
        assert_eq!(t("Something untranslated"), "Something untranslated");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ticket_status(TicketStatus::InProgress), "In Bearbeitung");
        assert_eq!(invoice_status(InvoiceStatus::Cancelled), "Storniert");
        assert_eq!(device_type(DeviceType::Phone), "Handy");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(0)), "0,00 €");
        assert_eq!(format_currency(dec!(190.4)), "190,40 €");
        assert_eq!(format_currency(dec!(1234.5)), "1.234,50 €");
        assert_eq!(format_currency(dec!(1234567.891)), "1.234.567,89 €");
        assert_eq!(format_currency(dec!(-12.5)), "-12,50 €");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "05.03.2024");
    }
}
