use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use slug::slugify;
use tracing::info;

use crate::error::{AppError, Result};

pub const CUSTOMERS_EXPORT: &str = "customers-list";
pub const DEVICES_EXPORT: &str = "geraete-liste";
pub const TICKETS_EXPORT: &str = "reparaturauftraege-liste";
pub const INVENTORY_EXPORT: &str = "inventar-liste";
pub const PARTS_EXPORT: &str = "ersatzteile-liste";
pub const INVOICES_EXPORT: &str = "rechnungen-liste";

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => quote(s),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested) => quote(&nested.to_string()),
    }
}

fn to_object<T: Serialize>(record: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::InvalidInput(format!("cannot export non-object value {other}"))),
    }
}

/// Renders records as CSV text. The header is taken from the first record's
/// fields in serialization order.
pub fn to_csv<T: Serialize>(records: &[T]) -> Result<String> {
    let first = records.first().ok_or(AppError::NoData)?;
    let headers: Vec<String> = to_object(first)?.keys().cloned().collect();

    let mut lines = vec![headers.join(",")];
    for record in records {
        let object = to_object(record)?;
        let row: Vec<String> = headers.iter().map(|h| cell(object.get(h))).collect();
        lines.push(row.join(","));
    }
    Ok(lines.join("\n"))
}

/// Writes `<dir>/<name>.csv`. Empty collections are rejected and no file is
/// created.
pub fn export_csv<T: Serialize>(records: &[T], dir: &Path, name: &str) -> Result<PathBuf> {
    let csv = to_csv(records)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.csv", slugify(name)));
    fs::write(&path, csv)?;
    info!(path = %path.display(), rows = records.len(), "csv export written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::model::{Customer, DeviceType};

    fn customer(name: &str, address: Option<&str>) -> Customer {
        Customer {
            id: "1".into(),
            name: name.into(),
            email: "john@example.com".into(),
            phone: "+1234567890".into(),
            address: address.map(Into::into),
            devices: vec![DeviceType::Phone, DeviceType::Tablet],
            created_at: Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_header_and_cells() {
        let csv = to_csv(&[customer("John \"Johnny\" Smith", None)]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("id,name,email,phone,address,devices,createdAt"));
        assert_eq!(
            lines.next(),
            Some(r#""1","John ""Johnny"" Smith","john@example.com","+1234567890",,"[""phone"",""tablet""]","2024-03-15T10:00:00Z""#)
        );
    }

    #[test]
    fn test_numbers_and_bools_are_verbatim() {
        let rows = [serde_json::json!({"qty": 3, "active": true, "note": null})];
        assert_eq!(to_csv(&rows).unwrap(), "qty,active,note\n3,true,");
    }

    #[test]
    fn test_empty_collection_is_rejected_without_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = export_csv::<Customer>(&[], dir.path(), CUSTOMERS_EXPORT).unwrap_err();
        assert!(matches!(err, AppError::NoData));
        assert!(!dir.path().join("customers-list.csv").exists());
    }

    #[test]
    fn test_export_writes_named_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = export_csv(&[customer("Sarah", Some("Hauptstr. 1, Berlin"))], dir.path(), CUSTOMERS_EXPORT).unwrap();
        assert_eq!(path, dir.path().join("customers-list.csv"));
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("\"Hauptstr. 1, Berlin\""));
    }
}
