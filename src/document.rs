//! Printable repair tickets and invoices.
//!
//! A Typst source is rendered with tera from templates in
//! `<data_root>/templates`, compiled to PDF by the `typst` binary and then
//! either kept under `<data_root>/output` or handed to the print spooler.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::Local;
use serde::Serialize;
use serde_json::Value;
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::i18n::{self, format_currency, format_date, format_timestamp};
use crate::model::{CustomerInfo, DeviceInfo, Invoice, InvoiceStatus, RepairInfo, RepairTicket, TicketStatus};
use crate::settings::CompanySettings;

const TICKET_TEMPLATE_NAME: &str = "ticket.typ.tera";
const INVOICE_TEMPLATE_NAME: &str = "invoice.typ.tera";
const TICKET_TEMPLATE: &str = include_str!("../templates/ticket.typ.tera");
const INVOICE_TEMPLATE: &str = include_str!("../templates/invoice.typ.tera");

const COPIES: [&str; 2] = ["Kundenausfertigung", "Werkstattausfertigung"];

/// What went wrong while producing a document. Only logged; callers see
/// [`DocumentError`].
#[derive(Debug, Error)]
pub enum DocumentFailure {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("'typst' is not installed")]
    CompilerMissing,
    #[error("typst compile failed: {0}")]
    Compile(String),
    #[error("print spooler failed: {0}")]
    Spool(String),
}

#[derive(Debug, Error)]
#[error("Dokument konnte nicht erstellt werden")]
pub struct DocumentError(#[source] DocumentFailure);

impl From<DocumentFailure> for DocumentError {
    fn from(failure: DocumentFailure) -> Self {
        DocumentError(failure)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentTarget {
    Save,
    Print,
}

impl DocumentTarget {
    /// Drafts are saved for review, anything else goes to the printer.
    pub fn default_for_invoice(status: InvoiceStatus) -> Self {
        if status == InvoiceStatus::Draft {
            DocumentTarget::Save
        } else {
            DocumentTarget::Print
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    Saved(PathBuf),
    Printed,
}

pub trait Compiler {
    fn compile(&self, source: &Path, output: &Path) -> Result<(), DocumentFailure>;
}

pub trait Spooler {
    fn print(&self, pdf: &Path) -> Result<(), DocumentFailure>;
}

pub struct TypstCompiler;

impl Compiler for TypstCompiler {
    fn compile(&self, source: &Path, output: &Path) -> Result<(), DocumentFailure> {
        if Command::new("typst").arg("--version").output().is_err() {
            return Err(DocumentFailure::CompilerMissing);
        }
        let result = Command::new("typst").arg("compile").arg(source).arg(output).output()?;
        if result.status.success() {
            Ok(())
        } else {
            Err(DocumentFailure::Compile(String::from_utf8_lossy(&result.stderr).trim().to_string()))
        }
    }
}

pub struct SystemSpooler;

impl Spooler for SystemSpooler {
    fn print(&self, pdf: &Path) -> Result<(), DocumentFailure> {
        #[cfg(target_os = "windows")]
        let result = Command::new("powershell")
            .arg("-NoProfile")
            .arg("-Command")
            .arg(format!(
                "Start-Process -FilePath '{}' -Verb Print -Wait",
                pdf.to_string_lossy()
            ))
            .output()?;

        #[cfg(not(target_os = "windows"))]
        let result = Command::new("lp").arg(pdf).output()?;

        if result.status.success() {
            Ok(())
        } else {
            Err(DocumentFailure::Spool(String::from_utf8_lossy(&result.stderr).trim().to_string()))
        }
    }
}

/// Renders a JSON value as a quoted Typst string literal.
fn typst_str(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let raw = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let mut escaped = String::with_capacity(raw.len() + 2);
    escaped.push('"');
    for ch in raw.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }
    escaped.push('"');
    Ok(Value::String(escaped))
}

fn status_color(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::New => "33, 150, 243",
        TicketStatus::InProgress => "255, 152, 0",
        TicketStatus::Ready => "76, 175, 80",
        TicketStatus::Closed => "158, 158, 158",
    }
}

// ==========================================
// Template contexts
// ==========================================

#[derive(Serialize)]
struct TicketView<'a> {
    company: &'a CompanySettings,
    terms: Vec<&'a str>,
    copies: [&'static str; 2],
    id: &'a str,
    status_label: &'static str,
    status_color: &'static str,
    priority_label: &'a str,
    created: String,
    customer: &'a CustomerInfo,
    device: &'a DeviceInfo,
    device_type: &'static str,
    repair: &'a RepairInfo,
    estimated_cost: String,
    estimated_time: &'a str,
    estimated_completion: Option<String>,
    generated_at: String,
}

#[derive(Serialize)]
struct InvoiceItemRow<'a> {
    pos: usize,
    name: &'a str,
    quantity: u32,
    unit_price: String,
    total: String,
}

#[derive(Serialize)]
struct LaborRow<'a> {
    description: &'a str,
    hours: String,
    rate: String,
    total: String,
}

#[derive(Serialize)]
struct InvoiceView<'a> {
    company: &'a CompanySettings,
    id: &'a str,
    is_draft: bool,
    status_label: &'static str,
    date: String,
    due_date: String,
    ticket_id: &'a str,
    customer: &'a CustomerInfo,
    items: Vec<InvoiceItemRow<'a>>,
    labor: Vec<LaborRow<'a>>,
    subtotal: String,
    tax: String,
    total: String,
    notes: Option<&'a str>,
    generated_at: String,
}

pub struct DocumentRenderer<'a> {
    company: &'a CompanySettings,
    template_dir: PathBuf,
    output_dir: PathBuf,
    compiler: Box<dyn Compiler + 'a>,
    spooler: Box<dyn Spooler + 'a>,
}

impl<'a> DocumentRenderer<'a> {
    pub fn new(company: &'a CompanySettings, template_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self::with_backends(company, template_dir, output_dir, Box::new(TypstCompiler), Box::new(SystemSpooler))
    }

    pub fn with_backends(
        company: &'a CompanySettings,
        template_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        compiler: Box<dyn Compiler + 'a>,
        spooler: Box<dyn Spooler + 'a>,
    ) -> Self {
        DocumentRenderer {
            company,
            template_dir: template_dir.into(),
            output_dir: output_dir.into(),
            compiler,
            spooler,
        }
    }

    pub fn ticket(&self, ticket: &RepairTicket, target: DocumentTarget) -> Result<DocumentOutcome, DocumentError> {
        let base = format!("reparaturauftrag-{}", ticket.id);
        self.produce(&base, target, || self.ticket_source(ticket))
            .inspect(|_| info!(ticket = %ticket.id, ?target, "ticket document produced"))
    }

    pub fn invoice(&self, invoice: &Invoice, target: DocumentTarget) -> Result<DocumentOutcome, DocumentError> {
        let base = if invoice.status == InvoiceStatus::Draft {
            format!("rechnung-entwurf-{}", invoice.id)
        } else {
            format!("rechnung-{}", invoice.id)
        };
        self.produce(&base, target, || self.invoice_source(invoice))
            .inspect(|_| info!(invoice = %invoice.id, ?target, "invoice document produced"))
    }

    fn produce(
        &self,
        base: &str,
        target: DocumentTarget,
        source: impl FnOnce() -> Result<String, DocumentFailure>,
    ) -> Result<DocumentOutcome, DocumentError> {
        let (source_path, pdf_path) = match target {
            DocumentTarget::Save => (
                self.output_dir.join(format!(".{base}.typ")),
                self.output_dir.join(format!(".{base}.pdf")),
            ),
            DocumentTarget::Print => (
                self.output_dir.join(format!(".print-{base}.typ")),
                self.output_dir.join(format!(".print-{base}.pdf")),
            ),
        };
        let final_path = self.output_dir.join(format!("{base}.pdf"));

        // an existing document is only replaced by a fully compiled one
        let result = self
            .run(&source_path, &pdf_path, target, source)
            .and_then(|()| match target {
                DocumentTarget::Save => fs::rename(&pdf_path, &final_path).map_err(DocumentFailure::from),
                DocumentTarget::Print => Ok(()),
            });
        remove_quietly(&source_path);
        remove_quietly(&pdf_path);

        match result {
            Ok(()) if target == DocumentTarget::Save => Ok(DocumentOutcome::Saved(final_path)),
            Ok(()) => Ok(DocumentOutcome::Printed),
            Err(failure) => {
                error!(document = base, error = %failure, "document generation failed");
                Err(failure.into())
            }
        }
    }

    fn run(
        &self,
        source_path: &Path,
        pdf_path: &Path,
        target: DocumentTarget,
        source: impl FnOnce() -> Result<String, DocumentFailure>,
    ) -> Result<(), DocumentFailure> {
        let rendered = source()?;
        fs::create_dir_all(&self.output_dir)?;
        fs::write(source_path, rendered)?;
        debug!(source = %source_path.display(), "compiling document");
        self.compiler.compile(source_path, pdf_path)?;
        if target == DocumentTarget::Print {
            self.spooler.print(pdf_path)?;
        }
        Ok(())
    }

    /// Writes the built-in templates into the template directory unless a
    /// customized copy already exists.
    fn init_templates(&self) -> Result<(), DocumentFailure> {
        fs::create_dir_all(&self.template_dir)?;
        for (name, body) in [(TICKET_TEMPLATE_NAME, TICKET_TEMPLATE), (INVOICE_TEMPLATE_NAME, INVOICE_TEMPLATE)] {
            let path = self.template_dir.join(name);
            if !path.exists() {
                println!("✨ Initializing default template {name}...");
                fs::write(&path, body)?;
            }
        }
        Ok(())
    }

    fn tera(&self) -> Result<Tera, DocumentFailure> {
        self.init_templates()?;
        let glob = self.template_dir.join("*.tera");
        let mut tera = Tera::new(&glob.to_string_lossy())?;
        tera.register_filter("typst_str", typst_str);
        Ok(tera)
    }

    pub(crate) fn ticket_source(&self, ticket: &RepairTicket) -> Result<String, DocumentFailure> {
        let view = TicketView {
            company: self.company,
            terms: self.company.terms_lines(),
            copies: COPIES,
            id: &ticket.id,
            status_label: i18n::ticket_status(ticket.status),
            status_color: status_color(ticket.status),
            priority_label: i18n::t(ticket.priority.key()),
            created: format_timestamp(ticket.created_at),
            customer: &ticket.customer_info,
            device: &ticket.device_info,
            device_type: i18n::device_type(ticket.device_info.device_type),
            repair: &ticket.repair_info,
            estimated_cost: format_currency(ticket.estimated_cost),
            estimated_time: &ticket.estimated_time,
            estimated_completion: ticket.repair_info.estimated_completion_date.map(format_date),
            generated_at: Local::now().format("%d.%m.%Y, %H:%M").to_string(),
        };
        let context = Context::from_serialize(&view)?;
        Ok(self.tera()?.render(TICKET_TEMPLATE_NAME, &context)?)
    }

    pub(crate) fn invoice_source(&self, invoice: &Invoice) -> Result<String, DocumentFailure> {
        let view = InvoiceView {
            company: self.company,
            id: &invoice.id,
            is_draft: invoice.status == InvoiceStatus::Draft,
            status_label: i18n::invoice_status(invoice.status),
            date: format_date(invoice.created_at.with_timezone(&Local).date_naive()),
            due_date: format_date(invoice.due_date),
            ticket_id: &invoice.ticket_id,
            customer: &invoice.customer_info,
            items: invoice
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| InvoiceItemRow {
                    pos: i + 1,
                    name: &item.name,
                    quantity: item.quantity,
                    unit_price: format_currency(item.unit_price),
                    total: format_currency(item.total),
                })
                .collect(),
            labor: invoice
                .labor
                .iter()
                .map(|l| LaborRow {
                    description: &l.description,
                    hours: l.hours.normalize().to_string().replace('.', ","),
                    rate: format_currency(l.rate_per_hour),
                    total: format_currency(l.total),
                })
                .collect(),
            subtotal: format_currency(invoice.subtotal),
            tax: format_currency(invoice.tax),
            total: format_currency(invoice.total),
            notes: invoice.notes.as_deref(),
            generated_at: Local::now().format("%d.%m.%Y, %H:%M").to_string(),
        };
        let context = Context::from_serialize(&view)?;
        Ok(self.tera()?.render(INVOICE_TEMPLATE_NAME, &context)?)
    }
}

fn remove_quietly(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            debug!(path = %path.display(), error = %e, "could not remove scratch file");
        }
    }
}

/// Opens the file and reveals it in the platform file manager.
pub fn open_and_reveal(path: &Path) {
    #[cfg(target_os = "macos")]
    Command::new("open").arg("-R").arg(path).spawn().ok();

    #[cfg(target_os = "windows")]
    Command::new("explorer").arg(format!("/select,{}", path.to_string_lossy())).spawn().ok();

    #[cfg(target_os = "linux")]
    Command::new("xdg-open").arg(path).spawn().ok();
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::model::{DeviceType, InvoiceItem, LaborCharge, Priority};

    /// Writes a stub PDF, or writes half a file and fails.
    struct FakeCompiler {
        fail: bool,
    }

    impl Compiler for FakeCompiler {
        fn compile(&self, source: &Path, output: &Path) -> Result<(), DocumentFailure> {
            assert!(source.exists(), "source must be on disk while compiling");
            if self.fail {
                fs::write(output, "%PDF-1.7 truncated")?;
                return Err(DocumentFailure::Compile("error: unknown variable".into()));
            }
            fs::write(output, "%PDF-1.7")?;
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSpooler {
        printed: RefCell<Vec<PathBuf>>,
        fail: bool,
    }

    impl Spooler for &RecordingSpooler {
        fn print(&self, pdf: &Path) -> Result<(), DocumentFailure> {
            assert!(pdf.exists(), "pdf must exist while spooling");
            self.printed.borrow_mut().push(pdf.to_path_buf());
            if self.fail {
                return Err(DocumentFailure::Spool("lp: no default destination".into()));
            }
            Ok(())
        }
    }

    fn ticket() -> RepairTicket {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        RepairTicket {
            id: "T-1710496800000".into(),
            customer_id: None,
            device_id: None,
            status: TicketStatus::InProgress,
            priority: Priority::High,
            customer_info: CustomerInfo {
                name: "Jürgen \"Jo\" Müller".into(),
                phone: "+49 170 1234567".into(),
                email: "jo@example.com".into(),
                ..Default::default()
            },
            device_info: DeviceInfo {
                device_type: DeviceType::Phone,
                brand: "Apple".into(),
                model: "iPhone 13 Pro".into(),
                serial_number: "F2LX#123".into(),
                condition: "Kratzer".into(),
            },
            repair_info: RepairInfo {
                problem_description: "Display gebrochen\nTouch reagiert nicht".into(),
                warranty: true,
                warranty_period: "90 days".into(),
                ..Default::default()
            },
            estimated_cost: dec!(150),
            estimated_time: "2-3 Tage".into(),
            created_at: at,
            updated_at: at,
        }
    }

    fn invoice(status: InvoiceStatus) -> Invoice {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        Invoice {
            id: "INV-1710504000000".into(),
            ticket_id: "T-1710496800000".into(),
            customer_info: CustomerInfo {
                name: "John Smith".into(),
                ..Default::default()
            },
            items: vec![InvoiceItem {
                part_id: "P-1".into(),
                name: "Display".into(),
                quantity: 2,
                unit_price: dec!(50),
                total: dec!(100),
            }],
            labor: vec![LaborCharge {
                description: "Displaytausch".into(),
                hours: dec!(1.5),
                rate_per_hour: dec!(40),
                total: dec!(60),
            }],
            subtotal: dec!(160),
            tax: dec!(30.40),
            total: dec!(190.40),
            status,
            payment_method: None,
            payment_date: None,
            due_date: NaiveDate::from_ymd_opt(2024, 3, 29).unwrap(),
            notes: None,
            created_at: at,
            updated_at: at,
        }
    }

    fn files_in(dir: &Path) -> Vec<String> {
        match fs::read_dir(dir) {
            Ok(entries) => entries
                .flatten()
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect(),
            Err(_) => vec![],
        }
    }

    #[test]
    fn test_typst_str_escapes_quotes_and_newlines() {
        let out = typst_str(&Value::String("a \"b\"\\\nc".into()), &HashMap::new()).unwrap();
        assert_eq!(out, Value::String(r#""a \"b\"\\\nc""#.into()));
        let out = typst_str(&Value::Null, &HashMap::new()).unwrap();
        assert_eq!(out, Value::String("\"\"".into()));
    }

    #[test]
    fn test_ticket_source_has_both_copies() {
        let dir = tempfile::tempdir().expect("tempdir");
        let company = CompanySettings::builtin().unwrap();
        let renderer = DocumentRenderer::new(&company, dir.path().join("templates"), dir.path().join("output"));

        let source = renderer.ticket_source(&ticket()).unwrap();

        assert!(source.contains("Kundenausfertigung"));
        assert!(source.contains("Werkstattausfertigung"));
        assert!(source.contains(r#""Jürgen \"Jo\" Müller""#));
        assert!(source.contains("In Bearbeitung"));
        assert!(source.contains("255, 152, 0"));
        assert!(source.contains("150,00 €"));
        assert!(dir.path().join("templates").join(TICKET_TEMPLATE_NAME).exists());
    }

    #[test]
    fn test_invoice_source_watermarks_drafts_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        let company = CompanySettings::builtin().unwrap();
        let renderer = DocumentRenderer::new(&company, dir.path().join("templates"), dir.path().join("output"));

        let draft = renderer.invoice_source(&invoice(InvoiceStatus::Draft)).unwrap();
        assert!(draft.contains("ENTWURF"));
        assert!(draft.contains("190,40 €"));
        assert!(draft.contains("MwSt. (19%)"));
        assert!(draft.contains("1,5"));

        let issued = renderer.invoice_source(&invoice(InvoiceStatus::Issued)).unwrap();
        assert!(!issued.contains("ENTWURF"));
    }

    #[test]
    fn test_customized_template_is_used() {
        let dir = tempfile::tempdir().expect("tempdir");
        let templates = dir.path().join("templates");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join(TICKET_TEMPLATE_NAME), "Auftrag {{ id }}").unwrap();
        let company = CompanySettings::builtin().unwrap();
        let renderer = DocumentRenderer::new(&company, &templates, dir.path().join("output"));

        assert_eq!(renderer.ticket_source(&ticket()).unwrap(), "Auftrag T-1710496800000");
    }

    #[test]
    fn test_save_keeps_only_the_pdf() {
        let dir = tempfile::tempdir().expect("tempdir");
        let company = CompanySettings::builtin().unwrap();
        let spooler = RecordingSpooler::default();
        let output = dir.path().join("output");
        let renderer = DocumentRenderer::with_backends(
            &company,
            dir.path().join("templates"),
            &output,
            Box::new(FakeCompiler { fail: false }),
            Box::new(&spooler),
        );

        let outcome = renderer.ticket(&ticket(), DocumentTarget::Save).unwrap();

        let expected = output.join("reparaturauftrag-T-1710496800000.pdf");
        assert_eq!(outcome, DocumentOutcome::Saved(expected.clone()));
        assert!(expected.exists());
        assert_eq!(files_in(&output), vec!["reparaturauftrag-T-1710496800000.pdf".to_string()]);
        assert!(spooler.printed.borrow().is_empty());
    }

    #[test]
    fn test_draft_and_issued_invoice_file_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let company = CompanySettings::builtin().unwrap();
        let spooler = RecordingSpooler::default();
        let output = dir.path().join("output");
        let renderer = DocumentRenderer::with_backends(
            &company,
            dir.path().join("templates"),
            &output,
            Box::new(FakeCompiler { fail: false }),
            Box::new(&spooler),
        );

        renderer.invoice(&invoice(InvoiceStatus::Draft), DocumentTarget::Save).unwrap();
        renderer.invoice(&invoice(InvoiceStatus::Paid), DocumentTarget::Save).unwrap();

        assert!(output.join("rechnung-entwurf-INV-1710504000000.pdf").exists());
        assert!(output.join("rechnung-INV-1710504000000.pdf").exists());
    }

    #[test]
    fn test_print_spools_and_removes_scratch_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let company = CompanySettings::builtin().unwrap();
        let spooler = RecordingSpooler::default();
        let output = dir.path().join("output");
        let renderer = DocumentRenderer::with_backends(
            &company,
            dir.path().join("templates"),
            &output,
            Box::new(FakeCompiler { fail: false }),
            Box::new(&spooler),
        );

        let outcome = renderer.invoice(&invoice(InvoiceStatus::Issued), DocumentTarget::Print).unwrap();

        assert_eq!(outcome, DocumentOutcome::Printed);
        assert_eq!(spooler.printed.borrow().len(), 1);
        assert!(files_in(&output).is_empty());
    }

    #[test]
    fn test_compile_failure_leaves_no_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let company = CompanySettings::builtin().unwrap();
        let spooler = RecordingSpooler::default();
        let output = dir.path().join("output");
        let renderer = DocumentRenderer::with_backends(
            &company,
            dir.path().join("templates"),
            &output,
            Box::new(FakeCompiler { fail: true }),
            Box::new(&spooler),
        );

        let err = renderer.ticket(&ticket(), DocumentTarget::Save).unwrap_err();

        assert_eq!(err.to_string(), "Dokument konnte nicht erstellt werden");
        assert!(files_in(&output).is_empty());
    }

    #[test]
    fn test_failed_save_keeps_previous_pdf() {
        let dir = tempfile::tempdir().expect("tempdir");
        let company = CompanySettings::builtin().unwrap();
        let spooler = RecordingSpooler::default();
        let output = dir.path().join("output");
        fs::create_dir_all(&output).unwrap();
        let existing = output.join("reparaturauftrag-T-1710496800000.pdf");
        fs::write(&existing, "%PDF-1.7 previous").unwrap();
        let renderer = DocumentRenderer::with_backends(
            &company,
            dir.path().join("templates"),
            &output,
            Box::new(FakeCompiler { fail: true }),
            Box::new(&spooler),
        );

        renderer.ticket(&ticket(), DocumentTarget::Save).unwrap_err();

        assert_eq!(fs::read_to_string(&existing).unwrap(), "%PDF-1.7 previous");
        assert_eq!(files_in(&output), vec!["reparaturauftrag-T-1710496800000.pdf".to_string()]);
    }

    #[test]
    fn test_spool_failure_is_generic_and_cleans_up() {
        let dir = tempfile::tempdir().expect("tempdir");
        let company = CompanySettings::builtin().unwrap();
        let spooler = RecordingSpooler {
            fail: true,
            ..Default::default()
        };
        let output = dir.path().join("output");
        let renderer = DocumentRenderer::with_backends(
            &company,
            dir.path().join("templates"),
            &output,
            Box::new(FakeCompiler { fail: false }),
            Box::new(&spooler),
        );

        let err = renderer.ticket(&ticket(), DocumentTarget::Print).unwrap_err();

        assert_eq!(err.to_string(), "Dokument konnte nicht erstellt werden");
        assert!(files_in(&output).is_empty());
    }

    #[test]
    fn test_default_target_for_invoices() {
        assert_eq!(DocumentTarget::default_for_invoice(InvoiceStatus::Draft), DocumentTarget::Save);
        assert_eq!(DocumentTarget::default_for_invoice(InvoiceStatus::Issued), DocumentTarget::Print);
    }
}
