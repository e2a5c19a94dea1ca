use std::fs;
use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use inquire::Text;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::totals::DEFAULT_LABOR_RATE;

const DEFAULT_COMPANY_TEMPLATE: &str = include_str!("../default_company.toml");
const DEFAULT_DATA_ROOT: &str = "~/Documents/RepairDesk";

// ==========================================
// Application settings (config dir)
// ==========================================

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppSettings {
    pub data_root: String,
    #[serde(default = "default_require_login")]
    pub require_login: bool,
}

fn default_require_login() -> bool {
    true
}

fn get_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("de", "repairpro", "repair-desk") {
        let config_dir = proj_dirs.config_dir();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).ok();
        }
        return config_dir.join("settings.toml");
    }
    PathBuf::from("settings.toml")
}

pub fn load_settings() -> Option<AppSettings> {
    let path = get_config_path();
    let content = fs::read_to_string(&path).ok()?;
    match toml::from_str(&content) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
            None
        }
    }
}

pub fn save_settings(settings: &AppSettings) -> Result<PathBuf> {
    let path = get_config_path();
    fs::write(&path, toml::to_string_pretty(settings)?)?;
    Ok(path)
}

/// Asks for the data directory, preferring the native folder picker.
pub fn setup_config_wizard() -> Result<AppSettings> {
    println!("\n⚙️  --- Configuration Setup ---");
    let current = load_settings();
    let default_val = current
        .as_ref()
        .map(|s| s.data_root.clone())
        .unwrap_or_else(|| DEFAULT_DATA_ROOT.to_string());

    println!("📂 Opening folder picker...");
    let picked_path = rfd::FileDialog::new()
        .set_title("Select Data Directory")
        .pick_folder();

    let data_root = match picked_path {
        Some(path) => path.to_string_lossy().to_string(),
        None => {
            println!("No folder selected. Falling back to manual input.");
            Text::new("Data directory:").with_default(&default_val).prompt()?
        }
    };

    let settings = AppSettings {
        data_root,
        require_login: current.map(|s| s.require_login).unwrap_or(true),
    };
    let path = save_settings(&settings)?;
    info!(path = %path.display(), "settings saved");
    Ok(settings)
}

pub fn expand_home_dir(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(base_dirs) = BaseDirs::new() {
            let home = base_dirs.home_dir().to_string_lossy();
            return path.replacen('~', &home, 1);
        }
    }
    path.to_string()
}

// ==========================================
// Data directory layout
// ==========================================

/// Resolved locations below the data root.
#[derive(Debug, Clone)]
pub struct DataDirs {
    pub root: PathBuf,
}

impl DataDirs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DataDirs { root: root.into() }
    }

    pub fn storage(&self) -> PathBuf {
        self.root.join("storage")
    }

    pub fn templates(&self) -> PathBuf {
        self.root.join("templates")
    }

    pub fn output(&self) -> PathBuf {
        self.root.join("output")
    }

    pub fn exports(&self) -> PathBuf {
        self.root.join("exports")
    }

    pub fn logs(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn company_file(&self) -> PathBuf {
        self.root.join("company.toml")
    }
}

// ==========================================
// Company settings (data root)
// ==========================================

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BankDetails {
    pub iban: String,
    pub bic: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InvoiceDefaults {
    #[serde(default = "default_labor_rate")]
    pub labor_rate: Decimal,
    #[serde(default = "default_payment_terms")]
    pub payment_terms_days: u32,
}

fn default_labor_rate() -> Decimal {
    DEFAULT_LABOR_RATE
}

fn default_payment_terms() -> u32 {
    14
}

impl Default for InvoiceDefaults {
    fn default() -> Self {
        InvoiceDefaults {
            labor_rate: default_labor_rate(),
            payment_terms_days: default_payment_terms(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CompanySettings {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub terms: String,
    pub bank: BankDetails,
    #[serde(default)]
    pub invoice: InvoiceDefaults,
}

impl CompanySettings {
    pub fn builtin() -> Result<Self> {
        Ok(toml::from_str(DEFAULT_COMPANY_TEMPLATE)?)
    }

    /// Numbered terms as individual lines.
    pub fn terms_lines(&self) -> Vec<&str> {
        self.terms.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
    }
}

/// Reads `company.toml`, writing the built-in default on first use.
pub fn load_company(path: &Path) -> Result<CompanySettings> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    } else {
        debug!(path = %path.display(), "initializing default company settings");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_COMPANY_TEMPLATE)?;
        CompanySettings::builtin()
    }
}

pub fn save_company(path: &Path, company: &CompanySettings) -> Result<()> {
    fs::write(path, toml::to_string_pretty(company)?)?;
    Ok(())
}
