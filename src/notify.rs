//! Translated one-line notifications, the terminal stand-in for toasts.

use crate::i18n::t;

pub fn success(key: &str) {
    println!("✅ {}", t(key));
}

pub fn success_with(key: &str, detail: impl std::fmt::Display) {
    println!("✅ {}: {detail}", t(key));
}

pub fn info(key: &str) {
    println!("💡 {}", t(key));
}

pub fn warning(message: impl std::fmt::Display) {
    println!("⚠️  {message}");
}

pub fn error(key: &str) {
    eprintln!("❌ {}", t(key));
}
