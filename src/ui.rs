//! Shared terminal output helpers.
//!
//! All user-facing progress, warnings and results route through here so the
//! commands stay quiet about formatting.

use console::{Emoji, style};

pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK] ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR] ");
pub static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "[WARN] ");
pub static BRANCH: Emoji<'_, '_> = Emoji("🌿 ", "");
pub static FORK: Emoji<'_, '_> = Emoji("🔱 ", "");

/// Dimmed progress line for an intermediate step.
pub fn step(message: &str) {
    println!("  {}", style(message).dim());
}

pub fn success(message: &str) {
    println!("{}{}", CHECK, message);
}

/// Non-fatal problem; the flow continues.
pub fn warn(message: &str) {
    eprintln!("{}{}", WARNING, style(message).yellow());
}
