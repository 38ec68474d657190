//! Application settings loaded from condo.toml.
//!
//! The settings file carries everything an operator tunes without touching
//! code: the listen address, the liquidation policy knobs, the expense
//! category to bucket mapping, the seeded condominiums with their units,
//! and the session token table. Seeding and session resolution consume
//! these structures at startup; nothing re-reads the file afterwards.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire condo.toml file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Settlement calculation policy
    #[serde(default)]
    pub liquidation: LiquidationSettings,
    /// Expense category to bucket mapping
    #[serde(default)]
    pub buckets: BucketSettings,
    /// Condominiums to seed on first run
    #[serde(default)]
    pub condominiums: Vec<CondominiumConfig>,
    /// Session token table
    #[serde(default)]
    pub sessions: Vec<SessionConfig>,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Address the server listens on, e.g. `"127.0.0.1:8080"`
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

/// What to do when a condominium's unit coefficients do not sum to 100.
///
/// The default is `Off`: the source system never validated the sum, and
/// changing that silently would alter billing for existing installations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoefficientSumCheck {
    /// Accept any coefficient sum silently
    #[default]
    Off,
    /// Log a warning but calculate anyway
    Warn,
    /// Fail the calculation with a validation error
    Reject,
}

/// Settlement calculation policy
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiquidationSettings {
    /// Coefficient-sum policy applied by the calculator
    #[serde(default)]
    pub coefficient_sum_check: CoefficientSumCheck,
}

/// Expense bucket a category rolls up into on the settlement record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Ordinary expenses (the catch-all)
    A,
    /// Contracted services
    B,
    /// Extraordinary expenses
    C,
}

/// Expense category to bucket mapping.
///
/// Categories are free-form strings on expense records; settlements report
/// three categorized totals. Which category lands in which bucket is an
/// operator decision, so it lives here. Anything not listed falls into
/// bucket A.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BucketSettings {
    /// Categories rolled up into bucket B
    #[serde(default)]
    pub b: Vec<String>,
    /// Categories rolled up into bucket C
    #[serde(default)]
    pub c: Vec<String>,
}

impl BucketSettings {
    /// Resolves the bucket for an expense category (case-insensitive).
    #[must_use]
    pub fn bucket_for(&self, category: &str) -> Bucket {
        let matches = |list: &[String]| list.iter().any(|c| c.eq_ignore_ascii_case(category));
        if matches(&self.b) {
            Bucket::B
        } else if matches(&self.c) {
            Bucket::C
        } else {
            Bucket::A
        }
    }
}

/// A condominium to seed on first run
#[derive(Debug, Clone, Deserialize)]
pub struct CondominiumConfig {
    /// Operator-assigned identifier, referenced by session entries
    pub id: String,
    /// Display name
    pub name: String,
    /// Subscription tier: `"FREE"` or `"PRO"`
    pub plan: String,
    /// Units seeded together with the condominium
    #[serde(default)]
    pub units: Vec<UnitConfig>,
}

/// A unit seeded together with its condominium
#[derive(Debug, Clone, Deserialize)]
pub struct UnitConfig {
    /// Door/apartment number
    pub number: String,
    /// Percentage share of common expenses (0-100)
    pub coefficient: f64,
    /// Name of the registered owner or contact person
    #[serde(default)]
    pub contact_name: String,
    /// PIN used by the resident to access their statements
    #[serde(default)]
    pub access_pin: String,
}

/// One entry of the session token table
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Bearer token presented by the client
    pub token: String,
    /// Id of the condominium the session is bound to
    pub condominium: String,
    /// Role string, parsed through the legacy alias table
    pub role: String,
    /// Plan string: `"FREE"` or `"PRO"`
    pub plan: String,
}

/// Loads settings from a TOML file and applies environment overrides.
///
/// # Arguments
/// * `path` - Path to the condo.toml file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    let mut settings: Settings = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings file: {e}"),
    })?;

    if let Ok(bind_addr) = std::env::var("CONDO_BIND_ADDR") {
        settings.server.bind_addr = bind_addr;
    }

    Ok(settings)
}

/// Loads settings from the default location (./condo.toml)
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_default_settings() -> Result<Settings> {
    load_settings("condo.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let toml_str = r#"
            [server]
            bind_addr = "0.0.0.0:9000"

            [liquidation]
            coefficient_sum_check = "warn"

            [buckets]
            b = ["services"]
            c = ["extraordinary"]

            [[condominiums]]
            id = "torre-alba"
            name = "Torre Alba"
            plan = "PRO"

            [[condominiums.units]]
            number = "1A"
            coefficient = 60.0
            contact_name = "Ana Souto"
            access_pin = "4821"

            [[sessions]]
            token = "dev-admin-token"
            condominium = "torre-alba"
            role = "ADMIN"
            plan = "PRO"
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(
            settings.liquidation.coefficient_sum_check,
            CoefficientSumCheck::Warn
        );
        assert_eq!(settings.condominiums.len(), 1);
        assert_eq!(settings.condominiums[0].units.len(), 1);
        assert_eq!(settings.condominiums[0].units[0].coefficient, 60.0);
        assert_eq!(settings.sessions.len(), 1);
        assert_eq!(settings.sessions[0].role, "ADMIN");
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(
            settings.liquidation.coefficient_sum_check,
            CoefficientSumCheck::Off
        );
        assert!(settings.condominiums.is_empty());
        assert!(settings.sessions.is_empty());
    }

    #[test]
    fn test_bucket_mapping_defaults_to_a() {
        let buckets = BucketSettings {
            b: vec!["services".to_string()],
            c: vec!["extraordinary".to_string()],
        };
        assert_eq!(buckets.bucket_for("maintenance"), Bucket::A);
        assert_eq!(buckets.bucket_for("services"), Bucket::B);
        assert_eq!(buckets.bucket_for("SERVICES"), Bucket::B);
        assert_eq!(buckets.bucket_for("extraordinary"), Bucket::C);
    }
}
