use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Which wizard script and login flow the service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeMode {
    /// Candidates pick a vendor first; vendors get scoped dashboards.
    Vendor,
    /// Single-tenant: no vendor step, one admin dashboard with delete actions.
    Simple,
}

impl IntakeMode {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "vendor" => Ok(Self::Vendor),
            "simple" | "single" => Ok(Self::Simple),
            other => bail!("INTAKE_MODE must be 'vendor' or 'simple', got '{other}'"),
        }
    }
}

/// A vendor row seeded at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorSeed {
    pub name: String,
    pub admin_password: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub master_password: String,
    pub mode: IntakeMode,
    pub vendors: Vec<VendorSeed>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

pub const DEFAULT_VENDORS: &str = "XX:xx123,YY:yy123";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: env_or("DATABASE_URL", "sqlite:database.db?mode=rwc"),
            upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "uploads")),
            master_password: env_or("MASTER_PASSWORD", "owner123"),
            mode: IntakeMode::parse(&env_or("INTAKE_MODE", "vendor"))?,
            vendors: parse_vendor_seeds(&env_or("VENDORS", DEFAULT_VENDORS))?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", "10485760")
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses `NAME:secret,NAME:secret`. Names are upper-cased so lookups can be
/// case-insensitive against the stored value.
pub fn parse_vendor_seeds(raw: &str) -> Result<Vec<VendorSeed>> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let (name, secret) = item
                .split_once(':')
                .with_context(|| format!("VENDORS entry '{item}' must look like NAME:secret"))?;
            let name = name.trim();
            if name.is_empty() {
                bail!("VENDORS entry '{item}' has an empty name");
            }
            Ok(VendorSeed {
                name: name.to_uppercase(),
                admin_password: secret.to_string(),
            })
        })
        .collect()
}
