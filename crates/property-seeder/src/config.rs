//! Seeder configuration: environment first, command-line flags override.

use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

use property_core::{TaxPolicy, UVT_2024};

pub const DEFAULT_DATABASE_URL: &str = "sqlite:property_management.db?mode=rwc";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing value for {0}")]
    MissingValue(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("UVT value must be positive, got {0}")]
    NonPositiveUnitValue(Decimal),

    #[error("UVT value {0} is too large for the tax brackets")]
    UnitValueTooLarge(Decimal),

    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeederConfig {
    /// sqlx connection string for the SQLite database
    pub database_url: String,
    /// Fixed seed for a reproducible run; OS entropy when absent
    pub rng_seed: Option<u64>,
    /// Monetary worth of one UVT
    pub unit_value: Decimal,
    /// Seed into memory only, leaving the database untouched
    pub dry_run: bool,
}

impl Default for SeederConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            rng_seed: None,
            unit_value: UVT_2024,
            dry_run: false,
        }
    }
}

impl SeederConfig {
    /// Load from the process environment (after `.env`) and `args`
    pub fn load(args: &[String]) -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok(), args)
    }

    /// `env` looks up a variable; `args` excludes the program name
    pub fn resolve<F>(env: F, args: &[String]) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = env("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            config.database_url = url;
        }
        if let Some(seed) = env("SEED_RNG_SEED") {
            config.rng_seed = Some(parse_value("SEED_RNG_SEED", &seed)?);
        }
        if let Some(uvt) = env("TAX_UVT_VALUE") {
            config.unit_value = parse_value("TAX_UVT_VALUE", &uvt)?;
        }

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--dry-run" => config.dry_run = true,
                "--db" => {
                    config.database_url = iter.next().ok_or(ConfigError::MissingValue("--db"))?.clone();
                }
                "--seed" => {
                    let value = iter.next().ok_or(ConfigError::MissingValue("--seed"))?;
                    config.rng_seed = Some(parse_value("--seed", value)?);
                }
                "--uvt" => {
                    let value = iter.next().ok_or(ConfigError::MissingValue("--uvt"))?;
                    config.unit_value = parse_value("--uvt", value)?;
                }
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }

        if config.unit_value <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveUnitValue(config.unit_value));
        }

        // Thresholds and surcharge are UVT multiples; they must stay representable
        let policy = TaxPolicy::with_unit_value(config.unit_value);
        let representable = [policy.high_threshold_units, policy.fixed_surcharge_units]
            .iter()
            .all(|units| units.checked_mul(config.unit_value).is_some());
        if !representable {
            return Err(ConfigError::UnitValueTooLarge(config.unit_value));
        }

        Ok(config)
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}
