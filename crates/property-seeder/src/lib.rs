//! Property Seeder
//!
//! Populates a property management database with a demo catalog and a
//! randomized, tax-consistent sale history.

pub mod catalog;
pub mod config;
pub mod seeder;

pub use config::{ConfigError, SeederConfig};
pub use seeder::{SeedSummary, Seeder};
