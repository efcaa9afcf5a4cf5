//! Synthetic Trace Generator
//!
//! Produces a short, randomized sale history for a property. Every trace is
//! dated after the property was created and carries the tax its value owes
//! under the active policy.

use anyhow::{ensure, Context, Result};
use chrono::Duration;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Property, PropertyTrace};
use crate::storage::{RecordBatch, RecordStore};
use crate::tax_policy::TaxPolicy;

/// Source of the random draws behind trace generation.
///
/// Implemented for every [`rand::Rng`], so a seeded `StdRng` gives a
/// reproducible run. Bounds are inclusive on both ends.
pub trait TraceEntropy {
    /// Number of traces for one property
    fn draw_count(&mut self, min: u32, max: u32) -> u32;

    /// Days between property creation and the sale
    fn draw_offset_days(&mut self, min: i64, max: i64) -> i64;

    /// Amount added to the property price to get the sale value
    fn draw_perturbation(&mut self, min: i64, max: i64) -> i64;

    /// Identifier for a new record
    fn draw_id(&mut self) -> Uuid;
}

impl<R: Rng + ?Sized> TraceEntropy for R {
    fn draw_count(&mut self, min: u32, max: u32) -> u32 {
        self.gen_range(min..=max)
    }

    fn draw_offset_days(&mut self, min: i64, max: i64) -> i64 {
        self.gen_range(min..=max)
    }

    fn draw_perturbation(&mut self, min: i64, max: i64) -> i64 {
        self.gen_range(min..=max)
    }

    fn draw_id(&mut self) -> Uuid {
        uuid::Builder::from_random_bytes(self.gen()).into_uuid()
    }
}

/// Bounds for generated traces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceGenerationConfig {
    /// Fewest traces per property
    pub min_traces: u32,
    /// Most traces per property
    pub max_traces: u32,
    /// Earliest sale, in days after creation (must be at least 1)
    pub min_offset_days: i64,
    /// Latest sale, in days after creation
    pub max_offset_days: i64,
    /// Largest discount from the property price
    pub min_perturbation: i64,
    /// Largest markup over the property price
    pub max_perturbation: i64,
}

impl Default for TraceGenerationConfig {
    fn default() -> Self {
        Self {
            min_traces: 1,
            max_traces: 3,
            min_offset_days: 1,
            max_offset_days: 29,
            min_perturbation: -50_000_000,
            max_perturbation: 99_999_999,
        }
    }
}

impl TraceGenerationConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.min_traces <= self.max_traces,
            "min_traces ({}) exceeds max_traces ({})",
            self.min_traces,
            self.max_traces
        );
        ensure!(
            self.min_offset_days >= 1,
            "sales must fall strictly after creation (min_offset_days = {})",
            self.min_offset_days
        );
        ensure!(
            self.min_offset_days <= self.max_offset_days,
            "min_offset_days ({}) exceeds max_offset_days ({})",
            self.min_offset_days,
            self.max_offset_days
        );
        ensure!(
            self.min_perturbation <= self.max_perturbation,
            "min_perturbation ({}) exceeds max_perturbation ({})",
            self.min_perturbation,
            self.max_perturbation
        );
        Ok(())
    }
}

pub struct TraceGenerator {
    policy: TaxPolicy,
    config: TraceGenerationConfig,
}

impl Default for TraceGenerator {
    fn default() -> Self {
        Self::new(TaxPolicy::default())
    }
}

impl TraceGenerator {
    pub fn new(policy: TaxPolicy) -> Self {
        Self {
            policy,
            config: TraceGenerationConfig::default(),
        }
    }

    pub fn with_config(policy: TaxPolicy, config: TraceGenerationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { policy, config })
    }

    pub fn policy(&self) -> &TaxPolicy {
        &self.policy
    }

    pub fn config(&self) -> &TraceGenerationConfig {
        &self.config
    }

    /// Generate the sale history of one property.
    ///
    /// Values are not clamped: a strongly negative perturbation on a cheap
    /// property can yield a negative value, which the policy taxes at zero.
    pub fn generate<E>(&self, property: &Property, entropy: &mut E) -> Vec<PropertyTrace>
    where
        E: TraceEntropy + ?Sized,
    {
        let cfg = &self.config;
        let count = entropy.draw_count(cfg.min_traces, cfg.max_traces);

        (0..count)
            .map(|i| {
                let offset = entropy.draw_offset_days(cfg.min_offset_days, cfg.max_offset_days);
                let sale_date = property.created_at + Duration::days(offset);
                let perturbation =
                    entropy.draw_perturbation(cfg.min_perturbation, cfg.max_perturbation);
                let value = property.price + Decimal::from(perturbation);

                PropertyTrace {
                    id: entropy.draw_id().to_string(),
                    property_id: property.id.clone(),
                    sale_date,
                    name: format!("Buyer {} - {}", i + 1, property.name),
                    value,
                    tax: self.policy.compute_tax(value),
                    created_at: sale_date,
                    updated_at: None,
                }
            })
            .collect()
    }

    /// Generate traces for every property and persist them in one batch.
    pub async fn seed_traces<E>(
        &self,
        store: &dyn RecordStore,
        properties: &[Property],
        entropy: &mut E,
    ) -> Result<Vec<PropertyTrace>>
    where
        E: TraceEntropy + ?Sized,
    {
        let mut traces = Vec::new();
        for property in properties {
            let generated = self.generate(property, entropy);
            tracing::debug!(
                "Generated {} traces for property {} ({})",
                generated.len(),
                property.id,
                property.name
            );
            traces.extend(generated);
        }

        if !traces.is_empty() {
            store
                .bulk_insert(RecordBatch::PropertyTraces(traces.clone()))
                .await
                .context("Failed to persist property traces")?;
        }

        Ok(traces)
    }
}
