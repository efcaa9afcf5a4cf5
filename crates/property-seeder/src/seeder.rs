//! Seeding run: wipe every collection, then write owners, properties,
//! images and sale traces in that order.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use property_core::{
    Collection, Owner, Property, PropertyImage, RecordBatch, RecordStore, TaxPolicy, TraceEntropy,
    TraceGenerator,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::{demo_images, demo_owners, demo_properties};

/// What a seeding run wrote
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeedSummary {
    /// Records removed before seeding, all collections combined
    pub cleared: u64,
    pub owners: usize,
    pub properties: usize,
    pub images: usize,
    pub traces: usize,
    /// Sum of all trace values
    pub traded_value: Decimal,
    /// Sum of all trace taxes
    pub transfer_tax: Decimal,
}

pub struct Seeder<'a> {
    store: &'a dyn RecordStore,
    generator: TraceGenerator,
}

impl<'a> Seeder<'a> {
    pub fn new(store: &'a dyn RecordStore, policy: TaxPolicy) -> Self {
        Self {
            store,
            generator: TraceGenerator::new(policy),
        }
    }

    /// Run a full reseed. Any storage failure aborts the run.
    pub async fn run<E>(&self, now: DateTime<Utc>, entropy: &mut E) -> Result<SeedSummary>
    where
        E: TraceEntropy + ?Sized,
    {
        tracing::info!("Starting data seeding into {} store", self.store.store_name());

        let cleared = self.clear_existing().await?;

        let owners = self.create_owners(now, entropy).await?;
        tracing::info!("Created {} owners", owners.len());

        let properties = self.create_properties(&owners, now, entropy).await?;
        tracing::info!("Created {} properties", properties.len());

        let images = self.create_images(&properties, entropy).await?;
        tracing::info!("Created {} property images", images.len());

        let traces = self
            .generator
            .seed_traces(self.store, &properties, entropy)
            .await?;
        tracing::info!("Created {} property traces", traces.len());

        let summary = SeedSummary {
            cleared,
            owners: owners.len(),
            properties: properties.len(),
            images: images.len(),
            traces: traces.len(),
            traded_value: traces.iter().map(|t| t.value).sum(),
            transfer_tax: traces.iter().map(|t| t.tax).sum(),
        };

        tracing::info!("Data seeding completed");
        Ok(summary)
    }

    async fn clear_existing(&self) -> Result<u64> {
        tracing::info!("Clearing existing data");

        let mut cleared = 0;
        for collection in Collection::ALL {
            let removed = self
                .store
                .delete_all(collection)
                .await
                .with_context(|| format!("Failed to clear {}", collection))?;
            if removed > 0 {
                tracing::debug!("Removed {} records from {}", removed, collection);
            }
            cleared += removed;
        }

        Ok(cleared)
    }

    async fn create_owners<E>(&self, now: DateTime<Utc>, entropy: &mut E) -> Result<Vec<Owner>>
    where
        E: TraceEntropy + ?Sized,
    {
        let owners = demo_owners(now, entropy);
        self.store
            .bulk_insert(RecordBatch::Owners(owners.clone()))
            .await
            .context("Failed to insert owners")?;
        Ok(owners)
    }

    async fn create_properties<E>(
        &self,
        owners: &[Owner],
        now: DateTime<Utc>,
        entropy: &mut E,
    ) -> Result<Vec<Property>>
    where
        E: TraceEntropy + ?Sized,
    {
        let properties = demo_properties(owners, now, entropy);
        self.store
            .bulk_insert(RecordBatch::Properties(properties.clone()))
            .await
            .context("Failed to insert properties")?;
        Ok(properties)
    }

    async fn create_images<E>(
        &self,
        properties: &[Property],
        entropy: &mut E,
    ) -> Result<Vec<PropertyImage>>
    where
        E: TraceEntropy + ?Sized,
    {
        let images = demo_images(properties, entropy);
        self.store
            .bulk_insert(RecordBatch::PropertyImages(images.clone()))
            .await
            .context("Failed to insert property images")?;
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use property_core::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    /// Accepts everything except traces
    struct FailingStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl RecordStore for FailingStore {
        async fn bulk_insert(&self, batch: RecordBatch) -> Result<u64> {
            if batch.collection() == Collection::PropertyTraces {
                bail!("disk full");
            }
            self.inner.bulk_insert(batch).await
        }

        async fn delete_all(&self, collection: Collection) -> Result<u64> {
            self.inner.delete_all(collection).await
        }

        fn store_name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_full_seed_run() {
        let store = MemoryStore::new();
        let seeder = Seeder::new(&store, TaxPolicy::default());

        let summary = seeder
            .run(now(), &mut StdRng::seed_from_u64(42))
            .await
            .unwrap();

        assert_eq!(summary.cleared, 0);
        assert_eq!(summary.owners, 8);
        assert_eq!(summary.properties, 10);
        assert_eq!(summary.images, 10);
        assert!((10..=30).contains(&summary.traces));
        assert_eq!(store.traces().len(), summary.traces);

        let properties = store.properties();
        let policy = TaxPolicy::default();
        for trace in store.traces() {
            let property = properties
                .iter()
                .find(|p| p.id == trace.property_id)
                .expect("trace references a seeded property");
            assert!(trace.sale_date > property.created_at);
            assert!(trace.sale_date <= property.created_at + Duration::days(29));
            assert_eq!(trace.tax, policy.compute_tax(trace.value));
            assert!(trace.name.ends_with(&property.name));
        }
        for property in &properties {
            let count = store
                .traces()
                .iter()
                .filter(|t| t.property_id == property.id)
                .count();
            assert!((1..=3).contains(&count));
        }

        let total_tax: Decimal = store.traces().iter().map(|t| t.tax).sum();
        assert_eq!(summary.transfer_tax, total_tax);
    }

    #[tokio::test]
    async fn test_reseed_replaces_previous_data() {
        let store = MemoryStore::new();
        let seeder = Seeder::new(&store, TaxPolicy::default());

        let first = seeder
            .run(now(), &mut StdRng::seed_from_u64(1))
            .await
            .unwrap();
        let second = seeder
            .run(now(), &mut StdRng::seed_from_u64(2))
            .await
            .unwrap();

        assert_eq!(
            second.cleared as usize,
            first.owners + first.properties + first.images + first.traces
        );
        assert_eq!(store.owners().len(), 8);
        assert_eq!(store.traces().len(), second.traces);
    }

    #[tokio::test]
    async fn test_same_seed_is_reproducible() {
        let a = MemoryStore::new();
        let b = MemoryStore::new();

        Seeder::new(&a, TaxPolicy::default())
            .run(now(), &mut StdRng::seed_from_u64(2024))
            .await
            .unwrap();
        Seeder::new(&b, TaxPolicy::default())
            .run(now(), &mut StdRng::seed_from_u64(2024))
            .await
            .unwrap();

        assert_eq!(a.owners(), b.owners());
        assert_eq!(a.properties(), b.properties());
        assert_eq!(a.traces(), b.traces());
    }

    #[tokio::test]
    async fn test_storage_failure_aborts_run() {
        let store = FailingStore {
            inner: MemoryStore::new(),
        };
        let seeder = Seeder::new(&store, TaxPolicy::default());

        let err = seeder
            .run(now(), &mut StdRng::seed_from_u64(5))
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("disk full"));
        assert!(store.inner.traces().is_empty());
        assert_eq!(store.inner.properties().len(), 10);
    }
}
