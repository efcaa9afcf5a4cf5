//! Bulk persistence backing the seeder.

use anyhow::{Context, Result};
use async_trait::async_trait;
use property_core::{Collection, RecordBatch, RecordStore};

use crate::db::PropertyDb;
use crate::rows::{insert_image, insert_owner, insert_property, insert_trace};

/// Table behind each collection
pub fn table_name(collection: Collection) -> &'static str {
    match collection {
        Collection::Owners => "owners",
        Collection::Properties => "properties",
        Collection::PropertyImages => "property_images",
        Collection::PropertyTraces => "property_traces",
    }
}

#[async_trait]
impl RecordStore for PropertyDb {
    /// Writes the whole batch in one transaction
    async fn bulk_insert(&self, batch: RecordBatch) -> Result<u64> {
        let collection = batch.collection();
        let written = batch.len() as u64;
        let mut tx = self.pool().begin().await?;

        match &batch {
            RecordBatch::Owners(records) => {
                for r in records {
                    insert_owner(&mut *tx, r).await?;
                }
            }
            RecordBatch::Properties(records) => {
                for r in records {
                    insert_property(&mut *tx, r).await?;
                }
            }
            RecordBatch::PropertyImages(records) => {
                for r in records {
                    insert_image(&mut *tx, r).await?;
                }
            }
            RecordBatch::PropertyTraces(records) => {
                for r in records {
                    insert_trace(&mut *tx, r).await?;
                }
            }
        }

        tx.commit()
            .await
            .with_context(|| format!("Failed to commit {} batch", collection))?;

        tracing::debug!("Inserted {} records into {}", written, collection);
        Ok(written)
    }

    async fn delete_all(&self, collection: Collection) -> Result<u64> {
        let sql = format!("DELETE FROM {}", table_name(collection));
        let result = sqlx::query(&sql)
            .execute(self.pool())
            .await
            .with_context(|| format!("Failed to clear {}", collection))?;

        Ok(result.rows_affected())
    }

    fn store_name(&self) -> &str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PropertyRepository, TraceRepository};
    use chrono::Utc;
    use property_core::{Property, PropertyTrace};
    use rust_decimal_macros::dec;

    async fn setup_test_db() -> PropertyDb {
        PropertyDb::new("sqlite::memory:").await.unwrap()
    }

    fn property(id: &str) -> Property {
        Property {
            id: id.to_string(),
            owner_id: "o-1".to_string(),
            name: format!("Property {}", id),
            address: "Calle 10 #3-15, La Candelaria, Bogotá".to_string(),
            price: dec!(1800000000),
            code_internal: "CASA-010-2024".to_string(),
            year: 2015,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn trace(id: &str, property_id: &str) -> PropertyTrace {
        PropertyTrace {
            id: id.to_string(),
            property_id: property_id.to_string(),
            sale_date: Utc::now(),
            name: "Buyer 1".to_string(),
            value: dec!(1200000000),
            tax: dec!(3090000),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_bulk_insert_and_read_back() {
        let db = setup_test_db().await;

        let written = db
            .bulk_insert(RecordBatch::Properties(vec![property("p1"), property("p2")]))
            .await
            .unwrap();
        assert_eq!(written, 2);

        db.bulk_insert(RecordBatch::PropertyTraces(vec![trace("t1", "p1")]))
            .await
            .unwrap();

        let properties = PropertyRepository::new(db.clone());
        assert!(properties.get("p2").await.unwrap().is_some());
        assert!(properties.has_transactions("p1").await.unwrap());
        assert!(!properties.has_transactions("p2").await.unwrap());

        let traces = TraceRepository::new(db);
        let stored = traces.get("t1").await.unwrap().unwrap();
        assert_eq!(stored.tax, dec!(3090000));
    }

    #[tokio::test]
    async fn test_failed_batch_is_rolled_back() {
        let db = setup_test_db().await;

        // duplicate primary key aborts the batch
        let err = db
            .bulk_insert(RecordBatch::PropertyTraces(vec![
                trace("t1", "p1"),
                trace("t1", "p1"),
            ]))
            .await;
        assert!(err.is_err());

        let traces = TraceRepository::new(db);
        assert!(traces.get("t1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_all() {
        let db = setup_test_db().await;
        db.bulk_insert(RecordBatch::Properties(vec![property("p1"), property("p2")]))
            .await
            .unwrap();

        assert_eq!(db.delete_all(Collection::Properties).await.unwrap(), 2);
        assert_eq!(db.delete_all(Collection::Properties).await.unwrap(), 0);
        assert_eq!(db.delete_all(Collection::Owners).await.unwrap(), 0);
    }
}
