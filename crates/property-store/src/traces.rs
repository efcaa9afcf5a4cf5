use anyhow::Result;
use chrono::Utc;
use property_core::{PropertyTrace, TaxPolicy, TraceInput};
use uuid::Uuid;

use crate::db::PropertyDb;
use crate::error::StoreError;
use crate::rows::{insert_trace, trace_from_row};

pub struct TraceRepository {
    db: PropertyDb,
    policy: TaxPolicy,
}

impl TraceRepository {
    pub fn new(db: PropertyDb) -> Self {
        Self::with_policy(db, TaxPolicy::default())
    }

    /// Requests without an explicit tax are taxed under `policy`
    pub fn with_policy(db: PropertyDb, policy: TaxPolicy) -> Self {
        Self { db, policy }
    }

    pub fn policy(&self) -> &TaxPolicy {
        &self.policy
    }

    /// Record a sale, returning its id
    pub async fn create(&self, input: TraceInput) -> Result<String> {
        input.validate().map_err(StoreError::from)?;

        let trace = input.into_trace(Uuid::new_v4().to_string(), &self.policy, Utc::now());
        insert_trace(self.db.pool(), &trace).await?;

        tracing::debug!(
            "Recorded trace {} for property {} (value {}, tax {})",
            trace.id,
            trace.property_id,
            trace.value,
            trace.tax
        );
        Ok(trace.id)
    }

    /// Sale history of a property, oldest first
    pub async fn list_for_property(&self, property_id: &str) -> Result<Vec<PropertyTrace>> {
        let rows =
            sqlx::query("SELECT * FROM property_traces WHERE property_id = ? ORDER BY sale_date")
                .bind(property_id)
                .fetch_all(self.db.pool())
                .await?;

        let traces = rows
            .iter()
            .map(trace_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(traces)
    }

    /// Get trace by ID
    pub async fn get(&self, id: &str) -> Result<Option<PropertyTrace>> {
        let row = sqlx::query("SELECT * FROM property_traces WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.as_ref().map(trace_from_row).transpose()?)
    }

    /// Overwrite a trace in place
    pub async fn update(&self, id: &str, input: TraceInput) -> Result<()> {
        input.validate().map_err(StoreError::from)?;
        let tax = input.resolved_tax(&self.policy);

        let result = sqlx::query(
            r#"
            UPDATE property_traces
            SET property_id = ?, sale_date = ?, name = ?, value = ?, tax = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.property_id)
        .bind(input.sale_date)
        .bind(input.name.as_deref().unwrap_or_default())
        .bind(input.value.to_string())
        .bind(tax.to_string())
        .bind(Utc::now())
        .bind(id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "PropertyTrace",
                id: id.to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Delete trace
    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM property_traces WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "PropertyTrace",
                id: id.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use property_core::ValidationError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    async fn setup_test_db() -> PropertyDb {
        PropertyDb::new("sqlite::memory:").await.unwrap()
    }

    fn input(value: Decimal, tax: Option<Decimal>) -> TraceInput {
        TraceInput {
            property_id: "prop-1".to_string(),
            sale_date: Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap(),
            name: Some("Buyer Test".to_string()),
            value,
            tax,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_trace() {
        let repo = TraceRepository::new(setup_test_db().await);

        let id = repo
            .create(input(dec!(500000), Some(dec!(7500))))
            .await
            .unwrap();
        let trace = repo.get(&id).await.unwrap().unwrap();

        assert_eq!(trace.property_id, "prop-1");
        assert_eq!(trace.name, "Buyer Test");
        assert_eq!(trace.value, dec!(500000));
        assert_eq!(trace.tax, dec!(7500));
        assert_eq!(
            trace.sale_date,
            Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_create_derives_missing_tax() {
        let repo = TraceRepository::new(setup_test_db().await);

        let id = repo.create(input(dec!(1200000000), None)).await.unwrap();
        let trace = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(trace.tax, dec!(3090000));
    }

    #[tokio::test]
    async fn test_fractional_tax_round_trips_exactly() {
        let repo = TraceRepository::new(setup_test_db().await);

        let id = repo.create(input(dec!(1099999999), None)).await.unwrap();
        let trace = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(trace.tax, dec!(1589999.985));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let repo = TraceRepository::new(setup_test_db().await);

        let err = repo.create(input(dec!(-1), None)).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::Validation(ValidationError::NegativeValue(_)))
        ));
    }

    #[tokio::test]
    async fn test_list_for_property() {
        let repo = TraceRepository::new(setup_test_db().await);
        assert!(repo.list_for_property("prop-1").await.unwrap().is_empty());

        let mut later = input(dec!(600000), None);
        later.sale_date = later.sale_date + Duration::days(3);
        repo.create(later).await.unwrap();
        repo.create(input(dec!(500000), None)).await.unwrap();

        let mut other = input(dec!(700000), None);
        other.property_id = "prop-2".to_string();
        repo.create(other).await.unwrap();

        let traces = repo.list_for_property("prop-1").await.unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].value, dec!(500000));
        assert_eq!(traces[1].value, dec!(600000));
    }

    #[tokio::test]
    async fn test_update_trace() {
        let repo = TraceRepository::new(setup_test_db().await);
        let id = repo
            .create(input(dec!(500000), Some(dec!(7500))))
            .await
            .unwrap();

        let mut req = input(dec!(600000), Some(dec!(9000)));
        req.name = Some("Buyer Updated".to_string());
        repo.update(&id, req).await.unwrap();

        let trace = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(trace.name, "Buyer Updated");
        assert_eq!(trace.value, dec!(600000));
        assert_eq!(trace.tax, dec!(9000));
        assert!(trace.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_update_missing_trace() {
        let repo = TraceRepository::new(setup_test_db().await);
        let err = repo
            .update("missing", input(dec!(1), None))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_trace() {
        let repo = TraceRepository::new(setup_test_db().await);
        let id = repo.create(input(dec!(500000), None)).await.unwrap();
        repo.delete(&id).await.unwrap();

        let err = repo.delete(&id).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::NotFound { entity: "PropertyTrace", .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_trace() {
        let repo = TraceRepository::new(setup_test_db().await);
        let id = repo.create(input(dec!(500000), None)).await.unwrap();

        repo.delete(&id).await.unwrap();
        assert!(repo.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_custom_policy() {
        let repo =
            TraceRepository::with_policy(setup_test_db().await, TaxPolicy::with_unit_value(dec!(47065)));
        let id = repo.create(input(dec!(1041300000), None)).await.unwrap();
        assert_eq!(repo.get(&id).await.unwrap().unwrap().tax, dec!(1500000));
    }
}
