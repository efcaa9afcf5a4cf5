use anyhow::{Context, Result};
use chrono::Utc;
use property_core::{Property, PropertyFilter, PropertyImage, PropertyInput, PropertyListItem};
use uuid::Uuid;

use crate::db::PropertyDb;
use crate::error::StoreError;
use crate::rows::{image_from_row, insert_image, insert_property, property_from_row};

pub struct PropertyRepository {
    db: PropertyDb,
}

impl PropertyRepository {
    pub fn new(db: PropertyDb) -> Self {
        Self { db }
    }

    /// Get a reference to the database
    pub fn db(&self) -> &PropertyDb {
        &self.db
    }

    /// Properties matching every criterion of `filter`
    pub async fn search(&self, filter: &PropertyFilter) -> Result<Vec<Property>> {
        let rows = sqlx::query("SELECT * FROM properties ORDER BY created_at")
            .fetch_all(self.db.pool())
            .await?;

        let mut properties = Vec::new();
        for row in &rows {
            let property = property_from_row(row)?;
            if filter.matches(&property) {
                properties.push(property);
            }
        }

        Ok(properties)
    }

    /// Search results with their main image and whether they have sales
    pub async fn list_items(&self, filter: &PropertyFilter) -> Result<Vec<PropertyListItem>> {
        let properties = self.search(filter).await?;

        let mut items = Vec::with_capacity(properties.len());
        for property in properties {
            let image_url = self.main_image(&property.id).await?.map(|img| img.file);
            let has_transactions = self.has_transactions(&property.id).await?;
            items.push(PropertyListItem {
                property,
                image_url,
                has_transactions,
            });
        }

        Ok(items)
    }

    /// Get property by ID
    pub async fn get(&self, id: &str) -> Result<Option<Property>> {
        let row = sqlx::query("SELECT * FROM properties WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.as_ref().map(property_from_row).transpose()?)
    }

    /// Create a property, plus its main image when a URL is given
    pub async fn create(&self, input: PropertyInput) -> Result<String> {
        let now = Utc::now();
        let property = Property {
            id: Uuid::new_v4().to_string(),
            owner_id: input.owner_id,
            name: input.name,
            address: input.address,
            price: input.price,
            code_internal: input.code_internal,
            year: input.year,
            created_at: now,
            updated_at: None,
        };
        insert_property(self.db.pool(), &property).await?;

        if let Some(url) = input.image_url.filter(|u| !u.trim().is_empty()) {
            let image = PropertyImage {
                id: Uuid::new_v4().to_string(),
                property_id: property.id.clone(),
                file: url,
                enabled: input.image_enabled,
                created_at: now,
                updated_at: None,
            };
            insert_image(self.db.pool(), &image).await?;
        }

        Ok(property.id)
    }

    /// Replace the editable fields of a property. The image is left alone.
    pub async fn update(&self, id: &str, input: PropertyInput) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE properties
            SET owner_id = ?, name = ?, address = ?, price = ?, code_internal = ?, year = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.owner_id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(input.price.to_string())
        .bind(&input.code_internal)
        .bind(input.year)
        .bind(Utc::now())
        .bind(id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "Property",
                id: id.to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Delete property
    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "Property",
                id: id.to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// First enabled image of a property
    pub async fn main_image(&self, property_id: &str) -> Result<Option<PropertyImage>> {
        let row = sqlx::query(
            "SELECT * FROM property_images WHERE property_id = ? AND enabled = 1 ORDER BY created_at LIMIT 1",
        )
        .bind(property_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(image_from_row).transpose()?)
    }

    /// Disable the current images and store `file` as the new main image
    pub async fn replace_image(&self, property_id: &str, file: &str) -> Result<String> {
        let now = Utc::now();
        let mut tx = self.db.pool().begin().await?;

        sqlx::query(
            "UPDATE property_images SET enabled = 0, updated_at = ? WHERE property_id = ? AND enabled = 1",
        )
        .bind(now)
        .bind(property_id)
        .execute(&mut *tx)
        .await?;

        let image = PropertyImage {
            id: Uuid::new_v4().to_string(),
            property_id: property_id.to_string(),
            file: file.to_string(),
            enabled: true,
            created_at: now,
            updated_at: None,
        };
        insert_image(&mut *tx, &image).await?;

        tx.commit()
            .await
            .context("Failed to commit image replacement")?;

        Ok(image.id)
    }

    /// Whether any sale trace references the property
    pub async fn has_transactions(&self, property_id: &str) -> Result<bool> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM property_traces WHERE property_id = ?")
                .bind(property_id)
                .fetch_one(self.db.pool())
                .await?;

        Ok(count > 0)
    }
}
