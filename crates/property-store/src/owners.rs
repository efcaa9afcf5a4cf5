use anyhow::Result;
use chrono::Utc;
use property_core::{contains_ignore_case, Owner, OwnerInput};
use uuid::Uuid;

use crate::db::PropertyDb;
use crate::rows::{insert_owner, owner_from_row};

pub struct OwnerRepository {
    db: PropertyDb,
}

impl OwnerRepository {
    pub fn new(db: PropertyDb) -> Self {
        Self { db }
    }

    /// Create an owner, returning its id
    pub async fn create(&self, input: OwnerInput) -> Result<String> {
        let owner = Owner {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            address: input.address,
            photo: input.photo,
            birthday: input.birthday,
            created_at: Utc::now(),
            updated_at: None,
        };
        insert_owner(self.db.pool(), &owner).await?;

        Ok(owner.id)
    }

    /// Get owner by ID
    pub async fn get(&self, id: &str) -> Result<Option<Owner>> {
        let row = sqlx::query("SELECT * FROM owners WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.as_ref().map(owner_from_row).transpose()?)
    }

    /// Owners whose name contains `name` (any case), or all owners
    pub async fn search(&self, name: Option<&str>) -> Result<Vec<Owner>> {
        let rows = sqlx::query("SELECT * FROM owners ORDER BY created_at")
            .fetch_all(self.db.pool())
            .await?;

        let mut owners = Vec::with_capacity(rows.len());
        for row in &rows {
            let owner = owner_from_row(row)?;
            if contains_ignore_case(&owner.name, name) {
                owners.push(owner);
            }
        }

        Ok(owners)
    }
}
