//! Row mapping and inserts shared by the repositories and the bulk store.

use property_core::{Owner, Property, PropertyImage, PropertyTrace};
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};
use std::str::FromStr;

use crate::error::{StoreError, StoreResult};

fn decimal(row: &SqliteRow, column: &'static str) -> StoreResult<Decimal> {
    let raw: String = row.try_get(column)?;
    Decimal::from_str(&raw).map_err(|_| StoreError::InvalidDecimal { column, value: raw })
}

pub(crate) fn owner_from_row(row: &SqliteRow) -> StoreResult<Owner> {
    Ok(Owner {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        address: row.try_get("address")?,
        photo: row.try_get("photo")?,
        birthday: row.try_get("birthday")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) fn property_from_row(row: &SqliteRow) -> StoreResult<Property> {
    Ok(Property {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        name: row.try_get("name")?,
        address: row.try_get("address")?,
        price: decimal(row, "price")?,
        code_internal: row.try_get("code_internal")?,
        year: row.try_get("year")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) fn image_from_row(row: &SqliteRow) -> StoreResult<PropertyImage> {
    Ok(PropertyImage {
        id: row.try_get("id")?,
        property_id: row.try_get("property_id")?,
        file: row.try_get("file")?,
        enabled: row.try_get("enabled")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) fn trace_from_row(row: &SqliteRow) -> StoreResult<PropertyTrace> {
    Ok(PropertyTrace {
        id: row.try_get("id")?,
        property_id: row.try_get("property_id")?,
        sale_date: row.try_get("sale_date")?,
        name: row.try_get("name")?,
        value: decimal(row, "value")?,
        tax: decimal(row, "tax")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) async fn insert_owner<'e, E>(executor: E, owner: &Owner) -> StoreResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO owners (id, name, address, photo, birthday, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&owner.id)
    .bind(&owner.name)
    .bind(&owner.address)
    .bind(&owner.photo)
    .bind(owner.birthday)
    .bind(owner.created_at)
    .bind(owner.updated_at)
    .execute(executor)
    .await?;

    Ok(())
}

pub(crate) async fn insert_property<'e, E>(executor: E, property: &Property) -> StoreResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO properties
            (id, owner_id, name, address, price, code_internal, year, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&property.id)
    .bind(&property.owner_id)
    .bind(&property.name)
    .bind(&property.address)
    .bind(property.price.to_string())
    .bind(&property.code_internal)
    .bind(property.year)
    .bind(property.created_at)
    .bind(property.updated_at)
    .execute(executor)
    .await?;

    Ok(())
}

pub(crate) async fn insert_image<'e, E>(executor: E, image: &PropertyImage) -> StoreResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO property_images (id, property_id, file, enabled, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&image.id)
    .bind(&image.property_id)
    .bind(&image.file)
    .bind(image.enabled)
    .bind(image.created_at)
    .bind(image.updated_at)
    .execute(executor)
    .await?;

    Ok(())
}

pub(crate) async fn insert_trace<'e, E>(executor: E, trace: &PropertyTrace) -> StoreResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO property_traces
            (id, property_id, sale_date, name, value, tax, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&trace.id)
    .bind(&trace.property_id)
    .bind(trace.sale_date)
    .bind(&trace.name)
    .bind(trace.value.to_string())
    .bind(trace.tax.to_string())
    .bind(trace.created_at)
    .bind(trace.updated_at)
    .execute(executor)
    .await?;

    Ok(())
}
