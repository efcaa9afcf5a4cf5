use property_core::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid decimal in column {column}: {value:?}")]
    InvalidDecimal { column: &'static str, value: String },

    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

pub type StoreResult<T> = Result<T, StoreError>;
