use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{Owner, Property, PropertyImage, PropertyTrace};

// ---------------------------------------------------------------------------
// Collections and typed batches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    Owners,
    Properties,
    PropertyImages,
    PropertyTraces,
}

impl Collection {
    /// Every collection, children after parents
    pub const ALL: [Collection; 4] = [
        Collection::Owners,
        Collection::Properties,
        Collection::PropertyImages,
        Collection::PropertyTraces,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Owners => "Owners",
            Collection::Properties => "Properties",
            Collection::PropertyImages => "PropertyImages",
            Collection::PropertyTraces => "PropertyTraces",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A batch of records bound for a single collection
#[derive(Debug, Clone)]
pub enum RecordBatch {
    Owners(Vec<Owner>),
    Properties(Vec<Property>),
    PropertyImages(Vec<PropertyImage>),
    PropertyTraces(Vec<PropertyTrace>),
}

impl RecordBatch {
    pub fn collection(&self) -> Collection {
        match self {
            RecordBatch::Owners(_) => Collection::Owners,
            RecordBatch::Properties(_) => Collection::Properties,
            RecordBatch::PropertyImages(_) => Collection::PropertyImages,
            RecordBatch::PropertyTraces(_) => Collection::PropertyTraces,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RecordBatch::Owners(r) => r.len(),
            RecordBatch::Properties(r) => r.len(),
            RecordBatch::PropertyImages(r) => r.len(),
            RecordBatch::PropertyTraces(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Storage trait
// ---------------------------------------------------------------------------

/// Bulk persistence used by the seeder
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a batch, returning the number of records written.
    /// No transactional guarantee beyond what the backend provides.
    async fn bulk_insert(&self, batch: RecordBatch) -> Result<u64>;

    /// Remove every record of a collection, returning how many were removed
    async fn delete_all(&self, collection: Collection) -> Result<u64>;

    /// Backend name for logging
    fn store_name(&self) -> &str;
}
