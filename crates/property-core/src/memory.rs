//! In-memory record store, used for dry runs and tests.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::models::{Owner, Property, PropertyImage, PropertyTrace};
use crate::storage::{Collection, RecordBatch, RecordStore};

#[derive(Debug, Default)]
struct Collections {
    owners: Vec<Owner>,
    properties: Vec<Property>,
    images: Vec<PropertyImage>,
    traces: Vec<PropertyTrace>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owners(&self) -> Vec<Owner> {
        self.lock().map(|c| c.owners.clone()).unwrap_or_default()
    }

    pub fn properties(&self) -> Vec<Property> {
        self.lock().map(|c| c.properties.clone()).unwrap_or_default()
    }

    pub fn images(&self) -> Vec<PropertyImage> {
        self.lock().map(|c| c.images.clone()).unwrap_or_default()
    }

    pub fn traces(&self) -> Vec<PropertyTrace> {
        self.lock().map(|c| c.traces.clone()).unwrap_or_default()
    }

    pub fn count(&self, collection: Collection) -> usize {
        self.lock()
            .map(|c| match collection {
                Collection::Owners => c.owners.len(),
                Collection::Properties => c.properties.len(),
                Collection::PropertyImages => c.images.len(),
                Collection::PropertyTraces => c.traces.len(),
            })
            .unwrap_or(0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Collections>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn bulk_insert(&self, batch: RecordBatch) -> Result<u64> {
        let written = batch.len() as u64;
        let mut c = self.lock()?;
        match batch {
            RecordBatch::Owners(r) => c.owners.extend(r),
            RecordBatch::Properties(r) => c.properties.extend(r),
            RecordBatch::PropertyImages(r) => c.images.extend(r),
            RecordBatch::PropertyTraces(r) => c.traces.extend(r),
        }
        Ok(written)
    }

    async fn delete_all(&self, collection: Collection) -> Result<u64> {
        let mut c = self.lock()?;
        let removed = match collection {
            Collection::Owners => std::mem::take(&mut c.owners).len(),
            Collection::Properties => std::mem::take(&mut c.properties).len(),
            Collection::PropertyImages => std::mem::take(&mut c.images).len(),
            Collection::PropertyTraces => std::mem::take(&mut c.traces).len(),
        };
        Ok(removed as u64)
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}
