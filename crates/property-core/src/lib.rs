//! Property Core
//!
//! Domain records for the property management backend, the Colombian
//! property-transfer tax policy, and synthetic sale-history generation.

pub mod memory;
pub mod models;
pub mod storage;
pub mod tax_policy;
pub mod trace_generator;

pub use memory::MemoryStore;
pub use models::{
    contains_ignore_case, Owner, OwnerInput, Property, PropertyFilter, PropertyImage,
    PropertyInput, PropertyListItem, PropertyTrace, TraceInput, ValidationError,
    MAX_TRACE_NAME_LEN,
};
pub use storage::{Collection, RecordBatch, RecordStore};
pub use tax_policy::{compute_tax, TaxBracket, TaxPolicy, UVT_2024};
pub use trace_generator::{TraceEntropy, TraceGenerationConfig, TraceGenerator};
