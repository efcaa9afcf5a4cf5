//! Property Store
//!
//! SQLite persistence for owners, properties, images and sale traces.

pub mod db;
pub mod error;
pub mod owners;
pub mod properties;
pub mod record_store;
pub mod traces;

mod rows;

pub use db::PropertyDb;
pub use error::{StoreError, StoreResult};
pub use owners::OwnerRepository;
pub use properties::PropertyRepository;
pub use traces::TraceRepository;
