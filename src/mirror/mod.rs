//! Batch cache of extracted dependency declarations
//!
//! # Modules
//!
//! - [`driver`]: Per-project pipeline, outcome classification and checkpoints
//! - [`record`]: `ExtractionRecord`, `OutcomeKind` and the cache map
//! - [`store`]: `CacheStorer` trait and the JSON file implementation
//! - [`error`]: Pipeline, store and driver errors

pub mod driver;
pub mod error;
pub mod record;
pub mod store;

pub use driver::{BatchDriver, BatchSummary};
pub use error::{DriverError, PipelineError, StoreError};
pub use record::{CacheMap, ExtractionRecord, OutcomeKind};
pub use store::{CacheStorer, JsonCacheFile};
