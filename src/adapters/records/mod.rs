//! Build record persistence adapters.

mod in_memory;
mod postgres;

pub use in_memory::InMemoryBuildRecordStore;
pub use postgres::PostgresBuildRecordStore;
