//! Storage adapters for the core traits.

mod memory;

pub use memory::MemoryStore;

#[cfg(feature = "sqlite-store")]
mod sqlite;

#[cfg(feature = "sqlite-store")]
pub use sqlite::SqliteStore;
