pub mod memory;
pub mod rows;
pub mod sqlite;
pub mod traits;

pub use memory::MemoryStore;
pub use rows::{CategoryRow, ConstellationRow, GroupRow, ItemRow, RegionRow, SystemRow};
pub use sqlite::SqliteStore;
pub use traits::StaticDataStore;
