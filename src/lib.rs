pub mod assembler;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod progress;
pub mod storage;

pub use assembler::Atlas;
pub use domain::*;
pub use error::{Error, Result};
pub use storage::{SqliteStore, StaticDataStore};
