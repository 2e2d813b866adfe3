use crate::domain::ItemKey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("no system name matching prefix '{0}'")]
    SystemNameNotFound(String),

    #[error("item not found: {0}")]
    ItemNotFound(ItemKey),

    #[error("no {table} row with id {pk}")]
    RowNotFound { table: &'static str, pk: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
