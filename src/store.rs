//! The weather databases read from and written to by the converter.

use std::path::PathBuf;

pub use self::modify::WeatherDataWriter;

/// A database in the old, view based format. Only ever read.
#[derive(Debug)]
pub struct OldStore {
    path: PathBuf,                 // Location on disk.
    db_conn: rusqlite::Connection, // An sqlite connection.
}

/// A database in the new format with pre-computed, fixed point values.
#[derive(Debug)]
pub struct NewStore {
    path: PathBuf,                 // Location on disk.
    db_conn: rusqlite::Connection, // An sqlite connection.
}

mod modify;
mod query;
mod root;
