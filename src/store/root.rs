use std::path::Path;

use super::{NewStore, OldStore};

use crate::errors::WxDataErr;

/// Columns the old format must provide, in the order they are queried.
const OLD_WEATHER_COLUMNS: [&str; 6] = [
    "timestamp",
    "temp",
    "humid",
    "rain_gauge",
    "is_rain",
    "wind",
];

/// Columns of the new format, exactly these and in this order.
const NEW_WEATHER_COLUMNS: [&str; 7] = [
    "timestamp",
    "temp_centi",
    "humid_centi",
    "dewpoint_centi",
    "wind_centi_kmh",
    "wind_bft",
    "rain_delta_units",
];

const MISC_COLUMNS: [&str; 2] = ["key", "value"];

impl OldStore {
    /// Open an existing old format database. It is never written to.
    ///
    /// Timestamps must be stored as integer Unix seconds. Rows holding a text datetime fail the
    /// conversion with a database error, convert such files with `strftime('%s', timestamp)`
    /// first.
    pub fn open(path: &dyn AsRef<Path>) -> Result<Self, WxDataErr> {
        let path = path.as_ref().to_path_buf();

        let db_conn =
            rusqlite::Connection::open_with_flags(&path, rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY)?;

        let columns = table_columns(&db_conn, "weatherdata")?;
        require_columns("weatherdata", &columns, &OLD_WEATHER_COLUMNS)?;

        Ok(OldStore { path, db_conn })
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NewStore {
    /// Initialize the tables of a new format database, creating the file if needed.
    pub fn create(path: &dyn AsRef<Path>) -> Result<Self, WxDataErr> {
        let path = path.as_ref().to_path_buf();

        let db_conn = rusqlite::Connection::open_with_flags(
            &path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE | rusqlite::OpenFlags::SQLITE_OPEN_CREATE,
        )?;

        db_conn.execute_batch(include_str!("root/create_new_store.sql"))?;

        Self::validate_db_structure(&db_conn)?;

        Ok(NewStore { path, db_conn })
    }

    /// Open an existing new format database.
    pub fn open(path: &dyn AsRef<Path>) -> Result<Self, WxDataErr> {
        let path = path.as_ref().to_path_buf();

        let db_conn =
            rusqlite::Connection::open_with_flags(&path, rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE)?;

        Self::validate_db_structure(&db_conn)?;

        Ok(NewStore { path, db_conn })
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate the database structure is correct.
    ///
    /// Records are inserted by position, so the weather table must match column for column.
    fn validate_db_structure(db_conn: &rusqlite::Connection) -> Result<(), WxDataErr> {
        let columns = table_columns(db_conn, "weatherdata")?;

        if columns.len() != NEW_WEATHER_COLUMNS.len()
            || columns
                .iter()
                .zip(NEW_WEATHER_COLUMNS.iter())
                .any(|(found, expected)| !found.eq_ignore_ascii_case(expected))
        {
            return Err(WxDataErr::InvalidSchema {
                table: "weatherdata",
                reason: format!(
                    "expected columns ({}), found ({})",
                    NEW_WEATHER_COLUMNS.join(", "),
                    columns.join(", ")
                ),
            });
        }

        let columns = table_columns(db_conn, "misc")?;
        require_columns("misc", &columns, &MISC_COLUMNS)
    }
}

/// Names of the columns of `table` in declaration order, empty if there is no such table.
fn table_columns(
    db_conn: &rusqlite::Connection,
    table: &'static str,
) -> Result<Vec<String>, WxDataErr> {
    let mut stmt = db_conn.prepare(&format!("PRAGMA table_info({})", table))?;

    let columns: Result<Vec<String>, WxDataErr> = stmt
        .query_map(rusqlite::NO_PARAMS, |row| row.get::<_, String>(1))?
        .map(|res| res.map_err(WxDataErr::Database))
        .collect();

    columns
}

fn require_columns(
    table: &'static str,
    found: &[String],
    required: &[&str],
) -> Result<(), WxDataErr> {
    if found.is_empty() {
        return Err(WxDataErr::InvalidSchema {
            table,
            reason: "table does not exist".to_owned(),
        });
    }

    let missing: Vec<&str> = required
        .iter()
        .filter(|req| !found.iter().any(|col| col.eq_ignore_ascii_case(req)))
        .copied()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(WxDataErr::InvalidSchema {
            table,
            reason: format!("missing columns: {}", missing.join(", ")),
        })
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;
    use crate::store::unit::*; // test helpers.

    fn assert_invalid_schema(res: Result<impl std::fmt::Debug, WxDataErr>, expected_table: &str) {
        match res {
            Err(WxDataErr::InvalidSchema { table, .. }) => assert_eq!(table, expected_table),
            other => panic!("expected a schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_open_missing_files() {
        let TestStores { tmp, .. } = create_test_stores().expect("Failed to create test stores.");

        assert!(OldStore::open(&tmp.path().join("not_there.db")).is_err());
        assert!(NewStore::open(&tmp.path().join("not_there.db")).is_err());
        assert!(!tmp.path().join("not_there.db").exists());
    }

    #[test]
    fn test_get_path() {
        let TestStores {
            tmp: _tmp,
            old_path,
            new_path,
        } = create_test_stores().expect("Failed to create test stores.");

        assert_eq!(OldStore::open(&old_path).unwrap().path(), old_path.as_path());
        assert_eq!(NewStore::open(&new_path).unwrap().path(), new_path.as_path());
    }

    #[test]
    fn test_create_is_repeatable() {
        let TestStores {
            tmp: _tmp,
            new_path,
            ..
        } = create_test_stores().expect("Failed to create test stores.");

        assert!(NewStore::create(&new_path).is_ok());
    }

    #[test]
    fn test_old_store_missing_table() {
        let TestStores { tmp, .. } = create_test_stores().expect("Failed to create test stores.");
        let path = tmp.path().join("empty.db");
        rusqlite::Connection::open(&path)
            .and_then(|conn| conn.execute_batch("CREATE TABLE other (x INTEGER);"))
            .expect("Failed to create database.");

        assert_invalid_schema(OldStore::open(&path), "weatherdata");
    }

    #[test]
    fn test_old_store_missing_column() {
        let TestStores { tmp, .. } = create_test_stores().expect("Failed to create test stores.");
        let path = tmp.path().join("no_wind.db");
        rusqlite::Connection::open(&path)
            .and_then(|conn| {
                conn.execute_batch(
                    "CREATE TABLE weatherdata (timestamp, temp, humid, rain_gauge, is_rain);",
                )
            })
            .expect("Failed to create database.");

        match OldStore::open(&path) {
            Err(WxDataErr::InvalidSchema { reason, .. }) => assert!(reason.contains("wind")),
            other => panic!("expected a schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_store_wrong_column_order() {
        let TestStores { tmp, .. } = create_test_stores().expect("Failed to create test stores.");
        let path = tmp.path().join("swapped.db");
        rusqlite::Connection::open(&path)
            .and_then(|conn| {
                conn.execute_batch(
                    "
                        CREATE TABLE weatherdata (
                            timestamp, humid_centi, temp_centi, dewpoint_centi,
                            wind_centi_kmh, wind_bft, rain_delta_units
                        );
                        CREATE TABLE misc (key, value);
                    ",
                )
            })
            .expect("Failed to create database.");

        assert_invalid_schema(NewStore::open(&path), "weatherdata");
    }

    #[test]
    fn test_new_store_missing_misc() {
        let TestStores { tmp, .. } = create_test_stores().expect("Failed to create test stores.");
        let path = tmp.path().join("no_misc.db");
        rusqlite::Connection::open(&path)
            .and_then(|conn| {
                conn.execute_batch(
                    "
                        CREATE TABLE weatherdata (
                            timestamp, temp_centi, humid_centi, dewpoint_centi,
                            wind_centi_kmh, wind_bft, rain_delta_units
                        );
                    ",
                )
            })
            .expect("Failed to create database.");

        assert_invalid_schema(NewStore::open(&path), "misc");
    }
}
