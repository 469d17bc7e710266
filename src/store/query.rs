use super::{NewStore, OldStore};

use crate::{errors::WxDataErr, record::NewRecord};

/// Key in the misc table holding the last raw rain gauge reading.
pub(crate) const LAST_RAIN_KEY: &str = "last_rain";

/// Value stored under `LAST_RAIN_KEY` when no gauge reading was seen.
pub(crate) const UNSET_RAIN_GAUGE: i64 = -1;

impl OldStore {
    /// The number of records in the weather table.
    pub fn num_records(&self) -> Result<i64, WxDataErr> {
        let num_records: i64 =
            self.db_conn
                .query_row("SELECT COUNT(*) FROM weatherdata", rusqlite::NO_PARAMS, |row| {
                    row.get(0)
                })?;

        Ok(num_records)
    }

    /// Statement selecting every record, oldest first, in the column order `OldRecord` expects.
    pub(crate) fn records_stmt(&self) -> Result<rusqlite::Statement<'_>, WxDataErr> {
        let stmt = self.db_conn.prepare(
            "
                SELECT   timestamp, temp, humid, rain_gauge, is_rain, wind
                FROM     weatherdata
                ORDER BY timestamp
            ",
        )?;

        Ok(stmt)
    }
}

impl NewStore {
    /// The number of records in the weather table.
    pub fn num_records(&self) -> Result<i64, WxDataErr> {
        let num_records: i64 =
            self.db_conn
                .query_row("SELECT COUNT(*) FROM weatherdata", rusqlite::NO_PARAMS, |row| {
                    row.get(0)
                })?;

        Ok(num_records)
    }

    /// Retrieve all weather records, oldest first.
    pub fn weather_records(&self) -> Result<Vec<NewRecord>, WxDataErr> {
        let mut stmt = self.db_conn.prepare(
            "
                SELECT   timestamp, temp_centi, humid_centi, dewpoint_centi,
                         wind_centi_kmh, wind_bft, rain_delta_units
                FROM     weatherdata
                ORDER BY timestamp
            ",
        )?;

        let vals: Result<Vec<NewRecord>, WxDataErr> = stmt
            .query_map(rusqlite::NO_PARAMS, NewRecord::from_row)?
            .map(|res| res.map_err(WxDataErr::Database))
            .collect();

        vals
    }

    /// The raw rain gauge reading the next delta has to start from.
    ///
    /// Returns `None` if there is no entry or if it holds the "no reading" marker.
    pub fn last_rain(&self) -> Result<Option<i64>, WxDataErr> {
        use rusqlite::{types::Value, OptionalExtension};

        let value: Option<Value> = self
            .db_conn
            .query_row(
                "SELECT value FROM misc WHERE key = ?1",
                &[LAST_RAIN_KEY],
                |row| row.get(0),
            )
            .optional()?;

        // Older databases declare the value column as text.
        let gauge = match value {
            None | Some(Value::Null) => None,
            Some(Value::Integer(val)) => Some(val),
            Some(Value::Real(val)) => Some(val.round() as i64),
            Some(Value::Text(val)) => Some(val.trim().parse::<i64>().map_err(|_| {
                WxDataErr::InvalidSchema {
                    table: "misc",
                    reason: format!("{} is not an integer: '{}'", LAST_RAIN_KEY, val),
                }
            })?),
            Some(Value::Blob(_)) => {
                return Err(WxDataErr::InvalidSchema {
                    table: "misc",
                    reason: format!("{} is a blob", LAST_RAIN_KEY),
                })
            }
        };

        Ok(gauge.filter(|&val| val != UNSET_RAIN_GAUGE))
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;
    use crate::store::unit::*; // test helpers.

    #[test]
    fn test_num_records() {
        let TestStores {
            tmp: _tmp,
            old_path,
            new_path,
        } = create_test_stores().expect("Failed to create test stores.");

        fill_old_store(&old_path, &example_records()).expect("Error filling old store.");

        let old = OldStore::open(&old_path).expect("Error opening old store.");
        let new = NewStore::open(&new_path).expect("Error opening new store.");

        assert_eq!(old.num_records().expect("db error"), 2);
        assert_eq!(new.num_records().expect("db error"), 0);
        assert!(new.weather_records().expect("db error").is_empty());
    }

    #[test]
    fn test_last_rain_formats() {
        let TestStores {
            tmp: _tmp,
            new_path,
            ..
        } = create_test_stores().expect("Failed to create test stores.");

        let new = NewStore::open(&new_path).expect("Error opening new store.");
        assert_eq!(new.last_rain().expect("db error"), None);

        let cases: &[(&str, Option<i64>)] = &[
            ("INSERT OR REPLACE INTO misc VALUES ('last_rain', 42)", Some(42)),
            ("INSERT OR REPLACE INTO misc VALUES ('last_rain', '17')", Some(17)),
            ("INSERT OR REPLACE INTO misc VALUES ('last_rain', -1)", None),
            ("INSERT OR REPLACE INTO misc VALUES ('last_rain', NULL)", None),
        ];

        for (sql, expected) in cases {
            new.db_conn
                .execute(sql, rusqlite::NO_PARAMS)
                .expect("Error writing misc entry.");
            assert_eq!(new.last_rain().expect("db error"), *expected, "{}", sql);
        }

        new.db_conn
            .execute(
                "INSERT OR REPLACE INTO misc VALUES ('last_rain', 'lots')",
                rusqlite::NO_PARAMS,
            )
            .expect("Error writing misc entry.");
        assert!(new.last_rain().is_err());
    }
}
