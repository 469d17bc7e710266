use super::{
    query::{LAST_RAIN_KEY, UNSET_RAIN_GAUGE},
    NewStore,
};

use crate::{errors::WxDataErr, record::NewRecord};

/// Replaces the content of a new format store inside a single transaction.
///
/// Nothing is visible to other connections until `commit` succeeds. Dropping the writer without
/// committing rolls every change back.
pub struct WeatherDataWriter<'conn> {
    tx: rusqlite::Transaction<'conn>,
    inserted: usize,
}

impl NewStore {
    /// Start replacing the weather data.
    pub fn begin_replace(&mut self) -> Result<WeatherDataWriter<'_>, WxDataErr> {
        let tx = self.db_conn.transaction()?;

        Ok(WeatherDataWriter { tx, inserted: 0 })
    }
}

impl<'conn> WeatherDataWriter<'conn> {
    /// Delete all weather records, returns how many there were.
    pub fn clear(&mut self) -> Result<usize, WxDataErr> {
        let deleted = self
            .tx
            .execute("DELETE FROM weatherdata", rusqlite::NO_PARAMS)?;

        Ok(deleted)
    }

    /// Add a record.
    pub fn insert(&mut self, record: &NewRecord) -> Result<(), WxDataErr> {
        let mut stmt = self.tx.prepare_cached(
            "
                INSERT INTO weatherdata (
                    timestamp,
                    temp_centi,
                    humid_centi,
                    dewpoint_centi,
                    wind_centi_kmh,
                    wind_bft,
                    rain_delta_units
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )?;

        stmt.execute(rusqlite::params![
            record.timestamp,
            record.temp_centi,
            record.humid_centi,
            record.dewpoint_centi,
            record.wind_centi_kmh,
            record.wind_bft,
            record.rain_delta_units
        ])?;

        self.inserted += 1;

        Ok(())
    }

    /// Store the last raw rain gauge reading so the live logger can continue the deltas.
    pub fn set_last_rain(&mut self, rain_gauge: Option<i64>) -> Result<(), WxDataErr> {
        self.tx.execute(
            "INSERT OR REPLACE INTO misc (key, value) VALUES (?1, ?2)",
            &[
                &LAST_RAIN_KEY as &dyn rusqlite::types::ToSql,
                &rain_gauge.unwrap_or(UNSET_RAIN_GAUGE) as &dyn rusqlite::types::ToSql,
            ],
        )?;

        Ok(())
    }

    /// Number of records inserted so far.
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    /// Make all changes visible at once. Returns the number of records inserted.
    pub fn commit(self) -> Result<usize, WxDataErr> {
        let WeatherDataWriter { tx, inserted } = self;
        tx.commit()?;

        Ok(inserted)
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
