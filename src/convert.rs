//! Convert an old format database into the new format.

use chrono::NaiveDateTime;
use log::{debug, info};
use std::{fmt, path::Path};

use crate::{
    errors::WxDataErr,
    record::{NewRecord, OldRecord},
    store::{NewStore, OldStore},
};

/// Summary of a finished conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvertSummary {
    /// Number of records written to the new store.
    pub rows: usize,
    /// Time of the oldest record.
    pub first: Option<NaiveDateTime>,
    /// Time of the newest record.
    pub last: Option<NaiveDateTime>,
    /// The raw rain gauge reading stored for the live logger.
    pub last_rain: Option<i64>,
}

impl fmt::Display for ConvertSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.first, self.last) {
            (Some(first), Some(last)) => write!(
                f,
                "converted {} records from {} to {}",
                self.rows, first, last
            )?,
            _ => write!(f, "converted {} records", self.rows)?,
        }

        match self.last_rain {
            Some(gauge) => write!(f, ", last rain gauge reading {}", gauge),
            None => write!(f, ", no rain gauge reading"),
        }
    }
}

/// Iterator adapter turning old records into new ones.
///
/// The rain amount of the new format is the difference to the previous gauge reading, so the
/// first record of a sequence always has no rain. Errors from the source are passed through.
#[derive(Debug)]
pub struct Converted<I> {
    records: I,
    last_gauge: Option<i64>,
}

impl<I> Converted<I>
where
    I: Iterator<Item = Result<OldRecord, WxDataErr>>,
{
    /// Wrap an iterator of old records, which must be ordered by time.
    pub fn new(records: I) -> Self {
        Converted {
            records,
            last_gauge: None,
        }
    }

    /// The raw rain gauge reading of the last record seen so far.
    pub fn last_gauge(&self) -> Option<i64> {
        self.last_gauge
    }
}

impl<I> Iterator for Converted<I>
where
    I: Iterator<Item = Result<OldRecord, WxDataErr>>,
{
    type Item = Result<NewRecord, WxDataErr>;

    fn next(&mut self) -> Option<Self::Item> {
        let old = match self.records.next()? {
            Ok(old) => old,
            Err(err) => return Some(Err(err)),
        };

        let previous = self.last_gauge.unwrap_or(old.rain_gauge);
        self.last_gauge = Some(old.rain_gauge);

        Some(NewRecord::from_old(&old, old.rain_gauge - previous))
    }
}

/// Replace the weather data of `new` with the converted records of `old`.
///
/// Everything, including emptying the table, happens in one transaction. On error the new store
/// is left as it was.
pub fn convert(old: &OldStore, new: &mut NewStore) -> Result<ConvertSummary, WxDataErr> {
    let new_path = new.path().display().to_string();

    let mut writer = new.begin_replace()?;
    let cleared = writer.clear()?;
    info!("Removed {} existing records from {}.", cleared, new_path);

    let mut stmt = old.records_stmt()?;
    let rows = stmt
        .query_map(rusqlite::NO_PARAMS, OldRecord::from_row)?
        .map(|res| res.map_err(WxDataErr::Database));
    let mut converted = Converted::new(rows);

    let mut first: Option<i64> = None;
    let mut last: Option<i64> = None;

    for record in converted.by_ref() {
        let record = record?;
        debug!("{:?}", record);

        first.get_or_insert(record.timestamp);
        last = Some(record.timestamp);

        writer.insert(&record)?;
    }

    let last_rain = converted.last_gauge();
    writer.set_last_rain(last_rain)?;

    let rows = writer.commit()?;
    info!("Committed {} records to {}.", rows, new_path);

    Ok(ConvertSummary {
        rows,
        first: first.and_then(|ts| NaiveDateTime::from_timestamp_opt(ts, 0)),
        last: last.and_then(|ts| NaiveDateTime::from_timestamp_opt(ts, 0)),
        last_rain,
    })
}

/// Open both databases and convert. Note the argument order, the target comes first.
pub fn convert_files(
    new_path: &dyn AsRef<Path>,
    old_path: &dyn AsRef<Path>,
) -> Result<ConvertSummary, WxDataErr> {
    let mut new = NewStore::open(new_path)?;
    let old = OldStore::open(old_path)?;

    info!(
        "Converting {} records from {} into {}.",
        old.num_records()?,
        old.path().display(),
        new.path().display()
    );

    convert(&old, &mut new)
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
