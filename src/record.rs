//! Weather records as stored in the old and the new database format.

use metfor::{Celsius, Quantity};

use crate::{
    errors::WxDataErr,
    weather::{dewpoint, Beaufort},
};

/// Storage units of rain per tick of the rain gauge.
pub const RAIN_UNITS_PER_TICK: i64 = 295;

/// One observation in the old database format.
#[derive(Clone, Debug, PartialEq)]
pub struct OldRecord {
    /// Unix time in seconds.
    pub timestamp: i64,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Cumulative tick count of the rain gauge.
    pub rain_gauge: i64,
    /// Set by the station while it rains, not carried over.
    pub is_rain: bool,
    /// Wind speed in km/h.
    pub wind_speed: f64,
}

impl OldRecord {
    pub(crate) fn from_row(row: &rusqlite::Row) -> Result<OldRecord, rusqlite::Error> {
        Ok(OldRecord {
            timestamp: row.get(0)?,
            temperature: row.get(1)?,
            humidity: row.get(2)?,
            rain_gauge: row.get(3)?,
            // Not carried over, so a NULL or garbage flag must not stop a conversion.
            is_rain: row
                .get::<_, Option<bool>>(4)
                .ok()
                .flatten()
                .unwrap_or(false),
            wind_speed: row.get(5)?,
        })
    }
}

/// One observation in the new database format, all values in fixed point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewRecord {
    /// Unix time in seconds.
    pub timestamp: i64,
    /// 1/100 degrees Celsius.
    pub temp_centi: i64,
    /// 1/100 percent.
    pub humid_centi: i64,
    /// 1/100 degrees Celsius.
    pub dewpoint_centi: i64,
    /// 1/100 km/h.
    pub wind_centi_kmh: i64,
    /// Beaufort force, 0 to 12.
    pub wind_bft: u8,
    /// Rain since the previous record in storage units.
    pub rain_delta_units: i64,
}

impl NewRecord {
    /// Re-encode an old record, `rain_delta_ticks` is the gauge difference to the previous one.
    ///
    /// The `is_rain` flag of the old format has no counterpart and is dropped.
    pub fn from_old(old: &OldRecord, rain_delta_ticks: i64) -> Result<NewRecord, WxDataErr> {
        let timestamp = old.timestamp;

        let temperature = check_finite(timestamp, "temperature", old.temperature)?;
        let humidity = check_finite(timestamp, "humidity", old.humidity)?;
        let wind_speed = check_finite(timestamp, "wind speed", old.wind_speed)?;

        if humidity <= 0.0 {
            return Err(WxDataErr::InvalidHumidity {
                timestamp,
                humidity,
            });
        }

        let dp = dewpoint(Celsius(temperature), humidity).unpack();
        let dp = check_finite(timestamp, "dew point", dp)?;

        Ok(NewRecord {
            timestamp,
            temp_centi: to_centi(temperature),
            humid_centi: to_centi(humidity),
            dewpoint_centi: to_centi(dp),
            wind_centi_kmh: to_centi(wind_speed),
            wind_bft: Beaufort::from_kmh(wind_speed).force(),
            rain_delta_units: rain_delta_ticks * RAIN_UNITS_PER_TICK,
        })
    }

    pub(crate) fn from_row(row: &rusqlite::Row) -> Result<NewRecord, rusqlite::Error> {
        Ok(NewRecord {
            timestamp: row.get(0)?,
            temp_centi: row.get(1)?,
            humid_centi: row.get(2)?,
            dewpoint_centi: row.get(3)?,
            wind_centi_kmh: row.get(4)?,
            wind_bft: row.get(5)?,
            rain_delta_units: row.get(6)?,
        })
    }
}

#[inline]
fn to_centi(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

#[inline]
fn check_finite(timestamp: i64, field: &'static str, value: f64) -> Result<f64, WxDataErr> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(WxDataErr::NonFiniteValue { timestamp, field })
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
