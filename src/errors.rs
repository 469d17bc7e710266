//! Module for errors.
use std::{error::Error, fmt::Display};

/// Error from the station data tools.
#[derive(Debug)]
pub enum WxDataErr {
    // Inherited errors from std
    /// Error forwarded from std
    IO(::std::io::Error),

    // Other forwarded errors
    /// Database error
    Database(::rusqlite::Error),

    // My own errors from this crate
    /// The database structure is wrong.
    InvalidSchema {
        /// The table that failed the check.
        table: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// A humidity reading the dew point formula cannot handle.
    InvalidHumidity {
        /// Timestamp of the offending record.
        timestamp: i64,
        /// The humidity in percent.
        humidity: f64,
    },
    /// An input or computed value was NaN or infinite.
    NonFiniteValue {
        /// Timestamp of the offending record.
        timestamp: i64,
        /// Name of the field.
        field: &'static str,
    },
    /// Height is at or above the top of the pressure reduction model.
    HeightOutOfRange(f64),
    /// A command line value could not be used.
    InvalidArgument(String),
    /// There was an internal logic error.
    LogicError(&'static str),
}

impl Display for WxDataErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        use crate::errors::WxDataErr::*;

        match self {
            IO(err) => write!(f, "std lib io error: {}", err),

            Database(err) => write!(f, "database error: {}", err),

            InvalidSchema { table, reason } => {
                write!(f, "invalid schema for table '{}': {}", table, reason)
            }
            InvalidHumidity {
                timestamp,
                humidity,
            } => write!(
                f,
                "humidity of {}% at timestamp {} has no dew point",
                humidity, timestamp
            ),
            NonFiniteValue { timestamp, field } => {
                write!(f, "non-finite {} at timestamp {}", field, timestamp)
            }
            HeightOutOfRange(height) => write!(f, "height out of range: {} m", height),
            InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            LogicError(msg) => write!(f, "internal logic error: {}", msg),
        }
    }
}

impl Error for WxDataErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WxDataErr::IO(err) => Some(err),
            WxDataErr::Database(err) => Some(err),
            _ => None,
        }
    }
}

impl From<::std::io::Error> for WxDataErr {
    fn from(err: ::std::io::Error) -> WxDataErr {
        WxDataErr::IO(err)
    }
}

impl From<::rusqlite::Error> for WxDataErr {
    fn from(err: ::rusqlite::Error) -> WxDataErr {
        WxDataErr::Database(err)
    }
}
