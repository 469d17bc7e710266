#![deny(missing_docs)]
//! Package to migrate and post-process the database of a home weather station.

//
// Public API
//
pub use cmd_line::{ConvertCmdLineArgs, PressureCmdLineArgs};
pub use convert::{convert, convert_files, ConvertSummary, Converted};
pub use errors::WxDataErr;
pub use record::{NewRecord, OldRecord, RAIN_UNITS_PER_TICK};
pub use store::{NewStore, OldStore, WeatherDataWriter};
pub use weather::{dewpoint, dewpoint_centi, Beaufort};

pub mod logger;
pub mod pressure;

//
// Implementation only
//
mod cmd_line;
mod convert;
mod errors;
mod record;
mod store;
mod weather;
