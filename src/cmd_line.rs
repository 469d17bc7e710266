//! Command line options of the applications.

use std::path::{Path, PathBuf};

use clap::{App, AppSettings, Arg, ArgMatches};
use metfor::{Celsius, HectoPascal, Meters};

use crate::errors::WxDataErr;

/// Struct to package up the converter's command line arguments.
#[derive(Clone, Debug)]
pub struct ConvertCmdLineArgs {
    // Database in the new format, written to.
    new_db: PathBuf,
    // Database in the old format, read from.
    old_db: PathBuf,
    // Log every record.
    verbose: bool,
}

impl<'a, 'b> ConvertCmdLineArgs {
    /// Create the application with the converter's arguments.
    pub fn new_app(app_name: &'static str, about: &'static str) -> App<'a, 'b> {
        App::new(app_name)
            .about(about)
            .version(clap::crate_version!())
            .arg(
                Arg::with_name("new-db")
                    .index(1)
                    .required(true)
                    .value_name("NEW_DB")
                    .help("The database to write, in the new format.")
                    .long_help(concat!(
                        "The database to write, in the new format. It must already exist, ",
                        "all weather data in it is replaced."
                    )),
            )
            .arg(
                Arg::with_name("old-db")
                    .index(2)
                    .required(true)
                    .value_name("OLD_DB")
                    .help("The database to read, in the old format."),
            )
            .arg(
                Arg::with_name("verbose")
                    .short("v")
                    .long("verbose")
                    .help("Log every converted record."),
            )
            .after_help(concat!(
                "The target comes first. After the conversion the metadata of the new ",
                "database must be regenerated by the station logger."
            ))
    }

    /// Process an `App` to get the parsed values out of it and the matches object so an
    /// application can continue with further argument parsing.
    ///
    /// Exits the process with a usage message if the arguments are wrong.
    pub fn matches(app: App<'a, 'b>) -> Result<(Self, ArgMatches<'a>), WxDataErr> {
        let matches = app.get_matches();
        let args = Self::from_matches(&matches)?;

        Ok((args, matches))
    }

    /// Extract the arguments from already parsed matches.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, WxDataErr> {
        let new_db = matches
            .value_of("new-db")
            .map(PathBuf::from)
            .ok_or(WxDataErr::LogicError("required argument NEW_DB missing"))?;

        let old_db = matches
            .value_of("old-db")
            .map(PathBuf::from)
            .ok_or(WxDataErr::LogicError("required argument OLD_DB missing"))?;

        Ok(ConvertCmdLineArgs {
            new_db,
            old_db,
            verbose: matches.is_present("verbose"),
        })
    }

    /// Get the path of the database to write.
    pub fn new_db(&self) -> &Path {
        &self.new_db
    }

    /// Get the path of the database to read.
    pub fn old_db(&self) -> &Path {
        &self.old_db
    }

    /// Whether every record should be logged.
    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

/// Struct to package up the pressure calculator's command line arguments.
#[derive(Clone, Copy, Debug)]
pub struct PressureCmdLineArgs {
    height: Meters,
    pressure: HectoPascal,
    temperature: Option<Celsius>,
}

impl<'a, 'b> PressureCmdLineArgs {
    /// Create the application with the pressure calculator's arguments.
    pub fn new_app(app_name: &'static str, about: &'static str) -> App<'a, 'b> {
        App::new(app_name)
            .about(about)
            .version(clap::crate_version!())
            .setting(AppSettings::AllowNegativeNumbers)
            .arg(
                Arg::with_name("height")
                    .index(1)
                    .required(true)
                    .value_name("HEIGHT")
                    .help("Height of the sensor above sea level in m."),
            )
            .arg(
                Arg::with_name("pressure")
                    .index(2)
                    .required(true)
                    .value_name("PRESSURE")
                    .help("Pressure measured by the sensor in hPa."),
            )
            .arg(
                Arg::with_name("temperature")
                    .short("t")
                    .long("temperature")
                    .takes_value(true)
                    .allow_hyphen_values(true)
                    .help("Station temperature in C.")
                    .long_help(concat!(
                        "Station temperature in C. If given, the reduction to sea level ",
                        "accounts for the temperature of the air column."
                    )),
            )
    }

    /// Process an `App` to get the parsed values out of it.
    ///
    /// Exits the process with a usage message if the arguments are wrong.
    pub fn matches(app: App<'a, 'b>) -> Result<(Self, ArgMatches<'a>), WxDataErr> {
        let matches = app.get_matches();
        let args = Self::from_matches(&matches)?;

        Ok((args, matches))
    }

    /// Extract the arguments from already parsed matches.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, WxDataErr> {
        let height = parse_number(matches, "height")?
            .map(Meters)
            .ok_or(WxDataErr::LogicError("required argument HEIGHT missing"))?;

        let pressure = parse_number(matches, "pressure")?
            .map(HectoPascal)
            .ok_or(WxDataErr::LogicError("required argument PRESSURE missing"))?;

        let temperature = parse_number(matches, "temperature")?.map(Celsius);

        Ok(PressureCmdLineArgs {
            height,
            pressure,
            temperature,
        })
    }

    /// Get the height of the sensor.
    pub fn height(&self) -> Meters {
        self.height
    }

    /// Get the measured pressure.
    pub fn pressure(&self) -> HectoPascal {
        self.pressure
    }

    /// Get the station temperature, if one was given.
    pub fn temperature(&self) -> Option<Celsius> {
        self.temperature
    }
}

fn parse_number(matches: &ArgMatches, name: &str) -> Result<Option<f64>, WxDataErr> {
    matches
        .value_of(name)
        .map(|val| {
            val.trim().parse::<f64>().map_err(|_| {
                WxDataErr::InvalidArgument(format!("{} '{}' is not a number", name, val))
            })
        })
        .transpose()
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
