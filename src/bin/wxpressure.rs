//! Sea Level Pressure Calculator.
//!
//! Reduces the pressure measured by the station's sensor to sea level.

use std::error::Error;

use metfor::Quantity;
use wxstation_data::{logger, pressure, PressureCmdLineArgs, WxDataErr};

fn main() {
    if let Err(ref e) = run() {
        println!("error: {}", e);

        let mut err: &dyn Error = e;

        while let Some(cause) = err.source() {
            println!("caused by: {}", cause);
            err = cause;
        }

        ::std::process::exit(1);
    }
}

fn run() -> Result<(), WxDataErr> {
    let app = PressureCmdLineArgs::new_app(
        "wxpressure",
        "Reduce a station pressure reading to sea level.",
    );

    let (args, _matches) = PressureCmdLineArgs::matches(app)?;

    logger::init(false);

    let relative = match args.temperature() {
        Some(temperature) => pressure::sea_level_pressure_temperature_compensated(
            args.height(),
            args.pressure(),
            temperature,
        )?,
        None => pressure::sea_level_pressure(args.height(), args.pressure())?,
    };

    log::debug!(
        "{} hPa at {} m reduced to {} hPa",
        args.pressure().unpack(),
        args.height().unpack(),
        relative.unpack()
    );

    println!("Relative pressure: {:.6} hPa", relative.unpack());

    Ok(())
}
