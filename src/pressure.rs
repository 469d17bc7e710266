//! Reduce the station (absolute) pressure to sea level.

use metfor::{Celsius, HectoPascal, Meters, Quantity};

use crate::errors::WxDataErr;

// Constants of the barometric formula from the BMP085 data sheet.
const BMP085_MODEL_TOP_M: f64 = 44330.0;
const BMP085_EXPONENT: f64 = 5.255;

// Standard atmosphere lapse rate and exponent for the temperature compensated reduction.
const LAPSE_RATE_K_PER_M: f64 = 0.0065;
const HYPSOMETRIC_EXPONENT: f64 = 5.257;

/// Reduce the pressure measured at `height` above sea level with the simplified formula from the
/// BMP085 data sheet, `p / (1 - h / 44330)^5.255`.
pub fn sea_level_pressure(
    height: Meters,
    station_pressure: HectoPascal,
) -> Result<HectoPascal, WxDataErr> {
    let height = check_height(height)?;

    let factor = (1.0 - height / BMP085_MODEL_TOP_M).powf(BMP085_EXPONENT);

    Ok(HectoPascal(station_pressure.unpack() / factor))
}

/// Reduce the pressure measured at `height` above sea level taking the current station
/// temperature into account.
pub fn sea_level_pressure_temperature_compensated(
    height: Meters,
    station_pressure: HectoPascal,
    temperature: Celsius,
) -> Result<HectoPascal, WxDataErr> {
    let height = check_height(height)?;
    let temperature = temperature.unpack();

    let lapse = LAPSE_RATE_K_PER_M * height;
    let ratio = 1.0 - lapse / (temperature + lapse + 273.15);

    let reduced = station_pressure.unpack() * ratio.powf(-HYPSOMETRIC_EXPONENT);
    if !reduced.is_finite() {
        return Err(WxDataErr::InvalidArgument(format!(
            "temperature {} C gives no sea level pressure",
            temperature
        )));
    }

    Ok(HectoPascal(reduced))
}

/// Fixed point version of `sea_level_pressure` for pressures in 1/100 hPa.
///
/// A height of 0 m returns the reading unchanged.
pub fn sea_level_pressure_centi(height_m: i32, pressure_centi: i32) -> Result<i32, WxDataErr> {
    if height_m == 0 {
        return Ok(pressure_centi);
    }

    let reduced = sea_level_pressure(
        Meters(f64::from(height_m)),
        HectoPascal(f64::from(pressure_centi) / 100.0),
    )?;

    Ok((reduced.unpack() * 100.0).round() as i32)
}

fn check_height(height: Meters) -> Result<f64, WxDataErr> {
    let height = height.unpack();

    if !height.is_finite() || height >= BMP085_MODEL_TOP_M {
        return Err(WxDataErr::HeightOutOfRange(height));
    }

    Ok(height)
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
