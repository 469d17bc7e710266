//! Derived weather quantities computed from the raw station readings.

use metfor::{Celsius, Quantity};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

/// Calculate the dew point with the Magnus formula.
///
/// `humidity` is the relative humidity in percent. The result is not finite for humidities at or
/// below zero, callers that read untrusted data should check for that first.
pub fn dewpoint(temperature: Celsius, humidity: f64) -> Celsius {
    let temp = temperature.unpack();
    let log_rh = (humidity / 100.0).ln();

    let numerator = 241.2 * log_rh + (4222.03716 * temp) / (241.2 + temp);
    let denominator = 17.5043 - log_rh - (17.5043 * temp) / (241.2 + temp);

    Celsius(numerator / denominator)
}

/// Fixed point version of `dewpoint`, everything in hundredths.
///
/// Returns `None` if the dew point is not defined for the input.
pub fn dewpoint_centi(temp_centi: i64, humid_centi: i64) -> Option<i64> {
    let dp = dewpoint(Celsius(temp_centi as f64 / 100.0), humid_centi as f64 / 100.0).unpack();

    if dp.is_finite() {
        Some((dp * 100.0).round() as i64)
    } else {
        None
    }
}

/// Wind force on the Beaufort scale.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, EnumIter, IntoStaticStr)]
pub enum Beaufort {
    /// Force 0
    #[strum(serialize = "calm")]
    Calm = 0,
    /// Force 1
    #[strum(serialize = "light air")]
    LightAir,
    /// Force 2
    #[strum(serialize = "light breeze")]
    LightBreeze,
    /// Force 3
    #[strum(serialize = "gentle breeze")]
    GentleBreeze,
    /// Force 4
    #[strum(serialize = "moderate breeze")]
    ModerateBreeze,
    /// Force 5
    #[strum(serialize = "fresh breeze")]
    FreshBreeze,
    /// Force 6
    #[strum(serialize = "strong breeze")]
    StrongBreeze,
    /// Force 7
    #[strum(serialize = "near gale")]
    NearGale,
    /// Force 8
    #[strum(serialize = "gale")]
    Gale,
    /// Force 9
    #[strum(serialize = "strong gale")]
    StrongGale,
    /// Force 10
    #[strum(serialize = "storm")]
    Storm,
    /// Force 11
    #[strum(serialize = "violent storm")]
    ViolentStorm,
    /// Force 12
    #[strum(serialize = "hurricane")]
    Hurricane,
}

// Highest whole km/h value belonging to forces 0 through 11, anything above is force 12.
const UPPER_BOUNDS_KMH: [i64; 12] = [0, 5, 11, 19, 28, 38, 49, 61, 74, 88, 102, 117];

impl Beaufort {
    /// Classify a wind speed in km/h. The speed is rounded to a whole km/h first.
    ///
    /// A NaN speed is classified as calm.
    pub fn from_kmh(kmh: f64) -> Self {
        if kmh.is_nan() {
            return Beaufort::Calm;
        }

        let kmh = kmh.round();

        Beaufort::iter()
            .zip(UPPER_BOUNDS_KMH.iter())
            .find(|&(_, &upper)| kmh <= upper as f64)
            .map(|(force, _)| force)
            .unwrap_or(Beaufort::Hurricane)
    }

    /// Classify a wind speed given in 1/100 km/h.
    pub fn from_centi_kmh(centi_kmh: i64) -> Self {
        Self::from_kmh(centi_kmh as f64 / 100.0)
    }

    /// The force as a number between 0 and 12.
    pub fn force(self) -> u8 {
        self as u8
    }

    /// The highest rounded wind speed in km/h with this force, `None` for hurricanes.
    pub fn upper_bound_kmh(self) -> Option<i64> {
        UPPER_BOUNDS_KMH.get(self as usize).copied()
    }
}

impl fmt::Display for Beaufort {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name: &'static str = (*self).into();
        write!(f, "{} Bft ({})", self.force(), name)
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_dewpoint() {
        let dp = dewpoint(Celsius(20.0), 50.0).unpack();
        assert!((dp - 9.27).abs() < 0.05, "dew point was {}", dp);

        // Saturated air
        let dp = dewpoint(Celsius(0.0), 100.0).unpack();
        assert!(dp.abs() < 1.0e-9);

        let dp = dewpoint(Celsius(-10.0), 80.0).unpack();
        assert!((dp - -12.79).abs() < 0.01, "dew point was {}", dp);
    }

    #[test]
    fn test_dewpoint_undefined() {
        assert!(!dewpoint(Celsius(20.0), 0.0).unpack().is_finite());
        assert!(!dewpoint(Celsius(20.0), -5.0).unpack().is_finite());
    }

    #[test]
    fn test_dewpoint_centi() {
        assert_eq!(dewpoint_centi(2000, 5000), Some(926));
        assert_eq!(dewpoint_centi(2100, 5500), Some(1161));
        assert_eq!(dewpoint_centi(2000, 0), None);
    }

    #[test]
    fn test_beaufort_rounding_boundaries() {
        let forces: Vec<u8> = [5.0, 5.4, 5.5, 11.0, 11.9]
            .iter()
            .map(|&kmh| Beaufort::from_kmh(kmh).force())
            .collect();

        assert_eq!(forces, vec![1, 1, 2, 2, 2]);
    }

    #[test]
    fn test_beaufort_table() {
        assert_eq!(Beaufort::from_kmh(0.0), Beaufort::Calm);
        assert_eq!(Beaufort::from_kmh(0.49), Beaufort::Calm);
        assert_eq!(Beaufort::from_kmh(-3.0), Beaufort::Calm);
        assert_eq!(Beaufort::from_kmh(1.0), Beaufort::LightAir);
        assert_eq!(Beaufort::from_kmh(15.0), Beaufort::GentleBreeze);
        assert_eq!(Beaufort::from_kmh(40.0), Beaufort::StrongBreeze);
        assert_eq!(Beaufort::from_kmh(117.0), Beaufort::ViolentStorm);
        assert_eq!(Beaufort::from_kmh(117.6), Beaufort::Hurricane);
        assert_eq!(Beaufort::from_kmh(250.0), Beaufort::Hurricane);

        for force in Beaufort::iter().filter(|&f| f != Beaufort::Hurricane) {
            let upper = force.upper_bound_kmh().expect("missing upper bound") as f64;
            assert_eq!(Beaufort::from_kmh(upper), force);
            assert_eq!(Beaufort::from_kmh(upper + 1.0).force(), force.force() + 1);
        }
        assert_eq!(Beaufort::Hurricane.upper_bound_kmh(), None);
    }

    #[test]
    fn test_beaufort_not_finite() {
        assert_eq!(Beaufort::from_kmh(f64::NAN), Beaufort::Calm);
        assert_eq!(Beaufort::from_kmh(f64::INFINITY), Beaufort::Hurricane);
        assert_eq!(Beaufort::from_kmh(f64::NEG_INFINITY), Beaufort::Calm);
    }

    #[test]
    fn test_beaufort_centi() {
        assert_eq!(Beaufort::from_centi_kmh(549), Beaufort::LightAir);
        assert_eq!(Beaufort::from_centi_kmh(550), Beaufort::LightBreeze);
        assert_eq!(Beaufort::from_centi_kmh(4000), Beaufort::StrongBreeze);
    }

    #[test]
    fn test_beaufort_display() {
        assert_eq!(Beaufort::Calm.to_string(), "0 Bft (calm)");
        assert_eq!(Beaufort::NearGale.to_string(), "7 Bft (near gale)");
    }
}
