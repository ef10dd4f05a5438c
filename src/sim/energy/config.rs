use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ensure_positive};

/// Boundary conditions for a steady-state temperature profile.
///
/// Defaults follow the NFRC 100-2010 winter rating conditions. Every field
/// may be omitted when deserializing; missing fields take the default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConditions {
    /// Outdoor air temperature in °C.
    pub outside_temperature: f64,
    /// Indoor air temperature in °C.
    pub inside_temperature: f64,
    /// Outdoor wind speed in m/s. Drives the exterior film coefficient.
    pub wind_speed: f64,
    /// Surface height in m. Characteristic length of the interior film.
    pub height: f64,
    /// Tilt in degrees between 0 and 180.
    ///
    /// - 0: horizontal, outside boundary at the bottom
    /// - 90: vertical
    /// - 180: horizontal, outside boundary on top
    pub angle: f64,
    /// Air pressure in Pa.
    pub pressure: f64,
}

impl ProfileConditions {
    pub fn new() -> Self {
        Self {
            outside_temperature: -18.0,
            inside_temperature: 21.0,
            wind_speed: 6.7,
            height: 1.0,
            angle: 90.0,
            pressure: 101325.0,
        }
    }

    /// Conditions with the given air temperatures and default environment.
    pub fn with_temperatures(outside_temperature: f64, inside_temperature: f64) -> Self {
        Self {
            outside_temperature,
            inside_temperature,
            ..Self::new()
        }
    }

    /// Checks every field before any computation runs.
    pub fn validate(&self) -> Result<()> {
        if !self.outside_temperature.is_finite() || !self.inside_temperature.is_finite() {
            return Err(Error::validation(format!(
                "air temperatures must be finite, got outside={} inside={}",
                self.outside_temperature, self.inside_temperature
            )));
        }
        if !(self.wind_speed.is_finite() && self.wind_speed >= 0.0) {
            return Err(Error::validation(format!(
                "wind speed must be 0 or greater, got {}",
                self.wind_speed
            )));
        }
        ensure_positive(self.height, "surface height")?;
        if !(0.0..=180.0).contains(&self.angle) {
            return Err(Error::validation(format!(
                "angle must be between 0 and 180 degrees, got {}",
                self.angle
            )));
        }
        ensure_positive(self.pressure, "air pressure")?;
        Ok(())
    }
}

impl Default for ProfileConditions {
    fn default() -> Self {
        Self::new()
    }
}
