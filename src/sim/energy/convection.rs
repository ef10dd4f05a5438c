//! Surface film coefficients (convection + longwave radiation).
//!
//! Two correlations are provided, both following ISO 15099 as used by NFRC
//! 100 rating procedures:
//!
//! - **Exterior**: wind-driven forced convection `h_c = 4 + 4 * v` plus a
//!   linearized radiative term.
//!
//! - **Interior**: natural convection from a Rayleigh/Nusselt correlation
//!   that depends on tilt, surface height and air pressure, plus a
//!   linearized radiative term.
//!
//! A simple interior coefficient (EN 673) is also exposed. It depends only
//! on the surface emissivity and is used for standard U-factors and as the
//! starting point of the temperature profile solve.

use std::f64::consts::PI;

/// Stefan-Boltzmann constant as used by ISO 15099 [W/(m²·K⁴)].
pub const STEFAN_BOLTZMANN: f64 = 5.6697e-8;

/// Standard gravitational acceleration [m/s²].
const GRAVITY: f64 = 9.81;

/// Universal gas constant [J/(kmol·K)].
const GAS_CONSTANT: f64 = 8314.462618;

/// Molecular mass of dry air [kg/kmol].
const AIR_MOLECULAR_MASS: f64 = 28.97;

/// Standard exterior film coefficient (EN 673) [W/(m²·K)].
pub const STANDARD_EXTERIOR_H: f64 = 23.0;

/// Offset between Celsius and Kelvin.
pub const KELVIN_OFFSET: f64 = 273.15;

// ----- Air properties (ISO 15099 linear fits, T in K) -----

/// Thermal conductivity of air [W/(m·K)].
pub fn air_conductivity(t_kelvin: f64) -> f64 {
    2.873e-3 + 7.76e-5 * t_kelvin
}

/// Dynamic viscosity of air [Pa·s].
pub fn air_viscosity(t_kelvin: f64) -> f64 {
    3.723e-6 + 4.94e-8 * t_kelvin
}

/// Specific heat of air at constant pressure [J/(kg·K)].
pub fn air_specific_heat(t_kelvin: f64) -> f64 {
    1002.737 + 1.2324e-2 * t_kelvin
}

/// Density of air from the ideal gas law [kg/m³].
pub fn air_density(t_kelvin: f64, pressure: f64) -> f64 {
    pressure * AIR_MOLECULAR_MASS / (GAS_CONSTANT * t_kelvin)
}

/// Rayleigh number of the air film next to a surface of height `height`.
///
/// Only the magnitude of `delta_t` matters.
pub fn rayleigh_number(t_kelvin: f64, delta_t: f64, height: f64, pressure: f64) -> f64 {
    let rho = air_density(t_kelvin, pressure);
    let numerator =
        rho * rho * height.powi(3) * GRAVITY * air_specific_heat(t_kelvin) * delta_t.abs();
    let denominator = t_kelvin * air_viscosity(t_kelvin) * air_conductivity(t_kelvin);
    numerator / denominator
}

/// Natural convection Nusselt number as a function of tilt.
///
/// `angle` is in degrees: 0 places the warm side up (buoyant plume, highest
/// coefficient), 180 is the stably stratified case (lowest coefficient) and
/// 90 is vertical.
pub fn nusselt_number(rayleigh: f64, angle: f64) -> f64 {
    if angle < 15.0 {
        0.13 * rayleigh.cbrt()
    } else if angle <= 90.0 {
        let sin_a = (angle * PI / 180.0).sin();
        let ra_crit = 2.5e5 * ((0.72 * angle).exp() / sin_a).powf(0.2);
        if rayleigh <= ra_crit {
            0.56 * (rayleigh * sin_a).powf(0.25)
        } else {
            0.13 * (rayleigh.cbrt() - ra_crit.cbrt()) + 0.56 * (ra_crit * sin_a).powf(0.25)
        }
    } else if angle <= 179.0 {
        let sin_a = (angle * PI / 180.0).sin();
        0.56 * (rayleigh * sin_a).powf(0.25)
    } else {
        0.58 * rayleigh.powf(0.2)
    }
}

/// Linearized longwave radiative coefficient `4 σ ε T³` [W/(m²·K)].
pub fn radiative_h(emissivity: f64, t_kelvin: f64) -> f64 {
    4.0 * STEFAN_BOLTZMANN * emissivity * t_kelvin.powi(3)
}

/// Exterior combined film coefficient [W/(m²·K)].
///
/// # Arguments
/// - `wind_speed`: outdoor wind speed [m/s], negative values treated as 0
/// - `t_kelvin`: exterior surface (or air) temperature [K]
/// - `emissivity`: outside face emissivity
pub fn exterior_film_h(wind_speed: f64, t_kelvin: f64, emissivity: f64) -> f64 {
    let h_conv = 4.0 + 4.0 * wind_speed.max(0.0);
    h_conv + radiative_h(emissivity, t_kelvin)
}

/// Interior natural convection coefficient [W/(m²·K)].
///
/// Returns 0 when the film has no temperature difference.
pub fn interior_convective_h(
    t_kelvin: f64,
    delta_t: f64,
    height: f64,
    angle: f64,
    pressure: f64,
) -> f64 {
    let ra = rayleigh_number(t_kelvin, delta_t, height, pressure);
    nusselt_number(ra, angle) * air_conductivity(t_kelvin) / height
}

/// Interior combined film coefficient [W/(m²·K)].
///
/// # Arguments
/// - `t_kelvin`: interior surface temperature [K]
/// - `delta_t`: temperature difference across the film [K], signed
/// - `height`: surface height [m]
/// - `angle`: tilt in degrees (see [`nusselt_number`]), already corrected
///   with [`effective_interior_angle`]
/// - `pressure`: air pressure [Pa]
/// - `emissivity`: inside face emissivity
///
/// The result is 0 when `emissivity` is 0 and `delta_t` is 0. Callers that
/// invert it must check for that.
pub fn interior_film_h(
    t_kelvin: f64,
    delta_t: f64,
    height: f64,
    angle: f64,
    pressure: f64,
    emissivity: f64,
) -> f64 {
    interior_convective_h(t_kelvin, delta_t, height, angle, pressure)
        + radiative_h(emissivity, t_kelvin)
}

/// Simple interior film coefficient (EN 673) [W/(m²·K)].
pub fn interior_film_h_simple(emissivity: f64) -> f64 {
    3.6 + 4.4 * emissivity / 0.84
}

/// Tilt seen by the interior film.
///
/// When heat flows from outside to inside on a non-vertical assembly the
/// warm face swaps sides, so the angle is mirrored to `|180 - angle|`.
/// Vertical assemblies are never changed.
pub fn effective_interior_angle(angle: f64, outside_temperature: f64, inside_temperature: f64) -> f64 {
    if angle != 90.0 && outside_temperature > inside_temperature {
        (180.0 - angle).abs()
    } else {
        angle
    }
}

// ----- Pluggable model -----

/// A set of film coefficient correlations used by the profile solver.
pub trait FilmCoefficientModel {
    /// Exterior combined coefficient [W/(m²·K)].
    fn exterior(&self, wind_speed: f64, t_kelvin: f64, emissivity: f64) -> f64;

    /// Interior combined coefficient [W/(m²·K)].
    fn interior(
        &self,
        t_kelvin: f64,
        delta_t: f64,
        height: f64,
        angle: f64,
        pressure: f64,
        emissivity: f64,
    ) -> f64;

    /// Interior coefficient that ignores film conditions [W/(m²·K)].
    fn interior_simple(&self, emissivity: f64) -> f64;
}

/// ISO 15099 / NFRC 100 correlations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Iso15099Films;

impl FilmCoefficientModel for Iso15099Films {
    fn exterior(&self, wind_speed: f64, t_kelvin: f64, emissivity: f64) -> f64 {
        exterior_film_h(wind_speed, t_kelvin, emissivity)
    }

    fn interior(
        &self,
        t_kelvin: f64,
        delta_t: f64,
        height: f64,
        angle: f64,
        pressure: f64,
        emissivity: f64,
    ) -> f64 {
        interior_film_h(t_kelvin, delta_t, height, angle, pressure, emissivity)
    }

    fn interior_simple(&self, emissivity: f64) -> f64 {
        interior_film_h_simple(emissivity)
    }
}
