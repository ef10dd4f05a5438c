//! Steady-state temperature profile through an opaque construction.
//!
//! The construction is treated as a 1D series resistance network:
//!
//! ```text
//! T_out ──[r_film_out]── T_s,out ──[r_1]── ... ──[r_n]── T_s,in ──[r_film_in]── T_in
//! ```
//!
//! The interior film coefficient depends on the (unknown) interior surface
//! temperature. It is linearized once: a simple coefficient gives a first
//! estimate of the drop across the interior film, the detailed correlation
//! is then evaluated at the midpoint of that drop, and the resulting chain is
//! solved directly. There is no further iteration.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::name::HasName;
use crate::sim::energy::config::ProfileConditions;
use crate::sim::energy::construction::{OpaqueConstruction, Side};
use crate::sim::energy::convection::{
    FilmCoefficientModel, Iso15099Films, KELVIN_OFFSET, effective_interior_angle,
};

/// Temperatures and resistances of a solved construction.
///
/// Only the solver builds profiles, so there are always at least four nodes
/// (one layer) and the node accessors below never go out of bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureProfile {
    /// Node temperatures in °C: outside air, exterior surface, each layer
    /// interface, interior surface, inside air (`layers + 3` values).
    temperatures: Vec<f64>,
    /// Resistances in m^2*K/W: exterior film, each layer, interior film
    /// (`layers + 2` values).
    resistances: Vec<f64>,
}

impl TemperatureProfile {
    /// Node temperatures in °C, outside air first.
    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    /// Resistances in m^2*K/W, exterior film first.
    pub fn resistances(&self) -> &[f64] {
        &self.resistances
    }

    /// Total resistance for the solved conditions (films included).
    pub fn r_factor(&self) -> f64 {
        self.resistances.iter().sum()
    }

    /// Heat flux in W/m^2, positive from outside to inside.
    pub fn heat_flux(&self) -> f64 {
        let t_out = self.temperatures[0];
        let t_in = self.temperatures[self.temperatures.len() - 1];
        (t_out - t_in) / self.r_factor()
    }

    pub fn exterior_surface_temperature(&self) -> f64 {
        self.temperatures[1]
    }

    pub fn interior_surface_temperature(&self) -> f64 {
        self.temperatures[self.temperatures.len() - 2]
    }
}

impl OpaqueConstruction {
    /// Temperature at each layer boundary using the ISO 15099 film
    /// correlations.
    pub fn temperature_profile(&self, conditions: &ProfileConditions) -> Result<TemperatureProfile> {
        self.temperature_profile_with(conditions, &Iso15099Films)
    }

    /// Temperature at each layer boundary using the given film correlations.
    ///
    /// Fails with [`Error::Computation`] when a film coefficient is not
    /// strictly positive, e.g. an inside emissivity of 0 with equal air
    /// temperatures leaves the interior film with neither radiation nor
    /// convection.
    pub fn temperature_profile_with<M: FilmCoefficientModel + ?Sized>(
        &self,
        conditions: &ProfileConditions,
        films: &M,
    ) -> Result<TemperatureProfile> {
        conditions.validate()?;
        let t_out = conditions.outside_temperature;
        let t_in = conditions.inside_temperature;
        let angle = effective_interior_angle(conditions.angle, t_out, t_in);

        let eps_out = self.face_properties(Side::Outside).emissivity;
        let eps_in = self.face_properties(Side::Inside).emissivity;

        // Provisional chain with the simple interior film.
        let r_in_init = 1.0 / films.interior_simple(eps_in);
        let r_out = 1.0 / films.exterior(conditions.wind_speed, t_out + KELVIN_OFFSET, eps_out);
        let mut resistances = Vec::with_capacity(self.layers().len() + 2);
        resistances.push(r_out);
        resistances.extend(self.layer_resistances());
        resistances.push(r_in_init);
        check_resistances(&resistances, self.get_name())?;

        // One-shot refinement of the interior film at the midpoint of its
        // provisional temperature drop.
        let in_delta_t = (r_in_init / resistances.iter().sum::<f64>()) * (t_out - t_in);
        let t_surface = t_in - in_delta_t / 2.0 + KELVIN_OFFSET;
        let h_in = films.interior(
            t_surface,
            in_delta_t,
            conditions.height,
            angle,
            conditions.pressure,
            eps_in,
        );
        let last = resistances.len() - 1;
        resistances[last] = 1.0 / h_in;
        check_resistances(&resistances, self.get_name())?;

        debug!(
            construction = self.get_name(),
            r_out,
            r_in_init,
            in_delta_t,
            angle,
            r_in = resistances[last],
            "interior film refined"
        );

        let temperatures = temperatures_from_resistances(&resistances, t_out, t_in)?;
        Ok(TemperatureProfile {
            temperatures,
            resistances,
        })
    }
}

/// Walks a series chain from the outside node inward.
///
/// Returns `resistances.len() + 1` node temperatures. The last node is the
/// inside boundary temperature.
pub fn temperatures_from_resistances(
    resistances: &[f64],
    outside_temperature: f64,
    inside_temperature: f64,
) -> Result<Vec<f64>> {
    let r_total: f64 = resistances.iter().sum();
    let q = (outside_temperature - inside_temperature) / r_total;
    if !q.is_finite() {
        return Err(Error::computation(format!(
            "non-finite heat flux {q} W/m2 for total resistance {r_total} m2-K/W"
        )));
    }

    let mut temperatures = Vec::with_capacity(resistances.len() + 1);
    temperatures.push(outside_temperature);
    let mut t = outside_temperature;
    for r in &resistances[..resistances.len().saturating_sub(1)] {
        t -= q * r;
        temperatures.push(t);
    }
    temperatures.push(inside_temperature);
    Ok(temperatures)
}

fn check_resistances(resistances: &[f64], construction: &str) -> Result<()> {
    for (i, r) in resistances.iter().enumerate() {
        if !(r.is_finite() && *r > 0.0) {
            return Err(Error::computation(format!(
                "resistance {i} of construction \"{construction}\" is {r} m2-K/W"
            )));
        }
    }
    Ok(())
}

/// Solves many constructions under the same conditions in parallel.
///
/// Constructions are only read. Results are returned in input order.
pub fn temperature_profiles(
    constructions: &[OpaqueConstruction],
    conditions: &ProfileConditions,
) -> Vec<Result<TemperatureProfile>> {
    constructions
        .par_iter()
        .map(|c| c.temperature_profile(conditions))
        .collect()
}
