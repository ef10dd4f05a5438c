use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ensure_in_range, ensure_positive};
use crate::name::{HasName, valid_ep_name};

/// Default thermal (longwave) absorptance, i.e. emissivity.
pub const DEFAULT_THERMAL_ABSORPTANCE: f64 = 0.9;
/// Default solar absorptance.
pub const DEFAULT_SOLAR_ABSORPTANCE: f64 = 0.7;

/// Maximum thickness of a mass layer in meters.
const MAX_THICKNESS: f64 = 3.0;
/// Minimum specific heat of a mass layer in J/(kg*K).
const MIN_SPECIFIC_HEAT: f64 = 100.0;
/// Minimum thermal resistance of a no-mass layer in m^2*K/W.
const MIN_NO_MASS_R_VALUE: f64 = 0.001;

/// Surface roughness used by exterior convection algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Roughness {
    VeryRough,
    Rough,
    #[default]
    MediumRough,
    MediumSmooth,
    Smooth,
    VerySmooth,
}

impl Roughness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryRough => "VeryRough",
            Self::Rough => "Rough",
            Self::MediumRough => "MediumRough",
            Self::MediumSmooth => "MediumSmooth",
            Self::Smooth => "Smooth",
            Self::VerySmooth => "VerySmooth",
        }
    }
}

impl fmt::Display for Roughness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Roughness {
    type Err = Error;

    /// Case-insensitive, as IDF keys are.
    fn from_str(s: &str) -> Result<Self> {
        let all = [
            Self::VeryRough,
            Self::Rough,
            Self::MediumRough,
            Self::MediumSmooth,
            Self::Smooth,
            Self::VerySmooth,
        ];
        all.into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::validation(format!("unknown roughness \"{s}\"")))
    }
}

/// Capability shared by every layer that can appear in an opaque construction.
///
/// Constructions and the profile solver depend only on this trait, never on
/// the concrete material variant.
pub trait OpaqueMaterial: HasName {
    /// Thermal resistance of the layer in m^2*K/W.
    fn r_value(&self) -> f64;
    /// Mass per unit area in kg/m^2.
    fn mass_area_density(&self) -> f64;
    /// Heat capacity per unit area in J/(m^2*K).
    fn area_heat_capacity(&self) -> f64;
    /// Longwave absorptance (emissivity) in [0, 1].
    fn thermal_absorptance(&self) -> f64;
    /// Solar absorptance in [0, 1].
    fn solar_absorptance(&self) -> f64;
    /// Visible absorptance in [0, 1].
    fn visible_absorptance(&self) -> f64;
    /// Physical thickness in meters, `None` for no-mass layers.
    fn thickness(&self) -> Option<f64>;
    fn roughness(&self) -> Roughness;
}

/// Absorptances of the two faces of a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Absorptances {
    thermal: f64,
    solar: f64,
    /// `None` means "same as solar".
    visible: Option<f64>,
}

impl Absorptances {
    fn new(thermal: f64, solar: f64, visible: Option<f64>) -> Result<Self> {
        ensure_in_range(thermal, 0.0, 1.0, "thermal absorptance")?;
        ensure_in_range(solar, 0.0, 1.0, "solar absorptance")?;
        if let Some(v) = visible {
            ensure_in_range(v, 0.0, 1.0, "visible absorptance")?;
        }
        Ok(Self {
            thermal,
            solar,
            visible,
        })
    }

    fn visible(&self) -> f64 {
        self.visible.unwrap_or(self.solar)
    }

    fn spec(&self) -> (f64, f64, Option<f64>) {
        (self.thermal, self.solar, self.visible)
    }
}

impl Default for Absorptances {
    fn default() -> Self {
        Self {
            thermal: DEFAULT_THERMAL_ABSORPTANCE,
            solar: DEFAULT_SOLAR_ABSORPTANCE,
            visible: None,
        }
    }
}

/// A homogeneous layer with mass (e.g. brick, concrete, insulation board).
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyMaterial {
    name: String,
    roughness: Roughness,
    /// Thickness in meters.
    thickness: f64,
    /// Thermal conductivity in W/(m*K).
    conductivity: f64,
    /// Density in kg/m^3.
    density: f64,
    /// Specific heat capacity in J/(kg*K).
    specific_heat: f64,
    absorptances: Absorptances,
}

impl EnergyMaterial {
    pub fn new(
        name: &str,
        thickness: f64,
        conductivity: f64,
        density: f64,
        specific_heat: f64,
    ) -> Result<Self> {
        let name = valid_ep_name(name, "material name")?;
        ensure_positive(thickness, "material thickness")?;
        if thickness > MAX_THICKNESS {
            return Err(Error::validation(format!(
                "material thickness must be at most {MAX_THICKNESS} m, got {thickness}"
            )));
        }
        ensure_positive(conductivity, "material conductivity")?;
        ensure_positive(density, "material density")?;
        if !(specific_heat.is_finite() && specific_heat >= MIN_SPECIFIC_HEAT) {
            return Err(Error::validation(format!(
                "material specific heat must be at least {MIN_SPECIFIC_HEAT} J/kg-K, got {specific_heat}"
            )));
        }
        Ok(Self {
            name,
            roughness: Roughness::default(),
            thickness,
            conductivity,
            density,
            specific_heat,
            absorptances: Absorptances::default(),
        })
    }

    pub fn with_roughness(mut self, roughness: Roughness) -> Self {
        self.roughness = roughness;
        self
    }

    /// Sets the face absorptances. `visible = None` ties it to `solar`.
    pub fn with_absorptances(
        mut self,
        thermal: f64,
        solar: f64,
        visible: Option<f64>,
    ) -> Result<Self> {
        self.absorptances = Absorptances::new(thermal, solar, visible)?;
        Ok(self)
    }

    /// `(thermal, solar, visible)` absorptances as set; visible is `None`
    /// when it follows solar.
    pub fn absorptance_spec(&self) -> (f64, f64, Option<f64>) {
        self.absorptances.spec()
    }

    /// Thickness in meters. Same as [`OpaqueMaterial::thickness`] without
    /// the `Option`, since mass layers always have one.
    pub fn layer_thickness(&self) -> f64 {
        self.thickness
    }

    pub fn conductivity(&self) -> f64 {
        self.conductivity
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn specific_heat(&self) -> f64 {
        self.specific_heat
    }
}

impl HasName for EnergyMaterial {
    fn get_name(&self) -> &str {
        &self.name
    }
}

impl OpaqueMaterial for EnergyMaterial {
    fn r_value(&self) -> f64 {
        self.thickness / self.conductivity
    }

    fn mass_area_density(&self) -> f64 {
        self.density * self.thickness
    }

    fn area_heat_capacity(&self) -> f64 {
        self.mass_area_density() * self.specific_heat
    }

    fn thermal_absorptance(&self) -> f64 {
        self.absorptances.thermal
    }

    fn solar_absorptance(&self) -> f64 {
        self.absorptances.solar
    }

    fn visible_absorptance(&self) -> f64 {
        self.absorptances.visible()
    }

    fn thickness(&self) -> Option<f64> {
        Some(self.thickness)
    }

    fn roughness(&self) -> Roughness {
        self.roughness
    }
}

/// A pure thermal resistance without mass (e.g. an air gap or a
/// manufacturer-rated insulation value).
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyMaterialNoMass {
    name: String,
    roughness: Roughness,
    /// Thermal resistance in m^2*K/W.
    r_value: f64,
    absorptances: Absorptances,
}

impl EnergyMaterialNoMass {
    pub fn new(name: &str, r_value: f64) -> Result<Self> {
        let name = valid_ep_name(name, "material name")?;
        if !(r_value.is_finite() && r_value >= MIN_NO_MASS_R_VALUE) {
            return Err(Error::validation(format!(
                "no-mass material R-value must be at least {MIN_NO_MASS_R_VALUE} m2-K/W, got {r_value}"
            )));
        }
        Ok(Self {
            name,
            roughness: Roughness::default(),
            r_value,
            absorptances: Absorptances::default(),
        })
    }

    pub fn with_roughness(mut self, roughness: Roughness) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_absorptances(
        mut self,
        thermal: f64,
        solar: f64,
        visible: Option<f64>,
    ) -> Result<Self> {
        self.absorptances = Absorptances::new(thermal, solar, visible)?;
        Ok(self)
    }

    /// `(thermal, solar, visible)` absorptances as set; visible is `None`
    /// when it follows solar.
    pub fn absorptance_spec(&self) -> (f64, f64, Option<f64>) {
        self.absorptances.spec()
    }
}

impl HasName for EnergyMaterialNoMass {
    fn get_name(&self) -> &str {
        &self.name
    }
}

impl OpaqueMaterial for EnergyMaterialNoMass {
    fn r_value(&self) -> f64 {
        self.r_value
    }

    fn mass_area_density(&self) -> f64 {
        0.0
    }

    fn area_heat_capacity(&self) -> f64 {
        0.0
    }

    fn thermal_absorptance(&self) -> f64 {
        self.absorptances.thermal
    }

    fn solar_absorptance(&self) -> f64 {
        self.absorptances.solar
    }

    fn visible_absorptance(&self) -> f64 {
        self.absorptances.visible()
    }

    fn thickness(&self) -> Option<f64> {
        None
    }

    fn roughness(&self) -> Roughness {
        self.roughness
    }
}

/// Any material that may be used as a layer of an opaque construction.
#[derive(Debug, Clone, PartialEq)]
pub enum OpaqueLayer {
    Mass(EnergyMaterial),
    NoMass(EnergyMaterialNoMass),
}

impl OpaqueLayer {
    fn inner(&self) -> &dyn OpaqueMaterial {
        match self {
            Self::Mass(m) => m,
            Self::NoMass(m) => m,
        }
    }
}

impl From<EnergyMaterial> for OpaqueLayer {
    fn from(m: EnergyMaterial) -> Self {
        Self::Mass(m)
    }
}

impl From<EnergyMaterialNoMass> for OpaqueLayer {
    fn from(m: EnergyMaterialNoMass) -> Self {
        Self::NoMass(m)
    }
}

impl HasName for OpaqueLayer {
    fn get_name(&self) -> &str {
        self.inner().get_name()
    }
}

impl OpaqueMaterial for OpaqueLayer {
    fn r_value(&self) -> f64 {
        self.inner().r_value()
    }

    fn mass_area_density(&self) -> f64 {
        self.inner().mass_area_density()
    }

    fn area_heat_capacity(&self) -> f64 {
        self.inner().area_heat_capacity()
    }

    fn thermal_absorptance(&self) -> f64 {
        self.inner().thermal_absorptance()
    }

    fn solar_absorptance(&self) -> f64 {
        self.inner().solar_absorptance()
    }

    fn visible_absorptance(&self) -> f64 {
        self.inner().visible_absorptance()
    }

    fn thickness(&self) -> Option<f64> {
        self.inner().thickness()
    }

    fn roughness(&self) -> Roughness {
        self.inner().roughness()
    }
}
