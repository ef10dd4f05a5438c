use crate::error::{Error, Result};
use crate::name::{HasName, valid_ep_name};
use crate::sim::energy::convection::{STANDARD_EXTERIOR_H, interior_film_h_simple};
use crate::sim::materials::{OpaqueLayer, OpaqueMaterial};

/// Maximum number of layers EnergyPlus accepts in a construction.
pub const MAX_LAYERS: usize = 10;

/// Which face of a construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Outside,
    Inside,
}

/// Optical and longwave properties of one face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceProperties {
    pub emissivity: f64,
    pub solar_reflectance: f64,
    pub visible_reflectance: f64,
}

/// An opaque construction defined by material layers (outside to inside).
///
/// The layer list is validated once and never changes. Derived quantities
/// (R-value, face properties, mass) are computed from the layers on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueConstruction {
    name: String,
    layers: Vec<OpaqueLayer>,
}

impl OpaqueConstruction {
    /// Creates a construction from 1 to [`MAX_LAYERS`] opaque layers.
    pub fn new(name: &str, layers: Vec<OpaqueLayer>) -> Result<Self> {
        let name = valid_ep_name(name, "construction name")?;
        if layers.is_empty() {
            return Err(Error::validation(format!(
                "construction \"{name}\" must possess at least one material"
            )));
        }
        if layers.len() > MAX_LAYERS {
            return Err(Error::validation(format!(
                "construction \"{name}\" cannot have more than {MAX_LAYERS} materials, got {}",
                layers.len()
            )));
        }
        Ok(Self { name, layers })
    }

    /// Returns a renamed copy.
    pub fn with_name(&self, name: &str) -> Result<Self> {
        Self::new(name, self.layers.clone())
    }

    /// Returns a copy with a different layer list.
    pub fn with_layers(&self, layers: Vec<OpaqueLayer>) -> Result<Self> {
        Self::new(&self.name, layers)
    }

    /// Layers from outside to inside.
    pub fn layers(&self) -> &[OpaqueLayer] {
        &self.layers
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.get_name()).collect()
    }

    /// Distinct materials in order of first appearance.
    pub fn unique_materials(&self) -> Vec<&OpaqueLayer> {
        let mut unique: Vec<&OpaqueLayer> = Vec::new();
        for layer in &self.layers {
            if !unique.iter().any(|u| u.get_name() == layer.get_name()) {
                unique.push(layer);
            }
        }
        unique
    }

    /// Thermal resistance of each layer in m^2*K/W (outside to inside).
    pub fn layer_resistances(&self) -> Vec<f64> {
        self.layers.iter().map(|l| l.r_value()).collect()
    }

    /// Resistance of the layers alone in m^2*K/W.
    pub fn r_value(&self) -> f64 {
        self.layer_resistances().iter().sum()
    }

    /// Reciprocal of [`Self::r_value`] in W/(m^2*K).
    pub fn u_value(&self) -> f64 {
        1.0 / self.r_value()
    }

    /// Resistance including standard (EN 673) air films in m^2*K/W.
    pub fn r_factor(&self) -> f64 {
        let r_out = 1.0 / STANDARD_EXTERIOR_H;
        let r_in = 1.0 / interior_film_h_simple(self.face_properties(Side::Inside).emissivity);
        self.r_value() + r_out + r_in
    }

    /// Reciprocal of [`Self::r_factor`] in W/(m^2*K).
    pub fn u_factor(&self) -> f64 {
        1.0 / self.r_factor()
    }

    /// Face properties read from the outermost or innermost layer.
    pub fn face_properties(&self, side: Side) -> FaceProperties {
        let layer = self.face_layer(side);
        FaceProperties {
            emissivity: layer.thermal_absorptance(),
            solar_reflectance: 1.0 - layer.solar_absorptance(),
            visible_reflectance: 1.0 - layer.visible_absorptance(),
        }
    }

    /// Layer exposed on the given side.
    pub fn face_layer(&self, side: Side) -> &OpaqueLayer {
        // Non-empty by construction.
        match side {
            Side::Outside => &self.layers[0],
            Side::Inside => &self.layers[self.layers.len() - 1],
        }
    }

    /// Total physical thickness in m. No-mass layers contribute nothing.
    pub fn thickness(&self) -> f64 {
        self.layers.iter().filter_map(|l| l.thickness()).sum()
    }

    /// Mass per unit area in kg/m^2.
    pub fn mass_area_density(&self) -> f64 {
        self.layers.iter().map(|l| l.mass_area_density()).sum()
    }

    /// Heat capacity per unit area in J/(m^2*K).
    pub fn area_heat_capacity(&self) -> f64 {
        self.layers.iter().map(|l| l.area_heat_capacity()).sum()
    }

    /// `(mass_area_density, area_heat_capacity)` summed over all layers.
    pub fn aggregate_mass(&self) -> (f64, f64) {
        (self.mass_area_density(), self.area_heat_capacity())
    }
}

impl HasName for OpaqueConstruction {
    fn get_name(&self) -> &str {
        &self.name
    }
}
