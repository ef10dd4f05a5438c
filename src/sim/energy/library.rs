use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::name::{HasName, SortByName};
use crate::sim::energy::construction::OpaqueConstruction;
use crate::sim::materials::{EnergyMaterial, EnergyMaterialNoMass, OpaqueLayer, Roughness};

pub const GENERIC_EXTERIOR_WALL: &str = "Generic Exterior Wall";
pub const GENERIC_INTERIOR_WALL: &str = "Generic Interior Wall";
pub const GENERIC_UNDERGROUND_WALL: &str = "Generic Underground Wall";
pub const GENERIC_ROOF: &str = "Generic Roof";
pub const GENERIC_INTERIOR_CEILING: &str = "Generic Interior Ceiling";
pub const GENERIC_UNDERGROUND_ROOF: &str = "Generic Underground Roof";
pub const GENERIC_EXPOSED_FLOOR: &str = "Generic Exposed Floor";
pub const GENERIC_INTERIOR_FLOOR: &str = "Generic Interior Floor";
pub const GENERIC_GROUND_SLAB: &str = "Generic Ground Slab";

/// Library of named opaque materials and constructions.
#[derive(Debug, Clone, Default)]
pub struct ConstructionLibrary {
    materials: HashMap<String, OpaqueLayer>,
    constructions: HashMap<String, OpaqueConstruction>,
}

impl ConstructionLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a material, replacing any material with the same name.
    pub fn add_material(&mut self, material: impl Into<OpaqueLayer>) {
        let material = material.into();
        self.materials
            .insert(material.get_name().to_string(), material);
    }

    /// Adds a construction, replacing any construction with the same name.
    ///
    /// Its materials are added as well so the library stays self-consistent.
    pub fn add_construction(&mut self, construction: OpaqueConstruction) {
        for m in construction.unique_materials() {
            self.add_material(m.clone());
        }
        self.constructions
            .insert(construction.get_name().to_string(), construction);
    }

    pub fn material(&self, name: &str) -> Result<&OpaqueLayer> {
        self.materials
            .get(name)
            .ok_or_else(|| Error::lookup(name, "the material library"))
    }

    pub fn construction(&self, name: &str) -> Result<&OpaqueConstruction> {
        self.constructions
            .get(name)
            .ok_or_else(|| Error::lookup(name, "the construction library"))
    }

    /// Material names, sorted.
    pub fn material_names(&self) -> Vec<&str> {
        let mut names: Vec<&OpaqueLayer> = self.materials.values().collect();
        names.sort_by_name();
        names.into_iter().map(|m| m.get_name()).collect()
    }

    /// Construction names, sorted.
    pub fn construction_names(&self) -> Vec<&str> {
        let mut names: Vec<&OpaqueConstruction> = self.constructions.values().collect();
        names.sort_by_name();
        names.into_iter().map(|c| c.get_name()).collect()
    }

    /// Builds a construction from material names (outside to inside).
    pub fn construction_from_layer_names(
        &self,
        name: &str,
        layer_names: &[&str],
    ) -> Result<OpaqueConstruction> {
        let layers = layer_names
            .iter()
            .map(|n| self.material(n).cloned())
            .collect::<Result<Vec<_>>>()?;
        OpaqueConstruction::new(name, layers)
    }

    /// Creates a library pre-populated with generic materials and the
    /// generic constructions used by [`ConstructionSet::generic`].
    ///
    /// [`ConstructionSet::generic`]: crate::sim::energy::construction_set::ConstructionSet::generic
    pub fn with_presets() -> Self {
        let mut lib = Self::new();
        for m in generic_materials() {
            lib.add_material(m);
        }

        let presets: [(&str, &[&str]); 9] = [
            (
                GENERIC_EXTERIOR_WALL,
                &[
                    "Generic Brick",
                    "Generic LW Concrete",
                    "Generic 50mm Insulation",
                    "Generic Wall Air Gap",
                    "Generic Gypsum Board",
                ],
            ),
            (
                GENERIC_INTERIOR_WALL,
                &[
                    "Generic Gypsum Board",
                    "Generic Wall Air Gap",
                    "Generic Gypsum Board",
                ],
            ),
            (
                GENERIC_UNDERGROUND_WALL,
                &[
                    "Generic 50mm Insulation",
                    "Generic HW Concrete",
                    "Generic Wall Air Gap",
                    "Generic Gypsum Board",
                ],
            ),
            (
                GENERIC_ROOF,
                &[
                    "Generic Roof Membrane",
                    "Generic 50mm Insulation",
                    "Generic LW Concrete",
                    "Generic Ceiling Air Gap",
                    "Generic Acoustic Tile",
                ],
            ),
            (
                GENERIC_INTERIOR_CEILING,
                &[
                    "Generic LW Concrete",
                    "Generic Ceiling Air Gap",
                    "Generic Acoustic Tile",
                ],
            ),
            (
                GENERIC_UNDERGROUND_ROOF,
                &[
                    "Generic 50mm Insulation",
                    "Generic HW Concrete",
                    "Generic Ceiling Air Gap",
                    "Generic Acoustic Tile",
                ],
            ),
            (
                GENERIC_EXPOSED_FLOOR,
                &[
                    "Generic Painted Metal",
                    "Generic Ceiling Air Gap",
                    "Generic 50mm Insulation",
                    "Generic LW Concrete",
                ],
            ),
            (
                GENERIC_INTERIOR_FLOOR,
                &[
                    "Generic Acoustic Tile",
                    "Generic Ceiling Air Gap",
                    "Generic LW Concrete",
                ],
            ),
            (
                GENERIC_GROUND_SLAB,
                &["Generic 50mm Insulation", "Generic HW Concrete"],
            ),
        ];

        for (name, layers) in presets {
            // Preset names and layers are fixed and valid.
            if let Ok(c) = lib.construction_from_layer_names(name, layers) {
                lib.constructions.insert(name.to_string(), c);
            }
        }
        lib
    }
}

/// Generic opaque materials (thickness m, conductivity W/m-K, density kg/m³,
/// specific heat J/kg-K, solar absorptance).
fn generic_materials() -> Vec<OpaqueLayer> {
    let mass: [(&str, f64, f64, f64, f64, f64, Roughness); 9] = [
        ("Generic Brick", 0.1, 0.9, 1920.0, 790.0, 0.65, Roughness::MediumRough),
        ("Generic LW Concrete", 0.1, 0.53, 1280.0, 840.0, 0.8, Roughness::MediumRough),
        ("Generic HW Concrete", 0.2, 1.95, 2240.0, 900.0, 0.8, Roughness::MediumRough),
        ("Generic 50mm Insulation", 0.05, 0.03, 43.0, 1210.0, 0.7, Roughness::MediumRough),
        ("Generic 25mm Insulation", 0.025, 0.03, 43.0, 1210.0, 0.7, Roughness::MediumRough),
        ("Generic Gypsum Board", 0.0127, 0.16, 800.0, 1090.0, 0.5, Roughness::MediumSmooth),
        ("Generic Acoustic Tile", 0.02, 0.06, 368.0, 590.0, 0.2, Roughness::MediumSmooth),
        ("Generic Roof Membrane", 0.01, 0.16, 1120.0, 1460.0, 0.65, Roughness::MediumRough),
        ("Generic Painted Metal", 0.0015, 45.0, 7690.0, 410.0, 0.5, Roughness::Smooth),
    ];
    let no_mass: [(&str, f64); 2] = [
        ("Generic Wall Air Gap", 0.15),
        ("Generic Ceiling Air Gap", 0.18),
    ];

    let mut out = Vec::with_capacity(mass.len() + no_mass.len());
    for (name, t, k, rho, cp, solar, roughness) in mass {
        let m = EnergyMaterial::new(name, t, k, rho, cp)
            .and_then(|m| m.with_absorptances(0.9, solar, None))
            .map(|m| m.with_roughness(roughness));
        if let Ok(m) = m {
            out.push(m.into());
        }
    }
    for (name, r) in no_mass {
        if let Ok(m) = EnergyMaterialNoMass::new(name, r) {
            out.push(m.into());
        }
    }
    out
}
