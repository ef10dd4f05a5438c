//! Dictionary (JSON) representation of materials and constructions.
//!
//! The layout matches the dictionaries exchanged by energy modeling tools:
//!
//! ```json
//! {
//!   "type": "OpaqueConstruction",
//!   "name": "Generic Exterior Wall",
//!   "layers": ["Generic Brick", "Generic 50mm Insulation"],
//!   "materials": [{"type": "EnergyMaterial", "name": "Generic Brick", ...}]
//! }
//! ```
//!
//! The abridged form (`"OpaqueConstructionAbridged"`) omits `materials` and is
//! resolved against a material map supplied by the caller.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{Error, Result};
use crate::name::HasName;
use crate::sim::energy::construction::OpaqueConstruction;
use crate::sim::energy::construction_set::FaceEnergyProperties;
use crate::sim::energy::shade::{DEFAULT_SHADE_REFLECTANCE, ShadeConstruction};
use crate::sim::materials::{
    DEFAULT_SOLAR_ABSORPTANCE, DEFAULT_THERMAL_ABSORPTANCE, EnergyMaterial, EnergyMaterialNoMass,
    OpaqueLayer, OpaqueMaterial, Roughness,
};

pub const OPAQUE_CONSTRUCTION_TYPE: &str = "OpaqueConstruction";
pub const OPAQUE_CONSTRUCTION_ABRIDGED_TYPE: &str = "OpaqueConstructionAbridged";
pub const SHADE_CONSTRUCTION_TYPE: &str = "ShadeConstruction";
pub const FACE_ENERGY_PROPERTIES_TYPE: &str = "FaceEnergyProperties";
pub const FACE_ENERGY_PROPERTIES_ABRIDGED_TYPE: &str = "FaceEnergyPropertiesAbridged";

// OpenStudio standards material library units (IP) to SI.
const INCH_TO_M: f64 = 0.0254;
/// Btu*in/(h*ft2*F) to W/(m*K).
const CONDUCTIVITY_IP_TO_SI: f64 = 0.14413;
/// lb/ft3 to kg/m3.
const DENSITY_IP_TO_SI: f64 = 16.0185;
/// Btu/(lb*F) to J/(kg*K).
const SPECIFIC_HEAT_IP_TO_SI: f64 = 4184.0;
/// h*ft2*F/Btu per m2*K/W.
const R_IP_PER_SI: f64 = 5.678263337;

fn default_thermal_absorptance() -> f64 {
    DEFAULT_THERMAL_ABSORPTANCE
}

fn default_solar_absorptance() -> f64 {
    DEFAULT_SOLAR_ABSORPTANCE
}

fn default_shade_reflectance() -> f64 {
    DEFAULT_SHADE_REFLECTANCE
}

/// Dictionary form of [`EnergyMaterial`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyMaterialDict {
    pub name: String,
    #[serde(default)]
    pub roughness: Roughness,
    pub thickness: f64,
    pub conductivity: f64,
    pub density: f64,
    pub specific_heat: f64,
    #[serde(default = "default_thermal_absorptance")]
    pub thermal_absorptance: f64,
    #[serde(default = "default_solar_absorptance")]
    pub solar_absorptance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_absorptance: Option<f64>,
}

/// Dictionary form of [`EnergyMaterialNoMass`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyMaterialNoMassDict {
    pub name: String,
    pub r_value: f64,
    #[serde(default)]
    pub roughness: Roughness,
    #[serde(default = "default_thermal_absorptance")]
    pub thermal_absorptance: f64,
    #[serde(default = "default_solar_absorptance")]
    pub solar_absorptance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_absorptance: Option<f64>,
}

/// Any opaque material dictionary, discriminated by its `type` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MaterialDict {
    EnergyMaterial(EnergyMaterialDict),
    EnergyMaterialNoMass(EnergyMaterialNoMassDict),
}

/// Dictionary form of [`OpaqueConstruction`], full or abridged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpaqueConstructionDict {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub name: String,
    /// Material names from outside to inside.
    pub layers: Vec<String>,
    /// Unique material dictionaries. Absent in the abridged form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<Value>>,
}

/// Dictionary form of [`ShadeConstruction`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadeConstructionDict {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub name: String,
    #[serde(default = "default_shade_reflectance")]
    pub solar_reflectance: f64,
    #[serde(default = "default_shade_reflectance")]
    pub visible_reflectance: f64,
    #[serde(default)]
    pub is_specular: bool,
}

impl TryFrom<MaterialDict> for OpaqueLayer {
    type Error = Error;

    fn try_from(dict: MaterialDict) -> Result<Self> {
        match dict {
            MaterialDict::EnergyMaterial(d) => Ok(EnergyMaterial::new(
                &d.name,
                d.thickness,
                d.conductivity,
                d.density,
                d.specific_heat,
            )?
            .with_roughness(d.roughness)
            .with_absorptances(d.thermal_absorptance, d.solar_absorptance, d.visible_absorptance)?
            .into()),
            MaterialDict::EnergyMaterialNoMass(d) => Ok(EnergyMaterialNoMass::new(&d.name, d.r_value)?
                .with_roughness(d.roughness)
                .with_absorptances(
                    d.thermal_absorptance,
                    d.solar_absorptance,
                    d.visible_absorptance,
                )?
                .into()),
        }
    }
}

impl From<&OpaqueLayer> for MaterialDict {
    fn from(layer: &OpaqueLayer) -> Self {
        match layer {
            OpaqueLayer::Mass(m) => {
                let (thermal, solar, visible) = m.absorptance_spec();
                MaterialDict::EnergyMaterial(EnergyMaterialDict {
                    name: m.get_name().to_string(),
                    roughness: m.roughness(),
                    thickness: m.layer_thickness(),
                    conductivity: m.conductivity(),
                    density: m.density(),
                    specific_heat: m.specific_heat(),
                    thermal_absorptance: thermal,
                    solar_absorptance: solar,
                    visible_absorptance: visible,
                })
            }
            OpaqueLayer::NoMass(m) => {
                let (thermal, solar, visible) = m.absorptance_spec();
                MaterialDict::EnergyMaterialNoMass(EnergyMaterialNoMassDict {
                    name: m.get_name().to_string(),
                    r_value: m.r_value(),
                    roughness: m.roughness(),
                    thermal_absorptance: thermal,
                    solar_absorptance: solar,
                    visible_absorptance: visible,
                })
            }
        }
    }
}

impl OpaqueLayer {
    /// Reads a material dictionary.
    ///
    /// Dictionaries of non-opaque materials (e.g. window glazing) are rejected
    /// with [`Error::Type`].
    pub fn from_dict(value: &Value) -> Result<Self> {
        let type_tag = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::validation("material dictionary has no \"type\" key"))?;
        match type_tag {
            "EnergyMaterial" | "EnergyMaterialNoMass" => {
                let dict: MaterialDict = serde_json::from_value(value.clone())?;
                Self::try_from(dict)
            }
            other => Err(Error::Type {
                expected: "opaque material (EnergyMaterial or EnergyMaterialNoMass)".to_string(),
                found: other.to_string(),
            }),
        }
    }

    pub fn to_dict(&self) -> Result<Value> {
        Ok(serde_json::to_value(MaterialDict::from(self))?)
    }
}

impl OpaqueConstruction {
    /// Reads a full construction dictionary (materials embedded).
    pub fn from_dict(value: &Value) -> Result<Self> {
        let dict: OpaqueConstructionDict = serde_json::from_value(value.clone())?;
        if dict.type_tag != OPAQUE_CONSTRUCTION_TYPE {
            return Err(Error::validation(format!(
                "expected {OPAQUE_CONSTRUCTION_TYPE}, got {}",
                dict.type_tag
            )));
        }
        let mut materials = HashMap::new();
        for m in dict.materials.as_deref().unwrap_or_default() {
            let layer = OpaqueLayer::from_dict(m)?;
            materials.insert(layer.get_name().to_string(), layer);
        }
        Self::from_layer_names(&dict.name, &dict.layers, &materials, "construction materials")
    }

    /// Reads an abridged construction dictionary, resolving layer names
    /// against `materials`.
    pub fn from_dict_abridged(
        value: &Value,
        materials: &HashMap<String, OpaqueLayer>,
    ) -> Result<Self> {
        let dict: OpaqueConstructionDict = serde_json::from_value(value.clone())?;
        if dict.type_tag != OPAQUE_CONSTRUCTION_ABRIDGED_TYPE {
            return Err(Error::validation(format!(
                "expected {OPAQUE_CONSTRUCTION_ABRIDGED_TYPE}, got {}",
                dict.type_tag
            )));
        }
        Self::from_layer_names(&dict.name, &dict.layers, materials, "the supplied materials")
    }

    fn from_layer_names(
        name: &str,
        layer_names: &[String],
        materials: &HashMap<String, OpaqueLayer>,
        source_name: &str,
    ) -> Result<Self> {
        let layers = layer_names
            .iter()
            .map(|n| {
                materials
                    .get(n)
                    .cloned()
                    .ok_or_else(|| Error::lookup(n, source_name))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(name, layers)
    }

    /// Dictionary representation. The abridged form lists layer names only.
    pub fn to_dict(&self, abridged: bool) -> Result<Value> {
        let materials = if abridged {
            None
        } else {
            Some(
                self.unique_materials()
                    .into_iter()
                    .map(|m| m.to_dict())
                    .collect::<Result<Vec<_>>>()?,
            )
        };
        let dict = OpaqueConstructionDict {
            type_tag: if abridged {
                OPAQUE_CONSTRUCTION_ABRIDGED_TYPE
            } else {
                OPAQUE_CONSTRUCTION_TYPE
            }
            .to_string(),
            name: self.get_name().to_string(),
            layers: self.layer_names().into_iter().map(String::from).collect(),
            materials,
        };
        Ok(serde_json::to_value(dict)?)
    }
}

impl ShadeConstruction {
    pub fn from_dict(value: &Value) -> Result<Self> {
        let dict: ShadeConstructionDict = serde_json::from_value(value.clone())?;
        if dict.type_tag != SHADE_CONSTRUCTION_TYPE {
            return Err(Error::validation(format!(
                "expected {SHADE_CONSTRUCTION_TYPE}, got {}",
                dict.type_tag
            )));
        }
        Ok(Self::new(&dict.name)?
            .with_reflectances(dict.solar_reflectance, dict.visible_reflectance)?
            .with_specular(dict.is_specular))
    }

    pub fn to_dict(&self) -> Result<Value> {
        Ok(serde_json::to_value(ShadeConstructionDict {
            type_tag: SHADE_CONSTRUCTION_TYPE.to_string(),
            name: self.get_name().to_string(),
            solar_reflectance: self.solar_reflectance(),
            visible_reflectance: self.visible_reflectance(),
            is_specular: self.is_specular(),
        })?)
    }
}

/// Material entry of the OpenStudio standards library (IP units).
#[derive(Debug, Clone, Deserialize)]
pub struct StandardsMaterialDict {
    pub name: String,
    pub material_type: String,
    #[serde(default)]
    pub roughness: Option<Roughness>,
    /// in
    #[serde(default)]
    pub thickness: Option<f64>,
    /// Btu*in/(h*ft2*F)
    #[serde(default)]
    pub conductivity: Option<f64>,
    /// lb/ft3
    #[serde(default)]
    pub density: Option<f64>,
    /// Btu/(lb*F)
    #[serde(default)]
    pub specific_heat: Option<f64>,
    /// h*ft2*F/Btu
    #[serde(default)]
    pub resistance: Option<f64>,
    #[serde(default)]
    pub thermal_absorptance: Option<f64>,
    #[serde(default)]
    pub solar_absorptance: Option<f64>,
    #[serde(default)]
    pub visible_absorptance: Option<f64>,
}

/// Construction entry of the OpenStudio standards library. Only the name
/// and the material names (outside to inside) are used.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardsConstructionDict {
    pub name: String,
    pub materials: Vec<String>,
}

impl StandardsMaterialDict {
    fn required(&self, value: Option<f64>, field: &str) -> Result<f64> {
        value.ok_or_else(|| {
            Error::validation(format!("standards material {} has no {field}", self.name))
        })
    }

    fn absorptances(&self) -> (f64, f64, Option<f64>) {
        (
            self.thermal_absorptance
                .unwrap_or(DEFAULT_THERMAL_ABSORPTANCE),
            self.solar_absorptance.unwrap_or(DEFAULT_SOLAR_ABSORPTANCE),
            self.visible_absorptance,
        )
    }
}

impl OpaqueLayer {
    /// Reads a material from the OpenStudio standards library, converting
    /// from IP units.
    ///
    /// `StandardOpaqueMaterial` becomes a mass layer, `MasslessOpaqueMaterial`
    /// and `AirGap` become no-mass layers. Any other `material_type` is an
    /// [`Error::Type`].
    pub fn from_standards_dict(value: &Value) -> Result<Self> {
        let d: StandardsMaterialDict = serde_json::from_value(value.clone())?;
        let (thermal, solar, visible) = d.absorptances();
        let roughness = d.roughness.unwrap_or_default();
        match d.material_type.as_str() {
            "StandardOpaqueMaterial" => Ok(EnergyMaterial::new(
                &d.name,
                d.required(d.thickness, "thickness")? * INCH_TO_M,
                d.required(d.conductivity, "conductivity")? * CONDUCTIVITY_IP_TO_SI,
                d.required(d.density, "density")? * DENSITY_IP_TO_SI,
                d.required(d.specific_heat, "specific_heat")? * SPECIFIC_HEAT_IP_TO_SI,
            )?
            .with_roughness(roughness)
            .with_absorptances(thermal, solar, visible)?
            .into()),
            "MasslessOpaqueMaterial" | "AirGap" => Ok(EnergyMaterialNoMass::new(
                &d.name,
                d.required(d.resistance, "resistance")? / R_IP_PER_SI,
            )?
            .with_roughness(roughness)
            .with_absorptances(thermal, solar, visible)?
            .into()),
            other => Err(Error::Type {
                expected: "opaque standards material (StandardOpaqueMaterial, \
                           MasslessOpaqueMaterial or AirGap)"
                    .to_string(),
                found: other.to_string(),
            }),
        }
    }
}

impl OpaqueConstruction {
    /// Reads a construction from the OpenStudio standards library.
    ///
    /// `data_materials` maps material names to their standards dictionaries.
    /// A material name missing from it is an [`Error::Lookup`].
    pub fn from_standards_dict(
        value: &Value,
        data_materials: &HashMap<String, Value>,
    ) -> Result<Self> {
        let dict: StandardsConstructionDict = serde_json::from_value(value.clone())?;
        let layers = dict
            .materials
            .iter()
            .map(|n| {
                data_materials
                    .get(n)
                    .ok_or_else(|| Error::lookup(n, "the OpenStudio standards material library"))
                    .and_then(OpaqueLayer::from_standards_dict)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(&dict.name, layers)
    }
}

impl FaceEnergyProperties {
    /// Dictionary under an `energy` key. The construction is written in full,
    /// by name when `abridged`, or as `null` when the face has none of its
    /// own.
    pub fn to_dict(&self, abridged: bool) -> Result<Value> {
        let construction = match self.construction() {
            Some(c) if abridged => Value::String(c.get_name().to_string()),
            Some(c) => c.to_dict(false)?,
            None => Value::Null,
        };
        let type_tag = if abridged {
            FACE_ENERGY_PROPERTIES_ABRIDGED_TYPE
        } else {
            FACE_ENERGY_PROPERTIES_TYPE
        };
        Ok(json!({
            "energy": {
                "type": type_tag,
                "construction": construction,
            }
        }))
    }
}

/// Serializes a construction to a pretty JSON string (full form).
pub fn to_json_string(construction: &OpaqueConstruction) -> Result<String> {
    Ok(serde_json::to_string_pretty(&construction.to_dict(false)?)?)
}

/// Deserializes a construction from a JSON string (full form).
pub fn from_json_string(json: &str) -> Result<OpaqueConstruction> {
    let value: Value = serde_json::from_str(json)?;
    OpaqueConstruction::from_dict(&value)
}

/// Writes a construction to a JSON file (full form).
pub fn write_construction_json(path: &Path, construction: &OpaqueConstruction) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &construction.to_dict(false)?)?;
    Ok(())
}

/// Reads a construction from a JSON file (full form).
pub fn read_construction_json(path: &Path) -> Result<OpaqueConstruction> {
    let reader = BufReader::new(File::open(path)?);
    let value: Value = serde_json::from_reader(reader)?;
    OpaqueConstruction::from_dict(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn wall_dict() -> Value {
        json!({
            "type": "OpaqueConstruction",
            "name": "Generic Brick Wall",
            "layers": ["Brick", "Insulation", "Air Gap", "Brick"],
            "materials": [
                {
                    "type": "EnergyMaterial",
                    "name": "Brick",
                    "thickness": 0.1,
                    "conductivity": 0.9,
                    "density": 1920.0,
                    "specific_heat": 790.0,
                    "solar_absorptance": 0.65
                },
                {
                    "type": "EnergyMaterial",
                    "name": "Insulation",
                    "roughness": "MediumSmooth",
                    "thickness": 0.05,
                    "conductivity": 0.03,
                    "density": 43.0,
                    "specific_heat": 1210.0
                },
                {
                    "type": "EnergyMaterialNoMass",
                    "name": "Air Gap",
                    "r_value": 0.15
                }
            ]
        })
    }

    #[test]
    fn test_from_dict() {
        let c = OpaqueConstruction::from_dict(&wall_dict()).unwrap();
        assert_eq!(c.get_name(), "Generic Brick Wall");
        assert_eq!(c.layers().len(), 4);
        let expected = 2.0 * 0.1 / 0.9 + 0.05 / 0.03 + 0.15;
        assert!((c.r_value() - expected).abs() < 1e-12);
        assert_eq!(c.layers()[1].roughness(), Roughness::MediumSmooth);
        assert!((c.layers()[0].thermal_absorptance() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_dict_roundtrip() {
        let c = OpaqueConstruction::from_dict(&wall_dict()).unwrap();
        let d = c.to_dict(false).unwrap();
        assert_eq!(d["type"], "OpaqueConstruction");
        // Brick appears twice as a layer but once as a material.
        assert_eq!(d["materials"].as_array().unwrap().len(), 3);
        let back = OpaqueConstruction::from_dict(&d).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_wrong_type_tag() {
        let mut d = wall_dict();
        d["type"] = json!("WindowConstruction");
        assert!(matches!(
            OpaqueConstruction::from_dict(&d),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_window_material_is_type_error() {
        let mut d = wall_dict();
        d["materials"][2] = json!({
            "type": "EnergyWindowMaterialGlazing",
            "name": "Air Gap",
            "thickness": 0.003
        });
        match OpaqueConstruction::from_dict(&d) {
            Err(Error::Type { found, .. }) => assert_eq!(found, "EnergyWindowMaterialGlazing"),
            other => panic!("expected type error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_layer_is_lookup_error() {
        let mut d = wall_dict();
        d["layers"] = json!(["Brick", "Stucco"]);
        match OpaqueConstruction::from_dict(&d) {
            Err(Error::Lookup { name, .. }) => assert_eq!(name, "Stucco"),
            other => panic!("expected lookup error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_material_value_is_validation_error() {
        let mut d = wall_dict();
        d["materials"][0]["solar_absorptance"] = json!(1.4);
        assert!(matches!(
            OpaqueConstruction::from_dict(&d),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_abridged() {
        let c = OpaqueConstruction::from_dict(&wall_dict()).unwrap();
        let d = c.to_dict(true).unwrap();
        assert_eq!(d["type"], "OpaqueConstructionAbridged");
        assert!(d.get("materials").is_none());

        let materials: HashMap<String, OpaqueLayer> = c
            .unique_materials()
            .into_iter()
            .map(|m| (m.get_name().to_string(), m.clone()))
            .collect();
        let back = OpaqueConstruction::from_dict_abridged(&d, &materials).unwrap();
        assert_eq!(back, c);

        let err = OpaqueConstruction::from_dict_abridged(&d, &HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::Lookup { .. }));
        // A full dictionary is not an abridged one.
        assert!(OpaqueConstruction::from_dict_abridged(&wall_dict(), &materials).is_err());
    }

    #[test]
    fn test_visible_absorptance_kept_optional() {
        let layer: OpaqueLayer = EnergyMaterial::new("Tile", 0.02, 0.06, 368.0, 590.0)
            .unwrap()
            .into();
        let d = layer.to_dict().unwrap();
        assert!(d.get("visible_absorptance").is_none());
        assert_eq!(OpaqueLayer::from_dict(&d).unwrap(), layer);
    }

    #[test]
    fn test_shade_dict() {
        let s = ShadeConstruction::from_dict(&json!({
            "type": "ShadeConstruction",
            "name": "Overhang",
            "solar_reflectance": 0.35
        }))
        .unwrap();
        assert_eq!(s.solar_reflectance(), 0.35);
        assert_eq!(s.visible_reflectance(), 0.2);
        assert!(!s.is_specular());
        let back = ShadeConstruction::from_dict(&s.to_dict().unwrap()).unwrap();
        assert_eq!(back, s);

        let bad = ShadeConstruction::from_dict(&json!({
            "type": "ShadeConstruction",
            "name": "Overhang",
            "solar_reflectance": 2.0
        }));
        assert!(matches!(bad, Err(Error::Validation { .. })));
    }

    fn standards_materials() -> HashMap<String, Value> {
        [
            json!({
                "name": "1IN Stucco",
                "material_type": "StandardOpaqueMaterial",
                "roughness": "Smooth",
                "thickness": 1.0,
                "conductivity": 4.86,
                "density": 116.0,
                "specific_heat": 0.2,
                "thermal_absorptance": 0.9,
                "solar_absorptance": 0.92,
                "visible_absorptance": 0.92
            }),
            json!({
                "name": "Typical Insulation",
                "material_type": "MasslessOpaqueMaterial",
                "roughness": "Smooth",
                "resistance": 10.0,
                "thermal_absorptance": null,
                "solar_absorptance": null
            }),
            json!({
                "name": "Wall Air Space",
                "material_type": "AirGap",
                "resistance": 0.9
            }),
            json!({
                "name": "Clear 3mm",
                "material_type": "StandardGlazing",
                "thickness": 0.118
            }),
        ]
        .into_iter()
        .map(|m| (m["name"].as_str().unwrap().to_string(), m))
        .collect()
    }

    #[test]
    fn test_from_standards_dict() {
        let data = json!({
            "name": "Typical Insulated Exterior Wall",
            "intended_surface_type": "ExteriorWall",
            "standards_construction_type": "Mass",
            "insulation_layer": "Typical Insulation",
            "materials": ["1IN Stucco", "Typical Insulation", "Wall Air Space"]
        });
        let c = OpaqueConstruction::from_standards_dict(&data, &standards_materials()).unwrap();
        assert_eq!(c.layers().len(), 3);

        let stucco = &c.layers()[0];
        assert_eq!(stucco.roughness(), Roughness::Smooth);
        assert!((stucco.thickness().unwrap() - 0.0254).abs() < 1e-12);
        assert!((stucco.r_value() - 0.0254 / (4.86 * 0.14413)).abs() < 1e-12);
        assert_eq!(stucco.solar_absorptance(), 0.92);

        let insulation = &c.layers()[1];
        assert!(insulation.thickness().is_none());
        assert!((insulation.r_value() - 10.0 / 5.678263337).abs() < 1e-12);
        assert_eq!(insulation.thermal_absorptance(), DEFAULT_THERMAL_ABSORPTANCE);
        assert_eq!(insulation.roughness(), Roughness::Smooth);

        let gap = &c.layers()[2];
        assert_eq!(gap.roughness(), Roughness::MediumRough);
        assert!((gap.r_value() - 0.9 / 5.678263337).abs() < 1e-12);
    }

    #[test]
    fn test_standards_dict_errors() {
        let materials = standards_materials();
        let missing = json!({"name": "Wall", "materials": ["1IN Stucco", "8IN Concrete"]});
        match OpaqueConstruction::from_standards_dict(&missing, &materials) {
            Err(Error::Lookup { name, .. }) => assert_eq!(name, "8IN Concrete"),
            other => panic!("expected lookup error, got {other:?}"),
        }

        let glazed = json!({"name": "Window", "materials": ["Clear 3mm"]});
        match OpaqueConstruction::from_standards_dict(&glazed, &materials) {
            Err(Error::Type { found, .. }) => assert_eq!(found, "StandardGlazing"),
            other => panic!("expected type error, got {other:?}"),
        }

        let no_thickness = json!({
            "name": "Broken",
            "material_type": "StandardOpaqueMaterial",
            "conductivity": 1.0,
            "density": 100.0,
            "specific_heat": 0.2
        });
        assert!(matches!(
            OpaqueLayer::from_standards_dict(&no_thickness),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_face_energy_properties_dict() {
        use crate::sim::energy::construction_set::FaceType;
        use std::sync::Arc;

        let props = FaceEnergyProperties::new(FaceType::Wall);
        let d = props.to_dict(false).unwrap();
        assert_eq!(d["energy"]["type"], "FaceEnergyProperties");
        assert!(d["energy"]["construction"].is_null());

        let wall = Arc::new(OpaqueConstruction::from_dict(&wall_dict()).unwrap());
        let assigned = props.with_construction(Some(wall));
        let full = assigned.to_dict(false).unwrap();
        assert_eq!(full["energy"]["construction"]["type"], "OpaqueConstruction");
        assert_eq!(
            OpaqueConstruction::from_dict(&full["energy"]["construction"]).unwrap(),
            **assigned.construction().unwrap()
        );

        let abridged = assigned.to_dict(true).unwrap();
        assert_eq!(abridged["energy"]["type"], "FaceEnergyPropertiesAbridged");
        assert_eq!(abridged["energy"]["construction"], "Generic Brick Wall");
    }

    #[test]
    fn test_json_file_roundtrip() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("wall.json");
        let c = OpaqueConstruction::from_dict(&wall_dict())?;
        write_construction_json(&path, &c)?;
        let loaded = read_construction_json(&path)?;
        assert_eq!(loaded, c);

        let s = to_json_string(&c)?;
        assert!(s.contains("\"Generic Brick Wall\""));
        assert_eq!(from_json_string(&s)?, c);
        Ok(())
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = read_construction_json(Path::new("/nonexistent/path/wall.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
