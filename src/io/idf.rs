//! EnergyPlus IDF text for opaque materials and constructions.
//!
//! Only the object classes needed for opaque envelopes are understood:
//! `Material`, `Material:NoMass`, `Material:AirGap`, `Construction` and
//! `ShadingProperty:Reflectance` (write only). Anything else found in a file
//! is ignored by [`extract_all_from_idf`].

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::name::HasName;
use crate::sim::energy::construction::OpaqueConstruction;
use crate::sim::energy::shade::ShadeConstruction;
use crate::sim::materials::{
    DEFAULT_SOLAR_ABSORPTANCE, DEFAULT_THERMAL_ABSORPTANCE, EnergyMaterial, EnergyMaterialNoMass,
    OpaqueLayer, OpaqueMaterial, Roughness,
};

pub const MATERIAL_CLASS: &str = "Material";
pub const MATERIAL_NO_MASS_CLASS: &str = "Material:NoMass";
pub const MATERIAL_AIR_GAP_CLASS: &str = "Material:AirGap";
pub const CONSTRUCTION_CLASS: &str = "Construction";
pub const SHADING_REFLECTANCE_CLASS: &str = "ShadingProperty:Reflectance";

/// Column where `!-` field comments start in written IDF.
const COMMENT_COLUMN: usize = 30;

/// Removes `!` comments from every line.
fn strip_comments(text: &str) -> String {
    text.lines()
        .map(|line| line.split('!').next().unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Class name of the first object in `text`, if any.
fn class_name(text: &str) -> Option<String> {
    strip_comments(text)
        .split([',', ';'])
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Splits one IDF object into its fields.
///
/// Comments are stripped and the class name is dropped, so the first returned
/// field is usually the object name. With `expected_type` set, the class name
/// must match it (case-insensitively).
pub fn parse_idf_string(text: &str, expected_type: Option<&str>) -> Result<Vec<String>> {
    let clean = strip_comments(text);
    let body = clean
        .split_once(';')
        .map(|(body, _)| body)
        .ok_or_else(|| Error::idf("object is not terminated by ';'"))?;

    let mut fields = body.split(',').map(|f| f.trim().to_string());
    let class = fields
        .next()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| Error::idf("object has no class name"))?;
    if let Some(expected) = expected_type
        && !class.eq_ignore_ascii_case(expected)
    {
        return Err(Error::idf(format!("expected {expected} object, got {class}")));
    }
    Ok(fields.collect())
}

/// Formats an IDF object with one field per line and `!-` comments.
pub fn generate_idf_string(class: &str, values: &[String], comments: &[&str]) -> String {
    let mut out = format!("{class},\n");
    for (i, value) in values.iter().enumerate() {
        let sep = if i + 1 == values.len() { ';' } else { ',' };
        let field = format!("  {value}{sep}");
        match comments.get(i) {
            Some(comment) => {
                out.push_str(&format!("{field:<width$}!- {comment}\n", width = COMMENT_COLUMN));
            }
            None => {
                out.push_str(&field);
                out.push('\n');
            }
        }
    }
    out
}

fn parse_number(fields: &[String], index: usize, what: &str) -> Result<f64> {
    let raw = fields
        .get(index)
        .ok_or_else(|| Error::idf(format!("missing {what}")))?;
    raw.parse::<f64>()
        .map_err(|_| Error::idf(format!("{what} \"{raw}\" is not a number")))
}

/// Optional trailing numeric field. Missing or blank fields give `None`.
fn parse_optional(fields: &[String], index: usize, what: &str) -> Result<Option<f64>> {
    match fields.get(index) {
        Some(raw) if !raw.is_empty() => parse_number(fields, index, what).map(Some),
        _ => Ok(None),
    }
}

fn required_name(fields: &[String]) -> Result<&str> {
    fields
        .first()
        .map(String::as_str)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::idf("object has no name"))
}

/// Reads the `[thermal, solar, visible]` absorptances starting at `start`.
fn parse_absorptances(fields: &[String], start: usize) -> Result<(f64, f64, Option<f64>)> {
    let thermal = parse_optional(fields, start, "thermal absorptance")?
        .unwrap_or(DEFAULT_THERMAL_ABSORPTANCE);
    let solar =
        parse_optional(fields, start + 1, "solar absorptance")?.unwrap_or(DEFAULT_SOLAR_ABSORPTANCE);
    let visible = parse_optional(fields, start + 2, "visible absorptance")?;
    Ok((thermal, solar, visible))
}

fn fmt_absorptances(m: &dyn OpaqueMaterial) -> [String; 3] {
    [
        m.thermal_absorptance().to_string(),
        m.solar_absorptance().to_string(),
        m.visible_absorptance().to_string(),
    ]
}

impl EnergyMaterial {
    /// Reads a `Material` object.
    pub fn from_idf(text: &str) -> Result<Self> {
        let fields = parse_idf_string(text, Some(MATERIAL_CLASS))?;
        let name = required_name(&fields)?;
        let roughness: Roughness = fields
            .get(1)
            .ok_or_else(|| Error::idf(format!("material {name} has no roughness")))?
            .parse()?;
        let (thermal, solar, visible) = parse_absorptances(&fields, 6)?;
        EnergyMaterial::new(
            name,
            parse_number(&fields, 2, "thickness")?,
            parse_number(&fields, 3, "conductivity")?,
            parse_number(&fields, 4, "density")?,
            parse_number(&fields, 5, "specific heat")?,
        )?
        .with_roughness(roughness)
        .with_absorptances(thermal, solar, visible)
    }

    pub fn to_idf(&self) -> String {
        let mut values = vec![
            self.get_name().to_string(),
            self.roughness().to_string(),
            self.layer_thickness().to_string(),
            self.conductivity().to_string(),
            self.density().to_string(),
            self.specific_heat().to_string(),
        ];
        values.extend(fmt_absorptances(self));
        let comments = [
            "name",
            "roughness",
            "thickness {m}",
            "conductivity {W/m-K}",
            "density {kg/m3}",
            "specific heat {J/kg-K}",
            "thermal absorptance",
            "solar absorptance",
            "visible absorptance",
        ];
        generate_idf_string(MATERIAL_CLASS, &values, &comments)
    }
}

impl EnergyMaterialNoMass {
    /// Reads a `Material:NoMass` object.
    pub fn from_idf(text: &str) -> Result<Self> {
        let fields = parse_idf_string(text, Some(MATERIAL_NO_MASS_CLASS))?;
        let name = required_name(&fields)?;
        let roughness: Roughness = fields
            .get(1)
            .ok_or_else(|| Error::idf(format!("material {name} has no roughness")))?
            .parse()?;
        let (thermal, solar, visible) = parse_absorptances(&fields, 3)?;
        EnergyMaterialNoMass::new(name, parse_number(&fields, 2, "thermal resistance")?)?
            .with_roughness(roughness)
            .with_absorptances(thermal, solar, visible)
    }

    /// Reads a `Material:AirGap` object as a no-mass layer with default
    /// roughness and absorptances.
    pub fn from_idf_air_gap(text: &str) -> Result<Self> {
        let fields = parse_idf_string(text, Some(MATERIAL_AIR_GAP_CLASS))?;
        let name = required_name(&fields)?;
        EnergyMaterialNoMass::new(name, parse_number(&fields, 1, "thermal resistance")?)
    }

    pub fn to_idf(&self) -> String {
        let mut values = vec![
            self.get_name().to_string(),
            self.roughness().to_string(),
            self.r_value().to_string(),
        ];
        values.extend(fmt_absorptances(self));
        let comments = [
            "name",
            "roughness",
            "thermal resistance {m2-K/W}",
            "thermal absorptance",
            "solar absorptance",
            "visible absorptance",
        ];
        generate_idf_string(MATERIAL_NO_MASS_CLASS, &values, &comments)
    }
}

impl OpaqueLayer {
    /// Reads any opaque material object, dispatching on its class.
    ///
    /// Window material classes give [`Error::Type`].
    pub fn from_idf(text: &str) -> Result<Self> {
        let class = class_name(text).ok_or_else(|| Error::idf("object has no class name"))?;
        if class.eq_ignore_ascii_case(MATERIAL_CLASS) {
            Ok(EnergyMaterial::from_idf(text)?.into())
        } else if class.eq_ignore_ascii_case(MATERIAL_NO_MASS_CLASS) {
            Ok(EnergyMaterialNoMass::from_idf(text)?.into())
        } else if class.eq_ignore_ascii_case(MATERIAL_AIR_GAP_CLASS) {
            Ok(EnergyMaterialNoMass::from_idf_air_gap(text)?.into())
        } else {
            Err(Error::Type {
                expected: "opaque material (Material, Material:NoMass or Material:AirGap)"
                    .to_string(),
                found: class,
            })
        }
    }

    pub fn to_idf(&self) -> String {
        match self {
            OpaqueLayer::Mass(m) => m.to_idf(),
            OpaqueLayer::NoMass(m) => m.to_idf(),
        }
    }
}

/// Opaque materials keyed by name. Objects of other material classes
/// (window glazing, gases) are skipped; a layer naming one of them fails
/// later as an unresolved lookup.
fn materials_by_name<S: AsRef<str>>(material_texts: &[S]) -> Result<HashMap<String, OpaqueLayer>> {
    let mut materials = HashMap::new();
    for text in material_texts {
        match OpaqueLayer::from_idf(text.as_ref()) {
            Ok(layer) => {
                materials.insert(layer.get_name().to_string(), layer);
            }
            Err(Error::Type { found, .. }) => debug!("Ignoring non-opaque material {found}"),
            Err(e) => return Err(e),
        }
    }
    Ok(materials)
}

fn construction_from_fields(
    fields: &[String],
    materials: &HashMap<String, OpaqueLayer>,
) -> Result<OpaqueConstruction> {
    let name = required_name(fields)?;
    let layers = fields[1..]
        .iter()
        .filter(|f| !f.is_empty())
        .map(|f| {
            materials
                .get(f)
                .cloned()
                .ok_or_else(|| Error::lookup(f, "the IDF materials"))
        })
        .collect::<Result<Vec<_>>>()?;
    OpaqueConstruction::new(name, layers)
}

impl OpaqueConstruction {
    /// Reads a `Construction` object whose layers are defined by
    /// `material_texts` (one IDF material object per entry).
    pub fn from_idf<S: AsRef<str>>(text: &str, material_texts: &[S]) -> Result<Self> {
        let materials = materials_by_name(material_texts)?;
        let fields = parse_idf_string(text, Some(CONSTRUCTION_CLASS))?;
        construction_from_fields(&fields, &materials)
    }

    /// The `Construction` object. Materials must be written separately,
    /// see [`OpaqueConstruction::unique_materials`].
    pub fn to_idf(&self) -> String {
        let mut values = vec![self.get_name().to_string()];
        values.extend(self.layer_names().into_iter().map(String::from));
        let mut comments = vec!["name".to_string()];
        comments.extend((1..values.len()).map(|i| format!("layer {i}")));
        let comments: Vec<&str> = comments.iter().map(String::as_str).collect();
        generate_idf_string(CONSTRUCTION_CLASS, &values, &comments)
    }
}

impl ShadeConstruction {
    /// The `ShadingProperty:Reflectance` object for a shade named
    /// `host_shade_name`.
    ///
    /// Specular shades are fully glazed with a construction named after this
    /// one.
    pub fn to_idf(&self, host_shade_name: &str) -> String {
        let mut values = vec![
            host_shade_name.to_string(),
            self.solar_reflectance().to_string(),
            self.visible_reflectance().to_string(),
        ];
        let mut comments = vec![
            "shading surface name",
            "solar reflectance",
            "visible reflectance",
        ];
        if self.is_specular() {
            values.push("1".to_string());
            values.push(self.get_name().to_string());
            comments.push("fraction of shading surface that is glazed");
            comments.push("glazing construction name");
        }
        generate_idf_string(SHADING_REFLECTANCE_CLASS, &values, &comments)
    }
}

/// Extracts every opaque construction and opaque material from IDF text.
///
/// Constructions whose layers do not all resolve to opaque materials (window
/// constructions, mostly) are skipped. Returns `(constructions, materials)` in
/// file order.
pub fn extract_all_from_idf(text: &str) -> Result<(Vec<OpaqueConstruction>, Vec<OpaqueLayer>)> {
    let clean = strip_comments(text);
    let class_re =
        Regex::new(r"^\s*([A-Za-z][\w:]*)\s*,").map_err(|e| Error::idf(e.to_string()))?;

    let mut materials = Vec::new();
    let mut construction_fields = Vec::new();
    // Every object ends with ';', wherever it starts on a line.
    for object in clean.split_inclusive(';').filter(|o| o.ends_with(';')) {
        let Some(class) = class_re
            .captures(object)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
        else {
            continue;
        };
        if class.eq_ignore_ascii_case(CONSTRUCTION_CLASS) {
            construction_fields.push(parse_idf_string(object, None)?);
        } else if class.eq_ignore_ascii_case(MATERIAL_CLASS)
            || class.eq_ignore_ascii_case(MATERIAL_NO_MASS_CLASS)
            || class.eq_ignore_ascii_case(MATERIAL_AIR_GAP_CLASS)
        {
            materials.push(OpaqueLayer::from_idf(object)?);
        }
    }

    let by_name: HashMap<String, OpaqueLayer> = materials
        .iter()
        .map(|m| (m.get_name().to_string(), m.clone()))
        .collect();
    let mut constructions = Vec::new();
    for fields in &construction_fields {
        match construction_from_fields(fields, &by_name) {
            Ok(c) => constructions.push(c),
            Err(e) if e.is_unresolved_record() => {
                debug!(
                    "Skipping construction {:?}: {e}",
                    fields.first().map_or("", String::as_str)
                );
            }
            Err(e) => return Err(e),
        }
    }
    debug!(
        "Extracted {} opaque constructions and {} materials",
        constructions.len(),
        materials.len()
    );
    Ok((constructions, materials))
}

/// Reads an IDF file and extracts its opaque constructions and materials.
pub fn extract_all_from_idf_file(
    path: &Path,
) -> Result<(Vec<OpaqueConstruction>, Vec<OpaqueLayer>)> {
    let text = std::fs::read_to_string(path)?;
    let (constructions, materials) = extract_all_from_idf(&text)?;
    if constructions.is_empty() {
        warn!("No opaque constructions found in {}", path.display());
    }
    Ok((constructions, materials))
}
