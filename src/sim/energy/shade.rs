use crate::error::{Result, ensure_in_range};
use crate::name::{HasName, valid_ep_name};

/// EnergyPlus default reflectance of shading surfaces.
pub const DEFAULT_SHADE_REFLECTANCE: f64 = 0.2;

/// Construction for shading surfaces (overhangs, fins, context).
///
/// Shades carry no thermal layers; only the reflectances of their faces are
/// described.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadeConstruction {
    name: String,
    solar_reflectance: f64,
    visible_reflectance: f64,
    /// Specular (mirror-like) rather than diffuse reflection.
    is_specular: bool,
}

impl ShadeConstruction {
    /// Creates a diffuse shade with the EnergyPlus default reflectances.
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            name: valid_ep_name(name, "construction name")?,
            solar_reflectance: DEFAULT_SHADE_REFLECTANCE,
            visible_reflectance: DEFAULT_SHADE_REFLECTANCE,
            is_specular: false,
        })
    }

    pub fn with_reflectances(mut self, solar: f64, visible: f64) -> Result<Self> {
        self.solar_reflectance =
            ensure_in_range(solar, 0.0, 1.0, "shade construction solar reflectance")?;
        self.visible_reflectance =
            ensure_in_range(visible, 0.0, 1.0, "shade construction visible reflectance")?;
        Ok(self)
    }

    pub fn with_specular(mut self, is_specular: bool) -> Self {
        self.is_specular = is_specular;
        self
    }

    pub fn solar_reflectance(&self) -> f64 {
        self.solar_reflectance
    }

    pub fn visible_reflectance(&self) -> f64 {
        self.visible_reflectance
    }

    pub fn is_specular(&self) -> bool {
        self.is_specular
    }

    /// True when every property matches the EnergyPlus default, in which case
    /// nothing needs to be written to IDF.
    pub fn is_default(&self) -> bool {
        self.solar_reflectance == DEFAULT_SHADE_REFLECTANCE
            && self.visible_reflectance == DEFAULT_SHADE_REFLECTANCE
            && !self.is_specular
    }
}

impl HasName for ShadeConstruction {
    fn get_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let s = ShadeConstruction::new("Overhang").unwrap();
        assert!(s.is_default());
        assert_eq!(s.solar_reflectance(), 0.2);
        assert!(!s.is_specular());
    }

    #[test]
    fn test_reflectance_bounds() {
        let s = ShadeConstruction::new("Fin").unwrap();
        assert!(matches!(
            s.clone().with_reflectances(1.5, 0.2),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            s.clone().with_reflectances(0.3, -0.1),
            Err(Error::Validation { .. })
        ));
        let ok = s.with_reflectances(0.35, 0.4).unwrap();
        assert!(!ok.is_default());
        assert_eq!(ok.visible_reflectance(), 0.4);
    }

    #[test]
    fn test_specular_not_default() {
        let s = ShadeConstruction::new("Mirror").unwrap().with_specular(true);
        assert!(s.is_specular());
        assert!(!s.is_default());
    }
}
