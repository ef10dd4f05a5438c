use std::collections::HashMap;

use thermal_envelope::io::{extract_all_from_idf, json};
use thermal_envelope::sim::energy::convection::{
    STANDARD_EXTERIOR_H, effective_interior_angle, interior_film_h_simple,
};
use thermal_envelope::{
    ConstructionLibrary, EnergyMaterial, EnergyMaterialNoMass, Error, HasName, OpaqueConstruction,
    OpaqueLayer, ProfileConditions, temperature_profiles,
};

fn layer(name: &str, thickness: f64, conductivity: f64) -> OpaqueLayer {
    EnergyMaterial::new(name, thickness, conductivity, 1000.0, 1000.0)
        .unwrap()
        .into()
}

fn constructions_1_to_10() -> Vec<OpaqueConstruction> {
    (1..=10)
        .map(|n| {
            let layers = (0..n)
                .map(|i| {
                    if i % 3 == 2 {
                        EnergyMaterialNoMass::new(&format!("Gap {i}"), 0.15)
                            .unwrap()
                            .into()
                    } else {
                        layer(&format!("Layer {i}"), 0.05 + 0.01 * i as f64, 0.1 + 0.2 * i as f64)
                    }
                })
                .collect();
            OpaqueConstruction::new(&format!("Assembly {n}"), layers).unwrap()
        })
        .collect()
}

#[test]
fn test_r_value_and_u_factor_identities() {
    for c in constructions_1_to_10() {
        let sum: f64 = c.layer_resistances().iter().sum();
        assert!((sum - c.r_value()).abs() < 1e-12);

        let r_films = 1.0 / STANDARD_EXTERIOR_H + 1.0 / interior_film_h_simple(0.9);
        let u = 1.0 / (c.r_value() + r_films);
        assert!((u - c.u_factor()).abs() < 1e-12, "{}", c.get_name());
    }
}

#[test]
fn test_profile_shape_and_monotonicity() {
    let winter = ProfileConditions::new();
    let summer = ProfileConditions::with_temperatures(35.0, 24.0);
    for c in constructions_1_to_10() {
        let n = c.layers().len();
        for cond in [winter, summer] {
            let p = c.temperature_profile(&cond).unwrap();
            assert_eq!(p.temperatures().len(), n + 3);
            assert_eq!(p.resistances().len(), n + 2);
            assert_eq!(p.temperatures()[0], cond.outside_temperature);
            assert_eq!(p.temperatures()[n + 2], cond.inside_temperature);

            let rising = cond.inside_temperature > cond.outside_temperature;
            for w in p.temperatures().windows(2) {
                assert_eq!(w[1] > w[0], rising, "{}: {:?}", c.get_name(), p.temperatures());
            }

            let q = p.heat_flux();
            let total = (cond.outside_temperature - cond.inside_temperature) / q;
            assert!((p.r_factor() - total).abs() < 1e-9);
        }
    }
}

#[test]
fn test_profile_is_idempotent() {
    let cond = ProfileConditions {
        angle: 30.0,
        wind_speed: 2.0,
        ..ProfileConditions::with_temperatures(30.0, 22.0)
    };
    for c in constructions_1_to_10() {
        let a = c.temperature_profile(&cond).unwrap();
        let b = c.temperature_profile(&cond).unwrap();
        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(a.temperatures()), bits(b.temperatures()));
        assert_eq!(bits(a.resistances()), bits(b.resistances()));
    }
}

#[test]
fn test_angle_fix_up() {
    assert_eq!(effective_interior_angle(30.0, 30.0, 20.0), 150.0);
    assert_eq!(effective_interior_angle(150.0, 30.0, 20.0), 30.0);
    assert_eq!(effective_interior_angle(30.0, -18.0, 21.0), 30.0);
    assert_eq!(effective_interior_angle(90.0, 30.0, 20.0), 90.0);
    assert_eq!(effective_interior_angle(90.0, -18.0, 21.0), 90.0);
}

#[test]
fn test_layer_count_bounds() {
    assert!(matches!(
        OpaqueConstruction::new("Empty", vec![]),
        Err(Error::Validation { .. })
    ));
    let eleven = (0..11).map(|i| layer(&format!("L{i}"), 0.01, 1.0)).collect();
    assert!(matches!(
        OpaqueConstruction::new("Too Many", eleven),
        Err(Error::Validation { .. })
    ));
}

#[test]
fn test_window_material_rejected_as_layer() {
    let glazing = serde_json::json!({
        "type": "EnergyWindowMaterialGlazing",
        "name": "Clear 3mm"
    });
    assert!(matches!(
        OpaqueLayer::from_dict(&glazing),
        Err(Error::Type { .. })
    ));
}

#[test]
fn test_single_layer_end_to_end() {
    // 0.2 m thick, R = 1.0
    let c = OpaqueConstruction::new("Block Wall", vec![layer("Block", 0.2, 0.2)]).unwrap();
    let cond = ProfileConditions {
        outside_temperature: -18.0,
        inside_temperature: 21.0,
        wind_speed: 6.7,
        height: 1.0,
        angle: 90.0,
        pressure: 101325.0,
    };
    let p = c.temperature_profile(&cond).unwrap();
    let t = p.temperatures();
    assert_eq!(t.len(), 4);
    assert_eq!(t[0], -18.0);
    assert_eq!(t[3], 21.0);
    assert!(-18.0 < t[1] && t[1] < t[2] && t[2] < 21.0, "{t:?}");
    assert!(p.heat_flux() < 0.0);
    assert!((p.resistances()[1] - 1.0).abs() < 1e-12);
}

#[test]
fn test_batch_extraction_keeps_only_opaque() {
    let idf = "\
Material,
  Concrete,            !- name
  MediumRough,         !- roughness
  0.2,                 !- thickness
  1.95,                !- conductivity
  2240,                !- density
  900;                 !- specific heat
Material:NoMass,
  Cavity,              !- name
  Rough,               !- roughness
  0.17;                !- thermal resistance
WindowMaterial:Glazing,
  Clear 6mm,           !- name
  SpectralAverage,
  ,
  0.006;
WindowMaterial:Gas,
  Argon 13mm,
  Argon,
  0.0127;
Construction,
  Cavity Wall,         !- name
  Concrete,            !- layer 1
  Cavity,              !- layer 2
  Concrete;            !- layer 3
Construction,
  Double Glazing,      !- name
  Clear 6mm,
  Argon 13mm,
  Clear 6mm;
";
    let (constructions, materials) = extract_all_from_idf(idf).unwrap();
    assert_eq!(materials.len(), 2);
    assert_eq!(constructions.len(), 1);
    assert_eq!(constructions[0].get_name(), "Cavity Wall");
    let expected = 2.0 * 0.2 / 1.95 + 0.17;
    assert!((constructions[0].r_value() - expected).abs() < 1e-12);
}

#[test]
fn test_library_dict_roundtrip_and_batch() {
    let lib = ConstructionLibrary::with_presets();
    let names = lib.construction_names();
    let constructions: Vec<OpaqueConstruction> = names
        .iter()
        .map(|n| lib.construction(n).unwrap().clone())
        .collect();

    let mut materials = HashMap::new();
    for name in lib.material_names() {
        materials.insert(name.to_string(), lib.material(name).unwrap().clone());
    }
    for c in &constructions {
        let full = json::from_json_string(&json::to_json_string(c).unwrap()).unwrap();
        assert_eq!(&full, c);
        let abridged =
            OpaqueConstruction::from_dict_abridged(&c.to_dict(true).unwrap(), &materials).unwrap();
        assert!((abridged.r_value() - c.r_value()).abs() < 1e-12);
    }

    let cond = ProfileConditions::new();
    let profiles = temperature_profiles(&constructions, &cond);
    assert_eq!(profiles.len(), constructions.len());
    for (c, p) in constructions.iter().zip(profiles) {
        let p = p.unwrap();
        assert!(p.r_factor() > c.r_value(), "{}", c.get_name());
    }
}
