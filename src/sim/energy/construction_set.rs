//! Construction sets and face construction resolution.
//!
//! A face gets its construction from exactly one of three places, checked in
//! order:
//!
//! 1. a construction assigned to the face itself,
//! 2. the construction set of the parent room,
//! 3. the generic default construction set.
//!
//! [`resolve_face_construction`] implements this order. Nothing resolves
//! implicitly behind a getter.

use std::sync::{Arc, OnceLock};

use crate::sim::energy::construction::OpaqueConstruction;
use crate::sim::energy::library::{
    ConstructionLibrary, GENERIC_EXPOSED_FLOOR, GENERIC_EXTERIOR_WALL, GENERIC_GROUND_SLAB,
    GENERIC_INTERIOR_CEILING, GENERIC_INTERIOR_FLOOR, GENERIC_INTERIOR_WALL, GENERIC_ROOF,
    GENERIC_UNDERGROUND_ROOF, GENERIC_UNDERGROUND_WALL,
};

/// Type of a planar building face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceType {
    Wall,
    RoofCeiling,
    Floor,
}

/// What lies on the other side of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryCondition {
    Outdoors,
    Ground,
    /// Another room's face.
    Surface,
    Adiabatic,
}

/// Constructions for one face type, split by boundary condition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceSubset {
    pub exterior: Option<Arc<OpaqueConstruction>>,
    pub interior: Option<Arc<OpaqueConstruction>>,
    pub ground: Option<Arc<OpaqueConstruction>>,
}

impl FaceSubset {
    pub fn get(&self, boundary: BoundaryCondition) -> Option<&Arc<OpaqueConstruction>> {
        match boundary {
            BoundaryCondition::Outdoors => self.exterior.as_ref(),
            BoundaryCondition::Ground => self.ground.as_ref(),
            BoundaryCondition::Surface | BoundaryCondition::Adiabatic => self.interior.as_ref(),
        }
    }
}

/// Constructions assigned to faces by type and boundary condition.
///
/// Any entry may be left unset; unset entries fall through to the generic
/// set during resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstructionSet {
    pub name: String,
    pub wall: FaceSubset,
    pub floor: FaceSubset,
    pub roof_ceiling: FaceSubset,
}

impl ConstructionSet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn subset(&self, face: FaceType) -> &FaceSubset {
        match face {
            FaceType::Wall => &self.wall,
            FaceType::Floor => &self.floor,
            FaceType::RoofCeiling => &self.roof_ceiling,
        }
    }

    /// Construction explicitly set for this face type and boundary.
    pub fn get(
        &self,
        face: FaceType,
        boundary: BoundaryCondition,
    ) -> Option<&Arc<OpaqueConstruction>> {
        self.subset(face).get(boundary)
    }

    /// The library default set. Every entry is populated.
    pub fn generic() -> &'static ConstructionSet {
        static GENERIC: OnceLock<ConstructionSet> = OnceLock::new();
        GENERIC.get_or_init(|| {
            let lib = ConstructionLibrary::with_presets();
            let pick = |name: &str| lib.construction(name).ok().cloned().map(Arc::new);
            ConstructionSet {
                name: "Default Generic Construction Set".to_string(),
                wall: FaceSubset {
                    exterior: pick(GENERIC_EXTERIOR_WALL),
                    interior: pick(GENERIC_INTERIOR_WALL),
                    ground: pick(GENERIC_UNDERGROUND_WALL),
                },
                floor: FaceSubset {
                    exterior: pick(GENERIC_EXPOSED_FLOOR),
                    interior: pick(GENERIC_INTERIOR_FLOOR),
                    ground: pick(GENERIC_GROUND_SLAB),
                },
                roof_ceiling: FaceSubset {
                    exterior: pick(GENERIC_ROOF),
                    interior: pick(GENERIC_INTERIOR_CEILING),
                    ground: pick(GENERIC_UNDERGROUND_ROOF),
                },
            }
        })
    }
}

/// Energy properties of a single face.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceEnergyProperties {
    pub face_type: Option<FaceType>,
    construction: Option<Arc<OpaqueConstruction>>,
}

impl FaceEnergyProperties {
    pub fn new(face_type: FaceType) -> Self {
        Self {
            face_type: Some(face_type),
            construction: None,
        }
    }

    /// Returns a copy with the face construction set (or cleared with `None`).
    pub fn with_construction(&self, construction: Option<Arc<OpaqueConstruction>>) -> Self {
        Self {
            face_type: self.face_type,
            construction,
        }
    }

    /// Construction assigned to this face, without any fallback.
    pub fn construction(&self) -> Option<&Arc<OpaqueConstruction>> {
        self.construction.as_ref()
    }

    pub fn is_construction_set_by_user(&self) -> bool {
        self.construction.is_some()
    }
}

/// Resolves the construction of a face: explicit value, else the parent's
/// construction set, else the generic default set.
pub fn resolve_face_construction<'a>(
    explicit: Option<&'a Arc<OpaqueConstruction>>,
    parent: Option<&'a ConstructionSet>,
    face: FaceType,
    boundary: BoundaryCondition,
) -> Option<&'a Arc<OpaqueConstruction>> {
    explicit
        .or_else(|| parent.and_then(|set| set.get(face, boundary)))
        .or_else(|| ConstructionSet::generic().get(face, boundary))
}
