pub mod error;
pub mod io;
pub mod name;
pub mod sim;

// Prelude
pub use error::{Error, Result};
pub use name::HasName;
pub use sim::energy::config::ProfileConditions;
pub use sim::energy::construction::{OpaqueConstruction, Side};
pub use sim::energy::construction_set::{
    BoundaryCondition, ConstructionSet, FaceType, resolve_face_construction,
};
pub use sim::energy::convection::{FilmCoefficientModel, Iso15099Films};
pub use sim::energy::library::ConstructionLibrary;
pub use sim::energy::profile::{TemperatureProfile, temperature_profiles};
pub use sim::energy::shade::ShadeConstruction;
pub use sim::materials::{
    EnergyMaterial, EnergyMaterialNoMass, OpaqueLayer, OpaqueMaterial, Roughness,
};
