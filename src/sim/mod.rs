pub mod energy;
pub mod materials;
