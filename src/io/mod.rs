//! File I/O for materials and constructions.
//!
//! This module provides dictionary (JSON) serialization and EnergyPlus IDF
//! text reading and writing.

pub mod idf;
pub mod json;

pub use idf::{extract_all_from_idf, extract_all_from_idf_file, parse_idf_string};
pub use json::{read_construction_json, write_construction_json};
