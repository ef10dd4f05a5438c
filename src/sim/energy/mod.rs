//! Steady-state heat transfer through opaque envelope constructions.

pub mod config;
pub mod construction;
pub mod construction_set;
pub mod convection;
pub mod library;
pub mod profile;
pub mod shade;
