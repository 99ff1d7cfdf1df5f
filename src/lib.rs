//! Photovoltaic power estimation from ground-station weather observations.
//!
//! The chain runs solar position, irradiance decomposition, plane-of-array
//! transposition, the Sandia module and cell-temperature models, and the
//! Sandia inverter model. Every estimate is a pure function of one
//! weather observation; [`batch::run`] maps the chain over a series with
//! per-row error isolation.

pub mod batch;
pub mod catalog;
pub mod config;
pub mod error;
/// CSV export of batch results.
pub mod io;
pub mod plant;
/// Module, cell-temperature, and inverter models.
pub mod pv;
/// Solar geometry and irradiance decomposition.
pub mod solar;
pub mod types;

pub use catalog::Catalog;
pub use config::PlantConfig;
pub use error::Error;
pub use plant::PlantModel;
pub use types::{Observation, PowerResult};
