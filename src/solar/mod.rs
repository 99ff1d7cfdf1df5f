//! Solar geometry and irradiance decomposition.

/// Closure-relation DNI, airmass, and plane-of-array transposition.
pub mod irradiance;
/// NREL SPA wrapper with refraction and ΔT handling.
pub mod position;

pub use position::SolarCalculator;
