//! Module, thermal, and inverter performance models.

/// Sandia/CEC inverter efficiency curve.
pub mod inverter;
/// Sandia Array Performance Model DC chain.
pub mod module;
pub mod temperature;

// Re-export the main types for convenience
pub use inverter::InverterParams;
pub use module::ModuleParams;
pub use module::SapmOutput;
pub use temperature::ThermalParams;
