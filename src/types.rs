//! Core input and output records for the estimation chain.

use std::fmt;

use chrono::{DateTime, FixedOffset};

/// One meteorological observation row.
///
/// Immutable input to the estimation chain. Latitude and longitude ride on
/// the row so a single batch can span sites; the plant configuration only
/// contributes the array geometry and altitude.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Timezone-aware observation timestamp.
    pub timestamp: DateTime<FixedOffset>,
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
    /// Global horizontal irradiance (W/m²).
    pub ghi: f64,
    /// Diffuse horizontal irradiance (W/m²).
    pub dhi: f64,
    /// Ambient air temperature (°C).
    pub temp_air: f64,
    /// Wind speed (m/s).
    pub wind_speed: f64,
}

impl Observation {
    /// Creates an observation row.
    ///
    /// # Arguments
    ///
    /// * `timestamp` - Timezone-aware measurement time
    /// * `latitude` - Degrees, positive north
    /// * `longitude` - Degrees, positive east
    /// * `ghi` - Global horizontal irradiance (W/m²)
    /// * `dhi` - Diffuse horizontal irradiance (W/m²)
    /// * `temp_air` - Ambient temperature (°C)
    /// * `wind_speed` - Wind speed (m/s)
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        latitude: f64,
        longitude: f64,
        ghi: f64,
        dhi: f64,
        temp_air: f64,
        wind_speed: f64,
    ) -> Self {
        Self {
            timestamp,
            latitude,
            longitude,
            ghi,
            dhi,
            temp_air,
            wind_speed,
        }
    }
}

/// Plane-of-array irradiance components (W/m²).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoaIrradiance {
    /// Beam component on the array plane.
    pub direct: f64,
    /// Anisotropic sky diffuse component.
    pub sky_diffuse: f64,
    /// Ground-reflected component.
    pub ground_diffuse: f64,
}

impl PoaIrradiance {
    /// Total diffuse irradiance on the plane.
    pub fn diffuse(&self) -> f64 {
        self.sky_diffuse + self.ground_diffuse
    }

    /// Total irradiance on the plane.
    pub fn global(&self) -> f64 {
        self.direct + self.diffuse()
    }
}

/// Stage-one output: solar geometry and irradiance for one observation.
#[derive(Debug, Clone, PartialEq)]
pub struct IrradianceEstimate {
    /// Apparent solar zenith angle (degrees).
    pub solar_zenith: f64,
    /// Solar azimuth angle (degrees, 0 = north, clockwise).
    pub solar_azimuth: f64,
    /// Extraterrestrial direct normal irradiance (W/m²).
    pub dni_extra: f64,
    /// Pressure-corrected airmass; `None` when the sun is below the horizon.
    pub airmass_absolute: Option<f64>,
    /// Direct normal irradiance from the closure relation (W/m²).
    pub dni: f64,
    /// Angle of incidence on the array plane (degrees).
    pub aoi: f64,
    /// Transposed plane-of-array components.
    pub poa: PoaIrradiance,
}

/// Final output row: one power estimate per observation.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerResult {
    /// Timestamp copied from the source observation.
    pub timestamp: DateTime<FixedOffset>,
    /// Total plane-of-array irradiance (W/m²).
    pub poa_global: f64,
    /// Modeled cell temperature (°C).
    pub cell_temperature: f64,
    /// Effective irradiance after spectral and reflection losses (W/m²).
    pub effective_irradiance: f64,
    /// DC power at the maximum power point (W).
    pub dc_power: f64,
    /// AC power after the inverter curve (W).
    pub ac_power: f64,
}

impl fmt::Display for PowerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | poa={:>7.1} W/m²  cell={:>5.1} °C | dc={:>7.2} W  ac={:>7.2} W",
            self.timestamp.to_rfc3339(),
            self.poa_global,
            self.cell_temperature,
            self.dc_power,
            self.ac_power,
        )
    }
}
