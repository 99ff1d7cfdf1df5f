//! Solar geometry via the NREL Solar Position Algorithm.

use chrono::{DateTime, Datelike, FixedOffset};
use solar_positioning::{RefractionCorrection, SolarPosition, spa, time::DeltaT};

use crate::error::Error;
use crate::solar::irradiance;

/// Solar geometry context for one site.
///
/// Bundles the site altitude so repeated position calls share the same
/// barometric pressure for refraction correction.
#[derive(Debug, Clone, Copy)]
pub struct SolarCalculator {
    /// Site altitude above sea level (m).
    pub altitude_m: f64,
}

impl SolarCalculator {
    /// Creates a calculator for a site altitude.
    pub fn new(altitude_m: f64) -> Self {
        Self { altitude_m }
    }

    /// ISA barometric pressure at the site altitude (Pa).
    pub fn pressure_pa(&self) -> f64 {
        irradiance::pressure_at_altitude(self.altitude_m)
    }

    /// Apparent solar position for a timestamp and location.
    ///
    /// ΔT is estimated from the date. Refraction uses the site pressure
    /// and the ambient temperature, falling back to the standard
    /// atmosphere when the combination is out of the correction's range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the ephemeris rejects the
    /// date or coordinates.
    pub fn position(
        &self,
        timestamp: DateTime<FixedOffset>,
        latitude: f64,
        longitude: f64,
        temp_air: f64,
    ) -> Result<SolarPosition, Error> {
        let delta_t = DeltaT::estimate_from_date(timestamp.year(), timestamp.month())?;
        let pressure_hpa = self.pressure_pa() / 100.0;
        let refraction = RefractionCorrection::new(pressure_hpa, temp_air)
            .unwrap_or_else(|_| RefractionCorrection::standard());

        let position = spa::solar_position(
            timestamp,
            latitude,
            longitude,
            self.altitude_m,
            delta_t,
            Some(refraction),
        )?;
        Ok(position)
    }
}
