//! Plant model chaining solar geometry, transposition, and power conversion.

use chrono::Datelike;

use crate::catalog::Catalog;
use crate::config::PlantConfig;
use crate::error::Error;
use crate::pv::inverter::{InverterParams, sandia_ac_power};
use crate::pv::module::{ModuleParams, effective_irradiance, sapm};
use crate::pv::temperature::{ThermalParams, sapm_cell_temperature};
use crate::solar::SolarCalculator;
use crate::solar::irradiance::{
    absolute_airmass, angle_of_incidence, dni_from_ghi, extraterrestrial_dni, relative_airmass,
    transpose_to_poa,
};
use crate::types::{IrradianceEstimate, Observation, PowerResult};

/// A fixed-tilt plant with resolved component parameters.
///
/// Built from a [`PlantConfig`] and a [`Catalog`]; from then on every
/// estimate is a pure function of the weather observation.
#[derive(Debug, Clone)]
pub struct PlantModel {
    surface_tilt: f64,
    surface_azimuth: f64,
    albedo: f64,
    solar: SolarCalculator,
    module: ModuleParams,
    inverter: InverterParams,
    thermal: ThermalParams,
}

impl PlantModel {
    /// Resolves a validated configuration against the component catalog.
    ///
    /// An unset `surface_tilt` defaults to the absolute site latitude.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the configuration fails
    /// validation, or [`Error::UnknownComponent`] when a named module or
    /// inverter is not in the catalog.
    pub fn from_config(config: &PlantConfig, catalog: &Catalog) -> Result<Self, Error> {
        let errors = config.validate();
        if !errors.is_empty() {
            let joined = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::invalid("config", joined));
        }

        let module = catalog.module(&config.components.module)?.clone();
        let inverter = catalog.inverter(&config.components.inverter)?.clone();
        let thermal = config
            .temperature
            .thermal_params()
            .ok_or_else(|| Error::invalid("temperature.mounting", "unknown mounting"))?;

        Ok(Self {
            surface_tilt: config
                .array
                .surface_tilt
                .unwrap_or_else(|| config.site.latitude.abs()),
            surface_azimuth: config.array.surface_azimuth,
            albedo: config.array.albedo,
            solar: SolarCalculator::new(config.site.altitude_m),
            module,
            inverter,
            thermal,
        })
    }

    /// The resolved module parameters.
    pub fn module(&self) -> &ModuleParams {
        &self.module
    }

    /// The resolved inverter parameters.
    pub fn inverter(&self) -> &InverterParams {
        &self.inverter
    }

    /// The resolved array tilt (degrees from horizontal).
    pub fn surface_tilt(&self) -> f64 {
        self.surface_tilt
    }

    /// Estimates plane-of-array irradiance for one observation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the observation fails
    /// validation or the timestamp is outside the ephemeris range.
    pub fn estimate_irradiance(&self, obs: &Observation) -> Result<IrradianceEstimate, Error> {
        validate_observation(obs)?;

        // 1. Solar geometry
        let position =
            self.solar
                .position(obs.timestamp, obs.latitude, obs.longitude, obs.temp_air)?;
        let solar_zenith = position.zenith_angle();
        let solar_azimuth = position.azimuth();

        // 2. Irradiance decomposition
        let dni = dni_from_ghi(obs.ghi, obs.dhi, solar_zenith);
        let dni_extra = extraterrestrial_dni(obs.timestamp.ordinal());
        let airmass_absolute = relative_airmass(solar_zenith)
            .map(|relative| absolute_airmass(relative, self.solar.pressure_pa()));

        // 3. Transposition onto the array plane
        let aoi = angle_of_incidence(
            solar_zenith,
            solar_azimuth,
            self.surface_tilt,
            self.surface_azimuth,
        );
        let poa = transpose_to_poa(
            obs.ghi,
            obs.dhi,
            dni,
            dni_extra,
            solar_zenith,
            aoi,
            self.surface_tilt,
            self.albedo,
        );

        Ok(IrradianceEstimate {
            solar_zenith,
            solar_azimuth,
            dni_extra,
            airmass_absolute,
            dni,
            aoi,
            poa,
        })
    }

    /// Estimates AC power output for one observation.
    ///
    /// Runs the full chain from solar geometry through the inverter. The
    /// AC result is bounded to `[0, paco]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the observation fails
    /// validation or the timestamp is outside the ephemeris range.
    pub fn estimate_power(&self, obs: &Observation) -> Result<PowerResult, Error> {
        let irradiance = self.estimate_irradiance(obs)?;
        let poa_global = irradiance.poa.global();

        // 4. Cell temperature
        let cell_temperature =
            sapm_cell_temperature(poa_global, obs.temp_air, obs.wind_speed, &self.thermal);

        // 5. Module DC operating point (no airmass below the horizon)
        let ee = match irradiance.airmass_absolute {
            Some(airmass) => {
                effective_irradiance(&self.module, &irradiance.poa, airmass, irradiance.aoi)
            }
            None => 0.0,
        };
        let dc = sapm(&self.module, ee, cell_temperature);

        // 6. Inverter AC conversion
        let ac_power = sandia_ac_power(&self.inverter, dc.v_mp, dc.p_mp);

        Ok(PowerResult {
            timestamp: obs.timestamp,
            poa_global,
            cell_temperature,
            effective_irradiance: ee,
            dc_power: dc.p_mp,
            ac_power,
        })
    }
}

fn validate_observation(obs: &Observation) -> Result<(), Error> {
    if !obs.ghi.is_finite() || obs.ghi < 0.0 {
        return Err(Error::invalid(
            "ghi",
            format!("must be finite and >= 0, got {}", obs.ghi),
        ));
    }
    if !obs.dhi.is_finite() || obs.dhi < 0.0 {
        return Err(Error::invalid(
            "dhi",
            format!("must be finite and >= 0, got {}", obs.dhi),
        ));
    }
    if obs.dhi > obs.ghi {
        return Err(Error::invalid(
            "dhi",
            format!(
                "diffuse {} exceeds global {}, decomposition would go negative",
                obs.dhi, obs.ghi
            ),
        ));
    }
    if !obs.latitude.is_finite() || !(-90.0..=90.0).contains(&obs.latitude) {
        return Err(Error::invalid(
            "latitude",
            format!("must be in [-90, 90], got {}", obs.latitude),
        ));
    }
    if !obs.longitude.is_finite() || !(-180.0..=180.0).contains(&obs.longitude) {
        return Err(Error::invalid(
            "longitude",
            format!("must be in [-180, 180], got {}", obs.longitude),
        ));
    }
    if !obs.temp_air.is_finite() {
        return Err(Error::invalid("temp_air", "must be finite"));
    }
    if !obs.wind_speed.is_finite() {
        return Err(Error::invalid("wind_speed", "must be finite"));
    }
    Ok(())
}
