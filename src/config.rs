//! TOML-based plant configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::pv::temperature::ThermalParams;

/// Top-level plant configuration parsed from TOML.
///
/// All fields have defaults matching the reference plant. Load from TOML
/// with [`PlantConfig::from_toml_file`] or use [`PlantConfig::reference`]
/// for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlantConfig {
    /// Site location parameters.
    #[serde(default)]
    pub site: SiteConfig,
    /// Array orientation parameters.
    #[serde(default)]
    pub array: ArrayConfig,
    /// Catalog component selection.
    #[serde(default)]
    pub components: ComponentsConfig,
    /// Thermal model selection.
    #[serde(default)]
    pub temperature: TemperatureConfig,
}

/// Site location parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
    /// Altitude above sea level (m).
    pub altitude_m: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        // Tucson, Arizona
        Self {
            latitude: 32.2,
            longitude: -110.9,
            altitude_m: 700.0,
        }
    }
}

/// Array orientation parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArrayConfig {
    /// Tilt from horizontal in degrees; unset defaults to |site latitude|.
    pub surface_tilt: Option<f64>,
    /// Facing direction in degrees clockwise from north (180 = south).
    pub surface_azimuth: f64,
    /// Ground reflectance (0.0-1.0).
    pub albedo: f64,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            surface_tilt: None,
            surface_azimuth: 180.0,
            albedo: 0.2,
        }
    }
}

/// Catalog component selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentsConfig {
    /// Module database name.
    pub module: String,
    /// Inverter database name.
    pub inverter: String,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            module: "Canadian_Solar_CS5P_220M___2009_".to_string(),
            inverter: "ABB__MICRO_0_25_I_OUTD_US_208__208V_".to_string(),
        }
    }
}

/// Thermal model selection.
///
/// Either a named mounting preset or a full custom coefficient set; the
/// custom set takes precedence when all three values are present.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemperatureConfig {
    /// Mounting preset name.
    pub mounting: String,
    /// Custom irradiance coefficient `a`.
    pub a: Option<f64>,
    /// Custom wind coefficient `b`.
    pub b: Option<f64>,
    /// Custom cell-to-module delta (°C).
    pub delta_t: Option<f64>,
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self {
            mounting: "open_rack_glass_glass".to_string(),
            a: None,
            b: None,
            delta_t: None,
        }
    }
}

impl TemperatureConfig {
    /// Resolves thermal parameters from the custom set or the preset.
    pub fn thermal_params(&self) -> Option<ThermalParams> {
        if let (Some(a), Some(b), Some(delta_t)) = (self.a, self.b, self.delta_t) {
            return Some(ThermalParams { a, b, delta_t });
        }
        ThermalParams::from_mounting(&self.mounting)
    }

    fn custom_fields_set(&self) -> usize {
        usize::from(self.a.is_some())
            + usize::from(self.b.is_some())
            + usize::from(self.delta_t.is_some())
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"site.latitude"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl PlantConfig {
    /// Returns the reference plant: Tucson site, nameplate components,
    /// latitude tilt, open-rack mounting.
    pub fn reference() -> Self {
        Self {
            site: SiteConfig::default(),
            array: ArrayConfig::default(),
            components: ComponentsConfig::default(),
            temperature: TemperatureConfig::default(),
        }
    }

    /// Returns the desert-southwest preset: high-altitude bright-ground
    /// site near Albuquerque with a fixed 30° rack.
    pub fn desert_southwest() -> Self {
        Self {
            site: SiteConfig {
                latitude: 35.05,
                longitude: -106.54,
                altitude_m: 1600.0,
            },
            array: ArrayConfig {
                surface_tilt: Some(30.0),
                albedo: 0.25,
                ..ArrayConfig::default()
            },
            components: ComponentsConfig::default(),
            temperature: TemperatureConfig::default(),
        }
    }

    /// Returns the nordic-rooftop preset: high-latitude close-mounted
    /// roof array in Helsinki with a steep tilt.
    pub fn nordic_rooftop() -> Self {
        Self {
            site: SiteConfig {
                latitude: 60.17,
                longitude: 24.94,
                altitude_m: 20.0,
            },
            array: ArrayConfig {
                surface_tilt: Some(45.0),
                ..ArrayConfig::default()
            },
            components: ComponentsConfig::default(),
            temperature: TemperatureConfig {
                mounting: "close_mount_glass_glass".to_string(),
                ..TemperatureConfig::default()
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["reference", "desert_southwest", "nordic_rooftop"];

    /// Loads a plant configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "reference" => Ok(Self::reference()),
            "desert_southwest" => Ok(Self::desert_southwest()),
            "nordic_rooftop" => Ok(Self::nordic_rooftop()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a plant configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "plant".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a plant configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let site = &self.site;

        if !site.latitude.is_finite() || !(-90.0..=90.0).contains(&site.latitude) {
            errors.push(ConfigError {
                field: "site.latitude".into(),
                message: "must be in [-90, 90]".into(),
            });
        }
        if !site.longitude.is_finite() || !(-180.0..=180.0).contains(&site.longitude) {
            errors.push(ConfigError {
                field: "site.longitude".into(),
                message: "must be in [-180, 180]".into(),
            });
        }
        if !site.altitude_m.is_finite() || !(-500.0..=11_000.0).contains(&site.altitude_m) {
            errors.push(ConfigError {
                field: "site.altitude_m".into(),
                message: "must be in [-500, 11000] for the pressure model".into(),
            });
        }

        let array = &self.array;
        if let Some(tilt) = array.surface_tilt {
            if !tilt.is_finite() || !(0.0..=90.0).contains(&tilt) {
                errors.push(ConfigError {
                    field: "array.surface_tilt".into(),
                    message: "must be in [0, 90]".into(),
                });
            }
        }
        if !array.surface_azimuth.is_finite() || !(0.0..=360.0).contains(&array.surface_azimuth) {
            errors.push(ConfigError {
                field: "array.surface_azimuth".into(),
                message: "must be in [0, 360]".into(),
            });
        }
        if !array.albedo.is_finite() || !(0.0..=1.0).contains(&array.albedo) {
            errors.push(ConfigError {
                field: "array.albedo".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }

        let components = &self.components;
        if components.module.is_empty() {
            errors.push(ConfigError {
                field: "components.module".into(),
                message: "must name a catalog module".into(),
            });
        }
        if components.inverter.is_empty() {
            errors.push(ConfigError {
                field: "components.inverter".into(),
                message: "must name a catalog inverter".into(),
            });
        }

        let temperature = &self.temperature;
        let custom = temperature.custom_fields_set();
        if custom > 0 && custom < 3 {
            errors.push(ConfigError {
                field: "temperature.a".into(),
                message: "a, b, and delta_t must be set together".into(),
            });
        } else if temperature.thermal_params().is_none() {
            errors.push(ConfigError {
                field: "temperature.mounting".into(),
                message: format!(
                    "unknown mounting \"{}\", available: {}",
                    temperature.mounting,
                    ThermalParams::MOUNTINGS.join(", ")
                ),
            });
        }

        errors
    }
}
