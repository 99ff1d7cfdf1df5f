//! Irradiance decomposition and transposition to the array plane.
//!
//! Horizontal measurements (GHI, DHI) are decomposed into direct normal
//! irradiance through the closure relation, then projected onto the tilted
//! array with the Hay-Davies anisotropic sky model and an isotropic ground
//! reflection term.

use std::f64::consts::PI;

use crate::types::PoaIrradiance;

/// Solar constant used for extraterrestrial irradiance (W/m²).
const SOLAR_CONSTANT: f64 = 1361.0;

/// Standard sea-level pressure (Pa).
const STANDARD_PRESSURE: f64 = 101_325.0;

/// Floor on cos(zenith) in the beam ratio, cos(89°).
const MIN_COS_ZENITH: f64 = 0.01745;

/// Default Linke turbidity for the clear-sky model.
pub const DEFAULT_LINKE_TURBIDITY: f64 = 3.0;

/// Direct normal irradiance from the GHI/DHI closure relation.
///
/// `dni = (ghi - dhi) / cos(zenith)`. Once the sun is below the horizon
/// (zenith > 90°) the result is exactly zero regardless of the inputs.
pub fn dni_from_ghi(ghi: f64, dhi: f64, solar_zenith: f64) -> f64 {
    if solar_zenith > 90.0 {
        return 0.0;
    }
    (ghi - dhi) / solar_zenith.to_radians().cos()
}

/// Options for [`dni_quality_controlled`].
#[derive(Debug, Clone, Copy)]
pub struct DniQualityOptions {
    /// Zenith angle at or beyond which DNI is forced to zero (degrees).
    pub zenith_threshold: f64,
    /// Multiple of the clear-sky DNI above which the value is capped.
    pub clearsky_tolerance: f64,
}

impl Default for DniQualityOptions {
    fn default() -> Self {
        Self {
            zenith_threshold: 88.0,
            clearsky_tolerance: 1.0,
        }
    }
}

/// Closure-relation DNI with near-horizon quality control.
///
/// Same relation as [`dni_from_ghi`], but the result is zeroed at or
/// beyond `zenith_threshold`, floored at zero, and capped at
/// `clearsky_dni * clearsky_tolerance` when a clear-sky value is given.
/// The low-sun division otherwise amplifies sensor noise into implausible
/// beam values.
pub fn dni_quality_controlled(
    ghi: f64,
    dhi: f64,
    solar_zenith: f64,
    clearsky_dni: Option<f64>,
    options: DniQualityOptions,
) -> f64 {
    if solar_zenith >= options.zenith_threshold {
        return 0.0;
    }
    let dni = ((ghi - dhi) / solar_zenith.to_radians().cos()).max(0.0);
    match clearsky_dni {
        Some(cs) => dni.min(cs * options.clearsky_tolerance),
        None => dni,
    }
}

/// Extraterrestrial direct normal irradiance for a day of year (W/m²).
///
/// Spencer (1971) orbital eccentricity correction applied to the solar
/// constant.
pub fn extraterrestrial_dni(day_of_year: u32) -> f64 {
    let b = 2.0 * PI * (f64::from(day_of_year) - 1.0) / 365.0;
    let correction = 1.000_110
        + 0.034_221 * b.cos()
        + 0.001_280 * b.sin()
        + 0.000_719 * (2.0 * b).cos()
        + 0.000_077 * (2.0 * b).sin();
    SOLAR_CONSTANT * correction
}

/// Relative airmass by the Kasten-Young (1989) formula.
///
/// `None` when the sun is below the horizon (zenith > 90°).
pub fn relative_airmass(solar_zenith: f64) -> Option<f64> {
    if solar_zenith > 90.0 {
        return None;
    }
    let denom =
        solar_zenith.to_radians().cos() + 0.50572 * (96.07995 - solar_zenith).powf(-1.6364);
    Some(1.0 / denom)
}

/// Barometric pressure at a site altitude from the ISA model (Pa).
///
/// Valid through the troposphere (below 11 km).
pub fn pressure_at_altitude(altitude_m: f64) -> f64 {
    STANDARD_PRESSURE * (1.0 - 2.25577e-5 * altitude_m).powf(5.25588)
}

/// Pressure-corrected (absolute) airmass.
pub fn absolute_airmass(relative_airmass: f64, pressure_pa: f64) -> f64 {
    relative_airmass * pressure_pa / STANDARD_PRESSURE
}

/// Angle of incidence between the sun vector and the array normal (degrees).
///
/// All angles in degrees; azimuths measured clockwise from north, tilt
/// from horizontal.
pub fn angle_of_incidence(
    solar_zenith: f64,
    solar_azimuth: f64,
    surface_tilt: f64,
    surface_azimuth: f64,
) -> f64 {
    let zenith = solar_zenith.to_radians();
    let azimuth = solar_azimuth.to_radians();
    let tilt = surface_tilt.to_radians();
    let surf_azimuth = surface_azimuth.to_radians();

    let cos_aoi = zenith.cos() * tilt.cos()
        + zenith.sin() * tilt.sin() * (azimuth - surf_azimuth).cos();

    cos_aoi.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Ineichen-Perez clear-sky direct normal irradiance (W/m²).
///
/// Used as the cap in [`dni_quality_controlled`]. Altitude is clamped to
/// the validity band of the atmospheric coefficients.
pub fn ineichen_clearsky_dni(
    solar_zenith: f64,
    altitude_m: f64,
    day_of_year: u32,
    linke_turbidity: f64,
) -> f64 {
    let Some(am_relative) = relative_airmass(solar_zenith) else {
        return 0.0;
    };
    let airmass = absolute_airmass(am_relative, pressure_at_altitude(altitude_m));
    let i0 = extraterrestrial_dni(day_of_year);

    let clamped_alt = altitude_m.clamp(-500.0, 11_000.0);
    let fh1 = (-clamped_alt / 8000.0).exp();
    let b = 0.664 + 0.163 / fh1;
    let tl = (linke_turbidity - 0.15 * clamped_alt / 1000.0).max(1.0);

    (b * i0 * (-0.09 * airmass * (tl - 1.0)).exp()).clamp(0.0, i0)
}

/// Hay-Davies anisotropic sky diffuse irradiance on the array plane (W/m²).
///
/// The anisotropy index `dni / dni_extra` weights a circumsolar beam-like
/// term against the isotropic sky dome; the index is bounded to [0, 1]
/// and the result is floored at zero.
pub fn haydavies_sky_diffuse(
    dhi: f64,
    dni: f64,
    dni_extra: f64,
    solar_zenith: f64,
    aoi: f64,
    surface_tilt: f64,
) -> f64 {
    let anisotropy = if dni_extra > 0.0 {
        (dni / dni_extra).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let beam_ratio =
        aoi.to_radians().cos().max(0.0) / solar_zenith.to_radians().cos().max(MIN_COS_ZENITH);
    let isotropic_view = 0.5 * (1.0 + surface_tilt.to_radians().cos());

    (dhi * (anisotropy * beam_ratio + (1.0 - anisotropy) * isotropic_view)).max(0.0)
}

/// Ground-reflected irradiance on the array plane (W/m²).
pub fn ground_diffuse(ghi: f64, albedo: f64, surface_tilt: f64) -> f64 {
    ghi * albedo * 0.5 * (1.0 - surface_tilt.to_radians().cos())
}

/// Assembles the plane-of-array components from decomposed irradiance.
///
/// The beam component is zero when the sun is below the horizon or behind
/// the array plane.
#[allow(clippy::too_many_arguments)]
pub fn transpose_to_poa(
    ghi: f64,
    dhi: f64,
    dni: f64,
    dni_extra: f64,
    solar_zenith: f64,
    aoi: f64,
    surface_tilt: f64,
    albedo: f64,
) -> PoaIrradiance {
    let direct = if solar_zenith <= 90.0 {
        dni * aoi.to_radians().cos().max(0.0)
    } else {
        0.0
    };
    let sky_diffuse = haydavies_sky_diffuse(dhi, dni, dni_extra, solar_zenith, aoi, surface_tilt);
    let ground_diffuse = ground_diffuse(ghi, albedo, surface_tilt);

    PoaIrradiance {
        direct,
        sky_diffuse,
        ground_diffuse,
    }
}
