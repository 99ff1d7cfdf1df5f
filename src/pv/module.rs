//! Sandia Array Performance Model (SAPM).
//!
//! Empirical DC model of a PV module: spectral and incidence-angle
//! modifiers reduce POA irradiance to an effective irradiance, which the
//! polynomial model maps to the full current/voltage operating point.

use serde::Deserialize;

use crate::types::PoaIrradiance;

/// Boltzmann constant (J/K).
const BOLTZMANN: f64 = 1.380_66e-23;
/// Elementary charge (C).
const ELEMENTARY_CHARGE: f64 = 1.602_18e-19;
/// Reference cell temperature (°C).
const T_REF: f64 = 25.0;
/// Reference irradiance (W/m²).
const E_REF: f64 = 1000.0;

/// SAPM electrical parameter set for one module.
///
/// Field names and units follow the Sandia module database columns; the
/// polynomial coefficient groups are stored as ascending-order arrays.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleParams {
    /// Module aperture area (m²).
    pub area: f64,
    /// Cells in series.
    pub cells_in_series: u32,
    /// Reference short-circuit current (A).
    pub isco: f64,
    /// Reference open-circuit voltage (V).
    pub voco: f64,
    /// Reference maximum-power current (A).
    pub impo: f64,
    /// Reference maximum-power voltage (V).
    pub vmpo: f64,
    /// Short-circuit current temperature coefficient (1/°C).
    pub aisc: f64,
    /// Maximum-power current temperature coefficient (1/°C).
    pub aimp: f64,
    /// Open-circuit voltage temperature coefficient (V/°C).
    pub bvoco: f64,
    /// Irradiance dependence of `bvoco` (V/°C).
    pub mbvoc: f64,
    /// Maximum-power voltage temperature coefficient (V/°C).
    pub bvmpo: f64,
    /// Irradiance dependence of `bvmpo` (V/°C).
    pub mbvmp: f64,
    /// Diode ideality factor.
    pub n: f64,
    /// Current-point coefficients `c0`..`c7`.
    pub c: [f64; 8],
    /// Airmass polynomial coefficients `a0`..`a4`.
    pub a: [f64; 5],
    /// Incidence-angle polynomial coefficients `b0`..`b5`.
    pub b: [f64; 6],
    /// Module thermal offset carried by the database (°C).
    pub dtc: f64,
    /// Diffuse utilization fraction.
    pub fd: f64,
    /// Reference current at half open-circuit voltage (A).
    pub ixo: f64,
    /// Reference current midway between `vmpo` and `voco` (A).
    pub ixxo: f64,
}

/// SAPM DC operating point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SapmOutput {
    /// Short-circuit current (A).
    pub i_sc: f64,
    /// Maximum-power current (A).
    pub i_mp: f64,
    /// Open-circuit voltage (V).
    pub v_oc: f64,
    /// Maximum-power voltage (V).
    pub v_mp: f64,
    /// Maximum-power DC power (W).
    pub p_mp: f64,
    /// Current at half `v_oc` (A).
    pub i_x: f64,
    /// Current midway between `v_mp` and `v_oc` (A).
    pub i_xx: f64,
}

fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Spectral (airmass) modifier `f1`.
pub fn airmass_modifier(params: &ModuleParams, airmass_absolute: f64) -> f64 {
    polyval(&params.a, airmass_absolute)
}

/// Incidence-angle modifier `f2`, floored at zero.
pub fn incidence_modifier(params: &ModuleParams, aoi: f64) -> f64 {
    polyval(&params.b, aoi).max(0.0)
}

/// SAPM effective irradiance (W/m²), never negative.
///
/// The beam component passes through both modifiers; diffuse passes
/// through the spectral modifier scaled by the module's `fd` fraction.
pub fn effective_irradiance(
    params: &ModuleParams,
    poa: &PoaIrradiance,
    airmass_absolute: f64,
    aoi: f64,
) -> f64 {
    let f1 = airmass_modifier(params, airmass_absolute);
    let f2 = incidence_modifier(params, aoi);
    let beam = poa.direct.max(0.0);
    let diffuse = poa.diffuse().max(0.0);
    (f1 * (beam * f2 + params.fd * diffuse)).max(0.0)
}

/// Full SAPM DC operating point.
///
/// `effective_irradiance` in W/m², `cell_temperature` in °C. All outputs
/// are zero when the effective irradiance is zero or negative; open- and
/// maximum-power voltages are floored at zero.
pub fn sapm(params: &ModuleParams, effective_irradiance: f64, cell_temperature: f64) -> SapmOutput {
    if effective_irradiance <= 0.0 {
        return SapmOutput::default();
    }

    // Dimensionless irradiance (suns) and temperature offsets.
    let ee = effective_irradiance / E_REF;
    let dt = cell_temperature - T_REF;
    let ln_ee = ee.ln();

    // Thermal voltage of the cell string.
    let kt = BOLTZMANN * (cell_temperature + 273.15) / ELEMENTARY_CHARGE;
    let delta = params.n * kt;
    let ns = f64::from(params.cells_in_series);

    // Voltage temperature coefficients with irradiance dependence.
    let bvoc = params.bvoco + params.mbvoc * (1.0 - ee);
    let bvmp = params.bvmpo + params.mbvmp * (1.0 - ee);

    let [c0, c1, c2, c3, c4, c5, c6, c7] = params.c;

    let i_sc = params.isco * ee * (1.0 + params.aisc * dt);
    let i_mp = params.impo * (c0 * ee + c1 * ee * ee) * (1.0 + params.aimp * dt);
    let v_oc = (params.voco + ns * delta * ln_ee + bvoc * dt).max(0.0);
    let v_mp = (params.vmpo
        + c2 * ns * delta * ln_ee
        + c3 * ns * (delta * ln_ee) * (delta * ln_ee)
        + bvmp * dt)
        .max(0.0);
    let i_x = params.ixo * (c4 * ee + c5 * ee * ee) * (1.0 + params.aisc * dt);
    let i_xx = params.ixxo * (c6 * ee + c7 * ee * ee) * (1.0 + params.aimp * dt);

    SapmOutput {
        i_sc,
        i_mp,
        v_oc,
        v_mp,
        p_mp: i_mp * v_mp,
        i_x,
        i_xx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::catalog::Catalog;

    /// Canadian Solar CS5P-220M, Sandia database 2009 entry, taken from the
    /// embedded catalog so these tests exercise the shipped data.
    fn cs5p_220m() -> ModuleParams {
        Catalog::builtin()
            .module("Canadian_Solar_CS5P_220M___2009_")
            .expect("embedded catalog carries the reference module")
            .clone()
    }

    #[test]
    fn reference_conditions_reproduce_nameplate() {
        let m = cs5p_220m();
        let out = sapm(&m, 1000.0, 25.0);
        assert!((out.i_sc - m.isco).abs() < 1e-9, "i_sc {}", out.i_sc);
        assert!((out.i_mp - m.impo).abs() < 1e-5, "i_mp {}", out.i_mp);
        assert!((out.v_oc - m.voco).abs() < 1e-9, "v_oc {}", out.v_oc);
        assert!((out.v_mp - m.vmpo).abs() < 1e-9, "v_mp {}", out.v_mp);
        // 220 W class module
        assert!((out.p_mp - 219.66).abs() < 0.05, "p_mp {}", out.p_mp);
        assert!((out.i_x - m.ixo).abs() < 1e-4);
        assert!((out.i_xx - m.ixxo).abs() < 1e-4);
    }

    #[test]
    fn dark_cell_produces_nothing() {
        let m = cs5p_220m();
        assert_eq!(sapm(&m, 0.0, 25.0), SapmOutput::default());
        assert_eq!(sapm(&m, -50.0, 25.0), SapmOutput::default());
    }

    #[test]
    fn hot_cell_loses_voltage_and_power() {
        let m = cs5p_220m();
        let reference = sapm(&m, 1000.0, 25.0);
        let hot = sapm(&m, 1000.0, 55.0);
        assert!(hot.v_oc < reference.v_oc);
        assert!(hot.v_mp < reference.v_mp);
        assert!(hot.p_mp < reference.p_mp);
        // Short-circuit current rises slightly with temperature.
        assert!(hot.i_sc > reference.i_sc);
    }

    #[test]
    fn current_scales_linearly_with_irradiance() {
        let m = cs5p_220m();
        let out = sapm(&m, 200.0, 25.0);
        assert!((out.i_sc - m.isco * 0.2).abs() < 1e-9);
        assert!(out.v_oc > 0.0 && out.v_oc < m.voco);
    }

    #[test]
    fn low_light_voltage_stays_positive() {
        let m = cs5p_220m();
        let out = sapm(&m, 5.0, 25.0);
        assert!(out.v_oc >= 0.0);
        assert!(out.v_mp >= 0.0);
        assert!(out.p_mp >= 0.0);
    }

    #[test]
    fn airmass_modifier_reference_points() {
        let m = cs5p_220m();
        let f1_unity = airmass_modifier(&m, 1.0);
        assert!((f1_unity - 0.98236).abs() < 1e-4, "got {f1_unity}");
        let f1_15 = airmass_modifier(&m, 1.5);
        assert!((f1_15 - 1.00060).abs() < 1e-4, "got {f1_15}");
        // High airmass leans on the quartic coefficient.
        let f1_10 = airmass_modifier(&m, 10.0);
        assert!((f1_10 - 1.62324).abs() < 1e-3, "got {f1_10}");
    }

    #[test]
    fn spectral_modifier_stays_positive_to_the_horizon() {
        let m = cs5p_220m();
        // Relative airmass tops out near 38 with the sun on the horizon, so
        // the polynomial must stay positive across that whole range or dusk
        // rows flatline while the sun is still up.
        for tenths in 0..=380 {
            let ama = f64::from(tenths) / 10.0;
            let f1 = airmass_modifier(&m, ama);
            assert!(f1 > 0.0, "f1({ama}) = {f1} would zero a daylight row");
        }
    }

    #[test]
    fn incidence_modifier_reference_points() {
        let m = cs5p_220m();
        assert_eq!(incidence_modifier(&m, 0.0), 1.0);
        let f2_75 = incidence_modifier(&m, 75.0);
        assert!((f2_75 - 0.7636).abs() < 0.001, "got {f2_75}");
        // Grazing incidence loses most of the beam.
        assert!(incidence_modifier(&m, 75.0) < incidence_modifier(&m, 45.0));
    }

    #[test]
    fn effective_irradiance_diffuse_only() {
        let m = cs5p_220m();
        let poa = PoaIrradiance {
            direct: 0.0,
            sky_diffuse: 90.0,
            ground_diffuse: 10.0,
        };
        let ee = effective_irradiance(&m, &poa, 1.5, 60.0);
        let expected = airmass_modifier(&m, 1.5) * m.fd * 100.0;
        assert!((ee - expected).abs() < 1e-9);
    }

    #[test]
    fn effective_irradiance_never_negative() {
        let m = cs5p_220m();
        let poa = PoaIrradiance {
            direct: -20.0,
            sky_diffuse: -5.0,
            ground_diffuse: 0.0,
        };
        assert_eq!(effective_irradiance(&m, &poa, 1.5, 30.0), 0.0);
    }

    #[test]
    fn effective_irradiance_reference_point() {
        let m = cs5p_220m();
        let poa = PoaIrradiance {
            direct: 808.290,
            sky_diffuse: 106.876,
            ground_diffuse: 10.718,
        };
        let ee = effective_irradiance(&m, &poa, 1.0614, 0.0);
        assert!((ee - 911.87).abs() < 0.5, "got {ee}");
    }
}
