//! Sandia/CEC inverter model.

use serde::Deserialize;

/// Sandia inverter parameter set.
///
/// Field names and units follow the CEC inverter database columns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InverterParams {
    /// Nominal AC voltage (V).
    pub vac: f64,
    /// Rated AC power (W).
    pub paco: f64,
    /// DC power at which `paco` is reached at `vdco` (W).
    pub pdco: f64,
    /// Nominal DC voltage (V).
    pub vdco: f64,
    /// DC startup power (W).
    pub pso: f64,
    /// Efficiency-curve curvature (1/W).
    pub c0: f64,
    /// Voltage sensitivity of `pdco` (1/V).
    pub c1: f64,
    /// Voltage sensitivity of `pso` (1/V).
    pub c2: f64,
    /// Voltage sensitivity of `c0` (1/V).
    pub c3: f64,
    /// Night tare draw (W); carried from the database, not subtracted
    /// from the output.
    pub pnt: f64,
    /// Maximum DC voltage (V).
    pub vdcmax: f64,
    /// Maximum DC current (A).
    pub idcmax: f64,
    /// MPPT window low edge (V).
    pub mppt_low: f64,
    /// MPPT window high edge (V).
    pub mppt_high: f64,
}

/// AC power from DC power and voltage through the Sandia curve (W).
///
/// The output is clipped to `[0, paco]`; DC input below the startup
/// power `pso` yields zero.
pub fn sandia_ac_power(params: &InverterParams, v_dc: f64, p_dc: f64) -> f64 {
    if p_dc < params.pso {
        return 0.0;
    }

    let dv = v_dc - params.vdco;
    let a = params.pdco * (1.0 + params.c1 * dv);
    let b = params.pso * (1.0 + params.c2 * dv);
    let c = params.c0 * (1.0 + params.c3 * dv);

    // A <= B leaves no defined operating region on the curve.
    if a <= b {
        return 0.0;
    }

    let over_start = p_dc - b;
    let pac = (params.paco / (a - b) - c * (a - b)) * over_start + c * over_start * over_start;
    pac.min(params.paco).max(0.0)
}
