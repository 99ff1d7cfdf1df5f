//! SAPM cell temperature model.

/// Empirical mounting coefficients for the SAPM thermal model.
///
/// `a` and `b` shape the irradiance-to-heating exponent, `delta_t` is the
/// cell-to-module temperature rise at 1000 W/m².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalParams {
    /// Irradiance coefficient (dimensionless exponent offset).
    pub a: f64,
    /// Wind coefficient (s/m).
    pub b: f64,
    /// Cell-to-module temperature delta at 1000 W/m² (°C).
    pub delta_t: f64,
}

impl ThermalParams {
    /// Glass/glass module on an open rack.
    pub fn open_rack_glass_glass() -> Self {
        Self {
            a: -3.47,
            b: -0.0594,
            delta_t: 3.0,
        }
    }

    /// Glass/glass module close-mounted to a roof.
    pub fn close_mount_glass_glass() -> Self {
        Self {
            a: -2.98,
            b: -0.0471,
            delta_t: 1.0,
        }
    }

    /// Glass/polymer-back module on an open rack.
    pub fn open_rack_glass_polymer() -> Self {
        Self {
            a: -3.56,
            b: -0.075,
            delta_t: 3.0,
        }
    }

    /// Glass/polymer-back module with an insulated back.
    pub fn insulated_back_glass_polymer() -> Self {
        Self {
            a: -2.81,
            b: -0.0455,
            delta_t: 0.0,
        }
    }

    /// Available mounting preset names.
    pub const MOUNTINGS: &[&str] = &[
        "open_rack_glass_glass",
        "close_mount_glass_glass",
        "open_rack_glass_polymer",
        "insulated_back_glass_polymer",
    ];

    /// Looks up a mounting preset by name.
    pub fn from_mounting(name: &str) -> Option<Self> {
        match name {
            "open_rack_glass_glass" => Some(Self::open_rack_glass_glass()),
            "close_mount_glass_glass" => Some(Self::close_mount_glass_glass()),
            "open_rack_glass_polymer" => Some(Self::open_rack_glass_polymer()),
            "insulated_back_glass_polymer" => Some(Self::insulated_back_glass_polymer()),
            _ => None,
        }
    }
}

impl Default for ThermalParams {
    fn default() -> Self {
        Self::open_rack_glass_glass()
    }
}

/// Back-of-module temperature (°C).
///
/// Negative irradiance or wind inputs are treated as zero.
pub fn sapm_module_temperature(
    poa_global: f64,
    temp_air: f64,
    wind_speed: f64,
    params: &ThermalParams,
) -> f64 {
    let poa = poa_global.max(0.0);
    let wind = wind_speed.max(0.0);
    poa * (params.a + params.b * wind).exp() + temp_air
}

/// Cell temperature (°C) from ambient conditions and POA irradiance.
pub fn sapm_cell_temperature(
    poa_global: f64,
    temp_air: f64,
    wind_speed: f64,
    params: &ThermalParams,
) -> f64 {
    let poa = poa_global.max(0.0);
    let module = sapm_module_temperature(poa, temp_air, wind_speed, params);
    module + poa / 1000.0 * params.delta_t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_matches_ambient_in_the_dark() {
        let params = ThermalParams::open_rack_glass_glass();
        let cell = sapm_cell_temperature(0.0, 12.5, 3.0, &params);
        assert_eq!(cell, 12.5);
    }

    #[test]
    fn open_rack_reference_point() {
        // 1000 W/m², 25 °C, 1 m/s:
        // module = 1000 * exp(-3.47 - 0.0594) + 25, cell = module + 3
        let params = ThermalParams::open_rack_glass_glass();
        let cell = sapm_cell_temperature(1000.0, 25.0, 1.0, &params);
        assert!((cell - 57.32).abs() < 0.02, "got {cell}");
    }

    #[test]
    fn wind_cools_the_module() {
        let params = ThermalParams::open_rack_glass_glass();
        let calm = sapm_cell_temperature(800.0, 25.0, 0.0, &params);
        let breezy = sapm_cell_temperature(800.0, 25.0, 8.0, &params);
        assert!(breezy < calm);
    }

    #[test]
    fn negative_wind_clamped_to_calm() {
        let params = ThermalParams::open_rack_glass_glass();
        let calm = sapm_cell_temperature(800.0, 25.0, 0.0, &params);
        let negative = sapm_cell_temperature(800.0, 25.0, -4.0, &params);
        assert_eq!(calm, negative);
    }

    #[test]
    fn insulated_back_runs_hotter() {
        let open = sapm_cell_temperature(800.0, 25.0, 2.0, &ThermalParams::open_rack_glass_glass());
        let insulated = sapm_cell_temperature(
            800.0,
            25.0,
            2.0,
            &ThermalParams::insulated_back_glass_polymer(),
        );
        assert!(insulated > open);
    }

    #[test]
    fn every_mounting_resolves() {
        for name in ThermalParams::MOUNTINGS {
            assert!(
                ThermalParams::from_mounting(name).is_some(),
                "mounting \"{name}\" should resolve"
            );
        }
        assert!(ThermalParams::from_mounting("zero_gravity_rack").is_none());
    }
}
