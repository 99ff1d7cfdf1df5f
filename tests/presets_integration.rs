//! Integration tests exercising every built-in configuration preset.

mod common;

use pv_yield::catalog::Catalog;
use pv_yield::config::PlantConfig;
use pv_yield::error::Error;
use pv_yield::plant::PlantModel;
use pv_yield::types::{Observation, PowerResult};

/// Resolves a preset and estimates output for a near-noon summer
/// observation at the preset's own site.
fn noon_estimate(preset: &str, offset: &str, ghi: f64, dhi: f64) -> PowerResult {
    let config = PlantConfig::from_preset(preset)
        .unwrap_or_else(|e| panic!("preset {preset} should load: {e}"));
    let plant = PlantModel::from_config(&config, &Catalog::builtin())
        .unwrap_or_else(|e| panic!("preset {preset} should resolve: {e}"));

    let timestamp = format!("2024-06-21T12:00:00{offset}");
    let obs = Observation::new(
        common::ts(&timestamp),
        config.site.latitude,
        config.site.longitude,
        ghi,
        dhi,
        25.0,
        3.0,
    );
    plant
        .estimate_power(&obs)
        .unwrap_or_else(|e| panic!("preset {preset} noon estimate should succeed: {e}"))
}

#[test]
fn every_preset_loads_validates_and_resolves() {
    for name in PlantConfig::PRESETS {
        let config = PlantConfig::from_preset(name)
            .unwrap_or_else(|e| panic!("preset {name} should load: {e}"));
        let errors = config.validate();
        assert!(errors.is_empty(), "preset {name} should validate: {errors:?}");
        let plant = PlantModel::from_config(&config, &Catalog::builtin());
        assert!(plant.is_ok(), "preset {name} should resolve: {plant:?}");
    }
}

#[test]
fn every_preset_generates_at_summer_noon() {
    let cases = [
        ("reference", "-07:00", 950.0, 115.0),
        ("desert_southwest", "-06:00", 980.0, 110.0),
        ("nordic_rooftop", "+03:00", 650.0, 180.0),
    ];
    for (preset, offset, ghi, dhi) in cases {
        let r = noon_estimate(preset, offset, ghi, dhi);
        assert!(r.ac_power > 0.0, "{preset} should generate at noon");
        assert!(
            r.ac_power <= 250.0,
            "{preset} AC {} above the inverter rating",
            r.ac_power
        );
    }
}

#[test]
fn reference_preset_matches_the_reference_constructor() {
    let config = PlantConfig::from_preset("reference").expect("reference preset should load");
    let from_preset = PlantModel::from_config(&config, &Catalog::builtin())
        .expect("reference preset should resolve");

    let noon = common::tucson_clear_obs(12, 950.0, 115.0);
    assert_eq!(
        from_preset.estimate_power(&noon),
        common::reference_plant().estimate_power(&noon),
        "from_preset(\"reference\") should behave exactly like PlantConfig::reference()"
    );
}

#[test]
fn every_preset_handles_a_full_day_of_observations() {
    let day = common::tucson_clear_day();
    for name in PlantConfig::PRESETS {
        let config = PlantConfig::from_preset(name)
            .unwrap_or_else(|e| panic!("preset {name} should load: {e}"));
        let plant = PlantModel::from_config(&config, &Catalog::builtin())
            .unwrap_or_else(|e| panic!("preset {name} should resolve: {e}"));
        for (i, obs) in day.iter().enumerate() {
            let r = plant.estimate_power(obs);
            assert!(r.is_ok(), "preset {name} failed on row {i}: {r:?}");
        }
    }
}

#[test]
fn presets_produce_distinct_dynamics() {
    let desert = noon_estimate("desert_southwest", "-06:00", 980.0, 110.0);
    let nordic = noon_estimate("nordic_rooftop", "+03:00", 650.0, 180.0);

    assert!(
        desert.poa_global > nordic.poa_global,
        "expected the desert site to out-collect the nordic roof: desert={:.1}, nordic={:.1}",
        desert.poa_global,
        nordic.poa_global
    );
    assert!(
        desert.ac_power > nordic.ac_power,
        "expected distinct AC output: desert={:.2}, nordic={:.2}",
        desert.ac_power,
        nordic.ac_power
    );
}

#[test]
fn unknown_inverter_name_is_reported() {
    let mut config = PlantConfig::reference();
    config.components.inverter = "Not_In_The_Catalog".to_string();
    let result = PlantModel::from_config(&config, &Catalog::builtin());
    match result {
        Err(Error::UnknownComponent { name, .. }) => {
            assert_eq!(name, "Not_In_The_Catalog");
        }
        other => panic!("expected UnknownComponent, got {other:?}"),
    }
}
