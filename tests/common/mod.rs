//! Shared test fixtures for integration tests.

use chrono::{DateTime, FixedOffset};
use pv_yield::catalog::Catalog;
use pv_yield::config::PlantConfig;
use pv_yield::plant::PlantModel;
use pv_yield::types::Observation;

/// Reference plant resolved from the default configuration and the
/// built-in catalog (Tucson site, latitude tilt, nameplate components).
pub fn reference_plant() -> PlantModel {
    PlantModel::from_config(&PlantConfig::reference(), &Catalog::builtin())
        .expect("reference config should resolve against the built-in catalog")
}

/// Parses an RFC 3339 timestamp.
pub fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).expect("valid RFC 3339 timestamp")
}

/// Clear-sky observation at the Tucson reference site (30 °C, 2 m/s wind).
pub fn tucson_clear_obs(hour: u32, ghi: f64, dhi: f64) -> Observation {
    let timestamp = format!("2024-06-21T{hour:02}:00:00-07:00");
    Observation::new(ts(&timestamp), 32.2, -110.9, ghi, dhi, 30.0, 2.0)
}

/// One clear summer day at the Tucson reference site, hourly spacing with
/// night rows at both ends.
pub fn tucson_clear_day() -> Vec<Observation> {
    [
        (0, 0.0, 0.0),
        (3, 0.0, 0.0),
        (6, 80.0, 40.0),
        (8, 420.0, 80.0),
        (10, 780.0, 105.0),
        (12, 950.0, 115.0),
        (14, 820.0, 100.0),
        (16, 480.0, 85.0),
        (18, 120.0, 50.0),
        (21, 0.0, 0.0),
    ]
    .into_iter()
    .map(|(hour, ghi, dhi)| tucson_clear_obs(hour, ghi, dhi))
    .collect()
}
