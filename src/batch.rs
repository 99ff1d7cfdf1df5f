//! Batch execution over observation series with per-row error isolation.

use std::fmt;

use crate::error::Error;
use crate::plant::PlantModel;
use crate::types::{Observation, PowerResult};

/// Runs the full estimation chain over a slice of observations.
///
/// Rows are independent; a row that fails validation yields an `Err` at
/// its position without disturbing its neighbours. The output vector has
/// exactly one entry per input row, in input order.
///
/// With the `parallel` feature (default) rows are distributed across the
/// rayon thread pool; the ordering guarantee holds either way.
#[cfg(feature = "parallel")]
pub fn run(plant: &PlantModel, observations: &[Observation]) -> Vec<Result<PowerResult, Error>> {
    use rayon::prelude::*;

    observations
        .par_iter()
        .map(|obs| plant.estimate_power(obs))
        .collect()
}

/// Runs the full estimation chain over a slice of observations.
///
/// Rows are independent; a row that fails validation yields an `Err` at
/// its position without disturbing its neighbours. The output vector has
/// exactly one entry per input row, in input order.
#[cfg(not(feature = "parallel"))]
pub fn run(plant: &PlantModel, observations: &[Observation]) -> Vec<Result<PowerResult, Error>> {
    run_sequential(plant, observations)
}

/// Single-threaded variant of [`run`], kept available for comparison and
/// for callers that manage their own threading.
pub fn run_sequential(
    plant: &PlantModel,
    observations: &[Observation],
) -> Vec<Result<PowerResult, Error>> {
    observations
        .iter()
        .map(|obs| plant.estimate_power(obs))
        .collect()
}

/// Aggregate summary derived from a complete batch run.
///
/// Computed post-hoc from the result vector to ensure consistency between
/// row data and reported metrics.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Total number of rows in the batch.
    pub rows: usize,
    /// Number of rows that failed validation.
    pub failed: usize,
    /// Peak AC power over successful rows (W).
    pub peak_ac_w: f64,
    /// Mean AC power over successful rows (W).
    pub mean_ac_w: f64,
    /// AC energy over successful rows (kWh, sum of power * dt).
    pub ac_energy_kwh: f64,
    /// AC energy as a percentage of rated output over the full span.
    pub capacity_factor_pct: f64,
}

impl BatchSummary {
    /// Computes the summary from the complete batch result vector.
    ///
    /// # Arguments
    ///
    /// * `results` - Complete batch results, one per input row
    /// * `dt_hours` - Row spacing in hours
    /// * `paco_w` - Inverter AC power rating for the capacity factor
    pub fn from_results(
        results: &[Result<PowerResult, Error>],
        dt_hours: f64,
        paco_w: f64,
    ) -> Self {
        if results.is_empty() {
            return Self {
                rows: 0,
                failed: 0,
                peak_ac_w: 0.0,
                mean_ac_w: 0.0,
                ac_energy_kwh: 0.0,
                capacity_factor_pct: 0.0,
            };
        }

        let mut failed = 0_usize;
        let mut peak = 0.0_f64;
        let mut ac_sum = 0.0_f64;
        let mut ok_rows = 0_usize;

        for r in results {
            match r {
                Ok(row) => {
                    peak = peak.max(row.ac_power);
                    ac_sum += row.ac_power;
                    ok_rows += 1;
                }
                Err(_) => failed += 1,
            }
        }

        let energy_kwh = ac_sum * dt_hours / 1000.0;
        let span_hours = results.len() as f64 * dt_hours;
        let capacity_factor_pct = if paco_w > 0.0 && span_hours > 0.0 {
            100.0 * energy_kwh / (paco_w / 1000.0 * span_hours)
        } else {
            0.0
        };

        Self {
            rows: results.len(),
            failed,
            peak_ac_w: peak,
            mean_ac_w: if ok_rows > 0 {
                ac_sum / ok_rows as f64
            } else {
                0.0
            },
            ac_energy_kwh: energy_kwh,
            capacity_factor_pct,
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Batch Summary ---")?;
        writeln!(f, "Rows processed:    {} ({} failed)", self.rows, self.failed)?;
        writeln!(f, "Peak AC power:     {:.2} W", self.peak_ac_w)?;
        writeln!(f, "Mean AC power:     {:.2} W", self.mean_ac_w)?;
        writeln!(f, "AC energy:         {:.3} kWh", self.ac_energy_kwh)?;
        write!(f, "Capacity factor:   {:.1}%", self.capacity_factor_pct)
    }
}
