//! Pressure-ratio sweeps.
//!
//! Each point runs on its own solver instance, so points are evaluated in
//! parallel with rayon and share only the read-only gas data.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::case_compile::CompiledCase;
use crate::error::{AppError, AppResult};
use crate::run_service::solve_states;

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepType {
    /// Uniformly spaced points
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// Range of overall pressure ratios to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    pub fn new(start: f64, end: f64, num_points: usize, sweep_type: SweepType) -> AppResult<Self> {
        if num_points < 2 {
            return Err(AppError::InvalidInput(
                "Sweep must have at least 2 points".to_string(),
            ));
        }
        if !(start > 0.0 && end > 0.0) {
            return Err(AppError::InvalidInput(
                "Pressure ratios must be positive".to_string(),
            ));
        }
        if (start - end).abs() < 1e-12 {
            return Err(AppError::InvalidInput(
                "Start and end values must be different".to_string(),
            ));
        }
        Ok(Self {
            start,
            end,
            num_points,
            sweep_type,
        })
    }

    /// Generate all points in the sweep, endpoints exact.
    pub fn generate_points(&self) -> Vec<f64> {
        let n = self.num_points;
        let mut points: Vec<f64> = match self.sweep_type {
            SweepType::Linear => {
                let delta = (self.end - self.start) / (n - 1) as f64;
                (0..n).map(|i| self.start + i as f64 * delta).collect()
            }
            SweepType::Logarithmic => {
                let (log_start, log_end) = (self.start.ln(), self.end.ln());
                let log_delta = (log_end - log_start) / (n - 1) as f64;
                (0..n)
                    .map(|i| (log_start + i as f64 * log_delta).exp())
                    .collect()
            }
        };
        points[0] = self.start;
        points[n - 1] = self.end;
        points
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepValues {
    pub thermal_efficiency: Option<f64>,
    pub w_net: Option<f64>,
    pub q_in: Option<f64>,
    /// Compressor outlet temperature [K]
    pub t2: f64,
    pub regeneration_applied: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub pressure_ratio: f64,
    /// Failed points carry the error text
    pub result: Result<SweepValues, String>,
}

fn evaluate(compiled: &CompiledCase, pressure_ratio: f64) -> AppResult<SweepValues> {
    let point = compiled.point.with_pressure_ratio(pressure_ratio);
    let mut cycle = solve_states(compiled, &point)?;
    let regeneration = cycle.compute_regeneration()?;
    let props = cycle.process_properties();
    let t2 = cycle
        .states()
        .get(jf_cycle::StateLabel::Outlet2)
        .map(|s| s.t())
        .unwrap_or(f64::NAN);
    Ok(SweepValues {
        thermal_efficiency: props.thermal_efficiency,
        w_net: props.w_net,
        q_in: props.q_in,
        t2,
        regeneration_applied: regeneration.is_applied(),
    })
}

/// Evaluate the cycle at every pressure ratio of `sweep`, in order.
pub fn sweep_pressure_ratio(compiled: &CompiledCase, sweep: &SweepDefinition) -> Vec<SweepPoint> {
    let points = sweep.generate_points();
    debug!(case = %compiled.name, points = points.len(), "pressure ratio sweep");
    points
        .par_iter()
        .map(|&pressure_ratio| SweepPoint {
            pressure_ratio,
            result: evaluate(compiled, pressure_ratio).map_err(|e| e.to_string()),
        })
        .collect()
}

/// Sweep point with the highest thermal efficiency.
pub fn best_point(points: &[SweepPoint]) -> Option<&SweepPoint> {
    points
        .iter()
        .filter_map(|p| {
            let eta = p.result.as_ref().ok()?.thermal_efficiency?;
            eta.is_finite().then_some((p, eta))
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(p, _)| p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_points() {
        let sweep = SweepDefinition::new(2.0, 10.0, 5, SweepType::Linear).unwrap();
        assert_eq!(sweep.generate_points(), vec![2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn logarithmic_points() {
        let sweep = SweepDefinition::new(1.0, 100.0, 3, SweepType::Logarithmic).unwrap();
        let points = sweep.generate_points();
        assert_eq!(points[0], 1.0);
        assert!((points[1] - 10.0).abs() < 1e-9);
        assert_eq!(points[2], 100.0);
    }

    #[test]
    fn invalid_definitions() {
        assert!(SweepDefinition::new(2.0, 10.0, 1, SweepType::Linear).is_err());
        assert!(SweepDefinition::new(0.0, 10.0, 5, SweepType::Logarithmic).is_err());
        assert!(SweepDefinition::new(5.0, 5.0, 5, SweepType::Linear).is_err());
    }
}
