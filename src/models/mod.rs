pub mod immediate_release;
pub mod extended_release;

use std::f64::consts::LN_2;
use crate::dosing::Dose;

pub use immediate_release::ImmediateReleaseModel;
pub use extended_release::ExtendedReleaseModel;

/// Hours after administration at which the ER second release starts.
pub const SECOND_PHASE_ONSET: f64 = 4.0;

pub trait PKModel {
    /// Concentration contributed by `dose` at absolute time `time` (hours).
    fn calculate_concentration(&self, time: f64, dose: &Dose) -> f64;

    fn calculate_series(&self, times: &[f64], dose: &Dose) -> Vec<f64> {
        times.iter()
            .map(|&t| self.calculate_concentration(t, dose))
            .collect()
    }
}

/// One lobe of a curve: linear rise to the peak, then half-life decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    pub peak_time: f64,
    pub peak_ratio: f64,
    pub half_life: f64,
}

impl Phase {
    /// `elapsed` is hours since this phase started and must be non-negative.
    pub fn concentration(&self, amount: f64, elapsed: f64) -> f64 {
        let peak = amount * self.peak_ratio;
        if elapsed <= self.peak_time {
            peak * (elapsed / self.peak_time)
        } else {
            peak * (-LN_2 * (elapsed - self.peak_time) / self.half_life).exp()
        }
    }
}
