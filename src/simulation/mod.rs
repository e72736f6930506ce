pub mod grid;
pub mod series;
pub mod summary;

use log::debug;
use crate::dosing::{Dose, DoseKind};
use crate::models::{ExtendedReleaseModel, ImmediateReleaseModel, PKModel};
use crate::params::ParameterStore;

pub use grid::*;
pub use series::*;
pub use summary::*;

/// Turns doses into concentration series using a snapshot of the active
/// parameters. Holds no state besides that snapshot.
#[derive(Debug, Clone)]
pub struct ConcentrationEngine {
    immediate: ImmediateReleaseModel,
    extended: ExtendedReleaseModel,
}

impl ConcentrationEngine {
    pub fn new(params: &ParameterStore) -> Self {
        Self {
            immediate: ImmediateReleaseModel::new(params.current_ir()),
            extended: ExtendedReleaseModel::new(params.current_er()),
        }
    }

    fn model(&self, kind: DoseKind) -> &dyn PKModel {
        match kind {
            DoseKind::Immediate => &self.immediate,
            DoseKind::Extended => &self.extended,
        }
    }

    pub fn concentration(&self, dose: &Dose, time: f64) -> f64 {
        self.model(dose.kind).calculate_concentration(time, dose)
    }

    pub fn dose_series(&self, dose: &Dose, times: &[f64]) -> Vec<f64> {
        self.model(dose.kind).calculate_series(times, dose)
    }

    /// Per-dose series in collection order plus their pointwise sum.
    pub fn simulate(&self, doses: &[Dose], times: &[f64]) -> SeriesSet {
        let mut total = vec![0.0; times.len()];
        let mut per_dose = Vec::with_capacity(doses.len());

        for dose in doses {
            let series = self.dose_series(dose, times);
            for (acc, value) in total.iter_mut().zip(&series) {
                *acc += value;
            }
            per_dose.push(DoseSeries::new(dose, series));
        }

        debug!("Computed {} dose series over {} time points", per_dose.len(), times.len());

        SeriesSet {
            times: times.to_vec(),
            per_dose,
            total,
        }
    }
}
