use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::series::{auc, max_concentration, time_to_max, SeriesSet};
use crate::dosing::DoseId;
use crate::params::{ErCurveParams, IrCurveParams, ParameterStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub generated_at: DateTime<Utc>,
    /// Preset name, or `custom` when the curves were set directly.
    pub metabolism: String,
    pub er_params: ErCurveParams,
    pub ir_params: IrCurveParams,
    pub n_doses: usize,
    pub n_time_points: usize,
    pub total: CurveSummary,
    pub doses: Vec<DoseSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveSummary {
    pub cmax: f64,
    pub tmax: Option<f64>,
    pub auc: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseSummary {
    pub id: DoseId,
    pub label: String,
    #[serde(flatten)]
    pub curve: CurveSummary,
}

impl CurveSummary {
    pub fn from_series(times: &[f64], series: &[f64]) -> Self {
        Self {
            cmax: max_concentration(series),
            tmax: time_to_max(times, series),
            auc: auc(times, series),
        }
    }
}

impl SimulationSummary {
    pub fn from_results(set: &SeriesSet, params: &ParameterStore) -> Self {
        let doses = set.per_dose.iter()
            .map(|d| DoseSummary {
                id: d.id,
                label: d.label.clone(),
                curve: CurveSummary::from_series(&set.times, &d.series),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            metabolism: params.metabolism_label().to_string(),
            er_params: params.current_er(),
            ir_params: params.current_ir(),
            n_doses: set.per_dose.len(),
            n_time_points: set.times.len(),
            total: CurveSummary::from_series(&set.times, &set.total),
            doses,
        }
    }
}
