use serde::{Deserialize, Serialize};
use crate::dosing::{Dose, DoseId, DoseKind};

/// Everything a chart needs after one recomputation. Every series is aligned
/// index-for-index with `times`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSet {
    pub times: Vec<f64>,
    pub per_dose: Vec<DoseSeries>,
    pub total: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseSeries {
    pub id: DoseId,
    pub kind: DoseKind,
    pub label: String,
    pub color: String,
    /// IR curves are conventionally drawn dashed.
    pub dashed: bool,
    pub series: Vec<f64>,
}

impl DoseSeries {
    pub fn new(dose: &Dose, series: Vec<f64>) -> Self {
        Self {
            id: dose.id,
            kind: dose.kind,
            label: dose.label(),
            color: dose.color.clone(),
            dashed: dose.kind == DoseKind::Immediate,
            series,
        }
    }
}

impl SeriesSet {
    pub fn dose(&self, id: DoseId) -> Option<&DoseSeries> {
        self.per_dose.iter().find(|s| s.id == id)
    }

    pub fn max_total(&self) -> f64 {
        max_concentration(&self.total)
    }

    pub fn time_to_max_total(&self) -> Option<f64> {
        time_to_max(&self.times, &self.total)
    }

    pub fn total_auc(&self) -> f64 {
        auc(&self.times, &self.total)
    }
}

/// Largest sample, `0.0` for an empty series. Negative series keep their sign.
pub fn max_concentration(series: &[f64]) -> f64 {
    series.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// First sample instant at which the series reaches its maximum.
pub fn time_to_max(times: &[f64], series: &[f64]) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for (&t, &c) in times.iter().zip(series) {
        match best {
            Some((_, max)) if c <= max => {}
            _ => best = Some((t, c)),
        }
    }
    best.map(|(t, _)| t)
}

/// Trapezoidal area under the sampled curve.
pub fn auc(times: &[f64], series: &[f64]) -> f64 {
    let mut area = 0.0;

    for (t, c) in times.windows(2).zip(series.windows(2)) {
        let dt = t[1] - t[0];
        let avg_conc = (c[0] + c[1]) / 2.0;
        area += dt * avg_conc;
    }

    area
}
