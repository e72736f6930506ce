use super::{PKModel, Phase};
use crate::dosing::Dose;
use crate::params::IrCurveParams;

/// Single-phase curve for immediate-release doses.
#[derive(Debug, Clone)]
pub struct ImmediateReleaseModel {
    phase: Phase,
}

impl ImmediateReleaseModel {
    pub fn new(params: IrCurveParams) -> Self {
        Self {
            phase: Phase {
                peak_time: params.peak_time,
                peak_ratio: params.peak_ratio,
                half_life: params.half_life,
            },
        }
    }
}

impl PKModel for ImmediateReleaseModel {
    fn calculate_concentration(&self, time: f64, dose: &Dose) -> f64 {
        let elapsed = time - dose.time;
        if elapsed < 0.0 {
            return 0.0;
        }
        self.phase.concentration(dose.amount, elapsed)
    }
}
