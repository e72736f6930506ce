use super::{PKModel, Phase, SECOND_PHASE_ONSET};
use crate::dosing::Dose;
use crate::params::ErCurveParams;

/// Bimodal curve for extended-release doses.
///
/// The first release starts at administration. The second starts a fixed
/// [`SECOND_PHASE_ONSET`] hours later and peaks at `peak2_time` after
/// administration. Both decay with the same half-life and simply add up.
#[derive(Debug, Clone)]
pub struct ExtendedReleaseModel {
    first: Phase,
    second: Phase,
}

impl ExtendedReleaseModel {
    pub fn new(params: ErCurveParams) -> Self {
        Self {
            first: Phase {
                peak_time: params.peak1_time,
                peak_ratio: params.peak1_ratio,
                half_life: params.half_life,
            },
            second: Phase {
                peak_time: params.peak2_time - SECOND_PHASE_ONSET,
                peak_ratio: params.peak2_ratio,
                half_life: params.half_life,
            },
        }
    }

    pub fn first_release(&self, elapsed: f64, amount: f64) -> f64 {
        if elapsed < 0.0 {
            return 0.0;
        }
        self.first.concentration(amount, elapsed)
    }

    pub fn second_release(&self, elapsed: f64, amount: f64) -> f64 {
        let since_onset = elapsed - SECOND_PHASE_ONSET;
        if since_onset <= 0.0 {
            return 0.0;
        }
        self.second.concentration(amount, since_onset)
    }
}

impl PKModel for ExtendedReleaseModel {
    fn calculate_concentration(&self, time: f64, dose: &Dose) -> f64 {
        let elapsed = time - dose.time;
        if elapsed < 0.0 {
            return 0.0;
        }
        self.first_release(elapsed, dose.amount) + self.second_release(elapsed, dose.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dosing::DoseKind;
    use crate::params::{Metabolism, ParameterStore};
    use approx::assert_relative_eq;

    fn er_dose(time: f64, amount: f64) -> Dose {
        Dose { id: 1, kind: DoseKind::Extended, time, amount, color: String::new() }
    }

    fn medium() -> ExtendedReleaseModel {
        ExtendedReleaseModel::new(ParameterStore::default().current_er())
    }

    #[test]
    fn test_medium_reference_points() {
        let model = medium();
        let dose = er_dose(0.0, 10.0);

        assert_eq!(model.calculate_concentration(2.0, &dose), 12.0);
        assert_relative_eq!(
            model.calculate_concentration(4.0, &dose),
            12.0 * 2f64.powf(-2.0 / 3.0),
            epsilon = 1e-10
        );
        assert_relative_eq!(
            model.calculate_concentration(6.0, &dose),
            12.0 * 2f64.powf(-4.0 / 3.0) + 8.0,
            epsilon = 1e-10
        );
        assert_relative_eq!(model.calculate_concentration(6.0, &dose), 12.762, epsilon = 1e-3);
    }

    #[test]
    fn test_first_phase_peak() {
        for metabolism in Metabolism::ALL {
            let params = ParameterStore::new(metabolism).current_er();
            let model = ExtendedReleaseModel::new(params);
            assert_eq!(model.first_release(params.peak1_time, 25.0), 25.0 * params.peak1_ratio);
        }
    }

    #[test]
    fn test_second_phase_onset() {
        for metabolism in Metabolism::ALL {
            let model = ExtendedReleaseModel::new(ParameterStore::new(metabolism).current_er());
            for elapsed in [0.0, 1.0, 3.99, 4.0] {
                assert_eq!(model.second_release(elapsed, 10.0), 0.0);
            }
            assert!(model.second_release(4.0 + 1e-6, 10.0) > 0.0);
        }
    }

    #[test]
    fn test_second_phase_peak() {
        let params = ParameterStore::default().current_er();
        let model = ExtendedReleaseModel::new(params);
        assert_eq!(model.second_release(params.peak2_time, 10.0), 10.0 * params.peak2_ratio);
    }

    #[test]
    fn test_phases_decay_with_half_life() {
        let params = ParameterStore::default().current_er();
        let model = medium();

        let first = model.first_release(3.0, 10.0);
        assert_relative_eq!(
            model.first_release(3.0 + params.half_life, 10.0),
            first / 2.0,
            epsilon = 1e-10
        );

        let second = model.second_release(7.0, 10.0);
        assert_relative_eq!(
            model.second_release(7.0 + params.half_life, 10.0),
            second / 2.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_offset_by_administration_time() {
        let model = medium();
        let early = er_dose(0.0, 10.0);
        let late = er_dose(2.5, 10.0);

        assert_eq!(model.calculate_concentration(2.0, &late), 0.0);
        assert_relative_eq!(
            model.calculate_concentration(8.5, &late),
            model.calculate_concentration(6.0, &early),
            epsilon = 1e-12
        );
    }
}
