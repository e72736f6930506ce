use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use log::info;
use crate::error::{PKError, PKResult};

/// Curve shape for extended-release doses.
///
/// Times are hours after administration, ratios convert mg into concentration
/// at the corresponding peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErCurveParams {
    pub peak1_time: f64,
    /// Must exceed the 4h second-phase onset.
    pub peak2_time: f64,
    pub half_life: f64,
    pub peak1_ratio: f64,
    pub peak2_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrCurveParams {
    pub peak_time: f64,
    pub half_life: f64,
    pub peak_ratio: f64,
}

pub const ER_PEAK1_RATIO: f64 = 1.2;
pub const ER_PEAK2_RATIO: f64 = 0.8;
pub const IR_PEAK_RATIO: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metabolism {
    Slow,
    #[default]
    Medium,
    Fast,
}

/// Timing overrides applied by a metabolism preset. Ratios are not part of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetabolismPreset {
    pub er_peak1_time: f64,
    pub er_peak2_time: f64,
    pub er_half_life: f64,
    pub ir_peak_time: f64,
    pub ir_half_life: f64,
}

impl Metabolism {
    pub const ALL: [Metabolism; 3] = [Metabolism::Slow, Metabolism::Medium, Metabolism::Fast];

    pub fn preset(self) -> MetabolismPreset {
        match self {
            Metabolism::Slow => MetabolismPreset {
                er_peak1_time: 2.5,
                er_peak2_time: 7.0,
                er_half_life: 4.0,
                ir_peak_time: 2.0,
                ir_half_life: 3.5,
            },
            Metabolism::Medium => MetabolismPreset {
                er_peak1_time: 2.0,
                er_peak2_time: 6.0,
                er_half_life: 3.0,
                ir_peak_time: 1.5,
                ir_half_life: 2.5,
            },
            Metabolism::Fast => MetabolismPreset {
                er_peak1_time: 1.5,
                er_peak2_time: 5.0,
                er_half_life: 2.0,
                ir_peak_time: 1.0,
                ir_half_life: 2.0,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Metabolism::Slow => "slow",
            Metabolism::Medium => "medium",
            Metabolism::Fast => "fast",
        }
    }
}

impl fmt::Display for Metabolism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metabolism {
    type Err = PKError;

    fn from_str(s: &str) -> PKResult<Self> {
        match s {
            "slow" => Ok(Metabolism::Slow),
            "medium" => Ok(Metabolism::Medium),
            "fast" => Ok(Metabolism::Fast),
            other => Err(PKError::InvalidPreset(other.to_string())),
        }
    }
}

/// The single active ER and IR parameter sets shared by every dose of that kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStore {
    er: ErCurveParams,
    ir: IrCurveParams,
    /// `None` until a preset is applied to a custom store.
    metabolism: Option<Metabolism>,
}

impl ParameterStore {
    pub fn new(metabolism: Metabolism) -> Self {
        let preset = metabolism.preset();
        Self {
            er: ErCurveParams {
                peak1_time: preset.er_peak1_time,
                peak2_time: preset.er_peak2_time,
                half_life: preset.er_half_life,
                peak1_ratio: ER_PEAK1_RATIO,
                peak2_ratio: ER_PEAK2_RATIO,
            },
            ir: IrCurveParams {
                peak_time: preset.ir_peak_time,
                half_life: preset.ir_half_life,
                peak_ratio: IR_PEAK_RATIO,
            },
            metabolism: Some(metabolism),
        }
    }

    /// Build a store with explicit parameter sets, e.g. for sensitivity runs.
    pub fn with_params(er: ErCurveParams, ir: IrCurveParams) -> PKResult<Self> {
        if er.peak2_time <= crate::models::SECOND_PHASE_ONSET {
            return Err(PKError::Validation(format!(
                "ER peak2_time must be greater than {}h, got {}h",
                crate::models::SECOND_PHASE_ONSET, er.peak2_time
            )));
        }
        Ok(Self { er, ir, metabolism: None })
    }

    /// Overwrite the preset-covered timing fields; ratios stay as they are.
    pub fn apply_preset(&mut self, metabolism: Metabolism) {
        let preset = metabolism.preset();
        self.er.peak1_time = preset.er_peak1_time;
        self.er.peak2_time = preset.er_peak2_time;
        self.er.half_life = preset.er_half_life;
        self.ir.peak_time = preset.ir_peak_time;
        self.ir.half_life = preset.ir_half_life;
        self.metabolism = Some(metabolism);
        info!("Applied {} metabolism preset: {}", metabolism, self.describe());
    }

    /// Same as [`apply_preset`](Self::apply_preset) but from a user-facing name.
    /// The name is parsed before anything is touched.
    pub fn apply_preset_named(&mut self, name: &str) -> PKResult<()> {
        let metabolism = name.parse::<Metabolism>()?;
        self.apply_preset(metabolism);
        Ok(())
    }

    pub fn current_er(&self) -> ErCurveParams {
        self.er
    }

    pub fn current_ir(&self) -> IrCurveParams {
        self.ir
    }

    /// Preset behind the active timings, `None` for custom curves.
    pub fn metabolism(&self) -> Option<Metabolism> {
        self.metabolism
    }

    pub fn metabolism_label(&self) -> &'static str {
        self.metabolism.map(Metabolism::as_str).unwrap_or("custom")
    }

    pub fn describe(&self) -> String {
        format!(
            "ER: Peak1={}h, Peak2={}h, t½={}h | IR: Peak={}h, t½={}h",
            self.er.peak1_time, self.er.peak2_time, self.er.half_life,
            self.ir.peak_time, self.ir.half_life
        )
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new(Metabolism::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_medium() {
        let store = ParameterStore::default();
        assert_eq!(store.metabolism(), Some(Metabolism::Medium));
        assert_eq!(store.metabolism_label(), "medium");
        assert_eq!(store.current_er().peak1_time, 2.0);
        assert_eq!(store.current_er().peak2_time, 6.0);
        assert_eq!(store.current_er().half_life, 3.0);
        assert_eq!(store.current_ir().peak_time, 1.5);
        assert_eq!(store.current_ir().half_life, 2.5);
    }

    #[test]
    fn test_preset_keeps_ratios() {
        let mut store = ParameterStore::default();
        store.apply_preset(Metabolism::Slow);

        let er = store.current_er();
        assert_eq!(er.peak1_time, 2.5);
        assert_eq!(er.peak2_time, 7.0);
        assert_eq!(er.half_life, 4.0);
        assert_eq!(er.peak1_ratio, 1.2);
        assert_eq!(er.peak2_ratio, 0.8);

        let ir = store.current_ir();
        assert_eq!(ir.peak_time, 2.0);
        assert_eq!(ir.half_life, 3.5);
        assert_eq!(ir.peak_ratio, 1.5);
    }

    #[test]
    fn test_custom_ratios_survive_preset() {
        let er = ErCurveParams {
            peak1_time: 1.0,
            peak2_time: 8.0,
            half_life: 5.0,
            peak1_ratio: 2.0,
            peak2_ratio: 0.5,
        };
        let ir = IrCurveParams { peak_time: 1.0, half_life: 1.0, peak_ratio: 3.0 };
        let mut store = ParameterStore::with_params(er, ir).unwrap();
        assert_eq!(store.metabolism(), None);
        assert_eq!(store.metabolism_label(), "custom");

        store.apply_preset(Metabolism::Fast);
        assert_eq!(store.metabolism(), Some(Metabolism::Fast));

        assert_eq!(store.current_er().peak1_ratio, 2.0);
        assert_eq!(store.current_er().peak2_ratio, 0.5);
        assert_eq!(store.current_ir().peak_ratio, 3.0);
        assert_eq!(store.current_er().peak2_time, 5.0);
    }

    #[test]
    fn test_invalid_preset_leaves_store_untouched() {
        let mut store = ParameterStore::new(Metabolism::Fast);
        let before = store.clone();

        let err = store.apply_preset_named("glacial").unwrap_err();
        assert!(matches!(err, PKError::InvalidPreset(ref name) if name == "glacial"));
        assert_eq!(store, before);
    }

    #[test]
    fn test_with_params_rejects_early_second_peak() {
        let er = ErCurveParams {
            peak1_time: 1.0,
            peak2_time: 4.0,
            half_life: 3.0,
            peak1_ratio: 1.2,
            peak2_ratio: 0.8,
        };
        let ir = ParameterStore::default().current_ir();
        assert!(matches!(ParameterStore::with_params(er, ir), Err(PKError::Validation(_))));
    }

    #[test]
    fn test_describe() {
        let store = ParameterStore::default();
        assert_eq!(
            store.describe(),
            "ER: Peak1=2h, Peak2=6h, t½=3h | IR: Peak=1.5h, t½=2.5h"
        );
    }

    #[test]
    fn test_metabolism_names() {
        for metabolism in Metabolism::ALL {
            assert_eq!(metabolism.as_str().parse::<Metabolism>().unwrap(), metabolism);
        }
        assert!("Medium".parse::<Metabolism>().is_err());
    }
}
