use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::dosing::{ColorStrategy, DoseFields, DoseKind, RandomHue};
use crate::error::{PKError, PKResult};
use crate::params::Metabolism;
use crate::session::Session;
use crate::simulation::TimeGrid;

/// Scenario file. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub metabolism: Metabolism,
    pub grid: TimeGrid,
    pub doses: Vec<DoseConfig>,
    /// Seed for colour assignment.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseConfig {
    pub kind: DoseKind,
    pub time: f64,
    pub amount: f64,
    pub color: Option<String>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> PKResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> PKResult<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the file format does not allow. Nothing is clamped.
    pub fn validate(&self) -> PKResult<()> {
        self.grid.validate()?;

        for (index, dose) in self.doses.iter().enumerate() {
            if dose.amount <= 0.0 {
                return Err(PKError::InvalidDosing(format!(
                    "Dose #{} amount must be positive, got {}", index + 1, dose.amount
                )));
            }
            if dose.time < 0.0 {
                return Err(PKError::InvalidDosing(format!(
                    "Dose #{} time must be non-negative, got {}", index + 1, dose.time
                )));
            }
        }

        Ok(())
    }

    pub fn build_session(&self) -> PKResult<Session> {
        let mut colors = RandomHue::new(self.seed);
        let mut fields = Vec::with_capacity(self.doses.len());
        for (index, dose) in self.doses.iter().enumerate() {
            let color = match &dose.color {
                Some(c) => c.clone(),
                None => colors.color_for(index as u64 + 1),
            };
            fields.push(DoseFields {
                kind: dose.kind,
                time: dose.time,
                amount: dose.amount,
                color,
            });
        }

        let mut session = Session::new(self.metabolism, self.grid, Box::new(colors))?;
        for f in fields {
            session.add_dose(f);
        }
        Ok(session)
    }
}
