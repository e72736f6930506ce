pub mod color;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use log::debug;
use crate::error::{PKError, PKResult};

pub use color::*;

pub type DoseId = u64;

pub const DEFAULT_AMOUNT_MG: f64 = 10.0;
pub const DEFAULT_SPACING_H: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoseKind {
    #[serde(rename = "ER")]
    Extended,
    #[serde(rename = "IR")]
    Immediate,
}

impl DoseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DoseKind::Extended => "ER",
            DoseKind::Immediate => "IR",
        }
    }
}

impl fmt::Display for DoseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DoseKind {
    type Err = PKError;

    fn from_str(s: &str) -> PKResult<Self> {
        match s {
            "ER" => Ok(DoseKind::Extended),
            "IR" => Ok(DoseKind::Immediate),
            other => Err(PKError::InvalidDosing(format!("Unknown dose kind: {}", other))),
        }
    }
}

/// Everything about a dose except its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseFields {
    pub kind: DoseKind,
    /// Hours from the start of the day.
    pub time: f64,
    /// Milligrams.
    pub amount: f64,
    /// Presentation colour; never read by the engine.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dose {
    pub id: DoseId,
    pub kind: DoseKind,
    pub time: f64,
    pub amount: f64,
    pub color: String,
}

impl Dose {
    pub fn label(&self) -> String {
        format!("{} {}mg @ {}h", self.kind, self.amount, self.time)
    }

    fn set_fields(&mut self, fields: DoseFields) {
        self.kind = fields.kind;
        self.time = fields.time;
        self.amount = fields.amount;
        self.color = fields.color;
    }
}

/// Doses in creation order. Ids start at 1 and are never handed out twice.
///
/// Amounts and times are stored as given; nothing here rejects a zero amount
/// or a negative time.
#[derive(Debug, Clone)]
pub struct DoseCollection {
    doses: Vec<Dose>,
    next_id: DoseId,
}

impl DoseCollection {
    pub fn new() -> Self {
        Self { doses: Vec::new(), next_id: 1 }
    }

    pub fn add(&mut self, fields: DoseFields) -> DoseId {
        let id = self.next_id;
        self.next_id += 1;

        let dose = Dose {
            id,
            kind: fields.kind,
            time: fields.time,
            amount: fields.amount,
            color: fields.color,
        };
        debug!("Added dose {}: {}", id, dose.label());
        self.doses.push(dose);
        id
    }

    /// Add an ER 10mg dose one hour after the last dose (or at 0h when empty).
    pub fn add_default(&mut self, colors: &mut dyn ColorStrategy) -> DoseId {
        let time = self.doses.last()
            .map(|d| d.time + DEFAULT_SPACING_H)
            .unwrap_or(0.0);
        let color = colors.color_for(self.next_id);

        self.add(DoseFields {
            kind: DoseKind::Extended,
            time,
            amount: DEFAULT_AMOUNT_MG,
            color,
        })
    }

    pub fn update(&mut self, id: DoseId, fields: DoseFields) -> PKResult<()> {
        let dose = self.doses.iter_mut()
            .find(|d| d.id == id)
            .ok_or(PKError::NotFound(id))?;
        dose.set_fields(fields);
        debug!("Updated dose {}: {}", id, dose.label());
        Ok(())
    }

    /// Returns whether a dose was removed. Unknown ids are ignored.
    pub fn remove(&mut self, id: DoseId) -> bool {
        let before = self.doses.len();
        self.doses.retain(|d| d.id != id);
        let removed = self.doses.len() != before;
        if removed {
            debug!("Removed dose {}", id);
        }
        removed
    }

    /// Remove every dose. The id sequence carries on.
    pub fn clear(&mut self) {
        self.doses.clear();
    }

    pub fn get(&self, id: DoseId) -> Option<&Dose> {
        self.doses.iter().find(|d| d.id == id)
    }

    pub fn list(&self) -> &[Dose] {
        &self.doses
    }

    pub fn len(&self) -> usize {
        self.doses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doses.is_empty()
    }
}

impl Default for DoseCollection {
    fn default() -> Self {
        Self::new()
    }
}
