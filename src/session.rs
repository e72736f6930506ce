//! Caller-owned context tying the parameter store, the dose list and the
//! sampling grid together. UI events arrive as [`SessionCommand`]s and every
//! accepted command is answered with a fresh [`SeriesSet`].

use log::{debug, info};
use crate::dosing::{ColorStrategy, DoseCollection, DoseFields, DoseId};
use crate::error::PKResult;
use crate::params::{Metabolism, ParameterStore};
use crate::simulation::{ConcentrationEngine, SeriesSet, TimeGrid};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Add a dose with the given fields.
    AddDose(DoseFields),
    /// Add an ER 10mg dose an hour after the last one.
    AddDefaultDose,
    EditDose { id: DoseId, fields: DoseFields },
    DeleteDose(DoseId),
    ClearAll,
    SetMetabolism(Metabolism),
}

pub struct Session {
    params: ParameterStore,
    doses: DoseCollection,
    grid: TimeGrid,
    times: Vec<f64>,
    colors: Box<dyn ColorStrategy>,
}

impl Session {
    /// Fails if `grid` does not describe a usable set of sample instants.
    pub fn new(
        metabolism: Metabolism,
        grid: TimeGrid,
        colors: Box<dyn ColorStrategy>,
    ) -> PKResult<Self> {
        let times = grid.points()?;
        Ok(Self {
            params: ParameterStore::new(metabolism),
            doses: DoseCollection::new(),
            grid,
            times,
            colors,
        })
    }

    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    pub fn doses(&self) -> &DoseCollection {
        &self.doses
    }

    pub fn grid(&self) -> TimeGrid {
        self.grid
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn add_dose(&mut self, fields: DoseFields) -> DoseId {
        self.doses.add(fields)
    }

    pub fn add_default_dose(&mut self) -> DoseId {
        self.doses.add_default(self.colors.as_mut())
    }

    pub fn edit_dose(&mut self, id: DoseId, fields: DoseFields) -> PKResult<()> {
        self.doses.update(id, fields)
    }

    pub fn delete_dose(&mut self, id: DoseId) {
        self.doses.remove(id);
    }

    pub fn clear(&mut self) {
        self.doses.clear();
    }

    pub fn set_metabolism(&mut self, metabolism: Metabolism) {
        self.params.apply_preset(metabolism);
    }

    /// Full recomputation from the current state.
    pub fn recompute(&self) -> SeriesSet {
        ConcentrationEngine::new(&self.params).simulate(self.doses.list(), &self.times)
    }

    /// Apply one command and recompute. A rejected command leaves the
    /// session as it was.
    pub fn apply(&mut self, command: SessionCommand) -> PKResult<SeriesSet> {
        debug!("Applying {:?}", command);
        match command {
            SessionCommand::AddDose(fields) => {
                let id = self.add_dose(fields);
                info!("Added dose {}", id);
            }
            SessionCommand::AddDefaultDose => {
                let id = self.add_default_dose();
                info!("Added default dose {}", id);
            }
            SessionCommand::EditDose { id, fields } => self.edit_dose(id, fields)?,
            SessionCommand::DeleteDose(id) => self.delete_dose(id),
            SessionCommand::ClearAll => self.clear(),
            SessionCommand::SetMetabolism(metabolism) => self.set_metabolism(metabolism),
        }
        Ok(self.recompute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dosing::{DoseKind, Palette};
    use crate::error::PKError;

    fn session() -> Session {
        Session::new(Metabolism::Medium, TimeGrid::default(), Box::new(Palette::default())).unwrap()
    }

    #[test]
    fn test_unusable_grid_is_rejected() {
        let flat = TimeGrid { start: 0.0, end: 12.0, step: 0.0 };
        let result = Session::new(Metabolism::Medium, flat, Box::new(Palette::default()));
        assert!(matches!(result, Err(PKError::Validation(_))));

        let endless = TimeGrid { start: 0.0, end: f64::INFINITY, step: 0.25 };
        let result = Session::new(Metabolism::Medium, endless, Box::new(Palette::default()));
        assert!(matches!(result, Err(PKError::Validation(_))));
    }

    #[test]
    fn test_times_follow_grid() {
        let session = session();
        assert_eq!(session.times().len(), 49);
        assert_eq!(session.recompute().times, session.times());
    }

    #[test]
    fn test_commands_recompute() {
        let mut session = session();
        let set = session.apply(SessionCommand::AddDefaultDose).unwrap();
        assert_eq!(set.per_dose.len(), 1);
        assert_eq!(set.per_dose[0].label, "ER 10mg @ 0h");
        assert_eq!(set.per_dose[0].color, "#e74c3c");

        let set = session.apply(SessionCommand::AddDefaultDose).unwrap();
        assert_eq!(set.per_dose[1].label, "ER 10mg @ 1h");

        let set = session.apply(SessionCommand::DeleteDose(1)).unwrap();
        assert_eq!(set.per_dose.len(), 1);
        assert_eq!(set.per_dose[0].id, 2);

        let set = session.apply(SessionCommand::ClearAll).unwrap();
        assert!(set.per_dose.is_empty());
        assert!(set.total.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_failed_edit_leaves_doses() {
        let mut session = session();
        session.add_default_dose();
        let before = session.doses().list().to_vec();

        let err = session.apply(SessionCommand::EditDose {
            id: 99,
            fields: DoseFields {
                kind: DoseKind::Immediate,
                time: 1.0,
                amount: 5.0,
                color: String::new(),
            },
        }).unwrap_err();

        assert!(matches!(err, PKError::NotFound(99)));
        assert_eq!(session.doses().list(), before.as_slice());
    }

    #[test]
    fn test_metabolism_reshapes_without_touching_doses() {
        let mut session = session();
        let id = session.add_dose(DoseFields {
            kind: DoseKind::Immediate,
            time: 0.0,
            amount: 10.0,
            color: "#abcdef".to_string(),
        });
        let before = session.recompute();
        let dose_before = session.doses().get(id).cloned();

        let after = session.apply(SessionCommand::SetMetabolism(Metabolism::Slow)).unwrap();

        assert_ne!(before.total, after.total);
        assert_eq!(session.doses().get(id).cloned(), dose_before);
        assert_eq!(session.params().current_ir().peak_time, 2.0);
    }
}
