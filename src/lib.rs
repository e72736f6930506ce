//! Plasma-concentration curves for combinations of immediate-release (IR) and
//! extended-release (ER) stimulant doses.
//!
//! A [`session::Session`] owns the active curve parameters and the dose list;
//! every change is followed by a full recomputation through
//! [`simulation::ConcentrationEngine`].

pub mod config;
pub mod params;
pub mod models;
pub mod dosing;
pub mod simulation;
pub mod session;
pub mod output;
pub mod error;

pub use crate::dosing::{Dose, DoseCollection, DoseFields, DoseId, DoseKind};
pub use crate::error::{PKError, PKResult};
pub use crate::params::{Metabolism, ParameterStore};
pub use crate::session::{Session, SessionCommand};
pub use crate::simulation::{ConcentrationEngine, SeriesSet, TimeGrid};
