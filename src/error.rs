use thiserror::Error;

use crate::dosing::DoseId;

#[derive(Error, Debug)]
pub enum PKError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid metabolism preset: {0} (expected slow, medium or fast)")]
    InvalidPreset(String),

    #[error("No dose with id {0}")]
    NotFound(DoseId),

    #[error("Invalid dosing configuration: {0}")]
    InvalidDosing(String),

    #[error("Parameter validation error: {0}")]
    Validation(String),
}

pub type PKResult<T> = Result<T, PKError>;
