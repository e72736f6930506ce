use serde::{Deserialize, Serialize};
use crate::error::{PKError, PKResult};

/// Upper bound on sample instants in one grid.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Evenly spaced sample instants, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl TimeGrid {
    pub fn new(start: f64, end: f64, step: f64) -> PKResult<Self> {
        let grid = Self { start, end, step };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> PKResult<()> {
        self.point_count().map(|_| ())
    }

    /// Number of sample instants. Fails for non-finite bounds, a non-positive
    /// step, `end < start`, or more than [`MAX_GRID_POINTS`] instants.
    pub fn point_count(&self) -> PKResult<usize> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(PKError::Validation(format!(
                "Grid bounds must be finite, got {}..{}", self.start, self.end
            )));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(PKError::Validation(
                format!("Grid step must be positive, got {}", self.step)
            ));
        }
        if self.end < self.start {
            return Err(PKError::Validation(
                format!("Grid end {} is before start {}", self.end, self.start)
            ));
        }

        // tolerate 12.0 / 0.25 landing a hair under 48
        let intervals = ((self.end - self.start) / self.step + 1e-9).floor();
        let too_many = || PKError::Validation(format!(
            "Grid {}..{} every {} exceeds {} points",
            self.start, self.end, self.step, MAX_GRID_POINTS
        ));
        if !intervals.is_finite() || intervals >= MAX_GRID_POINTS as f64 {
            return Err(too_many());
        }
        (intervals as usize)
            .checked_add(1)
            .filter(|&n| n <= MAX_GRID_POINTS)
            .ok_or_else(too_many)
    }

    pub fn points(&self) -> PKResult<Vec<f64>> {
        let count = self.point_count()?;
        Ok((0..count)
            .map(|i| self.start + i as f64 * self.step)
            .collect())
    }
}

impl Default for TimeGrid {
    /// 0-12h every 15 minutes.
    fn default() -> Self {
        Self { start: 0.0, end: 12.0, step: 0.25 }
    }
}
