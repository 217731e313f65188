use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{ProgressId, WorkoutId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("weight lifted must be a finite, non-negative number, got {0}")]
    InvalidWeight(f64),
}

//
// ─── NEW ENTRY ─────────────────────────────────────────────────────────────────
//

/// Validated input for recording one completed instance of a workout.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProgressEntry {
    workout_id: WorkoutId,
    reps: u32,
    sets: u32,
    weight_lifted: f64,
    duration_minutes: u32,
}

impl NewProgressEntry {
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidWeight` if `weight_lifted` is negative,
    /// NaN or infinite.
    pub fn new(
        workout_id: WorkoutId,
        reps: u32,
        sets: u32,
        weight_lifted: f64,
        duration_minutes: u32,
    ) -> Result<Self, ProgressError> {
        if !weight_lifted.is_finite() || weight_lifted < 0.0 {
            return Err(ProgressError::InvalidWeight(weight_lifted));
        }
        Ok(Self {
            workout_id,
            reps,
            sets,
            weight_lifted,
            duration_minutes,
        })
    }

    #[must_use]
    pub fn workout_id(&self) -> WorkoutId {
        self.workout_id
    }

    #[must_use]
    pub fn reps(&self) -> u32 {
        self.reps
    }

    #[must_use]
    pub fn sets(&self) -> u32 {
        self.sets
    }

    #[must_use]
    pub fn weight_lifted(&self) -> f64 {
        self.weight_lifted
    }

    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    #[must_use]
    pub fn assign_id(self, id: ProgressId, recorded_at: DateTime<Utc>) -> ProgressEntry {
        ProgressEntry {
            id,
            workout_id: self.workout_id,
            reps: self.reps,
            sets: self.sets,
            weight_lifted: self.weight_lifted,
            duration_minutes: self.duration_minutes,
            recorded_at,
        }
    }
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

/// One completed instance of a workout.
///
/// Entries are immutable once recorded; correcting one means deleting it and
/// recording a new entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEntry {
    id: ProgressId,
    workout_id: WorkoutId,
    reps: u32,
    sets: u32,
    weight_lifted: f64,
    duration_minutes: u32,
    recorded_at: DateTime<Utc>,
}

impl ProgressEntry {
    /// # Errors
    ///
    /// Returns `ProgressError` if the stored weight no longer validates.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: ProgressId,
        workout_id: WorkoutId,
        reps: u32,
        sets: u32,
        weight_lifted: f64,
        duration_minutes: u32,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, ProgressError> {
        Ok(
            NewProgressEntry::new(workout_id, reps, sets, weight_lifted, duration_minutes)?
                .assign_id(id, recorded_at),
        )
    }

    #[must_use]
    pub fn id(&self) -> ProgressId {
        self.id
    }

    #[must_use]
    pub fn workout_id(&self) -> WorkoutId {
        self.workout_id
    }

    #[must_use]
    pub fn reps(&self) -> u32 {
        self.reps
    }

    #[must_use]
    pub fn sets(&self) -> u32 {
        self.sets
    }

    #[must_use]
    pub fn weight_lifted(&self) -> f64 {
        self.weight_lifted
    }

    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Training volume of this entry, `reps * sets`.
    #[must_use]
    pub fn volume(&self) -> u64 {
        u64::from(self.reps) * u64::from(self.sets)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn rejects_negative_or_non_finite_weight() {
        for weight in [-0.5, f64::NAN, f64::NEG_INFINITY] {
            let err = NewProgressEntry::new(WorkoutId::new(1), 5, 3, weight, 10).unwrap_err();
            assert!(matches!(err, ProgressError::InvalidWeight(_)));
        }
    }

    #[test]
    fn zero_weight_is_bodyweight() {
        let entry = NewProgressEntry::new(WorkoutId::new(1), 12, 3, 0.0, 5).unwrap();
        assert!(entry.weight_lifted().abs() < f64::EPSILON);
    }

    #[test]
    fn volume_does_not_overflow() {
        let entry = NewProgressEntry::new(WorkoutId::new(1), u32::MAX, u32::MAX, 0.0, 0)
            .unwrap()
            .assign_id(ProgressId::new(1), fixed_now());
        assert_eq!(entry.volume(), u64::from(u32::MAX) * u64::from(u32::MAX));
    }
}
