//! Progress recording and evaluation.
//!
//! Entries are loaded fresh for every evaluation and handed to
//! `fitness_core::evaluator` as plain values.

use std::sync::Arc;

use fitness_core::evaluator::{
    compute_progress, compute_progress_toward_goal, is_goal_achieved, total_volume,
};
use fitness_core::model::{
    Goal, GoalId, NewProgressEntry, ProgressEntry, ProgressId, UserId, WorkoutId,
};
use serde::Deserialize;
use storage::repository::{GoalRepository, ProgressRepository, WorkoutRepository};
use tracing::{debug, info, warn};

use crate::Clock;
use crate::error::{ProgressServiceError, or_not_found};

/// One completed workout instance as submitted by a client.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ProgressInput {
    pub reps: u32,
    pub sets: u32,
    pub weight_lifted: f64,
    pub duration_minutes: u32,
}

#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    progress: Arc<dyn ProgressRepository>,
    workouts: Arc<dyn WorkoutRepository>,
    goals: Arc<dyn GoalRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        clock: Clock,
        progress: Arc<dyn ProgressRepository>,
        workouts: Arc<dyn WorkoutRepository>,
        goals: Arc<dyn GoalRepository>,
    ) -> Self {
        Self {
            clock,
            progress,
            workouts,
            goals,
        }
    }

    async fn ensure_workout(&self, workout_id: WorkoutId) -> Result<(), ProgressServiceError> {
        match self.workouts.get_workout(workout_id).await? {
            Some(_) => Ok(()),
            None => Err(ProgressServiceError::WorkoutNotFound(workout_id)),
        }
    }

    async fn load_goal(&self, goal_id: GoalId) -> Result<Goal, ProgressServiceError> {
        self.goals
            .get_goal(goal_id)
            .await?
            .ok_or(ProgressServiceError::GoalNotFound(goal_id))
    }

    /// Loads the goal and the workout's entries. Both must belong to the same user.
    async fn load_goal_entries(
        &self,
        goal_id: GoalId,
        workout_id: WorkoutId,
    ) -> Result<(Goal, Vec<ProgressEntry>), ProgressServiceError> {
        let goal = self.load_goal(goal_id).await?;
        let workout = self
            .workouts
            .get_workout(workout_id)
            .await?
            .ok_or(ProgressServiceError::WorkoutNotFound(workout_id))?;
        if workout.user_id() != goal.user_id() {
            warn!(goal_id = %goal_id, workout_id = %workout_id, "workout and goal owners differ");
            return Err(ProgressServiceError::ForeignWorkout {
                goal: goal_id,
                workout: workout_id,
            });
        }

        let entries = self.progress.list_progress_for_workout(workout_id).await?;
        Ok((goal, entries))
    }

    /// Record a completed instance of `workout_id`, timestamped by the clock.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::WorkoutNotFound` if the workout does not exist.
    /// Returns `ProgressServiceError::Progress` if the weight is negative or not finite.
    pub async fn record_progress(
        &self,
        workout_id: WorkoutId,
        input: ProgressInput,
    ) -> Result<ProgressEntry, ProgressServiceError> {
        let new_entry = NewProgressEntry::new(
            workout_id,
            input.reps,
            input.sets,
            input.weight_lifted,
            input.duration_minutes,
        )?;
        self.ensure_workout(workout_id).await?;

        let entry = self
            .progress
            .insert_progress(new_entry, self.clock.now())
            .await?;
        info!(
            workout_id = %workout_id,
            progress_id = %entry.id(),
            volume = entry.volume(),
            "recorded progress"
        );
        Ok(entry)
    }

    /// Entries for a workout, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::WorkoutNotFound` if the workout does not exist.
    pub async fn list_progress(
        &self,
        workout_id: WorkoutId,
    ) -> Result<Vec<ProgressEntry>, ProgressServiceError> {
        self.ensure_workout(workout_id).await?;
        Ok(self.progress.list_progress_for_workout(workout_id).await?)
    }

    /// Delete one entry. The entry must belong to `workout_id`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::EntryNotFound` if the entry does not exist
    /// under that workout.
    pub async fn delete_progress(
        &self,
        workout_id: WorkoutId,
        entry_id: ProgressId,
    ) -> Result<(), ProgressServiceError> {
        let belongs = self
            .progress
            .get_progress(entry_id)
            .await?
            .is_some_and(|entry| entry.workout_id() == workout_id);
        if !belongs {
            return Err(ProgressServiceError::EntryNotFound(entry_id));
        }

        self.progress
            .delete_progress(entry_id)
            .await
            .map_err(or_not_found(ProgressServiceError::EntryNotFound(entry_id)))
    }

    /// Progress score (mean of mean reps and mean sets) for a workout.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::WorkoutNotFound` if the workout does not exist.
    pub async fn workout_progress(
        &self,
        workout_id: WorkoutId,
    ) -> Result<f64, ProgressServiceError> {
        let entries = self.list_progress(workout_id).await?;
        let score = compute_progress(&entries);
        debug!(workout_id = %workout_id, entries = entries.len(), score, "scored workout");
        Ok(score)
    }

    /// Volume recorded for `workout_id` as a percentage of the goal's target.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::GoalNotFound` or `WorkoutNotFound` for
    /// missing records, `ForeignWorkout` if the workout belongs to someone
    /// other than the goal's owner, and `ProgressServiceError::Evaluation` if
    /// the goal's target is zero.
    pub async fn goal_progress(
        &self,
        goal_id: GoalId,
        workout_id: WorkoutId,
    ) -> Result<f64, ProgressServiceError> {
        let (goal, entries) = self.load_goal_entries(goal_id, workout_id).await?;

        let percent = compute_progress_toward_goal(&entries, &goal).inspect_err(|err| {
            warn!(goal_id = %goal_id, error = %err, "goal progress is undefined");
        })?;
        debug!(
            goal_id = %goal_id,
            workout_id = %workout_id,
            volume = total_volume(&entries),
            percent,
            "evaluated goal progress"
        );
        Ok(percent)
    }

    /// Whether `requesting_user` has reached the goal with the volume recorded
    /// for `workout_id`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::GoalNotFound` or `WorkoutNotFound` for
    /// missing records, `ForeignWorkout` if the workout belongs to someone
    /// other than the goal's owner, and `ProgressServiceError::Evaluation` if
    /// the requesting user does not own the goal.
    pub async fn goal_achieved(
        &self,
        goal_id: GoalId,
        workout_id: WorkoutId,
        requesting_user: UserId,
    ) -> Result<bool, ProgressServiceError> {
        let (goal, entries) = self.load_goal_entries(goal_id, workout_id).await?;

        let achieved = is_goal_achieved(&entries, &goal, requesting_user).inspect_err(|err| {
            warn!(goal_id = %goal_id, requesting_user = %requesting_user, error = %err, "goal check refused");
        })?;
        debug!(goal_id = %goal_id, workout_id = %workout_id, achieved, "evaluated goal");
        Ok(achieved)
    }
}
