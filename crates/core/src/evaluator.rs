//! Progress scoring and goal evaluation over already-loaded records.
//!
//! Every function here is a single pass over its inputs. Nothing is cached
//! and nothing is written back; callers load fresh entries for each call.

use thiserror::Error;

use crate::model::{Goal, ProgressEntry, UserId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Failures that can come out of goal evaluation.
///
/// The variants are kept apart so callers can answer an ownership failure
/// differently from an arithmetic one.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvaluationError {
    #[error("goal target is zero, progress percentage is undefined")]
    DivisionByZero,

    #[error("user {requesting} is not allowed to evaluate a goal owned by user {owner}")]
    Unauthorized { requesting: UserId, owner: UserId },
}

//
// ─── AGGREGATES ────────────────────────────────────────────────────────────────
//

/// Cumulative `reps * sets` over all entries.
#[must_use]
pub fn total_volume(entries: &[ProgressEntry]) -> u64 {
    entries
        .iter()
        .fold(0_u64, |acc, entry| acc.saturating_add(entry.volume()))
}

/// Progress score for a workout: the mean of the average reps and the
/// average sets across `entries`.
///
/// An empty slice scores `0.0`.
///
/// # Examples
///
/// ```
/// # use fitness_core::evaluator::compute_progress;
/// assert_eq!(compute_progress(&[]), 0.0);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_progress(entries: &[ProgressEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }

    let count = entries.len() as f64;
    let (reps, sets) = entries.iter().fold((0_u64, 0_u64), |(reps, sets), entry| {
        (
            reps + u64::from(entry.reps()),
            sets + u64::from(entry.sets()),
        )
    });

    let mean_reps = reps as f64 / count;
    let mean_sets = sets as f64 / count;
    (mean_reps + mean_sets) / 2.0
}

/// Cumulative volume as a percentage of `goal.target()`.
///
/// # Errors
///
/// Returns `EvaluationError::DivisionByZero` when the goal's target is zero,
/// whatever the entries are.
#[allow(clippy::cast_precision_loss)]
pub fn compute_progress_toward_goal(
    entries: &[ProgressEntry],
    goal: &Goal,
) -> Result<f64, EvaluationError> {
    let target = goal.target();
    if target == 0.0 {
        return Err(EvaluationError::DivisionByZero);
    }

    Ok(total_volume(entries) as f64 / target * 100.0)
}

/// Whether cumulative volume has reached `goal.target()`. The boundary is
/// inclusive.
///
/// # Errors
///
/// Returns `EvaluationError::Unauthorized` if `requesting_user_id` does not own
/// the goal. Ownership is checked before the entries are looked at.
#[allow(clippy::cast_precision_loss)]
pub fn is_goal_achieved(
    entries: &[ProgressEntry],
    goal: &Goal,
    requesting_user_id: UserId,
) -> Result<bool, EvaluationError> {
    if !goal.is_owned_by(requesting_user_id) {
        return Err(EvaluationError::Unauthorized {
            requesting: requesting_user_id,
            owner: goal.user_id(),
        });
    }

    Ok(total_volume(entries) as f64 >= goal.target())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
