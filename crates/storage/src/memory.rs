use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fitness_core::model::{
    Equipment, EquipmentId, Goal, GoalId, IntensityLevel, IntensityLevelId, MuscleGroup,
    MuscleGroupId, NewEquipment, NewGoal, NewIntensityLevel, NewMuscleGroup, NewProgressEntry,
    NewUser, NewWorkout, ProgressEntry, ProgressId, User, UserId, Workout, WorkoutId, WorkoutTags,
};

use crate::repository::{
    CatalogRepository, GoalRepository, ProgressRepository, StorageError, UserRepository,
    WorkoutRepository,
};

#[derive(Default)]
struct State {
    next_id: u64,
    users: BTreeMap<UserId, User>,
    goals: BTreeMap<GoalId, Goal>,
    muscle_groups: BTreeMap<MuscleGroupId, MuscleGroup>,
    equipment: BTreeMap<EquipmentId, Equipment>,
    intensity_levels: BTreeMap<IntensityLevelId, IntensityLevel>,
    workouts: BTreeMap<WorkoutId, Workout>,
    progress: BTreeMap<ProgressId, ProgressEntry>,
}

impl State {
    /// Ids are unique across every table; callers only rely on them being
    /// unique per table.
    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn ensure_user(&self, id: UserId) -> Result<(), StorageError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(StorageError::Conflict(format!("user {id} does not exist")))
        }
    }

    fn ensure_email_free(&self, email: &str, except: Option<UserId>) -> Result<(), StorageError> {
        let taken = self
            .users
            .values()
            .any(|u| u.email().eq_ignore_ascii_case(email) && Some(u.id()) != except);
        if taken {
            Err(StorageError::Conflict(format!("email {email} is already registered")))
        } else {
            Ok(())
        }
    }

    fn ensure_tags(&self, tags: WorkoutTags) -> Result<(), StorageError> {
        if let Some(id) = tags
            .muscle_group_id
            .filter(|id| !self.muscle_groups.contains_key(id))
        {
            return Err(StorageError::Conflict(format!("muscle group {id} does not exist")));
        }
        if let Some(id) = tags
            .equipment_id
            .filter(|id| !self.equipment.contains_key(id))
        {
            return Err(StorageError::Conflict(format!("equipment {id} does not exist")));
        }
        if let Some(id) = tags
            .intensity_level_id
            .filter(|id| !self.intensity_levels.contains_key(id))
        {
            return Err(StorageError::Conflict(format!("intensity level {id} does not exist")));
        }
        Ok(())
    }

    fn drop_workout(&mut self, id: WorkoutId) {
        self.workouts.remove(&id);
        self.progress.retain(|_, entry| entry.workout_id() != id);
    }

    fn retag_workouts(&mut self, clear: impl Fn(&mut WorkoutTags)) {
        for workout in self.workouts.values_mut() {
            let mut tags = workout.tags();
            clear(&mut tags);
            if tags != workout.tags() {
                *workout = workout.clone().with_tags(tags);
            }
        }
    }
}

fn take(limit: u32) -> usize {
    usize::try_from(limit).unwrap_or(usize::MAX)
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Mirrors the referential rules of the SQLite schema: orphans are rejected
/// with `StorageError::Conflict` and deletes cascade.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn insert_user(
        &self,
        user: NewUser,
        created_at: DateTime<Utc>,
    ) -> Result<User, StorageError> {
        let mut state = self.lock()?;
        state.ensure_email_free(user.email(), None)?;
        let id = UserId::new(state.allocate());
        let user = user.assign_id(id, created_at);
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn list_users(&self, limit: u32) -> Result<Vec<User>, StorageError> {
        Ok(self.lock()?.users.values().take(take(limit)).cloned().collect())
    }

    async fn update_user(&self, user: &User) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        if !state.users.contains_key(&user.id()) {
            return Err(StorageError::NotFound);
        }
        state.ensure_email_free(user.email(), Some(user.id()))?;
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        if state.users.remove(&id).is_none() {
            return Err(StorageError::NotFound);
        }
        state.goals.retain(|_, goal| goal.user_id() != id);
        let owned: Vec<WorkoutId> = state
            .workouts
            .values()
            .filter(|w| w.user_id() == id)
            .map(Workout::id)
            .collect();
        for workout_id in owned {
            state.drop_workout(workout_id);
        }
        Ok(())
    }
}

#[async_trait]
impl GoalRepository for InMemoryRepository {
    async fn insert_goal(
        &self,
        goal: NewGoal,
        created_at: DateTime<Utc>,
    ) -> Result<Goal, StorageError> {
        let mut state = self.lock()?;
        state.ensure_user(goal.user_id())?;
        let id = GoalId::new(state.allocate());
        let goal = goal.assign_id(id, created_at);
        state.goals.insert(id, goal.clone());
        Ok(goal)
    }

    async fn get_goal(&self, id: GoalId) -> Result<Option<Goal>, StorageError> {
        Ok(self.lock()?.goals.get(&id).cloned())
    }

    async fn list_goals(&self, limit: u32) -> Result<Vec<Goal>, StorageError> {
        Ok(self.lock()?.goals.values().take(take(limit)).cloned().collect())
    }

    async fn list_goals_for_user(&self, user_id: UserId) -> Result<Vec<Goal>, StorageError> {
        Ok(self
            .lock()?
            .goals
            .values()
            .filter(|g| g.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn update_goal(&self, goal: &Goal) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        if !state.goals.contains_key(&goal.id()) {
            return Err(StorageError::NotFound);
        }
        state.ensure_user(goal.user_id())?;
        state.goals.insert(goal.id(), goal.clone());
        Ok(())
    }

    async fn delete_goal(&self, id: GoalId) -> Result<(), StorageError> {
        self.lock()?
            .goals
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn insert_muscle_group(
        &self,
        group: NewMuscleGroup,
    ) -> Result<MuscleGroup, StorageError> {
        let mut state = self.lock()?;
        let id = MuscleGroupId::new(state.allocate());
        let group = group.assign_id(id);
        state.muscle_groups.insert(id, group.clone());
        Ok(group)
    }

    async fn get_muscle_group(
        &self,
        id: MuscleGroupId,
    ) -> Result<Option<MuscleGroup>, StorageError> {
        Ok(self.lock()?.muscle_groups.get(&id).cloned())
    }

    async fn list_muscle_groups(&self, limit: u32) -> Result<Vec<MuscleGroup>, StorageError> {
        Ok(self
            .lock()?
            .muscle_groups
            .values()
            .take(take(limit))
            .cloned()
            .collect())
    }

    async fn update_muscle_group(&self, group: &MuscleGroup) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        match state.muscle_groups.get_mut(&group.id()) {
            Some(slot) => {
                *slot = group.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    async fn delete_muscle_group(&self, id: MuscleGroupId) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        if state.muscle_groups.remove(&id).is_none() {
            return Err(StorageError::NotFound);
        }
        state.retag_workouts(|tags| {
            if tags.muscle_group_id == Some(id) {
                tags.muscle_group_id = None;
            }
        });
        Ok(())
    }

    async fn insert_equipment(&self, equipment: NewEquipment) -> Result<Equipment, StorageError> {
        let mut state = self.lock()?;
        let id = EquipmentId::new(state.allocate());
        let equipment = equipment.assign_id(id);
        state.equipment.insert(id, equipment.clone());
        Ok(equipment)
    }

    async fn get_equipment(&self, id: EquipmentId) -> Result<Option<Equipment>, StorageError> {
        Ok(self.lock()?.equipment.get(&id).cloned())
    }

    async fn list_equipment(&self, limit: u32) -> Result<Vec<Equipment>, StorageError> {
        Ok(self
            .lock()?
            .equipment
            .values()
            .take(take(limit))
            .cloned()
            .collect())
    }

    async fn update_equipment(&self, equipment: &Equipment) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        match state.equipment.get_mut(&equipment.id()) {
            Some(slot) => {
                *slot = equipment.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    async fn delete_equipment(&self, id: EquipmentId) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        if state.equipment.remove(&id).is_none() {
            return Err(StorageError::NotFound);
        }
        state.retag_workouts(|tags| {
            if tags.equipment_id == Some(id) {
                tags.equipment_id = None;
            }
        });
        Ok(())
    }

    async fn insert_intensity_level(
        &self,
        level: NewIntensityLevel,
    ) -> Result<IntensityLevel, StorageError> {
        let mut state = self.lock()?;
        let id = IntensityLevelId::new(state.allocate());
        let level = level.assign_id(id);
        state.intensity_levels.insert(id, level.clone());
        Ok(level)
    }

    async fn get_intensity_level(
        &self,
        id: IntensityLevelId,
    ) -> Result<Option<IntensityLevel>, StorageError> {
        Ok(self.lock()?.intensity_levels.get(&id).cloned())
    }

    async fn list_intensity_levels(
        &self,
        limit: u32,
    ) -> Result<Vec<IntensityLevel>, StorageError> {
        Ok(self
            .lock()?
            .intensity_levels
            .values()
            .take(take(limit))
            .cloned()
            .collect())
    }

    async fn update_intensity_level(&self, level: &IntensityLevel) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        match state.intensity_levels.get_mut(&level.id()) {
            Some(slot) => {
                *slot = level.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    async fn delete_intensity_level(&self, id: IntensityLevelId) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        if state.intensity_levels.remove(&id).is_none() {
            return Err(StorageError::NotFound);
        }
        state.retag_workouts(|tags| {
            if tags.intensity_level_id == Some(id) {
                tags.intensity_level_id = None;
            }
        });
        Ok(())
    }
}

#[async_trait]
impl WorkoutRepository for InMemoryRepository {
    async fn insert_workout(
        &self,
        workout: NewWorkout,
        created_at: DateTime<Utc>,
    ) -> Result<Workout, StorageError> {
        let mut state = self.lock()?;
        state.ensure_user(workout.user_id())?;
        state.ensure_tags(workout.tags())?;
        let id = WorkoutId::new(state.allocate());
        let workout = workout.assign_id(id, created_at);
        state.workouts.insert(id, workout.clone());
        Ok(workout)
    }

    async fn get_workout(&self, id: WorkoutId) -> Result<Option<Workout>, StorageError> {
        Ok(self.lock()?.workouts.get(&id).cloned())
    }

    async fn list_workouts(&self, limit: u32) -> Result<Vec<Workout>, StorageError> {
        Ok(self
            .lock()?
            .workouts
            .values()
            .take(take(limit))
            .cloned()
            .collect())
    }

    async fn list_workouts_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Workout>, StorageError> {
        Ok(self
            .lock()?
            .workouts
            .values()
            .filter(|w| w.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn update_workout(&self, workout: &Workout) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        if !state.workouts.contains_key(&workout.id()) {
            return Err(StorageError::NotFound);
        }
        state.ensure_user(workout.user_id())?;
        state.ensure_tags(workout.tags())?;
        state.workouts.insert(workout.id(), workout.clone());
        Ok(())
    }

    async fn delete_workout(&self, id: WorkoutId) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        if !state.workouts.contains_key(&id) {
            return Err(StorageError::NotFound);
        }
        state.drop_workout(id);
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn insert_progress(
        &self,
        entry: NewProgressEntry,
        recorded_at: DateTime<Utc>,
    ) -> Result<ProgressEntry, StorageError> {
        let mut state = self.lock()?;
        if !state.workouts.contains_key(&entry.workout_id()) {
            return Err(StorageError::Conflict(format!(
                "workout {} does not exist",
                entry.workout_id()
            )));
        }
        let id = ProgressId::new(state.allocate());
        let entry = entry.assign_id(id, recorded_at);
        state.progress.insert(id, entry.clone());
        Ok(entry)
    }

    async fn get_progress(&self, id: ProgressId) -> Result<Option<ProgressEntry>, StorageError> {
        Ok(self.lock()?.progress.get(&id).cloned())
    }

    async fn list_progress_for_workout(
        &self,
        workout_id: WorkoutId,
    ) -> Result<Vec<ProgressEntry>, StorageError> {
        let mut entries: Vec<ProgressEntry> = self
            .lock()?
            .progress
            .values()
            .filter(|e| e.workout_id() == workout_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| (e.recorded_at(), e.id()));
        Ok(entries)
    }

    async fn delete_progress(&self, id: ProgressId) -> Result<(), StorageError> {
        self.lock()?
            .progress
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitness_core::time::fixed_now;

    async fn seed_user(repo: &InMemoryRepository, email: &str) -> User {
        repo.insert_user(NewUser::new("lifter", email).unwrap(), fixed_now())
            .await
            .unwrap()
    }

    async fn seed_workout(repo: &InMemoryRepository, user: UserId, tags: WorkoutTags) -> Workout {
        repo.insert_workout(
            NewWorkout::new(user, "Bench", None, tags).unwrap(),
            fixed_now(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn round_trips_user() {
        let repo = InMemoryRepository::new();
        let user = seed_user(&repo, "a@b.io").await;

        let fetched = repo.get_user(user.id()).await.unwrap().unwrap();
        assert_eq!(fetched, user);
        assert!(repo.get_user(UserId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let repo = InMemoryRepository::new();
        seed_user(&repo, "a@b.io").await;
        let err = repo
            .insert_user(NewUser::new("other", "A@B.io").unwrap(), fixed_now())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn goal_for_missing_user_conflicts() {
        let repo = InMemoryRepository::new();
        let err = repo
            .insert_goal(
                NewGoal::new(UserId::new(5), "Squat", None, 10.0).unwrap(),
                fixed_now(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn progress_is_listed_oldest_first() {
        let repo = InMemoryRepository::new();
        let user = seed_user(&repo, "a@b.io").await;
        let workout = seed_workout(&repo, user.id(), WorkoutTags::default()).await;

        let later = fixed_now() + chrono::Duration::hours(1);
        let second = repo
            .insert_progress(
                NewProgressEntry::new(workout.id(), 5, 5, 60.0, 20).unwrap(),
                later,
            )
            .await
            .unwrap();
        let first = repo
            .insert_progress(
                NewProgressEntry::new(workout.id(), 3, 3, 50.0, 15).unwrap(),
                fixed_now(),
            )
            .await
            .unwrap();

        let listed = repo.list_progress_for_workout(workout.id()).await.unwrap();
        let ids: Vec<ProgressId> = listed.iter().map(ProgressEntry::id).collect();
        assert_eq!(ids, vec![first.id(), second.id()]);
    }

    #[tokio::test]
    async fn deleting_user_cascades() {
        let repo = InMemoryRepository::new();
        let user = seed_user(&repo, "a@b.io").await;
        let workout = seed_workout(&repo, user.id(), WorkoutTags::default()).await;
        let goal = repo
            .insert_goal(
                NewGoal::new(user.id(), "Volume", None, 100.0).unwrap(),
                fixed_now(),
            )
            .await
            .unwrap();
        let entry = repo
            .insert_progress(
                NewProgressEntry::new(workout.id(), 5, 5, 60.0, 20).unwrap(),
                fixed_now(),
            )
            .await
            .unwrap();

        repo.delete_user(user.id()).await.unwrap();

        assert!(repo.get_goal(goal.id()).await.unwrap().is_none());
        assert!(repo.get_workout(workout.id()).await.unwrap().is_none());
        assert!(repo.get_progress(entry.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_catalog_entry_clears_workout_tag() {
        let repo = InMemoryRepository::new();
        let user = seed_user(&repo, "a@b.io").await;
        let chest = repo
            .insert_muscle_group(NewMuscleGroup::new("Chest", None).unwrap())
            .await
            .unwrap();
        let bar = repo
            .insert_equipment(NewEquipment::new("Barbell", None).unwrap())
            .await
            .unwrap();
        let tags = WorkoutTags {
            muscle_group_id: Some(chest.id()),
            equipment_id: Some(bar.id()),
            intensity_level_id: None,
        };
        let workout = seed_workout(&repo, user.id(), tags).await;

        repo.delete_muscle_group(chest.id()).await.unwrap();

        let refreshed = repo.get_workout(workout.id()).await.unwrap().unwrap();
        assert_eq!(refreshed.tags().muscle_group_id, None);
        assert_eq!(refreshed.tags().equipment_id, Some(bar.id()));
    }

    #[tokio::test]
    async fn workout_with_unknown_tag_conflicts() {
        let repo = InMemoryRepository::new();
        let user = seed_user(&repo, "a@b.io").await;
        let err = repo
            .insert_workout(
                NewWorkout::new(
                    user.id(),
                    "Row",
                    None,
                    WorkoutTags {
                        intensity_level_id: Some(IntensityLevelId::new(77)),
                        ..WorkoutTags::default()
                    },
                )
                .unwrap(),
                fixed_now(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_and_delete_missing_rows_are_not_found() {
        let repo = InMemoryRepository::new();
        let ghost = NewMuscleGroup::new("Ghost", None)
            .unwrap()
            .assign_id(MuscleGroupId::new(42));
        assert!(matches!(
            repo.update_muscle_group(&ghost).await,
            Err(StorageError::NotFound)
        ));
        assert!(matches!(
            repo.delete_goal(GoalId::new(42)).await,
            Err(StorageError::NotFound)
        ));
        assert!(matches!(
            repo.delete_progress(ProgressId::new(42)).await,
            Err(StorageError::NotFound)
        ));
    }
}
