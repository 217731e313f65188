use fitness_core::evaluator::EvaluationError;
use fitness_core::model::WorkoutTags;
use fitness_core::time::fixed_now;
use services::{AppServices, Clock, ProgressInput, ProgressServiceError, WorkoutServiceError};

fn set(reps: u32, sets: u32) -> ProgressInput {
    ProgressInput {
        reps,
        sets,
        weight_lifted: 60.0,
        duration_minutes: 45,
    }
}

#[tokio::test]
async fn training_flow_register_train_and_evaluate() {
    let services = AppServices::new_sqlite(
        "sqlite:file:memdb_training_flow?mode=memory&cache=shared",
        Clock::fixed(fixed_now()),
    )
    .await
    .expect("connect sqlite");

    let user = services
        .users()
        .create_user("hana".to_string(), "hana@gym.io".to_string())
        .await
        .expect("create user");
    let chest = services
        .catalog()
        .create_muscle_group("Chest".to_string(), None)
        .await
        .expect("create muscle group");
    let workout = services
        .workouts()
        .create_workout(
            user.id(),
            "Bench press".to_string(),
            None,
            WorkoutTags {
                muscle_group_id: Some(chest.id()),
                ..WorkoutTags::default()
            },
        )
        .await
        .expect("create workout");
    let goal = services
        .goals()
        .create_goal(user.id(), "Bench volume".to_string(), None, 40.0)
        .await
        .expect("create goal");

    let progress = services.progress();
    progress.record_progress(workout.id(), set(5, 4)).await.expect("first session");

    let pct = progress
        .goal_progress(goal.id(), workout.id())
        .await
        .expect("goal progress");
    assert!((pct - 50.0).abs() < f64::EPSILON);
    assert!(!progress
        .goal_achieved(goal.id(), workout.id(), user.id())
        .await
        .expect("not yet"));

    progress.record_progress(workout.id(), set(5, 4)).await.expect("second session");
    assert!(progress
        .goal_achieved(goal.id(), workout.id(), user.id())
        .await
        .expect("achieved"));

    let score = progress.workout_progress(workout.id()).await.expect("score");
    assert!((score - 4.5).abs() < f64::EPSILON);

    let stranger = services
        .users()
        .create_user("ivo".to_string(), "ivo@gym.io".to_string())
        .await
        .expect("create stranger");
    let err = progress
        .goal_achieved(goal.id(), workout.id(), stranger.id())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ProgressServiceError::Evaluation(EvaluationError::Unauthorized { .. })
    ));

    // Removing the muscle group untags the workout but keeps it.
    services
        .catalog()
        .delete_muscle_group(chest.id())
        .await
        .expect("delete muscle group");
    let refreshed = services.workouts().get_workout(workout.id()).await.expect("workout");
    assert_eq!(refreshed.tags(), WorkoutTags::default());

    // Removing the user removes everything they own.
    services.users().delete_user(user.id()).await.expect("delete user");
    assert!(matches!(
        services.workouts().get_workout(workout.id()).await,
        Err(WorkoutServiceError::NotFound(_))
    ));
    assert!(matches!(
        progress.list_progress(workout.id()).await,
        Err(ProgressServiceError::WorkoutNotFound(_))
    ));
}
