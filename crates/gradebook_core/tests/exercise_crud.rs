use gradebook_core::db::open_db_in_memory;
use gradebook_core::{
    ExerciseRepository, ExerciseUpdate, GradeRepository, RepoError, SqliteExerciseRepository,
    SqliteGradeRepository, SqliteUserRepository, UserRepository, ValidationError,
};

#[test]
fn add_and_get_roundtrip() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteExerciseRepository::new(&mut conn);

    let id = repo.add_exercise("Test", "Testing insertion").unwrap();
    assert_eq!(id, 1);

    let exercises = repo.get_exercises().unwrap();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0].name, "Test");
    assert_eq!(exercises[0].description, "Testing insertion");

    let loaded = repo.get_exercise(id).unwrap().unwrap();
    assert_eq!(loaded, exercises[0]);
}

#[test]
fn add_exercise_rejects_empty_fields() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteExerciseRepository::new(&mut conn);

    let err = repo.add_exercise("", "described").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyExerciseName)
    ));

    let err = repo.add_exercise("named", " ").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyExerciseDescription)
    ));

    assert!(repo.get_exercises().unwrap().is_empty());
}

#[test]
fn update_name_only_leaves_description_unchanged() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteExerciseRepository::new(&mut conn);

    let id = repo.add_exercise("Test", "Testing insertion").unwrap();
    repo.update_exercise(
        id,
        &ExerciseUpdate {
            name: Some("Renamed".to_string()),
            description: None,
        },
    )
    .unwrap();

    let loaded = repo.get_exercise(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Renamed");
    assert_eq!(loaded.description, "Testing insertion");
}

#[test]
fn update_description_only_leaves_name_unchanged() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteExerciseRepository::new(&mut conn);

    let id = repo.add_exercise("Test", "Testing insertion").unwrap();
    repo.update_exercise(
        id,
        &ExerciseUpdate {
            name: None,
            description: Some("A better description".to_string()),
        },
    )
    .unwrap();

    let loaded = repo.get_exercise(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Test");
    assert_eq!(loaded.description, "A better description");
}

#[test]
fn update_both_fields_applies_both() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteExerciseRepository::new(&mut conn);

    let id = repo.add_exercise("Test", "Testing insertion").unwrap();
    repo.update_exercise(
        id,
        &ExerciseUpdate {
            name: Some("Renamed".to_string()),
            description: Some("Rewritten".to_string()),
        },
    )
    .unwrap();

    let loaded = repo.get_exercise(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Renamed");
    assert_eq!(loaded.description, "Rewritten");
}

#[test]
fn empty_update_is_a_no_op() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteExerciseRepository::new(&mut conn);

    let id = repo.add_exercise("Test", "Testing insertion").unwrap();
    repo.update_exercise(id, &ExerciseUpdate::default()).unwrap();

    let loaded = repo.get_exercise(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Test");
    assert_eq!(loaded.description, "Testing insertion");
}

#[test]
fn update_missing_exercise_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteExerciseRepository::new(&mut conn);

    let err = repo
        .update_exercise(
            9,
            &ExerciseUpdate {
                name: Some("ghost".to_string()),
                description: None,
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "exercise",
            id: 9
        }
    ));
}

#[test]
fn remove_exercise_cascades_grades() {
    let mut conn = open_db_in_memory().unwrap();

    let user_id = SqliteUserRepository::new(&mut conn).add_user("John").unwrap();
    let exercise_id = SqliteExerciseRepository::new(&mut conn)
        .add_exercise("Test", "Testing insertion")
        .unwrap();
    let grade_id = SqliteGradeRepository::new(&mut conn)
        .record_grade(user_id, exercise_id, 73.0)
        .unwrap();

    SqliteExerciseRepository::new(&mut conn)
        .remove_exercise(exercise_id)
        .unwrap();

    assert!(SqliteExerciseRepository::new(&mut conn)
        .get_exercise(exercise_id)
        .unwrap()
        .is_none());
    assert!(SqliteGradeRepository::new(&mut conn)
        .get_grade(grade_id)
        .unwrap()
        .is_none());
}

#[test]
fn remove_missing_exercise_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteExerciseRepository::new(&mut conn);

    let err = repo.remove_exercise(3).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "exercise",
            id: 3
        }
    ));
}
