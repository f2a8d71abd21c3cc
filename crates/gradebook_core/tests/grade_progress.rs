use gradebook_core::db::{open_db_in_memory, raw_query};
use gradebook_core::{
    ExerciseRepository, GradeRepository, ProgressRepository, RepoError, SqliteExerciseRepository,
    SqliteGradeRepository, SqliteProgressRepository, SqliteUserRepository, UserRepository,
    ValidationError,
};
use rusqlite::types::Value;
use rusqlite::Connection;

#[test]
fn grade_sequence_maintains_arithmetic_mean() {
    let mut conn = open_db_in_memory().unwrap();
    let (user_id, exercise_id) = seed_user_and_exercise(&mut conn);

    let mut grades = SqliteGradeRepository::new(&mut conn);
    for value in [59.0, 54.0, 87.0, 45.0] {
        grades.record_grade(user_id, exercise_id, value).unwrap();
    }

    let progress = SqliteProgressRepository::new(&conn)
        .get_progress(user_id, exercise_id)
        .unwrap()
        .unwrap();
    assert_eq!(progress.attempt_count, 4);
    assert!((progress.average_grade - 61.25).abs() < 1e-9);
    assert!(!progress.last_attempt.is_empty());
}

#[test]
fn first_grade_initializes_the_aggregate() {
    let mut conn = open_db_in_memory().unwrap();
    let (user_id, exercise_id) = seed_user_and_exercise(&mut conn);

    SqliteGradeRepository::new(&mut conn)
        .record_grade(user_id, exercise_id, 70.0)
        .unwrap();

    let progress = SqliteProgressRepository::new(&conn)
        .get_progress(user_id, exercise_id)
        .unwrap()
        .unwrap();
    assert_eq!(progress.attempt_count, 1);
    assert!((progress.average_grade - 70.0).abs() < 1e-9);
}

#[test]
fn progress_rows_are_kept_per_exercise() {
    let mut conn = open_db_in_memory().unwrap();
    let (user_id, first_exercise) = seed_user_and_exercise(&mut conn);
    let second_exercise = SqliteExerciseRepository::new(&mut conn)
        .add_exercise("Second", "Another exercise")
        .unwrap();

    let mut grades = SqliteGradeRepository::new(&mut conn);
    grades.record_grade(user_id, first_exercise, 80.0).unwrap();
    grades.record_grade(user_id, second_exercise, 40.0).unwrap();
    grades.record_grade(user_id, second_exercise, 60.0).unwrap();

    let all = SqliteProgressRepository::new(&conn)
        .list_progress_of_user(user_id)
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].exercise_id, first_exercise);
    assert_eq!(all[0].attempt_count, 1);
    assert_eq!(all[1].exercise_id, second_exercise);
    assert_eq!(all[1].attempt_count, 2);
    assert!((all[1].average_grade - 50.0).abs() < 1e-9);
}

#[test]
fn grade_for_unknown_user_leaves_no_rows_behind() {
    let mut conn = open_db_in_memory().unwrap();
    let (_, exercise_id) = seed_user_and_exercise(&mut conn);

    let err = SqliteGradeRepository::new(&mut conn)
        .record_grade(999, exercise_id, 50.0)
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));

    assert_eq!(count_rows(&conn, "grades"), 0);
    assert_eq!(count_rows(&conn, "user_progress"), 0);
}

#[test]
fn grade_for_unknown_exercise_leaves_no_rows_behind() {
    let mut conn = open_db_in_memory().unwrap();
    let (user_id, _) = seed_user_and_exercise(&mut conn);

    let err = SqliteGradeRepository::new(&mut conn)
        .record_grade(user_id, 999, 50.0)
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));

    assert_eq!(count_rows(&conn, "grades"), 0);
    assert_eq!(count_rows(&conn, "user_progress"), 0);
}

#[test]
fn non_finite_grade_is_rejected_before_any_write() {
    let mut conn = open_db_in_memory().unwrap();
    let (user_id, exercise_id) = seed_user_and_exercise(&mut conn);

    let err = SqliteGradeRepository::new(&mut conn)
        .record_grade(user_id, exercise_id, f64::NAN)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::NonFiniteGrade(_))
    ));
    assert_eq!(count_rows(&conn, "grades"), 0);
}

#[test]
fn history_is_ordered_most_recent_first() {
    let mut conn = open_db_in_memory().unwrap();
    let (user_id, exercise_id) = seed_user_and_exercise(&mut conn);

    let mut grades = SqliteGradeRepository::new(&mut conn);
    for value in [59.0, 54.0, 87.0, 45.0] {
        grades.record_grade(user_id, exercise_id, value).unwrap();
    }

    // Same-second timestamps fall back to newest-id-first, so the history is
    // reverse insertion order either way.
    let values: Vec<_> = grades
        .get_grades_of_user(user_id)
        .unwrap()
        .into_iter()
        .map(|entry| entry.grade)
        .collect();
    assert_eq!(values, [45.0, 87.0, 54.0, 59.0]);
}

#[test]
fn history_orders_by_timestamp_before_insertion_order() {
    let mut conn = open_db_in_memory().unwrap();
    let (user_id, exercise_id) = seed_user_and_exercise(&mut conn);

    let mut grades = SqliteGradeRepository::new(&mut conn);
    let oldest_id = grades.record_grade(user_id, exercise_id, 59.0).unwrap();
    grades.record_grade(user_id, exercise_id, 87.0).unwrap();

    // Push the first row's timestamp into the future; it must sort first
    // despite its lower id.
    raw_query(
        &conn,
        "UPDATE grades SET time_attempt = '2999-01-01 00:00:00' WHERE id = ?1;",
        &[Value::Integer(oldest_id)],
        false,
    )
    .unwrap();

    let entries = SqliteGradeRepository::new(&mut conn)
        .get_grades_of_user(user_id)
        .unwrap();
    assert_eq!(entries[0].grade, 59.0);
    assert_eq!(entries[0].time_attempt, "2999-01-01 00:00:00");
}

#[test]
fn history_joins_exercise_names() {
    let mut conn = open_db_in_memory().unwrap();
    let (user_id, exercise_id) = seed_user_and_exercise(&mut conn);

    SqliteGradeRepository::new(&mut conn)
        .record_grade(user_id, exercise_id, 75.5)
        .unwrap();

    let entries = SqliteGradeRepository::new(&mut conn)
        .get_grades_of_user(user_id)
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].exercise_name, "Test");
    assert_eq!(entries[0].grade, 75.5);
}

#[test]
fn remove_grade_does_not_replay_the_aggregate() {
    let mut conn = open_db_in_memory().unwrap();
    let (user_id, exercise_id) = seed_user_and_exercise(&mut conn);

    let mut grades = SqliteGradeRepository::new(&mut conn);
    let first_id = grades.record_grade(user_id, exercise_id, 59.0).unwrap();
    grades.record_grade(user_id, exercise_id, 87.0).unwrap();

    grades.remove_grade(first_id).unwrap();
    assert!(grades.get_grade(first_id).unwrap().is_none());

    // The aggregate still reflects both recorded grades.
    let progress = SqliteProgressRepository::new(&conn)
        .get_progress(user_id, exercise_id)
        .unwrap()
        .unwrap();
    assert_eq!(progress.attempt_count, 2);
    assert!((progress.average_grade - 73.0).abs() < 1e-9);
}

#[test]
fn update_grade_does_not_replay_the_aggregate() {
    let mut conn = open_db_in_memory().unwrap();
    let (user_id, exercise_id) = seed_user_and_exercise(&mut conn);

    let mut grades = SqliteGradeRepository::new(&mut conn);
    let grade_id = grades.record_grade(user_id, exercise_id, 59.0).unwrap();

    grades.update_grade(grade_id, 100.0).unwrap();
    assert_eq!(grades.get_grade(grade_id).unwrap().unwrap().grade, 100.0);

    let progress = SqliteProgressRepository::new(&conn)
        .get_progress(user_id, exercise_id)
        .unwrap()
        .unwrap();
    assert!((progress.average_grade - 59.0).abs() < 1e-9);
}

#[test]
fn grade_lookups_for_missing_rows_return_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut grades = SqliteGradeRepository::new(&mut conn);

    let err = grades.update_grade(11, 50.0).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound { entity: "grade", id: 11 }
    ));

    let err = grades.remove_grade(11).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound { entity: "grade", id: 11 }
    ));
}

#[test]
fn progress_lookup_requires_the_exact_pair() {
    let mut conn = open_db_in_memory().unwrap();
    let (user_id, exercise_id) = seed_user_and_exercise(&mut conn);

    SqliteGradeRepository::new(&mut conn)
        .record_grade(user_id, exercise_id, 65.0)
        .unwrap();

    let repo = SqliteProgressRepository::new(&conn);
    assert!(repo.get_progress(user_id, exercise_id).unwrap().is_some());
    assert!(repo.get_progress(user_id, exercise_id + 1).unwrap().is_none());
    assert!(repo.get_progress(user_id + 1, exercise_id).unwrap().is_none());
}

fn seed_user_and_exercise(conn: &mut Connection) -> (i64, i64) {
    let user_id = SqliteUserRepository::new(conn).add_user("John").unwrap();
    let exercise_id = SqliteExerciseRepository::new(conn)
        .add_exercise("Test", "Testing insertion")
        .unwrap();
    (user_id, exercise_id)
}

fn count_rows(conn: &Connection, table: &str) -> i64 {
    let rows = raw_query(conn, &format!("SELECT COUNT(*) FROM {table};"), &[], true)
        .unwrap()
        .unwrap();
    match rows[0][0] {
        Value::Integer(count) => count,
        ref other => panic!("unexpected count value: {other:?}"),
    }
}
