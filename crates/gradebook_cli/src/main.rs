//! CLI smoke entry point.
//!
//! # Responsibility
//! - Seed an in-memory store, print its state, tear it down, print again.
//! - Keep output deterministic enough for quick local sanity checks.

use gradebook_core::db::open_db_in_memory;
use gradebook_core::GradebookService;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("gradebook_core version={}", gradebook_core::core_version());

    let mut conn = open_db_in_memory()?;
    let mut service = GradebookService::new(&mut conn);

    let user_id = service.add_user("John")?;
    let exercise_id = service.add_exercise("Test", "Testing insertion")?;
    let first_grade_id = service.record_grade(user_id, exercise_id, 59.0)?;
    service.record_grade(user_id, exercise_id, 54.0)?;
    service.record_grade(user_id, exercise_id, 87.0)?;
    service.record_grade(user_id, exercise_id, 45.0)?;

    print_state(&mut service, user_id, exercise_id)?;

    service.remove_grade(first_grade_id)?;
    service.remove_user_progress(user_id)?;
    service.remove_exercise(exercise_id)?;
    service.remove_user(user_id)?;

    print_state(&mut service, user_id, exercise_id)?;

    Ok(())
}

fn print_state(
    service: &mut GradebookService<'_>,
    user_id: i64,
    exercise_id: i64,
) -> Result<(), Box<dyn Error>> {
    println!("users: {:?}", service.get_users()?);
    println!("exercises: {:?}", service.get_exercises()?);
    println!(
        "grades of user {user_id}: {:?}",
        service.get_grades_of_user(user_id)?
    );
    println!(
        "progress of ({user_id}, {exercise_id}): {:?}",
        service.get_progress(user_id, exercise_id)?
    );
    Ok(())
}
