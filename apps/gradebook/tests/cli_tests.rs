//! Integration tests for Gradebook CLI commands and the interactive menu.
//!
//! The menu loop is generic over `BufRead`/`Write`, so whole sessions run
//! against string buffers here.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use gradebook::cli::{
    cmd_add_grade, cmd_add_student, cmd_class_average, cmd_overall_average, cmd_rank_by_average,
    cmd_remove_last_grade, cmd_remove_student, cmd_remove_students_from_year, cmd_school_average,
    cmd_show_students, cmd_student_summary, cmd_students_by_class, CliError,
};
use gradebook::menu;
use gradebook_core::{ErrorKind, GradebookError, StudentSystem};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// A system with three 1A students and five grades totalling 21 points.
fn populated_system() -> StudentSystem {
    let mut system = StudentSystem::new();
    cmd_add_student(&mut system, "Jan", "Kowalski", "1A", "CS", 2024);
    cmd_add_student(&mut system, "Anna", "Nowak", "1A", "CS", 2024);
    cmd_add_student(&mut system, "Ewa", "Dąbrowska", "1A", "Math", 2024);

    cmd_add_grade(&mut system, "Jan", "Kowalski", 2024, "math", 4.0).unwrap();
    cmd_add_grade(&mut system, "Jan", "Kowalski", 2024, "physics", 5.0).unwrap();
    cmd_add_grade(&mut system, "Anna", "Nowak", 2024, "math", 3.0).unwrap();
    cmd_add_grade(&mut system, "Ewa", "Dąbrowska", 2024, "physics", 4.0).unwrap();
    cmd_add_grade(&mut system, "Ewa", "Dąbrowska", 2024, "math", 5.0).unwrap();
    system
}

/// Run a scripted menu session and return the rendered output.
fn run_session(system: &mut StudentSystem, script: &[&str]) -> String {
    let input = script.join("\n");
    let mut reader = input.as_bytes();
    let mut output = Vec::new();
    menu::run(system, &mut reader, &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

// =============================================================================
// COMMAND TESTS
// =============================================================================

#[test]
fn test_add_student_reports_identity() {
    let mut system = StudentSystem::new();
    let text = cmd_add_student(&mut system, "Jan", "Kowalski", "1A", "CS", 2024);

    assert!(text.contains("Jan Kowalski"));
    assert_eq!(system.student_count(), 1);
}

#[test]
fn test_remove_missing_student_is_not_found() {
    let mut system = StudentSystem::new();
    let result = cmd_remove_student(&mut system, "Jan", "Kowalski", 2024);

    assert!(matches!(result, Err(CliError::StudentNotFound { .. })));
}

#[test]
fn test_remove_students_from_year_counts() {
    let mut system = StudentSystem::new();
    cmd_add_student(&mut system, "A", "A", "1A", "CS", 2023);
    cmd_add_student(&mut system, "B", "B", "1A", "CS", 2023);
    cmd_add_student(&mut system, "C", "C", "1A", "CS", 2023);
    cmd_add_student(&mut system, "D", "D", "1A", "CS", 2024);

    let text = cmd_remove_students_from_year(&mut system, 2023);
    assert!(text.contains("Removed 3"));
    assert_eq!(system.student_count(), 1);
}

#[test]
fn test_grade_commands_round_trip() {
    let mut system = StudentSystem::new();
    cmd_add_student(&mut system, "Jan", "Kowalski", "1A", "CS", 2024);

    cmd_add_grade(&mut system, "Jan", "Kowalski", 2024, "math", 4.5).unwrap();
    let removed = cmd_remove_last_grade(&mut system, "Jan", "Kowalski", 2024, "math").unwrap();
    assert!(removed.contains("4.5"));

    // The subject emptied, so the overall average is gone too
    let result = cmd_overall_average(&system, "Jan", "Kowalski", 2024);
    assert!(matches!(
        result,
        Err(CliError::Core(GradebookError::StudentHasNoGrades { .. }))
    ));
}

#[test]
fn test_add_grade_out_of_range_surfaces_validation_error() {
    let mut system = StudentSystem::new();
    cmd_add_student(&mut system, "Jan", "Kowalski", "1A", "CS", 2024);

    let result = cmd_add_grade(&mut system, "Jan", "Kowalski", 2024, "math", 6.5);
    match result {
        Err(CliError::Core(err)) => assert_eq!(err.kind(), ErrorKind::Validation),
        other => panic!("expected a core validation error, got {other:?}"),
    }
}

#[test]
fn test_class_average_matches_reference_scenario() {
    let system = populated_system();
    let text = cmd_class_average(&system, "1A").unwrap();
    // 21 grade points over 5 grades
    assert!(text.contains("4.20"));
}

#[test]
fn test_class_average_is_case_sensitive_but_class_filter_is_not() {
    let system = populated_system();

    assert!(cmd_class_average(&system, "1A").is_ok());
    assert!(matches!(
        cmd_class_average(&system, "1a"),
        Err(CliError::Core(GradebookError::NoGradesInClass { .. }))
    ));

    // The listing filter treats both spellings identically
    assert_eq!(
        cmd_students_by_class(&system, "1a"),
        cmd_students_by_class(&system, "1A")
    );
}

#[test]
fn test_school_average_empty_system_fails() {
    let system = StudentSystem::new();
    assert!(matches!(
        cmd_school_average(&system),
        Err(CliError::Core(GradebookError::NoGradesInSchool))
    ));
}

#[test]
fn test_ranking_lists_gradeless_students_last() {
    let mut system = StudentSystem::new();
    cmd_add_student(&mut system, "Top", "Student", "1A", "CS", 2024);
    cmd_add_student(&mut system, "No", "Grades", "1A", "CS", 2024);
    cmd_add_student(&mut system, "Low", "Student", "1A", "CS", 2024);
    cmd_add_grade(&mut system, "Top", "Student", 2024, "math", 4.5).unwrap();
    cmd_add_grade(&mut system, "Low", "Student", 2024, "math", 3.0).unwrap();

    let text = cmd_rank_by_average(&system);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Top Student: 4.50");
    assert_eq!(lines[1], "Low Student: 3.00");
    assert_eq!(lines[2], "No Grades: no grades");
}

#[test]
fn test_summary_text_mode_marks_absent_average() {
    let mut system = StudentSystem::new();
    cmd_add_student(&mut system, "Jan", "Kowalski", "1A", "CS", 2024);

    let text = cmd_student_summary(&system, "Jan", "Kowalski", 2024, false).unwrap();
    assert!(text.contains("subjects: 0"));
    assert!(text.contains("total grades: 0"));
    assert!(text.contains("average: none"));
}

#[test]
fn test_summary_json_mode_is_valid_json() {
    let mut system = StudentSystem::new();
    cmd_add_student(&mut system, "Jan", "Kowalski", "1A", "CS", 2024);
    cmd_add_grade(&mut system, "Jan", "Kowalski", 2024, "math", 4.0).unwrap();

    let text = cmd_student_summary(&system, "Jan", "Kowalski", 2024, true).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed["full_name"], "Jan Kowalski");
    assert_eq!(parsed["subjects"], 1);
    assert_eq!(parsed["total_grades"], 1);
    assert!((parsed["average"].as_f64().unwrap() - 4.0).abs() < 1e-9);
}

#[test]
fn test_show_students_placeholder_when_empty() {
    let system = StudentSystem::new();
    assert_eq!(cmd_show_students(&system), "(no students)");
}

// =============================================================================
// SCRIPTED MENU SESSION TESTS
// =============================================================================

#[test]
fn test_menu_exits_cleanly() {
    let mut system = StudentSystem::new();
    let output = run_session(&mut system, &["0", ""]);
    assert!(output.contains("=== MAIN MENU ==="));
    assert!(output.contains("Goodbye."));
}

#[test]
fn test_menu_add_student_and_list() {
    let mut system = StudentSystem::new();
    let output = run_session(
        &mut system,
        &[
            "1", // student management
            "1", // add student
            "Jan", "Kowalski", "1A", "CS", "2024", //
            "0", // back
            "3", // school management
            "1", // show all
            "0", // back
            "0", // exit
            "",
        ],
    );

    assert!(output.contains("Added: Student Jan Kowalski"));
    assert!(output.contains("Jan Kowalski 1A"));
    assert_eq!(system.student_count(), 1);
}

#[test]
fn test_menu_rejects_non_numeric_year() {
    let mut system = StudentSystem::new();
    let output = run_session(
        &mut system,
        &[
            "1", // student management
            "1", // add student
            "Jan", "Kowalski", "1A", "CS", "not-a-year", //
            "0", // back
            "0", // exit
            "",
        ],
    );

    assert!(output.contains("Invalid year!"));
    assert!(system.is_empty());
}

#[test]
fn test_menu_grade_flow_and_error_rendering() {
    let mut system = StudentSystem::new();
    let output = run_session(
        &mut system,
        &[
            "1", "1", "Jan", "Kowalski", "1A", "CS", "2024", "0", // add student
            "2", // grade management
            "1", "Jan", "Kowalski", "2024", "math", "9.0", // rejected grade
            "1", "Jan", "Kowalski", "2024", "math", "5.0", // accepted grade
            "5", "Jan", "Kowalski", "2024", // overall average
            "0", // back
            "0", // exit
            "",
        ],
    );

    assert!(output.contains("grade 9 must be between 1 and 6"));
    assert!(output.contains("Added grade 5 for math."));
    assert!(output.contains("Overall average: 5.00"));
}

#[test]
fn test_menu_edit_student_changes_class() {
    let mut system = StudentSystem::new();
    let output = run_session(
        &mut system,
        &[
            "1", "1", "Jan", "Kowalski", "1A", "CS", "2024", // add
            "3", "Jan", "Kowalski", "2024", "2", "2B", // edit class
            "0", // back
            "0", // exit
            "",
        ],
    );

    assert!(output.contains("Class changed."));
    let student = system.find_student("Jan", "Kowalski", 2024).unwrap();
    assert_eq!(student.class_grade, "2B");
}

#[test]
fn test_menu_closed_input_ends_session() {
    let mut system = StudentSystem::new();
    // No explicit "0": input simply runs out mid-menu
    let output = run_session(&mut system, &["3", "4"]);
    assert!(output.contains("Student count: 0"));
}
