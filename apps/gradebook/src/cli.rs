//! # CLI Command Layer
//!
//! One function per menu action. Each command takes the [`StudentSystem`]
//! plus already-parsed arguments and returns rendered output text, so the
//! interactive menu stays a thin prompt-and-dispatch loop and the commands
//! stay directly testable.
//!
//! Numeric parsing and prompting happen in the menu; by the time a command
//! runs, the year and grade are numbers. Core errors bubble up unchanged
//! inside [`CliError`] and are rendered by the caller.

use gradebook_core::{GradebookError, Student, StudentSystem};
use thiserror::Error;
use tracing::{debug, info};

/// Failures surfaced to the menu for rendering.
#[derive(Debug, Error)]
pub enum CliError {
    /// A records-engine error, passed through verbatim.
    #[error(transparent)]
    Core(#[from] GradebookError),

    /// The identity triple matched no stored student.
    #[error("no such student: {name} {last_name} ({year})")]
    StudentNotFound {
        name: String,
        last_name: String,
        year: i32,
    },

    /// Summary could not be rendered as JSON.
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for command functions.
pub type CmdResult = Result<String, CliError>;

fn find_student_mut<'a>(
    system: &'a mut StudentSystem,
    name: &str,
    last_name: &str,
    year: i32,
) -> Result<&'a mut Student, CliError> {
    system
        .find_student_mut(name, last_name, year)
        .ok_or_else(|| CliError::StudentNotFound {
            name: name.to_string(),
            last_name: last_name.to_string(),
            year,
        })
}

fn find_student<'a>(
    system: &'a StudentSystem,
    name: &str,
    last_name: &str,
    year: i32,
) -> Result<&'a Student, CliError> {
    system
        .find_student(name, last_name, year)
        .ok_or_else(|| CliError::StudentNotFound {
            name: name.to_string(),
            last_name: last_name.to_string(),
            year,
        })
}

/// Render a student view one per line, or a placeholder when empty.
fn render_students(students: &[&Student]) -> String {
    if students.is_empty() {
        return "(no students)".to_string();
    }
    students
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// STUDENT MANAGEMENT COMMANDS
// =============================================================================

/// Add a new student to the system.
pub fn cmd_add_student(
    system: &mut StudentSystem,
    name: &str,
    last_name: &str,
    class_grade: &str,
    major: &str,
    year: i32,
) -> String {
    let student = Student::new(name, last_name, class_grade, major, year);
    let rendered = student.to_string();
    system.add_student(student);
    info!(name, last_name, year, "student added");
    format!("Added: {rendered}")
}

/// Remove the first student matching the identity triple.
pub fn cmd_remove_student(
    system: &mut StudentSystem,
    name: &str,
    last_name: &str,
    year: i32,
) -> CmdResult {
    if system.remove_student(name, last_name, year) {
        info!(name, last_name, year, "student removed");
        Ok("Student removed.".to_string())
    } else {
        Err(CliError::StudentNotFound {
            name: name.to_string(),
            last_name: last_name.to_string(),
            year,
        })
    }
}

/// Remove every student from the given year.
pub fn cmd_remove_students_from_year(system: &mut StudentSystem, year: i32) -> String {
    let removed = system.remove_students_from_year(year);
    info!(year, removed, "removed students by year");
    format!("Removed {removed} student(s) from year {year}.")
}

/// Change a student's first and last name (atomic pair).
pub fn cmd_change_name(
    system: &mut StudentSystem,
    name: &str,
    last_name: &str,
    year: i32,
    new_name: &str,
    new_last_name: &str,
) -> CmdResult {
    let student = find_student_mut(system, name, last_name, year)?;
    if student.change_name(new_name, new_last_name) {
        Ok("Name changed.".to_string())
    } else {
        Ok("Name already set; nothing changed.".to_string())
    }
}

/// Change a student's class label.
pub fn cmd_change_class(
    system: &mut StudentSystem,
    name: &str,
    last_name: &str,
    year: i32,
    new_class: &str,
) -> CmdResult {
    let student = find_student_mut(system, name, last_name, year)?;
    if student.change_class_grade(new_class) {
        Ok("Class changed.".to_string())
    } else {
        Ok("Class already set; nothing changed.".to_string())
    }
}

/// Change a student's major.
pub fn cmd_change_major(
    system: &mut StudentSystem,
    name: &str,
    last_name: &str,
    year: i32,
    new_major: &str,
) -> CmdResult {
    let student = find_student_mut(system, name, last_name, year)?;
    if student.change_major(new_major) {
        Ok("Major changed.".to_string())
    } else {
        Ok("Major already set; nothing changed.".to_string())
    }
}

/// Clear a student's entire grade record.
pub fn cmd_delete_all_grades(
    system: &mut StudentSystem,
    name: &str,
    last_name: &str,
    year: i32,
) -> CmdResult {
    let student = find_student_mut(system, name, last_name, year)?;
    student.delete_all_grades();
    info!(name, last_name, year, "all grades deleted");
    Ok("All grades deleted.".to_string())
}

// =============================================================================
// GRADE MANAGEMENT COMMANDS
// =============================================================================

/// Record a grade for a student's subject.
pub fn cmd_add_grade(
    system: &mut StudentSystem,
    name: &str,
    last_name: &str,
    year: i32,
    subject: &str,
    grade: f64,
) -> CmdResult {
    let student = find_student_mut(system, name, last_name, year)?;
    student.add_grade(subject, grade)?;
    debug!(name, last_name, subject, grade, "grade added");
    Ok(format!("Added grade {grade} for {subject}."))
}

/// Remove the most recent grade for a student's subject.
pub fn cmd_remove_last_grade(
    system: &mut StudentSystem,
    name: &str,
    last_name: &str,
    year: i32,
    subject: &str,
) -> CmdResult {
    let student = find_student_mut(system, name, last_name, year)?;
    let removed = student.remove_last_grade(subject)?;
    debug!(name, last_name, subject, removed, "grade removed");
    Ok(format!("Removed grade: {removed}"))
}

/// List a student's grades for one subject.
pub fn cmd_subject_grades(
    system: &StudentSystem,
    name: &str,
    last_name: &str,
    year: i32,
    subject: &str,
) -> CmdResult {
    let student = find_student(system, name, last_name, year)?;
    let grades = student.get_subject_grades(subject)?;
    let rendered = grades
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("Grades for {subject}: [{rendered}]"))
}

/// A student's average in one subject.
pub fn cmd_subject_average(
    system: &StudentSystem,
    name: &str,
    last_name: &str,
    year: i32,
    subject: &str,
) -> CmdResult {
    let student = find_student(system, name, last_name, year)?;
    let avg = student.average_subject_grade(subject)?;
    Ok(format!("Average for {subject}: {avg:.2}"))
}

/// A student's overall average across all subjects.
pub fn cmd_overall_average(
    system: &StudentSystem,
    name: &str,
    last_name: &str,
    year: i32,
) -> CmdResult {
    let student = find_student(system, name, last_name, year)?;
    let avg = student.average_grade()?;
    Ok(format!("Overall average: {avg:.2}"))
}

/// Drop a subject and all its grades from a student's record.
pub fn cmd_delete_subject(
    system: &mut StudentSystem,
    name: &str,
    last_name: &str,
    year: i32,
    subject: &str,
) -> CmdResult {
    let student = find_student_mut(system, name, last_name, year)?;
    student.delete_subject(subject)?;
    debug!(name, last_name, subject, "subject deleted");
    Ok(format!("Deleted subject {subject}."))
}

/// Render a student's summary, as plain text or pretty JSON.
pub fn cmd_student_summary(
    system: &StudentSystem,
    name: &str,
    last_name: &str,
    year: i32,
    json: bool,
) -> CmdResult {
    let student = find_student(system, name, last_name, year)?;
    let summary = student.summary();

    if json {
        return Ok(serde_json::to_string_pretty(&summary)?);
    }

    let average = summary
        .average
        .map_or_else(|| "none".to_string(), |avg| format!("{avg:.2}"));
    Ok(format!(
        "Student summary:\n\
         name: {}\n\
         class: {}\n\
         major: {}\n\
         year: {}\n\
         subjects: {}\n\
         total grades: {}\n\
         average: {average}",
        summary.full_name,
        summary.class_grade,
        summary.major,
        summary.year,
        summary.subjects,
        summary.total_grades,
    ))
}

// =============================================================================
// SCHOOL MANAGEMENT COMMANDS
// =============================================================================

/// List all students, one per line, in stored order.
pub fn cmd_show_students(system: &StudentSystem) -> String {
    if system.is_empty() {
        return "(no students)".to_string();
    }
    system.show_all_students()
}

/// Number of students currently held.
pub fn cmd_student_count(system: &StudentSystem) -> String {
    format!("Student count: {}", system.student_count())
}

/// Students in a class, matched case-insensitively.
pub fn cmd_students_by_class(system: &StudentSystem, class_grade: &str) -> String {
    render_students(&system.get_students_by_class(class_grade))
}

/// Students with a major, matched case-insensitively.
pub fn cmd_students_by_major(system: &StudentSystem, major: &str) -> String {
    render_students(&system.get_students_from_major(major))
}

/// Class-wide flattened grade average (case-sensitive class match).
pub fn cmd_class_average(system: &StudentSystem, class_grade: &str) -> CmdResult {
    let avg = system.get_class_average(class_grade)?;
    Ok(format!("Average for class {class_grade}: {avg:.2}"))
}

/// School-wide flattened grade average.
pub fn cmd_school_average(system: &StudentSystem) -> CmdResult {
    let avg = system.get_school_average()?;
    Ok(format!("School average: {avg:.2}"))
}

/// All students sorted ascending by class label.
pub fn cmd_sort_by_class(system: &StudentSystem) -> String {
    render_students(&system.sort_students_by_class_grade())
}

/// All students sorted ascending by major.
pub fn cmd_sort_by_major(system: &StudentSystem) -> String {
    render_students(&system.sort_students_by_major())
}

/// All students ranked by overall average, gradeless students last.
pub fn cmd_rank_by_average(system: &StudentSystem) -> String {
    render_ranking(&system.sort_class_by_avg_grade())
}

/// Ranking restricted to one class (case-insensitive filter).
pub fn cmd_rank_by_average_in_class(system: &StudentSystem, class_grade: &str) -> String {
    render_ranking(&system.sort_students_by_avg_in_class(class_grade))
}

fn render_ranking(students: &[&Student]) -> String {
    if students.is_empty() {
        return "(no students)".to_string();
    }
    students
        .iter()
        .map(|s| {
            let avg = s
                .average_grade()
                .map_or_else(|_| "no grades".to_string(), |avg| format!("{avg:.2}"));
            format!("{} {}: {avg}", s.name, s.last_name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
