//! # Interactive Menu
//!
//! The three-section text menu driving one [`StudentSystem`] for the
//! duration of a session. All data is in memory; choosing Exit discards it.
//!
//! The loop is generic over `BufRead`/`Write` so integration tests can run
//! a whole scripted session against a string buffer. Raw input parsing
//! (year, grade) happens here; commands in [`crate::cli`] only ever see
//! parsed values. End of input is treated as Exit.

use crate::cli::{self, CmdResult};
use gradebook_core::StudentSystem;
use std::io::{self, BufRead, Write};

/// Run the interactive session until Exit or end of input.
pub fn run<R: BufRead, W: Write>(
    system: &mut StudentSystem,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    match main_menu(system, input, output) {
        // Closed stdin ends the session like choosing Exit
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(()),
        other => other,
    }
}

/// Prompt for one trimmed line. Signals `UnexpectedEof` when input closes.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<String> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}

/// Prompt for a year; `None` (with a message) on non-numeric input.
fn prompt_year<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<i32>> {
    let raw = prompt(input, output, "Year (e.g. 2024): ")?;
    match raw.parse::<i32>() {
        Ok(year) => Ok(Some(year)),
        Err(_) => {
            writeln!(output, "Invalid year!")?;
            Ok(None)
        }
    }
}

/// Prompt for the (name, last name, year) identity triple.
fn prompt_identity<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<(String, String, i32)>> {
    let name = prompt(input, output, "First name: ")?;
    let last_name = prompt(input, output, "Last name: ")?;
    let Some(year) = prompt_year(input, output)? else {
        return Ok(None);
    };
    Ok(Some((name, last_name, year)))
}

/// Print a command result, rendering errors as plain messages.
fn report<W: Write>(output: &mut W, result: CmdResult) -> io::Result<()> {
    match result {
        Ok(text) => writeln!(output, "{text}"),
        Err(err) => writeln!(output, "{err}"),
    }
}

// =============================================================================
// MAIN MENU
// =============================================================================

fn main_menu<R: BufRead, W: Write>(
    system: &mut StudentSystem,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    loop {
        writeln!(output, "\n=== MAIN MENU ===")?;
        writeln!(output, "1. Student management")?;
        writeln!(output, "2. Grade management")?;
        writeln!(output, "3. School management")?;
        writeln!(output, "0. Exit")?;
        let choice = prompt(input, output, "Choose an option: ")?;

        match choice.as_str() {
            "1" => student_menu(system, input, output)?,
            "2" => grades_menu(system, input, output)?,
            "3" => school_menu(system, input, output)?,
            "0" => {
                writeln!(output, "Goodbye.")?;
                return Ok(());
            }
            _ => writeln!(output, "Invalid option, try again.")?,
        }
    }
}

// =============================================================================
// STUDENT MANAGEMENT
// =============================================================================

fn student_menu<R: BufRead, W: Write>(
    system: &mut StudentSystem,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    loop {
        writeln!(output, "\n--- Student management ---")?;
        writeln!(output, "1. Add student")?;
        writeln!(output, "2. Remove student")?;
        writeln!(output, "3. Edit student")?;
        writeln!(output, "4. Remove all students from a year")?;
        writeln!(output, "0. Back to main menu")?;
        let choice = prompt(input, output, "Choose an option: ")?;

        match choice.as_str() {
            "1" => add_student_flow(system, input, output)?,
            "2" => {
                let Some((name, last_name, year)) = prompt_identity(input, output)? else {
                    continue;
                };
                report(
                    output,
                    cli::cmd_remove_student(system, &name, &last_name, year),
                )?;
            }
            "3" => edit_student_flow(system, input, output)?,
            "4" => {
                let Some(year) = prompt_year(input, output)? else {
                    continue;
                };
                let text = cli::cmd_remove_students_from_year(system, year);
                writeln!(output, "{text}")?;
            }
            "0" => return Ok(()),
            _ => writeln!(output, "Invalid option, try again.")?,
        }
    }
}

fn add_student_flow<R: BufRead, W: Write>(
    system: &mut StudentSystem,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    writeln!(output, "\nNew student:")?;
    let name = prompt(input, output, "First name: ")?;
    let last_name = prompt(input, output, "Last name: ")?;
    let class_grade = prompt(input, output, "Class (e.g. 1A): ")?;
    let major = prompt(input, output, "Major: ")?;
    let Some(year) = prompt_year(input, output)? else {
        return Ok(());
    };

    let text = cli::cmd_add_student(system, &name, &last_name, &class_grade, &major, year);
    writeln!(output, "{text}")
}

fn edit_student_flow<R: BufRead, W: Write>(
    system: &mut StudentSystem,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    writeln!(output, "\nEdit student:")?;
    let Some((name, last_name, year)) = prompt_identity(input, output)? else {
        return Ok(());
    };
    if system.find_student(&name, &last_name, year).is_none() {
        writeln!(output, "No such student found.")?;
        return Ok(());
    }

    writeln!(output, "What do you want to change?")?;
    writeln!(output, "1. First and last name")?;
    writeln!(output, "2. Class")?;
    writeln!(output, "3. Major")?;
    writeln!(output, "4. Delete all grades")?;
    writeln!(output, "0. Cancel")?;
    let choice = prompt(input, output, "Choose an option: ")?;

    match choice.as_str() {
        "1" => {
            let new_name = prompt(input, output, "New first name: ")?;
            let new_last_name = prompt(input, output, "New last name: ")?;
            report(
                output,
                cli::cmd_change_name(system, &name, &last_name, year, &new_name, &new_last_name),
            )
        }
        "2" => {
            let new_class = prompt(input, output, "New class (e.g. 2A): ")?;
            report(
                output,
                cli::cmd_change_class(system, &name, &last_name, year, &new_class),
            )
        }
        "3" => {
            let new_major = prompt(input, output, "New major: ")?;
            report(
                output,
                cli::cmd_change_major(system, &name, &last_name, year, &new_major),
            )
        }
        "4" => report(
            output,
            cli::cmd_delete_all_grades(system, &name, &last_name, year),
        ),
        _ => writeln!(output, "Edit cancelled."),
    }
}

// =============================================================================
// GRADE MANAGEMENT
// =============================================================================

fn grades_menu<R: BufRead, W: Write>(
    system: &mut StudentSystem,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    loop {
        writeln!(output, "\n--- Grade management ---")?;
        writeln!(output, "1. Add a grade")?;
        writeln!(output, "2. Remove the latest grade")?;
        writeln!(output, "3. Show grades for a subject")?;
        writeln!(output, "4. Show subject average")?;
        writeln!(output, "5. Show overall average")?;
        writeln!(output, "6. Show student summary")?;
        writeln!(output, "7. Delete a subject")?;
        writeln!(output, "0. Back to main menu")?;
        let choice = prompt(input, output, "Choose an option: ")?;

        if choice == "0" {
            return Ok(());
        }
        if !matches!(choice.as_str(), "1" | "2" | "3" | "4" | "5" | "6" | "7") {
            writeln!(output, "Invalid option, try again.")?;
            continue;
        }

        let Some((name, last_name, year)) = prompt_identity(input, output)? else {
            continue;
        };

        match choice.as_str() {
            "1" => {
                let subject = prompt(input, output, "Subject: ")?;
                let raw = prompt(input, output, "Grade (1.0-6.0): ")?;
                let Ok(grade) = raw.parse::<f64>() else {
                    writeln!(output, "Invalid grade!")?;
                    continue;
                };
                report(
                    output,
                    cli::cmd_add_grade(system, &name, &last_name, year, &subject, grade),
                )?;
            }
            "2" => {
                let subject = prompt(input, output, "Subject: ")?;
                report(
                    output,
                    cli::cmd_remove_last_grade(system, &name, &last_name, year, &subject),
                )?;
            }
            "3" => {
                let subject = prompt(input, output, "Subject: ")?;
                report(
                    output,
                    cli::cmd_subject_grades(system, &name, &last_name, year, &subject),
                )?;
            }
            "4" => {
                let subject = prompt(input, output, "Subject: ")?;
                report(
                    output,
                    cli::cmd_subject_average(system, &name, &last_name, year, &subject),
                )?;
            }
            "5" => report(
                output,
                cli::cmd_overall_average(system, &name, &last_name, year),
            )?,
            "6" => {
                let format = prompt(input, output, "Format (text/json): ")?;
                let json = format.eq_ignore_ascii_case("json");
                report(
                    output,
                    cli::cmd_student_summary(system, &name, &last_name, year, json),
                )?;
            }
            "7" => {
                let subject = prompt(input, output, "Subject: ")?;
                report(
                    output,
                    cli::cmd_delete_subject(system, &name, &last_name, year, &subject),
                )?;
            }
            _ => {}
        }
    }
}

// =============================================================================
// SCHOOL MANAGEMENT
// =============================================================================

fn school_menu<R: BufRead, W: Write>(
    system: &mut StudentSystem,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    loop {
        writeln!(output, "\n--- School management ---")?;
        writeln!(output, "1. Show all students")?;
        writeln!(output, "2. Show students in a class")?;
        writeln!(output, "3. Show students with a major")?;
        writeln!(output, "4. Student count")?;
        writeln!(output, "5. Class average")?;
        writeln!(output, "6. School average")?;
        writeln!(output, "7. Sort students")?;
        writeln!(output, "0. Back to main menu")?;
        let choice = prompt(input, output, "Choose an option: ")?;

        match choice.as_str() {
            "1" => writeln!(output, "{}", cli::cmd_show_students(system))?,
            "2" => {
                let class_grade = prompt(input, output, "Class (e.g. 1A): ")?;
                writeln!(output, "{}", cli::cmd_students_by_class(system, &class_grade))?;
            }
            "3" => {
                let major = prompt(input, output, "Major: ")?;
                writeln!(output, "{}", cli::cmd_students_by_major(system, &major))?;
            }
            "4" => writeln!(output, "{}", cli::cmd_student_count(system))?,
            "5" => {
                let class_grade = prompt(input, output, "Class (e.g. 1A): ")?;
                report(output, cli::cmd_class_average(system, &class_grade))?;
            }
            "6" => report(output, cli::cmd_school_average(system))?,
            "7" => sort_menu(system, input, output)?,
            "0" => return Ok(()),
            _ => writeln!(output, "Invalid option, try again.")?,
        }
    }
}

fn sort_menu<R: BufRead, W: Write>(
    system: &StudentSystem,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    writeln!(output, "\n--- Sort students ---")?;
    writeln!(output, "1. By class")?;
    writeln!(output, "2. By major")?;
    writeln!(output, "3. By average within a class")?;
    writeln!(output, "4. By average school-wide")?;
    let choice = prompt(input, output, "Choose an option: ")?;

    let text = match choice.as_str() {
        "1" => cli::cmd_sort_by_class(system),
        "2" => cli::cmd_sort_by_major(system),
        "3" => {
            let class_grade = prompt(input, output, "Class (e.g. 1A): ")?;
            cli::cmd_rank_by_average_in_class(system, &class_grade)
        }
        "4" => cli::cmd_rank_by_average(system),
        _ => {
            writeln!(output, "Invalid sort option.")?;
            return Ok(());
        }
    };
    writeln!(output, "{text}")
}
