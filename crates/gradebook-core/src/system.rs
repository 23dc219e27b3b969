//! # System Module
//!
//! The ordered student collection: add/remove/find, aggregate statistics,
//! and filter/sort views.
//!
//! The collection exclusively owns its `Student` values and preserves
//! insertion order. Sorting and filtering never mutate the stored order;
//! they return fresh `Vec<&Student>` views. `find_student_mut` hands out a
//! live mutable handle into the collection; mutating a found student
//! through its own methods is the way to edit an existing record.
//!
//! One deliberate asymmetry: `get_class_average` matches the class label
//! case-sensitively while `get_students_by_class` matches
//! case-insensitively.

use crate::error::GradebookError;
use crate::student::Student;
use std::cmp::Ordering;

// =============================================================================
// STUDENT SYSTEM
// =============================================================================

/// Manages an insertion-ordered collection of [`Student`] records.
///
/// Duplicates are allowed: lookups on `(name, last_name, year)` return the
/// first match in stored order.
#[derive(Debug, Clone, Default)]
pub struct StudentSystem {
    /// Owned student records in insertion order.
    students: Vec<Student>,
}

impl StudentSystem {
    /// Create an empty system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a student. Always succeeds; no duplicate check.
    pub fn add_student(&mut self, student: Student) {
        self.students.push(student);
    }

    /// Remove the first student matching all three identity fields exactly.
    ///
    /// Returns whether a removal occurred. Names compare case-sensitively.
    pub fn remove_student(&mut self, name: &str, last_name: &str, year: i32) -> bool {
        match self.position_of(name, last_name, year) {
            Some(index) => {
                self.students.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every student enrolled in the given year.
    ///
    /// Returns the number removed. Relative order of the survivors is
    /// preserved.
    pub fn remove_students_from_year(&mut self, year: i32) -> usize {
        let before = self.students.len();
        self.students.retain(|student| student.year != year);
        before - self.students.len()
    }

    /// First student matching all three identity fields, by stored order.
    #[must_use]
    pub fn find_student(&self, name: &str, last_name: &str, year: i32) -> Option<&Student> {
        let index = self.position_of(name, last_name, year)?;
        self.students.get(index)
    }

    /// Mutable handle to the first matching student.
    ///
    /// This is a live reference into the owned collection, not a copy.
    pub fn find_student_mut(
        &mut self,
        name: &str,
        last_name: &str,
        year: i32,
    ) -> Option<&mut Student> {
        let index = self.position_of(name, last_name, year)?;
        self.students.get_mut(index)
    }

    fn position_of(&self, name: &str, last_name: &str, year: i32) -> Option<usize> {
        self.students.iter().position(|student| {
            student.name == name && student.last_name == last_name && student.year == year
        })
    }

    /// One line per student in stored order: "name last_name class_grade".
    #[must_use]
    pub fn show_all_students(&self) -> String {
        self.students
            .iter()
            .map(|s| format!("{} {} {}", s.name, s.last_name, s.class_grade))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of students currently held.
    #[must_use]
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Whether the system holds no students.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// All students in stored order.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    // =========================================================================
    // AGGREGATE STATISTICS
    // =========================================================================

    /// Flattened mean over every grade of every student whose class label
    /// equals the argument exactly (case-sensitive).
    ///
    /// Fails when zero grades contribute, including when no student matches.
    pub fn get_class_average(&self, class_grade: &str) -> Result<f64, GradebookError> {
        let matching = self
            .students
            .iter()
            .filter(|student| student.class_grade == class_grade);
        Self::flattened_average(matching).ok_or_else(|| GradebookError::NoGradesInClass {
            class_grade: class_grade.to_string(),
        })
    }

    /// Flattened mean over every grade in the system, regardless of class.
    pub fn get_school_average(&self) -> Result<f64, GradebookError> {
        Self::flattened_average(self.students.iter()).ok_or(GradebookError::NoGradesInSchool)
    }

    /// Unweighted flattened mean across all grades of all given students.
    /// None when zero grades contribute.
    fn flattened_average<'a>(students: impl Iterator<Item = &'a Student>) -> Option<f64> {
        let mut total = 0.0;
        let mut count = 0usize;
        for student in students {
            for sequence in student.grades().values() {
                total += sequence.iter().sum::<f64>();
                count += sequence.len();
            }
        }
        if count == 0 {
            None
        } else {
            Some(total / count as f64)
        }
    }

    // =========================================================================
    // FILTER AND SORT VIEWS
    // =========================================================================

    /// Students with the given major, compared case-insensitively.
    #[must_use]
    pub fn get_students_from_major(&self, major: &str) -> Vec<&Student> {
        let needle = major.to_lowercase();
        self.students
            .iter()
            .filter(|student| student.major.to_lowercase() == needle)
            .collect()
    }

    /// Students with the given class label, compared case-insensitively.
    ///
    /// Deliberately asymmetric with [`Self::get_class_average`], which is
    /// case-sensitive.
    #[must_use]
    pub fn get_students_by_class(&self, class_grade: &str) -> Vec<&Student> {
        let needle = class_grade.to_lowercase();
        self.students
            .iter()
            .filter(|student| student.class_grade.to_lowercase() == needle)
            .collect()
    }

    /// All students, stable-sorted ascending by lowercased class label.
    #[must_use]
    pub fn sort_students_by_class_grade(&self) -> Vec<&Student> {
        let mut sorted: Vec<&Student> = self.students.iter().collect();
        sorted.sort_by_key(|student| student.class_grade.to_lowercase());
        sorted
    }

    /// All students, stable-sorted ascending by lowercased major.
    #[must_use]
    pub fn sort_students_by_major(&self) -> Vec<&Student> {
        let mut sorted: Vec<&Student> = self.students.iter().collect();
        sorted.sort_by_key(|student| student.major.to_lowercase());
        sorted
    }

    /// All students, stable-sorted descending by overall average.
    ///
    /// Students with no grades sort below every present average and keep
    /// their relative order at the end. The missing value is an explicit
    /// `None`, not a float sentinel.
    #[must_use]
    pub fn sort_class_by_avg_grade(&self) -> Vec<&Student> {
        let mut sorted: Vec<&Student> = self.students.iter().collect();
        sorted.sort_by(|a, b| Self::compare_average_desc(a, b));
        sorted
    }

    /// The descending-average sort restricted to the case-insensitive class
    /// filter's result set.
    #[must_use]
    pub fn sort_students_by_avg_in_class(&self, class_grade: &str) -> Vec<&Student> {
        let mut sorted = self.get_students_by_class(class_grade);
        sorted.sort_by(|a, b| Self::compare_average_desc(a, b));
        sorted
    }

    /// Descending order on `average_grade()`, absent averages last.
    fn compare_average_desc(a: &Student, b: &Student) -> Ordering {
        match (a.average_grade().ok(), b.average_grade().ok()) {
            (Some(avg_a), Some(avg_b)) => avg_b.total_cmp(&avg_a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
