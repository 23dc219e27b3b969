//! # Student Module
//!
//! One student's identity fields and per-subject grade record.
//!
//! Grades live in a `BTreeMap<String, Vec<f64>>`: subject names are
//! case-sensitive keys in deterministic order, and each subject's `Vec`
//! preserves insertion order so the most recent grade can be removed.
//!
//! Invariants:
//! - Every accepted grade lies in the closed range `[MIN_GRADE, MAX_GRADE]`.
//! - No subject key maps to an empty sequence: removal drops an emptied key,
//!   so "subject absent" and "subject present but empty" cannot diverge.

use crate::error::{GradebookError, MAX_GRADE, MIN_GRADE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// STUDENT
// =============================================================================

/// A student record: identity fields plus the subject → grades mapping.
///
/// Identity for lookup and removal in a collection is the triple
/// `(name, last_name, year)`; there is no assigned unique id, and two
/// students sharing the triple are indistinguishable to lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// First name (case-sensitive in lookups).
    pub name: String,

    /// Last name (case-sensitive in lookups).
    pub last_name: String,

    /// Free-form class label, e.g. "1A".
    pub class_grade: String,

    /// Specialization or major.
    pub major: String,

    /// Enrollment year, part of the lookup identity.
    pub year: i32,

    /// Subject name → ordered grade sequence.
    grades: BTreeMap<String, Vec<f64>>,
}

impl Student {
    /// Create a student with an empty grade record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        last_name: impl Into<String>,
        class_grade: impl Into<String>,
        major: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            name: name.into(),
            last_name: last_name.into(),
            class_grade: class_grade.into(),
            major: major.into(),
            year,
            grades: BTreeMap::new(),
        }
    }

    /// Append a grade to the subject's sequence, creating it if absent.
    ///
    /// The range check happens strictly before the append: a rejected grade
    /// leaves the record unchanged (it does not even create the subject key).
    pub fn add_grade(&mut self, subject: &str, grade: f64) -> Result<(), GradebookError> {
        if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
            return Err(GradebookError::GradeOutOfRange { grade });
        }
        self.grades.entry(subject.to_string()).or_default().push(grade);
        Ok(())
    }

    /// Remove and return the most recently added grade for the subject.
    ///
    /// Drops the subject key when the sequence empties, so a later
    /// `add_grade` behaves identically to a fresh subject.
    pub fn remove_last_grade(&mut self, subject: &str) -> Result<f64, GradebookError> {
        let Some(sequence) = self.grades.get_mut(subject) else {
            return Err(GradebookError::NoGradesForSubject {
                subject: subject.to_string(),
            });
        };
        let Some(grade) = sequence.pop() else {
            return Err(GradebookError::NoGradesForSubject {
                subject: subject.to_string(),
            });
        };
        if sequence.is_empty() {
            self.grades.remove(subject);
        }
        Ok(grade)
    }

    /// All grades for the subject, in insertion order.
    pub fn get_subject_grades(&self, subject: &str) -> Result<&[f64], GradebookError> {
        match self.grades.get(subject) {
            Some(sequence) if !sequence.is_empty() => Ok(sequence),
            _ => Err(GradebookError::NoGradesForSubject {
                subject: subject.to_string(),
            }),
        }
    }

    /// A deep copy of the entire subject → grades mapping.
    #[must_use]
    pub fn get_all_grades(&self) -> BTreeMap<String, Vec<f64>> {
        self.grades.clone()
    }

    /// Borrowing view of the subject → grades mapping, deterministic order.
    #[must_use]
    pub fn grades(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.grades
    }

    /// Arithmetic mean of one subject's grades.
    pub fn average_subject_grade(&self, subject: &str) -> Result<f64, GradebookError> {
        let sequence = self.get_subject_grades(subject)?;
        Ok(sequence.iter().sum::<f64>() / sequence.len() as f64)
    }

    /// Arithmetic mean across all grades of all subjects, flattened.
    ///
    /// Unweighted by subject: a subject with five grades contributes five
    /// values, not one. Fails when the student has zero grades total.
    pub fn average_grade(&self) -> Result<f64, GradebookError> {
        let mut total = 0.0;
        let mut count = 0usize;
        for sequence in self.grades.values() {
            total += sequence.iter().sum::<f64>();
            count += sequence.len();
        }
        if count == 0 {
            return Err(GradebookError::StudentHasNoGrades {
                name: self.name.clone(),
                last_name: self.last_name.clone(),
            });
        }
        Ok(total / count as f64)
    }

    /// Remove a subject and all its grades.
    ///
    /// Requires the key to be present; this is a validation error, distinct
    /// from the not-found reads above.
    pub fn delete_subject(&mut self, subject: &str) -> Result<(), GradebookError> {
        if self.grades.remove(subject).is_none() {
            return Err(GradebookError::UnknownSubject {
                subject: subject.to_string(),
            });
        }
        Ok(())
    }

    /// Clear the entire grade record. Always succeeds.
    pub fn delete_all_grades(&mut self) {
        self.grades.clear();
    }

    /// Replace first and last name as an atomic pair.
    ///
    /// Returns false only when BOTH are unchanged; any difference in either
    /// counts as a change.
    pub fn change_name(&mut self, new_name: &str, new_last_name: &str) -> bool {
        if self.name == new_name && self.last_name == new_last_name {
            return false;
        }
        self.name = new_name.to_string();
        self.last_name = new_last_name.to_string();
        true
    }

    /// Replace the major. Returns false when it already has that value.
    pub fn change_major(&mut self, new_major: &str) -> bool {
        if self.major == new_major {
            return false;
        }
        self.major = new_major.to_string();
        true
    }

    /// Replace the class label. Returns false when it already has that value.
    pub fn change_class_grade(&mut self, new_class_grade: &str) -> bool {
        if self.class_grade == new_class_grade {
            return false;
        }
        self.class_grade = new_class_grade.to_string();
        true
    }

    /// Number of distinct subjects with at least one grade.
    #[must_use]
    pub fn subject_count(&self) -> usize {
        self.grades.len()
    }

    /// Total number of grades across all subjects.
    #[must_use]
    pub fn total_grade_count(&self) -> usize {
        self.grades.values().map(Vec::len).sum()
    }

    /// Summarize identity and statistics. Never fails: a student with no
    /// grades reports `average: None`, not zero.
    #[must_use]
    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            full_name: format!("{} {}", self.name, self.last_name),
            class_grade: self.class_grade.clone(),
            major: self.major.clone(),
            year: self.year,
            subjects: self.subject_count(),
            total_grades: self.total_grade_count(),
            average: self.average_grade().ok(),
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Student {} {}, class {}, major: {}, year: {}",
            self.name, self.last_name, self.class_grade, self.major, self.year
        )
    }
}

// =============================================================================
// STUDENT SUMMARY
// =============================================================================

/// Identity and grade statistics for one student.
///
/// `average` is an explicit tagged optional: `None` marks "no grades", never
/// a zero or sentinel value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSummary {
    /// First and last name, space-joined.
    pub full_name: String,
    pub class_grade: String,
    pub major: String,
    pub year: i32,
    /// Count of distinct subjects with grades.
    pub subjects: usize,
    /// Flattened grade count across all subjects.
    pub total_grades: usize,
    /// Overall mean, or `None` when the student has no grades.
    pub average: Option<f64>,
}

// =============================================================================
// TESTS
// =============================================================================
