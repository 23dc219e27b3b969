//! # Error Module
//!
//! The error taxonomy for the records engine.
//!
//! Two kinds of failure exist:
//! - Validation: the caller supplied data the engine refuses (grade outside
//!   the allowed range, deleting a subject that was never recorded)
//! - NotFound: the referenced data does not exist (subject with no grades,
//!   average requested over zero grades)
//!
//! Errors are plain values raised at the point of the offending call. A
//! failed operation never mutates the student or the collection.

use thiserror::Error;

/// Inclusive lower bound of the grading scale.
pub const MIN_GRADE: f64 = 1.0;

/// Inclusive upper bound of the grading scale.
pub const MAX_GRADE: f64 = 6.0;

/// Broad classification of a [`GradebookError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied invalid data.
    Validation,
    /// The referenced record does not exist.
    NotFound,
}

/// All failures the records engine can signal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradebookError {
    /// A grade outside the closed range `[MIN_GRADE, MAX_GRADE]`.
    #[error("grade {grade} must be between {MIN_GRADE} and {MAX_GRADE}")]
    GradeOutOfRange { grade: f64 },

    /// `delete_subject` on a subject key that is not present.
    #[error("{subject} is not a recorded subject for this student")]
    UnknownSubject { subject: String },

    /// A read or removal on a subject with no grades (absent or emptied).
    #[error("no grades for subject: {subject}")]
    NoGradesForSubject { subject: String },

    /// An overall average requested for a student with zero grades.
    #[error("student {name} {last_name} has no grades")]
    StudentHasNoGrades { name: String, last_name: String },

    /// A class average requested with zero contributing grades.
    #[error("no students with grades in class {class_grade}")]
    NoGradesInClass { class_grade: String },

    /// A school average requested with zero grades system-wide.
    #[error("no students with grades")]
    NoGradesInSchool,
}

impl GradebookError {
    /// Classify the error per the taxonomy above.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::GradeOutOfRange { .. } | Self::UnknownSubject { .. } => ErrorKind::Validation,
            Self::NoGradesForSubject { .. }
            | Self::StudentHasNoGrades { .. }
            | Self::NoGradesInClass { .. }
            | Self::NoGradesInSchool => ErrorKind::NotFound,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
