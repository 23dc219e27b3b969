//! # Gradebook Core
//!
//! The deterministic student-records engine: student profiles, per-subject
//! grade sequences, aggregate statistics, and filter/sort views over an
//! insertion-ordered collection.
//!
//! This crate is pure and synchronous. It does no I/O, no logging and no
//! locking; the interactive driver in `apps/gradebook` owns the session and
//! renders errors. Callers needing concurrent access wrap the whole
//! [`StudentSystem`] in their own lock.

pub mod error;
pub mod student;
pub mod system;

pub use error::{ErrorKind, GradebookError, MAX_GRADE, MIN_GRADE};
pub use student::{Student, StudentSummary};
pub use system::StudentSystem;
