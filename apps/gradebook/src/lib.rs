//! # Gradebook Library
//!
//! This library exposes the Gradebook modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod menu;

// Re-export gradebook_core for convenience
pub use gradebook_core;
