//! Core grade calculation functionality

pub mod calculator;
pub mod course_loader;
pub mod drop_rules;
pub mod grading_scheme;
pub mod models;
pub mod report;
pub mod rounding;

/// Returns the current version of the `grade-calc` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
