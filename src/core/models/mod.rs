//! Data models for `grade-calc`

pub mod assignment;
pub mod assignment_group;
pub mod course;
pub mod grading_period;
pub mod submission;

pub use assignment::Assignment;
pub use assignment_group::{AssignmentGroup, GradingRules};
pub use course::{Course, GradingSchemeRow};
pub use grading_period::GradingPeriod;
pub use submission::Submission;
