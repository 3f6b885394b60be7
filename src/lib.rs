//! Course grade calculation for LMS exports
//!
//! Computes a student's current and final grade from weighted assignment
//! groups, with what-if scores, drop rules and grading periods.

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::calculator::{GradeCalculator, GroupGrade, WhatIfScores};
pub use crate::core::get_version;
