//! CLI command handlers for `gradecalc`.
//!
//! Each command is implemented in its own submodule.

pub mod config;
pub mod grade;
pub mod report;
