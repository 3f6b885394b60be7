//! Report generation module for course grades
//!
//! This module renders a course's current and final grade together with a
//! per-group breakdown and any what-if scores, in Markdown or HTML.

pub mod formats;

use crate::core::calculator::{GradeCalculator, GroupGrade, WhatIfScores};
use crate::core::grading_scheme::GradeDisplay;
use crate::core::models::{Assignment, Course};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data context for report generation
///
/// Grades are computed once when the context is built; reporters only format.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Course being reported
    pub course: &'a Course,
    /// Hypothetical scores applied to both grades
    pub what_if: &'a WhatIfScores,
    /// Grade over graded assignments only
    pub current_grade: GradeDisplay,
    /// Grade over all assignments, ungraded counting as zero
    pub final_grade: GradeDisplay,
    /// Per-group totals behind the current grade
    pub breakdown: Vec<GroupGrade>,
}

impl<'a> ReportContext<'a> {
    /// Compute the grades of `course` and build a report context
    ///
    /// # Errors
    /// Returns an error if a grade cannot be computed
    pub fn compute(
        course: &'a Course,
        calculator: &GradeCalculator,
        what_if: &'a WhatIfScores,
    ) -> Result<Self, String> {
        let grade = |only_graded: bool| {
            calculator.calculate_grade_with_periods(
                &course.assignment_groups,
                what_if,
                course.apply_assignment_group_weights,
                only_graded,
                &course.grading_periods,
                course.weight_grading_periods,
            )
        };

        let current = grade(true)?;
        let final_grade = grade(false)?;

        Ok(Self {
            course,
            what_if,
            current_grade: GradeDisplay::for_course(course, current)?,
            final_grade: GradeDisplay::for_course(course, final_grade)?,
            breakdown: calculator.group_breakdown(
                &course.assignment_groups,
                what_if,
                course.apply_assignment_group_weights,
                true,
            )?,
        })
    }

    /// Course name, or a placeholder when the export has none
    #[must_use]
    pub fn course_name(&self) -> &str {
        if self.course.name.is_empty() {
            "Untitled course"
        } else {
            &self.course.name
        }
    }

    /// How the groups are combined
    #[must_use]
    pub const fn weighting_label(&self) -> &'static str {
        if self.course.apply_assignment_group_weights {
            "Weighted by assignment group"
        } else {
            "Total points"
        }
    }

    /// Grading periods summary
    #[must_use]
    pub fn grading_periods_label(&self) -> String {
        if self.course.grading_periods.is_empty() {
            return "None".to_string();
        }

        let weighting = if self.course.weight_grading_periods {
            "weighted"
        } else {
            "unweighted"
        };
        format!("{} ({weighting})", self.course.grading_periods.len())
    }

    /// Whether numeric scores may be shown
    #[must_use]
    pub const fn shows_numbers(&self) -> bool {
        !self.course.restrict_quantitative_data
    }

    /// What-if scores paired with their assignments, sorted by assignment id.
    /// Ids that match no assignment are skipped.
    #[must_use]
    pub fn what_if_rows(&self) -> Vec<(&'a Assignment, f64)> {
        let mut rows: Vec<(&Assignment, f64)> = self
            .course
            .assignment_groups
            .iter()
            .flat_map(|g| &g.assignments)
            .filter_map(|a| self.what_if.get(&a.id).map(|score| (a, *score)))
            .collect();
        rows.sort_by_key(|(a, _)| a.id);
        rows
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Format a group percentage cell
pub(crate) fn percent_cell(percent: Option<f64>) -> String {
    percent.map_or_else(|| "-".to_string(), |p| format!("{p}%"))
}
