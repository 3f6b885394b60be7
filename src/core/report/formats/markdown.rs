//! Markdown report generator
//!
//! Generates grade reports as Markdown tables. These render well in GitHub,
//! GitLab, and VS Code.

use crate::core::report::{percent_cell, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{course_name}}", ctx.course_name());
        output = output.replace("{{current_grade}}", &ctx.current_grade.to_string());
        output = output.replace("{{final_grade}}", &ctx.final_grade.to_string());
        output = output.replace("{{weighting}}", ctx.weighting_label());
        output = output.replace("{{grading_periods}}", &ctx.grading_periods_label());
        output = output.replace(
            "{{assignment_count}}",
            &ctx.course.assignment_count().to_string(),
        );

        output = output.replace("{{group_table}}", &Self::generate_group_table(ctx));
        output = output.replace("{{what_if_table}}", &Self::generate_what_if_table(ctx));
        output = output.replace("{{version}}", crate::core::get_version());

        output
    }

    /// Generate the per-group breakdown table
    fn generate_group_table(ctx: &ReportContext) -> String {
        if ctx.breakdown.is_empty() {
            return "_No assignment groups._\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| Group | Weight | Counted | Points | Percent |\n");
        table.push_str("|---|---|---|---|---|\n");

        for group in &ctx.breakdown {
            let (points, percent) = if ctx.shows_numbers() {
                (
                    format!("{} / {}", group.earned, group.possible),
                    percent_cell(group.percent),
                )
            } else {
                ("-".to_string(), "-".to_string())
            };

            let _ = writeln!(
                table,
                "| {} | {}% | {} | {points} | {percent} |",
                group.name, group.weight, group.counted
            );
        }

        table
    }

    /// Generate the what-if scores table
    fn generate_what_if_table(ctx: &ReportContext) -> String {
        let rows = ctx.what_if_rows();
        if rows.is_empty() {
            return "_None applied._\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| Assignment | What-if | Possible |\n");
        table.push_str("|---|---|---|\n");

        for (assignment, score) in rows {
            let _ = writeln!(
                table,
                "| {} | {score} | {} |",
                assignment.name, assignment.points_possible
            );
        }

        table
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::{GradeCalculator, WhatIfScores};
    use crate::core::models::{Assignment, AssignmentGroup, Course, Submission};

    fn course() -> Course {
        let mut course = Course::new("Chemistry".to_string());
        course.assignment_groups.push(
            AssignmentGroup::new(1, "Quizzes".to_string(), 0.0).with_assignment(
                Assignment::new(4, "Quiz 1".to_string(), 20.0)
                    .with_submission_types(&["online_quiz"])
                    .with_submission(Submission::graded(15.0)),
            ),
        );
        course
    }

    #[test]
    fn test_render_contains_grades_and_groups() {
        let course = course();
        let what_if = WhatIfScores::new();
        let ctx = ReportContext::compute(&course, &GradeCalculator::new(), &what_if).unwrap();
        let output = MarkdownReporter::new().render(&ctx).unwrap();

        assert!(output.contains("# Grade Report: Chemistry"));
        assert!(output.contains("| **Current grade** | 75% |"));
        assert!(output.contains("| Quizzes | 0% | 1 | 15 / 20 | 75% |"));
        assert!(output.contains("_None applied._"));
        assert!(!output.contains("{{"));
    }

    #[test]
    fn test_render_hides_numbers_when_restricted() {
        let mut course = course();
        course.restrict_quantitative_data = true;
        let what_if = WhatIfScores::from([(4, 20.0)]);
        let ctx = ReportContext::compute(&course, &GradeCalculator::new(), &what_if).unwrap();
        let output = MarkdownReporter::new().render(&ctx).unwrap();

        assert!(output.contains("| Quizzes | 0% | 1 | - | - |"));
        assert!(output.contains("| Quiz 1 | 20 | 20 |"));
    }
}
