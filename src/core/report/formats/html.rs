//! HTML report generator
//!
//! Generates grade reports as a single self-contained HTML page with embedded CSS.

use crate::core::report::{percent_cell, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = HTML_TEMPLATE.to_string();

        output = output.replace("{{course_name}}", &escape_html(ctx.course_name()));
        output = output.replace(
            "{{current_grade}}",
            &escape_html(&ctx.current_grade.to_string()),
        );
        output = output.replace(
            "{{final_grade}}",
            &escape_html(&ctx.final_grade.to_string()),
        );
        output = output.replace("{{weighting}}", ctx.weighting_label());
        output = output.replace("{{grading_periods}}", &ctx.grading_periods_label());
        output = output.replace(
            "{{assignment_count}}",
            &ctx.course.assignment_count().to_string(),
        );

        output = output.replace("{{group_table}}", &Self::generate_group_html(ctx));
        output = output.replace("{{what_if_table}}", &Self::generate_what_if_html(ctx));
        output = output.replace("{{version}}", crate::core::get_version());

        output
    }

    /// Generate the per-group breakdown as an HTML table
    fn generate_group_html(ctx: &ReportContext) -> String {
        if ctx.breakdown.is_empty() {
            return "  <p class=\"muted\">No assignment groups.</p>\n".to_string();
        }

        let mut html = String::new();
        let _ = writeln!(html, "  <table>");
        let _ = writeln!(
            html,
            "    <tr><th>Group</th><th>Weight</th><th>Counted</th><th>Points</th><th>Percent</th></tr>"
        );

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
                html,
                "    <tr><td>{}</td><td class=\"num\">{}%</td><td class=\"num\">{}</td><td class=\"num\">{points}</td><td class=\"num\">{percent}</td></tr>",
                escape_html(&group.name),
                group.weight,
                group.counted
            );
        }

        let _ = writeln!(html, "  </table>");
        html
    }

    /// Generate the what-if scores as an HTML table
    fn generate_what_if_html(ctx: &ReportContext) -> String {
        let rows = ctx.what_if_rows();
        if rows.is_empty() {
            return "  <p class=\"muted\">None applied.</p>\n".to_string();
        }

        let mut html = String::new();
        let _ = writeln!(html, "  <table>");
        let _ = writeln!(
            html,
            "    <tr><th>Assignment</th><th>What-if</th><th>Possible</th></tr>"
        );

        for (assignment, score) in rows {
            let _ = writeln!(
                html,
                "    <tr><td>{}</td><td class=\"num\">{score}</td><td class=\"num\">{}</td></tr>",
                escape_html(&assignment.name),
                assignment.points_possible
            );
        }

        let _ = writeln!(html, "  </table>");
        html
    }
}

/// Escape text for use inside HTML element content
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
