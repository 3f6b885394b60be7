//! Report command handler
//!
//! Generates grade reports (Markdown or HTML) for a course export.

use grade_calc::config::Config;
use grade_calc::core::course_loader::{load_course, parse_what_if};
use grade_calc::core::report::{
    HtmlReporter, MarkdownReporter, ReportContext, ReportFormat, ReportGenerator,
};
use grade_calc::{error, info, GradeCalculator};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the report command.
///
/// Returns the process exit code.
///
/// # Arguments
/// * `input_file` - Path to the course export
/// * `output_file` - Optional output path
/// * `format_str` - Report format (markdown, html)
/// * `what_if` - `ID=SCORE` pairs applied to the report
/// * `config` - Configuration containing the default reports directory
pub fn run(
    input_file: &Path,
    output_file: Option<&Path>,
    format_str: &str,
    what_if: &[String],
    config: &Config,
) -> i32 {
    match generate_report(input_file, output_file, format_str, what_if, config) {
        Ok(()) => 0,
        Err(err) => {
            error!(
                "Report generation failed for {}: {err}",
                input_file.display()
            );
            eprintln!("{err}");
            1
        }
    }
}

fn generate_report(
    input_file: &Path,
    output_file: Option<&Path>,
    format_str: &str,
    what_if: &[String],
    config: &Config,
) -> Result<(), String> {
    let format = ReportFormat::from_str(format_str)
        .map_err(|e| format!("✗ {e}. Use: markdown or html"))?;
    let what_if = parse_what_if(what_if).map_err(|e| format!("✗ {e}"))?;

    let course = load_course(input_file)
        .map_err(|e| format!("✗ Failed to load {}: {e}", input_file.display()))?;
    info!("Course loaded: {}", input_file.display());

    let calculator = GradeCalculator::with_exclude_unposted(config.grading.exclude_unposted);
    let ctx = ReportContext::compute(&course, &calculator, &what_if)
        .map_err(|e| format!("✗ Failed to grade {}: {e}", input_file.display()))?;

    let output_path = match output_file {
        Some(output) => output.to_path_buf(),
        None => default_output_path(input_file, format, config)?,
    };

    write_report(&ctx, format, &output_path)?;

    println!("✓ Report generated: {}", output_path.display());
    info!("Report exported to: {}", output_path.display());

    println!("\n=== Summary ===");
    println!("Course: {}", ctx.course_name());
    println!("Current grade: {}", ctx.current_grade);
    println!("Final grade: {}", ctx.final_grade);

    Ok(())
}

/// `<reports_dir>/<input stem>_report.<ext>`, creating the directory
fn default_output_path(
    input_file: &Path,
    format: ReportFormat,
    config: &Config,
) -> Result<PathBuf, String> {
    let reports_dir = PathBuf::from(&config.paths.reports_dir);
    std::fs::create_dir_all(&reports_dir).map_err(|e| {
        format!(
            "✗ Failed to create reports directory {}: {e}",
            reports_dir.display()
        )
    })?;

    let filename = input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("course");
    Ok(reports_dir.join(format!("{filename}_report.{}", format.extension())))
}

/// Write the report to a file in the specified format
fn write_report(
    ctx: &ReportContext,
    format: ReportFormat,
    output_path: &Path,
) -> Result<(), String> {
    let reporter: Box<dyn ReportGenerator> = match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
    };

    reporter
        .generate(ctx, output_path)
        .map_err(|e| format!("✗ Failed to generate {format} report: {e}"))
}
