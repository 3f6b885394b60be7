//! Grade command handler

use crate::args::GradeOptions;
use grade_calc::config::Config;
use grade_calc::core::course_loader::{load_course, parse_what_if, unknown_what_if_ids};
use grade_calc::core::grading_scheme::GradeDisplay;
use grade_calc::core::models::Course;
use grade_calc::{error, info, verbose, warn, GradeCalculator, WhatIfScores};
use std::path::{Path, PathBuf};

/// Run the grade command for one or more course exports.
///
/// Returns the process exit code: 0 when every course was graded, 1 otherwise.
pub fn run(
    input_files: &[PathBuf],
    options: &GradeOptions,
    breakdown: bool,
    config: &Config,
) -> i32 {
    if input_files.is_empty() {
        eprintln!("✗ No input files provided.");
        return 1;
    }

    let what_if = match parse_what_if(&options.what_if) {
        Ok(what_if) => what_if,
        Err(e) => {
            eprintln!("✗ {e}");
            return 1;
        }
    };

    let calculator = GradeCalculator::with_exclude_unposted(config.grading.exclude_unposted);
    let mut failures = 0;

    for input_file in input_files {
        if let Err(err) =
            grade_single(input_file, options, breakdown, config, &calculator, &what_if)
        {
            error!("Grading failed for {}: {err}", input_file.display());
            eprintln!("{err}");
            failures += 1;
        }
    }

    i32::from(failures > 0)
}

fn grade_single(
    input_file: &Path,
    options: &GradeOptions,
    breakdown: bool,
    config: &Config,
    calculator: &GradeCalculator,
    what_if: &WhatIfScores,
) -> Result<(), String> {
    let course = load_course(input_file)
        .map_err(|e| format!("✗ Failed to load {}: {e}", input_file.display()))?;
    info!("Course loaded: {}", input_file.display());

    for id in unknown_what_if_ids(&course, what_if) {
        warn!("What-if score for unknown assignment {id} in '{}' ignored", course.name);
    }

    let only_graded = options.only_graded(config.grading.only_graded);
    let apply_weights = options.apply_weights(course.apply_assignment_group_weights);

    verbose!(
        "{}: {} grade, {}, {} what-if score(s)",
        input_file.display(),
        if only_graded { "current" } else { "final" },
        if apply_weights { "weighted" } else { "unweighted" },
        what_if.len()
    );

    let grade = calculator
        .calculate_grade_with_periods(
            &course.assignment_groups,
            what_if,
            apply_weights,
            only_graded,
            &course.grading_periods,
            course.weight_grading_periods,
        )
        .map_err(|e| format!("✗ Failed to grade {}: {e}", input_file.display()))?;

    let display = GradeDisplay::for_course(&course, grade)
        .map_err(|e| format!("✗ Failed to format grade for {}: {e}", input_file.display()))?;

    let scope = if only_graded { "current" } else { "final" };
    println!("✓ {}: {display} ({scope})", course_label(&course, input_file));

    if breakdown {
        print_breakdown(&course, calculator, what_if, apply_weights, only_graded)?;
    }

    Ok(())
}

fn course_label(course: &Course, input_file: &Path) -> String {
    if course.name.is_empty() {
        input_file.display().to_string()
    } else {
        course.name.clone()
    }
}

fn print_breakdown(
    course: &Course,
    calculator: &GradeCalculator,
    what_if: &WhatIfScores,
    apply_weights: bool,
    only_graded: bool,
) -> Result<(), String> {
    let groups = calculator.group_breakdown(
        &course.assignment_groups,
        what_if,
        apply_weights,
        only_graded,
    )?;

    for group in groups {
        if course.restrict_quantitative_data {
            println!("    {} ({}%): {} counted", group.name, group.weight, group.counted);
            continue;
        }

        let percent = group
            .percent
            .map_or_else(|| "-".to_string(), |p| format!("{p}%"));
        println!(
            "    {} ({}%): {} / {} = {percent} ({} counted)",
            group.name, group.weight, group.earned, group.possible, group.counted
        );
    }

    Ok(())
}
