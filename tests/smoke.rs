//! Integration smoke tests for `grade_calc`

use grade_calc::core::rounding::round_grade;
use grade_calc::{get_version, GradeCalculator, WhatIfScores};

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn empty_course_grades_to_zero() {
    let grade = GradeCalculator::default()
        .calculate_grade(&[], &WhatIfScores::new(), true, true)
        .unwrap();
    assert!(grade.abs() < f64::EPSILON);
}

#[test]
fn rounding_is_exposed() {
    assert!((round_grade(93.825).unwrap() - 93.83).abs() < f64::EPSILON);
}
