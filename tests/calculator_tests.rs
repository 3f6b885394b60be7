//! Integration tests for grade calculation

use grade_calc::core::models::{Assignment, AssignmentGroup, GradingRules, Submission};
use grade_calc::{GradeCalculator, WhatIfScores};

fn assert_grade(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected grade {expected}, got {actual}"
    );
}

fn group(
    id: u64,
    weight: f64,
    rules: Option<GradingRules>,
    assignments: Vec<Assignment>,
) -> AssignmentGroup {
    let mut group = AssignmentGroup::new(id, format!("Group {id}"), weight);
    group.rules = rules;
    group.assignments = assignments;
    group
}

fn assignment(id: u64, points: f64, submission: Option<Submission>) -> Assignment {
    let assignment = Assignment::new(id, format!("Assignment {id}"), points)
        .with_submission_types(&["online_text_entry"]);
    match submission {
        Some(s) => assignment.with_submission(s),
        None => assignment,
    }
}

fn posted(score: f64) -> Option<Submission> {
    Some(Submission::graded(score))
}

fn unposted(score: f64) -> Option<Submission> {
    Some(Submission::graded(score).with_posted_at(None))
}

fn excused() -> Option<Submission> {
    Some(Submission::graded(0.0).excused())
}

fn drop_rules(drop_lowest: u32, drop_highest: u32, never_drop: &[u64]) -> Option<GradingRules> {
    Some(GradingRules {
        drop_lowest,
        drop_highest,
        never_drop: never_drop.to_vec(),
    })
}

fn current(groups: &[AssignmentGroup], what_if: &WhatIfScores, weighted: bool) -> f64 {
    GradeCalculator::new()
        .calculate_grade(groups, what_if, weighted, true)
        .unwrap()
}

#[test]
fn test_simple_percentage() {
    let groups = [group(
        1,
        0.0,
        None,
        vec![assignment(1, 100.0, posted(80.0)), assignment(2, 100.0, posted(90.0))],
    )];
    assert_grade(current(&groups, &WhatIfScores::new(), false), 85.0);
}

#[test]
fn test_no_graded_assignments_is_zero() {
    let groups = [group(
        1,
        0.0,
        None,
        vec![assignment(1, 100.0, None), assignment(2, 100.0, None)],
    )];
    assert_grade(current(&groups, &WhatIfScores::new(), false), 0.0);
    assert_grade(current(&groups, &WhatIfScores::new(), true), 0.0);
}

#[test]
fn test_group_weights_applied() {
    let groups = [
        group(1, 60.0, None, vec![assignment(1, 100.0, posted(80.0))]),
        group(2, 40.0, None, vec![assignment(2, 100.0, posted(90.0))]),
    ];
    // 80 * 0.6 + 90 * 0.4
    assert_grade(current(&groups, &WhatIfScores::new(), true), 84.0);
}

#[test]
fn test_zero_weight_group_renormalised_away() {
    let groups = [
        group(1, 60.0, None, vec![assignment(1, 100.0, posted(100.0))]),
        group(2, 0.0, None, vec![assignment(2, 100.0, posted(50.0))]),
    ];
    assert_grade(current(&groups, &WhatIfScores::new(), true), 100.0);
}

#[test]
fn test_drop_lowest() {
    let groups = [group(
        1,
        0.0,
        drop_rules(1, 0, &[]),
        vec![
            assignment(1, 100.0, posted(60.0)),
            assignment(2, 100.0, posted(80.0)),
            assignment(3, 100.0, posted(90.0)),
        ],
    )];
    assert_grade(current(&groups, &WhatIfScores::new(), false), 85.0);
}

#[test]
fn test_drop_highest() {
    let groups = [group(
        1,
        0.0,
        drop_rules(0, 1, &[]),
        vec![
            assignment(1, 100.0, posted(60.0)),
            assignment(2, 100.0, posted(80.0)),
            assignment(3, 100.0, posted(90.0)),
        ],
    )];
    assert_grade(current(&groups, &WhatIfScores::new(), false), 70.0);
}

#[test]
fn test_drop_lowest_and_highest() {
    let groups = [group(
        1,
        0.0,
        drop_rules(1, 1, &[]),
        vec![
            assignment(1, 100.0, posted(50.0)),
            assignment(2, 100.0, posted(70.0)),
            assignment(3, 100.0, posted(80.0)),
            assignment(4, 100.0, posted(95.0)),
        ],
    )];
    assert_grade(current(&groups, &WhatIfScores::new(), false), 75.0);
}

#[test]
fn test_never_drop_shifts_the_drop() {
    let groups = [group(
        1,
        0.0,
        drop_rules(1, 0, &[1]),
        vec![
            assignment(1, 100.0, posted(60.0)),
            assignment(2, 100.0, posted(80.0)),
            assignment(3, 100.0, posted(90.0)),
        ],
    )];
    // 60 is protected, so 80 goes
    assert_grade(current(&groups, &WhatIfScores::new(), false), 75.0);
}

#[test]
fn test_drop_more_than_available_keeps_best() {
    let groups = [group(
        1,
        0.0,
        drop_rules(5, 0, &[]),
        vec![assignment(1, 100.0, posted(80.0)), assignment(2, 100.0, posted(90.0))],
    )];
    assert_grade(current(&groups, &WhatIfScores::new(), false), 90.0);
}

#[test]
fn test_what_if_replaces_actual_score() {
    let groups = [group(
        1,
        0.0,
        None,
        vec![assignment(1, 100.0, posted(70.0)), assignment(2, 100.0, posted(80.0))],
    )];
    let what_if = WhatIfScores::from([(1, 95.0)]);
    assert_grade(current(&groups, &what_if, false), 87.5);
}

#[test]
fn test_what_if_on_unsubmitted_counts_as_graded() {
    let groups = [group(
        1,
        0.0,
        None,
        vec![assignment(1, 100.0, posted(80.0)), assignment(2, 100.0, None)],
    )];
    let what_if = WhatIfScores::from([(2, 90.0)]);
    assert_grade(current(&groups, &what_if, false), 85.0);
}

#[test]
fn test_what_if_goes_through_drop_rules() {
    let groups = [group(
        1,
        0.0,
        drop_rules(1, 0, &[]),
        vec![
            assignment(1, 100.0, posted(60.0)),
            assignment(2, 100.0, posted(80.0)),
            assignment(3, 100.0, posted(90.0)),
        ],
    )];
    let what_if = WhatIfScores::from([(1, 95.0)]);
    // 80 becomes the lowest
    assert_grade(current(&groups, &what_if, false), 92.5);
}

#[test]
fn test_excused_excluded_with_and_without_what_if() {
    let groups = [group(
        1,
        0.0,
        None,
        vec![
            assignment(1, 100.0, posted(80.0)),
            assignment(2, 100.0, excused()),
            assignment(3, 100.0, posted(90.0)),
        ],
    )];
    assert_grade(current(&groups, &WhatIfScores::new(), false), 85.0);
    assert_grade(current(&groups, &WhatIfScores::from([(2, 100.0)]), false), 85.0);
}

#[test]
fn test_all_excused_is_zero() {
    let groups = [group(
        1,
        0.0,
        None,
        vec![assignment(1, 100.0, excused()), assignment(2, 100.0, excused())],
    )];
    assert_grade(current(&groups, &WhatIfScores::new(), false), 0.0);
}

#[test]
fn test_unposted_hidden_from_current_grade_when_excluded() {
    let groups = [group(
        1,
        0.0,
        None,
        vec![
            assignment(1, 100.0, posted(80.0)),
            assignment(2, 100.0, unposted(90.0)),
            assignment(3, 100.0, posted(70.0)),
        ],
    )];
    let calculator = GradeCalculator::with_exclude_unposted(true);
    let grade = calculator
        .calculate_grade(&groups, &WhatIfScores::new(), false, true)
        .unwrap();
    assert_grade(grade, 75.0);

    // Counted by default
    assert_grade(current(&groups, &WhatIfScores::new(), false), 80.0);
}

#[test]
fn test_unposted_included_in_final_grade() {
    let groups = [group(
        1,
        0.0,
        None,
        vec![
            assignment(1, 100.0, posted(80.0)),
            assignment(2, 100.0, unposted(90.0)),
            assignment(3, 100.0, None),
        ],
    )];
    let grade = GradeCalculator::with_exclude_unposted(true)
        .calculate_grade(&groups, &WhatIfScores::new(), false, false)
        .unwrap();
    assert_grade(grade, 56.67);
}

#[test]
fn test_unposted_with_what_if_counts_in_current_grade() {
    let groups = [group(
        1,
        0.0,
        None,
        vec![assignment(1, 100.0, posted(80.0)), assignment(2, 100.0, unposted(90.0))],
    )];
    let what_if = WhatIfScores::from([(2, 95.0)]);
    let grade = GradeCalculator::with_exclude_unposted(true)
        .calculate_grade(&groups, &what_if, false, true)
        .unwrap();
    assert_grade(grade, 87.5);
}

#[test]
fn test_final_grade_counts_ungraded_as_zero() {
    let groups = [group(
        1,
        0.0,
        None,
        vec![
            assignment(1, 100.0, posted(80.0)),
            assignment(2, 100.0, posted(90.0)),
            assignment(3, 100.0, None),
            assignment(4, 100.0, None),
        ],
    )];
    let grade = GradeCalculator::new()
        .calculate_grade(&groups, &WhatIfScores::new(), false, false)
        .unwrap();
    assert_grade(grade, 42.5);
    assert_grade(current(&groups, &WhatIfScores::new(), false), 85.0);
}

#[test]
fn test_zero_point_assignment_adds_nothing() {
    let groups = [group(
        1,
        0.0,
        None,
        vec![
            assignment(1, 100.0, posted(80.0)),
            assignment(2, 0.0, posted(0.0)),
            assignment(3, 100.0, posted(90.0)),
        ],
    )];
    assert_grade(current(&groups, &WhatIfScores::new(), false), 85.0);
}

#[test]
fn test_fractional_points() {
    let groups = [group(
        1,
        0.0,
        None,
        vec![assignment(1, 50.0, posted(42.5)), assignment(2, 75.0, posted(63.75))],
    )];
    assert_grade(current(&groups, &WhatIfScores::new(), false), 85.0);
}

#[test]
fn test_perfect_score() {
    let groups = [group(
        1,
        0.0,
        None,
        vec![assignment(1, 100.0, posted(100.0)), assignment(2, 100.0, posted(100.0))],
    )];
    assert_grade(current(&groups, &WhatIfScores::new(), false), 100.0);
}

#[test]
fn test_weighted_groups_with_drops_and_what_if() {
    let groups = [
        group(
            1,
            40.0,
            drop_rules(1, 0, &[]),
            vec![
                assignment(1, 100.0, posted(70.0)),
                assignment(2, 100.0, posted(80.0)),
                assignment(3, 100.0, posted(90.0)),
            ],
        ),
        group(
            2,
            60.0,
            None,
            vec![assignment(4, 200.0, posted(160.0)), assignment(5, 200.0, None)],
        ),
    ];
    let what_if = WhatIfScores::from([(5, 180.0)]);
    // Homework 170/200, exams 340/400
    assert_grade(current(&groups, &what_if, true), 85.0);
}

#[test]
fn test_grade_is_rounded_to_two_places() {
    let groups = [group(
        1,
        0.0,
        None,
        vec![
            assignment(1, 3.0, posted(1.0)),
            assignment(2, 3.0, posted(1.0)),
            assignment(3, 3.0, posted(3.0)),
        ],
    )];
    // 5 / 9
    assert_grade(current(&groups, &WhatIfScores::new(), false), 55.56);
}
