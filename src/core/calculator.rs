//! Course grade calculation
//!
//! A course grade is computed under one of four policies, chosen by two flags:
//!
//! | `apply_group_weights` | `only_graded` | Variant |
//! |---|---|---|
//! | true  | true  | [`GradeCalculator::calc_grades_graded`] |
//! | true  | false | [`GradeCalculator::calc_grades_total`] |
//! | false | true  | [`GradeCalculator::calc_grades_graded_no_weight`] |
//! | false | false | [`GradeCalculator::calc_grades_total_no_weight`] |
//!
//! Every variant makes one pass over the groups, applies each group's drop
//! rules, and rounds the result half-up to two decimal places.

use crate::core::drop_rules::{apply_drop_rules, ScoredItem};
use crate::core::models::{Assignment, AssignmentGroup, GradingPeriod, Submission};
use crate::core::rounding::round_grade;
use std::collections::{BTreeMap, HashMap};

/// Hypothetical scores keyed by assignment id. A what-if score replaces the
/// submission's score and counts as graded.
pub type WhatIfScores = HashMap<u64, f64>;

/// Which submissions a variant lets through before drop rules are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Selection {
    graded_only: bool,
    skip_pending_review: bool,
}

const WEIGHTED_TOTAL: Selection = Selection {
    graded_only: false,
    skip_pending_review: false,
};

const WEIGHTED_GRADED: Selection = Selection {
    graded_only: true,
    skip_pending_review: true,
};

const UNWEIGHTED_TOTAL: Selection = Selection {
    graded_only: false,
    skip_pending_review: true,
};

const UNWEIGHTED_GRADED: Selection = Selection {
    graded_only: true,
    skip_pending_review: false,
};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct GroupTotals {
    earned: f64,
    possible: f64,
    counted: usize,
}

/// Points kept for one assignment group, as shown in grade reports
#[derive(Debug, Clone, PartialEq)]
pub struct GroupGrade {
    /// Group id
    pub group_id: u64,
    /// Group name
    pub name: String,
    /// Group weight in percent
    pub weight: f64,
    /// Points earned by the counted submissions
    pub earned: f64,
    /// Points possible of the counted submissions
    pub possible: f64,
    /// Number of submissions counted after drop rules
    pub counted: usize,
    /// Group percentage, `None` when nothing was possible
    pub percent: Option<f64>,
}

/// Computes course grades from assignment groups.
///
/// The calculator holds a single policy option: whether graded-only grades
/// ignore submissions that have not been posted to the student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeCalculator {
    exclude_unposted: bool,
}

impl GradeCalculator {
    /// Create a calculator that counts unposted scores
    #[must_use]
    pub const fn new() -> Self {
        Self {
            exclude_unposted: false,
        }
    }

    /// Create a calculator with an explicit posting policy
    ///
    /// # Arguments
    /// * `exclude_unposted` - When true, graded-only grades skip submissions
    ///   without a `posted_at` timestamp unless a what-if score is given
    #[must_use]
    pub const fn with_exclude_unposted(exclude_unposted: bool) -> Self {
        Self { exclude_unposted }
    }

    /// Whether unposted submissions are ignored by graded-only grades
    #[must_use]
    pub const fn excludes_unposted(&self) -> bool {
        self.exclude_unposted
    }

    /// Calculate the course grade under the policy selected by the two flags.
    ///
    /// # Arguments
    /// * `groups` - Assignment groups of the course
    /// * `what_if` - Hypothetical scores keyed by assignment id
    /// * `apply_group_weights` - Weight each group by its `group_weight`
    /// * `only_graded` - Current grade (true) or final grade over all assignments (false)
    ///
    /// # Errors
    /// Returns an error if a score or weight is not finite and the result cannot be rounded.
    pub fn calculate_grade(
        &self,
        groups: &[AssignmentGroup],
        what_if: &WhatIfScores,
        apply_group_weights: bool,
        only_graded: bool,
    ) -> Result<f64, String> {
        crate::debug!(
            "Calculating grade over {} groups (weighted={apply_group_weights}, only_graded={only_graded}, what-if={})",
            groups.len(),
            what_if.len()
        );

        match (apply_group_weights, only_graded) {
            (true, true) => self.calc_grades_graded(groups, what_if),
            (true, false) => self.calc_grades_total(groups, what_if),
            (false, true) => self.calc_grades_graded_no_weight(groups, what_if),
            (false, false) => self.calc_grades_total_no_weight(groups, what_if),
        }
    }

    /// Weighted grade over all assignments (final grade).
    ///
    /// Ungraded assignments count as zero earned. A group contributes
    /// `earned / possible * weight` only when both its earned and possible
    /// points are nonzero; there is no renormalisation of missing weight.
    ///
    /// # Errors
    /// Returns an error if the result cannot be rounded.
    pub fn calc_grades_total(
        &self,
        groups: &[AssignmentGroup],
        what_if: &WhatIfScores,
    ) -> Result<f64, String> {
        let mut earned_score = 0.0;

        for group in groups {
            let totals = self.group_totals(group, what_if, WEIGHTED_TOTAL);
            if totals.possible != 0.0 && totals.earned != 0.0 {
                earned_score += totals.earned / totals.possible * group.group_weight;
            }
            crate::debug!(
                "  [{}] {}/{} (weight {})",
                group.name,
                totals.earned,
                totals.possible,
                group.group_weight
            );
        }

        round_grade(earned_score)
    }

    /// Weighted grade over graded assignments only (current grade).
    ///
    /// Pending-review submissions are skipped. When the groups that have at
    /// least one counted submission weigh less than 100 in total, the result
    /// is scaled up by `100 / total_weight`.
    ///
    /// # Errors
    /// Returns an error if the result cannot be rounded.
    pub fn calc_grades_graded(
        &self,
        groups: &[AssignmentGroup],
        what_if: &WhatIfScores,
    ) -> Result<f64, String> {
        let mut earned_score = 0.0;
        let mut total_weight = 0.0;

        for group in groups {
            let totals = self.group_totals(group, what_if, WEIGHTED_GRADED);
            if totals.possible != 0.0 && totals.earned != 0.0 {
                earned_score += totals.earned / totals.possible * group.group_weight;
            }
            if totals.counted > 0 {
                total_weight += group.group_weight;
            }
            crate::debug!(
                "  [{}] {}/{} from {} graded (weight {})",
                group.name,
                totals.earned,
                totals.possible,
                totals.counted,
                group.group_weight
            );
        }

        if total_weight < 100.0 && total_weight > 0.0 && earned_score != 0.0 {
            earned_score = earned_score / total_weight * 100.0;
        }

        round_grade(earned_score)
    }

    /// Unweighted grade over all assignments, pooling points across groups.
    ///
    /// Pending-review submissions are skipped; ungraded assignments count as
    /// zero earned.
    ///
    /// # Errors
    /// Returns an error if the result cannot be rounded.
    pub fn calc_grades_total_no_weight(
        &self,
        groups: &[AssignmentGroup],
        what_if: &WhatIfScores,
    ) -> Result<f64, String> {
        self.pooled_grade(groups, what_if, UNWEIGHTED_TOTAL)
    }

    /// Unweighted grade over every assignment that has a score (real or
    /// what-if), pooling points across groups. Pending-review scores count.
    ///
    /// # Errors
    /// Returns an error if the result cannot be rounded.
    pub fn calc_grades_graded_no_weight(
        &self,
        groups: &[AssignmentGroup],
        what_if: &WhatIfScores,
    ) -> Result<f64, String> {
        self.pooled_grade(groups, what_if, UNWEIGHTED_GRADED)
    }

    /// Calculate the grade with grading-period weighting.
    ///
    /// Without period weighting (or without periods) this is
    /// [`calculate_grade`](Self::calculate_grade). Otherwise each group is split
    /// by the grading period of its submissions, each period is graded on its
    /// own (so drop rules apply per period), and the period grades are combined
    /// as `sum(grade * weight) / min(sum(weight), 100)`. Assignments whose
    /// submission has no grading period are left out.
    ///
    /// # Errors
    /// Returns an error if any grade cannot be rounded.
    pub fn calculate_grade_with_periods(
        &self,
        groups: &[AssignmentGroup],
        what_if: &WhatIfScores,
        apply_group_weights: bool,
        only_graded: bool,
        periods: &[GradingPeriod],
        weight_grading_periods: bool,
    ) -> Result<f64, String> {
        if !weight_grading_periods || periods.is_empty() {
            return self.calculate_grade(groups, what_if, apply_group_weights, only_graded);
        }

        let groups_by_period = divide_groups_by_period(groups);

        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for period in periods {
            let Some(period_groups) = groups_by_period.get(&period.id) else {
                crate::debug!("Grading period '{}' has no assignments", period.title);
                continue;
            };

            let grade =
                self.calculate_grade(period_groups, what_if, apply_group_weights, only_graded)?;
            crate::debug!(
                "Grading period '{}' grade {grade} (weight {})",
                period.title,
                period.weight
            );

            weighted_sum += grade * period.weight;
            total_weight += period.weight;
        }

        if total_weight > 0.0 {
            round_grade(weighted_sum / f64::min(total_weight, 100.0))
        } else {
            Ok(0.0)
        }
    }

    /// Per-group points and percentages, using the same filtering as the
    /// variant [`calculate_grade`](Self::calculate_grade) picks for the two flags.
    ///
    /// # Errors
    /// Returns an error if a group percentage cannot be rounded.
    pub fn group_breakdown(
        &self,
        groups: &[AssignmentGroup],
        what_if: &WhatIfScores,
        apply_group_weights: bool,
        only_graded: bool,
    ) -> Result<Vec<GroupGrade>, String> {
        let selection = match (apply_group_weights, only_graded) {
            (true, true) => WEIGHTED_GRADED,
            (true, false) => WEIGHTED_TOTAL,
            (false, true) => UNWEIGHTED_GRADED,
            (false, false) => UNWEIGHTED_TOTAL,
        };

        groups
            .iter()
            .map(|group| {
                let totals = self.group_totals(group, what_if, selection);
                let percent = if totals.possible > 0.0 {
                    Some(round_grade(totals.earned / totals.possible * 100.0)?)
                } else {
                    None
                };

                Ok(GroupGrade {
                    group_id: group.id,
                    name: group.name.clone(),
                    weight: group.group_weight,
                    earned: totals.earned,
                    possible: totals.possible,
                    counted: totals.counted,
                    percent,
                })
            })
            .collect()
    }

    fn pooled_grade(
        &self,
        groups: &[AssignmentGroup],
        what_if: &WhatIfScores,
        selection: Selection,
    ) -> Result<f64, String> {
        let (earned, possible) = groups
            .iter()
            .map(|group| self.group_totals(group, what_if, selection))
            .fold((0.0, 0.0), |(earned, possible), totals| {
                (earned + totals.earned, possible + totals.possible)
            });

        crate::debug!("  pooled {earned}/{possible}");

        let earned_score = if possible != 0.0 && earned != 0.0 {
            earned / possible * 100.0
        } else {
            0.0
        };

        round_grade(earned_score)
    }

    fn group_totals(
        &self,
        group: &AssignmentGroup,
        what_if: &WhatIfScores,
        selection: Selection,
    ) -> GroupTotals {
        let items = group
            .assignments
            .iter()
            .filter(|assignment| assignment.is_gradeable())
            .filter_map(|assignment| self.scored_item(assignment, what_if, selection))
            .collect();

        let kept = apply_drop_rules(items, group.rules.as_ref());

        GroupTotals {
            earned: kept.iter().map(|item| item.score).sum(),
            possible: kept.iter().map(|item| item.total).sum(),
            counted: kept.len(),
        }
    }

    fn scored_item(
        &self,
        assignment: &Assignment,
        what_if: &WhatIfScores,
        selection: Selection,
    ) -> Option<ScoredItem> {
        let what_if_score = what_if.get(&assignment.id).copied();
        let submission = assignment.submission.as_ref();

        if submission.is_some_and(|s| s.excused) {
            return None;
        }

        if selection.graded_only
            && self.exclude_unposted
            && what_if_score.is_none()
            && !submission.is_some_and(Submission::is_posted)
        {
            return None;
        }

        let pending_review =
            what_if_score.is_none() && submission.is_some_and(Submission::is_pending_review);
        if selection.skip_pending_review && pending_review {
            return None;
        }

        let score = what_if_score.or_else(|| submission.and_then(|s| s.score));
        if selection.graded_only && score.is_none() {
            return None;
        }

        Some(ScoredItem::new(
            assignment.id,
            score.unwrap_or(0.0),
            assignment.points_possible,
        ))
    }
}

/// Split every group into one copy per grading period found among its
/// assignments' submissions.
fn divide_groups_by_period(groups: &[AssignmentGroup]) -> HashMap<u64, Vec<AssignmentGroup>> {
    let mut groups_by_period: HashMap<u64, Vec<AssignmentGroup>> = HashMap::new();

    for group in groups {
        let mut assignments_by_period: BTreeMap<u64, Vec<Assignment>> = BTreeMap::new();
        for assignment in &group.assignments {
            if let Some(period_id) = assignment
                .submission
                .as_ref()
                .and_then(|s| s.grading_period_id)
            {
                assignments_by_period
                    .entry(period_id)
                    .or_default()
                    .push(assignment.clone());
            }
        }

        for (period_id, assignments) in assignments_by_period {
            groups_by_period
                .entry(period_id)
                .or_default()
                .push(AssignmentGroup {
                    id: group.id,
                    name: group.name.clone(),
                    group_weight: group.group_weight,
                    rules: group.rules.clone(),
                    assignments,
                });
        }
    }

    groups_by_period
}
