//! Drop-lowest / drop-highest rules for assignment groups
//!
//! For groups whose assignments carry points, the kept set is chosen with the
//! binary search from Kane & Kane, "Dropping Lowest Grades"
//! (<http://cseweb.ucsd.edu/~dakane/droplowest.pdf>): for a candidate grade
//! `q`, every submission is rated `score - q * total`, the best `k` ratings are
//! kept, and `q` is bisected until the kept set maximises the group grade.
//! Groups made only of zero-point assignments are trimmed by raw score.

use crate::core::models::GradingRules;
use std::cmp::Ordering;

/// A submission as the drop rules see it: earned points out of possible points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredItem {
    /// Assignment the score belongs to
    pub assignment_id: u64,
    /// Points earned (real or what-if)
    pub score: f64,
    /// Points possible
    pub total: f64,
}

impl ScoredItem {
    /// Create a scored item
    #[must_use]
    pub const fn new(assignment_id: u64, score: f64, total: f64) -> Self {
        Self {
            assignment_id,
            score,
            total,
        }
    }

    fn rating(&self, q: f64) -> f64 {
        q.mul_add(-self.total, self.score)
    }
}

/// Which end of the ranking a selection pass keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keep {
    Highest,
    Lowest,
}

/// Apply a group's drop rules, returning the items that still count.
///
/// Never-drop items are always returned (after the droppable ones). At least
/// one droppable item is always kept, and `drop_highest` is ignored when it
/// would leave nothing after `drop_lowest`.
#[must_use]
pub fn apply_drop_rules(items: Vec<ScoredItem>, rules: Option<&GradingRules>) -> Vec<ScoredItem> {
    let Some(rules) = rules else {
        return items;
    };
    if !rules.drops_anything() {
        return items;
    }

    let (cannot_drop, droppable): (Vec<ScoredItem>, Vec<ScoredItem>) = items
        .into_iter()
        .partition(|item| rules.never_drop.contains(&item.assignment_id));

    if droppable.is_empty() {
        return cannot_drop;
    }

    let count = droppable.len();
    let drop_lowest = (rules.drop_lowest as usize).min(count - 1);
    let drop_highest = if drop_lowest + rules.drop_highest as usize >= count {
        0
    } else {
        rules.drop_highest as usize
    };

    let keep_highest = count - drop_lowest;
    let keep_lowest = keep_highest - drop_highest;

    let mut kept = if droppable.iter().any(|item| item.total > 0.0) {
        drop_pointed(&droppable, &cannot_drop, keep_highest, keep_lowest)
    } else {
        drop_unpointed(droppable, keep_highest, keep_lowest)
    };

    crate::debug!(
        "Drop rules kept {} of {count} droppable submissions (+{} never-drop)",
        kept.len(),
        cannot_drop.len()
    );

    kept.extend(cannot_drop);
    kept
}

/// Zero-point groups: sort by raw score and keep the middle band.
fn drop_unpointed(
    mut items: Vec<ScoredItem>,
    keep_highest: usize,
    keep_lowest: usize,
) -> Vec<ScoredItem> {
    items.sort_by(|a, b| a.score.total_cmp(&b.score));
    let start = items.len().saturating_sub(keep_highest);
    items.drain(..start);
    items.truncate(keep_lowest);
    items
}

fn drop_pointed(
    items: &[ScoredItem],
    cannot_drop: &[ScoredItem],
    keep_highest: usize,
    keep_lowest: usize,
) -> Vec<ScoredItem> {
    let max_total = items.iter().map(|item| item.total).fold(0.0, f64::max);

    let without_lowest = keep_helper(items, keep_highest, Keep::Highest, cannot_drop, max_total);
    keep_helper(&without_lowest, keep_lowest, Keep::Lowest, cannot_drop, max_total)
}

#[allow(clippy::float_cmp, clippy::cast_precision_loss)]
fn keep_helper(
    items: &[ScoredItem],
    keep_count: usize,
    keep: Keep,
    cannot_drop: &[ScoredItem],
    max_total: f64,
) -> Vec<ScoredItem> {
    let keep_count = keep_count.max(1);
    if items.len() <= keep_count {
        return items.to_vec();
    }

    let (unpointed, pointed): (Vec<ScoredItem>, Vec<ScoredItem>) = items
        .iter()
        .chain(cannot_drop)
        .copied()
        .partition(|item| item.total == 0.0);

    if pointed.is_empty() {
        return keep_by_score(items, keep_count, keep);
    }

    let (mut q_high, mut q_low) = search_bounds(&pointed, &unpointed);
    let mut q_mid = (q_low + q_high) / 2.0;

    let (mut x, mut kept) = rate_and_keep(q_mid, items, keep_count, keep, cannot_drop);

    let threshold = 1.0 / (2.0 * keep_count as f64 * max_total * max_total);

    while q_high - q_low >= threshold {
        if x < 0.0 {
            q_high = q_mid;
        } else {
            q_low = q_mid;
        }
        q_mid = (q_low + q_high) / 2.0;
        if q_mid == q_high || q_mid == q_low {
            break;
        }
        (x, kept) = rate_and_keep(q_mid, items, keep_count, keep, cannot_drop);
    }

    kept
}

/// Keep `keep_count` items from one end of a raw-score ranking, ties by id
fn keep_by_score(items: &[ScoredItem], keep_count: usize, keep: Keep) -> Vec<ScoredItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        let by_score = match keep {
            Keep::Lowest => a.score.total_cmp(&b.score),
            Keep::Highest => b.score.total_cmp(&a.score),
        };
        by_score.then(a.assignment_id.cmp(&b.assignment_id))
    });
    sorted.truncate(keep_count);
    sorted
}

/// Rate every item against `q`, keep the best `keep_count`, and return the
/// summed rating of the kept and never-drop items together with the kept set.
fn rate_and_keep(
    q: f64,
    items: &[ScoredItem],
    keep_count: usize,
    keep: Keep,
    cannot_drop: &[ScoredItem],
) -> (f64, Vec<ScoredItem>) {
    let mut rated: Vec<(f64, ScoredItem)> =
        items.iter().map(|item| (item.rating(q), *item)).collect();

    rated.sort_by(|(ra, a), (rb, b)| {
        let by_rating = match keep {
            Keep::Lowest => ra.total_cmp(rb),
            Keep::Highest => rb.total_cmp(ra),
        };
        match by_rating {
            Ordering::Equal => a.assignment_id.cmp(&b.assignment_id),
            other => other,
        }
    });
    rated.truncate(keep_count);

    let kept_rating: f64 = rated.iter().map(|(r, _)| r).sum();
    let never_drop_rating: f64 = cannot_drop.iter().map(|item| item.rating(q)).sum();

    (
        kept_rating + never_drop_rating,
        rated.into_iter().map(|(_, item)| item).collect(),
    )
}

/// Initial `(high, low)` bounds of the grade search.
fn search_bounds(pointed: &[ScoredItem], unpointed: &[ScoredItem]) -> (f64, f64) {
    let mut grades: Vec<f64> = pointed.iter().map(|item| item.score / item.total).collect();
    grades.sort_by(f64::total_cmp);

    let q_low = grades.first().copied().unwrap_or(0.0);

    let q_high = if unpointed.is_empty() {
        grades.last().copied().unwrap_or(0.0)
    } else {
        let points_possible: f64 = pointed.iter().map(|item| item.total).sum();
        let earned: f64 = pointed.iter().map(|item| item.score).sum();
        let unpointed_score: f64 = unpointed.iter().map(|item| item.score).sum();
        (points_possible.max(earned) + unpointed_score) / points_possible
    };

    (q_high, q_low)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(scores: &[(u64, f64, f64)]) -> Vec<ScoredItem> {
        scores
            .iter()
            .map(|&(id, score, total)| ScoredItem::new(id, score, total))
            .collect()
    }

    fn kept_ids(mut kept: Vec<ScoredItem>) -> Vec<u64> {
        kept.sort_by_key(|item| item.assignment_id);
        kept.into_iter().map(|item| item.assignment_id).collect()
    }

    fn rules(drop_lowest: u32, drop_highest: u32, never_drop: &[u64]) -> GradingRules {
        GradingRules {
            drop_lowest,
            drop_highest,
            never_drop: never_drop.to_vec(),
        }
    }

    #[test]
    fn test_no_rules_keeps_everything() {
        let input = items(&[(1, 5.0, 10.0), (2, 9.0, 10.0)]);
        assert_eq!(apply_drop_rules(input.clone(), None), input);
        assert_eq!(
            apply_drop_rules(input.clone(), Some(&GradingRules::default())),
            input
        );
    }

    #[test]
    fn test_drop_lowest() {
        let input = items(&[(1, 60.0, 100.0), (2, 80.0, 100.0), (3, 90.0, 100.0)]);
        let kept = apply_drop_rules(input, Some(&rules(1, 0, &[])));
        assert_eq!(kept_ids(kept), vec![2, 3]);
    }

    #[test]
    fn test_drop_highest() {
        let input = items(&[(1, 60.0, 100.0), (2, 80.0, 100.0), (3, 90.0, 100.0)]);
        let kept = apply_drop_rules(input, Some(&rules(0, 1, &[])));
        assert_eq!(kept_ids(kept), vec![1, 2]);
    }

    #[test]
    fn test_drop_lowest_and_highest() {
        let input = items(&[
            (1, 50.0, 100.0),
            (2, 70.0, 100.0),
            (3, 80.0, 100.0),
            (4, 95.0, 100.0),
        ]);
        let kept = apply_drop_rules(input, Some(&rules(1, 1, &[])));
        assert_eq!(kept_ids(kept), vec![2, 3]);
    }

    #[test]
    fn test_never_drop_is_kept() {
        let input = items(&[(1, 60.0, 100.0), (2, 80.0, 100.0), (3, 90.0, 100.0)]);
        let kept = apply_drop_rules(input, Some(&rules(1, 0, &[1])));
        assert_eq!(kept_ids(kept), vec![1, 3]);
    }

    #[test]
    fn test_all_never_drop() {
        let input = items(&[(1, 60.0, 100.0), (2, 80.0, 100.0)]);
        let kept = apply_drop_rules(input, Some(&rules(1, 0, &[1, 2])));
        assert_eq!(kept_ids(kept), vec![1, 2]);
    }

    #[test]
    fn test_drop_more_than_available_keeps_one() {
        let input = items(&[(1, 80.0, 100.0), (2, 90.0, 100.0)]);
        let kept = apply_drop_rules(input, Some(&rules(5, 0, &[])));
        assert_eq!(kept_ids(kept), vec![2]);
    }

    #[test]
    fn test_drop_highest_ignored_when_nothing_would_remain() {
        let input = items(&[(1, 80.0, 100.0), (2, 90.0, 100.0)]);
        let kept = apply_drop_rules(input, Some(&rules(1, 1, &[])));
        assert_eq!(kept_ids(kept), vec![2]);
    }

    #[test]
    fn test_uneven_points_drop_maximises_grade() {
        // The 2/10 has the lowest percentage, but dropping the 50/100 leaves 90/110.
        let input = items(&[(1, 50.0, 100.0), (2, 2.0, 10.0), (3, 38.0, 50.0), (4, 50.0, 50.0)]);
        let kept = apply_drop_rules(input, Some(&rules(1, 0, &[])));
        assert_eq!(kept_ids(kept), vec![2, 3, 4]);
    }

    #[test]
    fn test_drop_highest_among_zero_point_survivors() {
        // The pointed 0/10 goes first, leaving only zero-point scores for the second pass
        let input = items(&[(1, 5.0, 0.0), (2, 4.0, 0.0), (3, 0.0, 10.0)]);
        let kept = apply_drop_rules(input, Some(&rules(1, 1, &[])));
        assert_eq!(kept_ids(kept), vec![2]);
    }

    #[test]
    fn test_unpointed_group_trimmed_by_score() {
        let input = items(&[(1, 3.0, 0.0), (2, 1.0, 0.0), (3, 2.0, 0.0)]);
        let kept = apply_drop_rules(input, Some(&rules(1, 1, &[])));
        assert_eq!(kept_ids(kept), vec![3]);
    }
}
