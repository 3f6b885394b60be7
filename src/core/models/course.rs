//! Course model

use super::{AssignmentGroup, GradingPeriod};
use serde::{Deserialize, Serialize};

const fn default_scaling_factor() -> f64 {
    1.0
}

/// One row of a grading scheme: a letter and its lower bound as a fraction (e.g., `("B", 0.84)`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, f64)", into = "(String, f64)")]
pub struct GradingSchemeRow {
    /// Letter grade name (e.g., "A-")
    pub name: String,
    /// Lower bound as a fraction of 1.0
    pub value: f64,
}

impl GradingSchemeRow {
    /// Create a scheme row
    #[must_use]
    pub fn new(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

impl From<(String, f64)> for GradingSchemeRow {
    fn from((name, value): (String, f64)) -> Self {
        Self { name, value }
    }
}

impl From<GradingSchemeRow> for (String, f64) {
    fn from(row: GradingSchemeRow) -> Self {
        (row.name, row.value)
    }
}

/// A course export: assignment groups plus the grading settings needed to compute a grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course name
    #[serde(default)]
    pub name: String,

    /// Whether assignment group weights are applied
    #[serde(default)]
    pub apply_assignment_group_weights: bool,

    /// Assignment groups with their assignments and submissions
    #[serde(default)]
    pub assignment_groups: Vec<AssignmentGroup>,

    /// Grading periods (terms) of the course
    #[serde(default)]
    pub grading_periods: Vec<GradingPeriod>,

    /// Whether grading periods are weighted
    #[serde(default)]
    pub weight_grading_periods: bool,

    /// Letter grade scheme, highest bound first
    #[serde(default)]
    pub grading_scheme: Vec<GradingSchemeRow>,

    /// Whether grades are displayed as points on a scale instead of percent
    #[serde(default)]
    pub points_based_grading_scheme: bool,

    /// Scale for points-based display (e.g., 4.0)
    #[serde(default = "default_scaling_factor")]
    pub scaling_factor: f64,

    /// Hide numeric scores from students; only letters are shown
    #[serde(default)]
    pub restrict_quantitative_data: bool,
}

impl Course {
    /// Create an empty course with default grading settings
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self {
            name,
            apply_assignment_group_weights: false,
            assignment_groups: Vec::new(),
            grading_periods: Vec::new(),
            weight_grading_periods: false,
            grading_scheme: Vec::new(),
            points_based_grading_scheme: false,
            scaling_factor: 1.0,
            restrict_quantitative_data: false,
        }
    }

    /// Total number of assignments across all groups
    #[must_use]
    pub fn assignment_count(&self) -> usize {
        self.assignment_groups.iter().map(|g| g.assignments.len()).sum()
    }

    /// Whether an assignment with this id exists in any group
    #[must_use]
    pub fn has_assignment(&self, id: u64) -> bool {
        self.assignment_groups
            .iter()
            .any(|g| g.get_assignment(id).is_some())
    }

    /// Check the numeric invariants of the export.
    ///
    /// # Errors
    /// Returns an error naming the first group weight outside 0-100, negative
    /// points possible, negative period weight or non-positive scaling factor.
    pub fn validate(&self) -> Result<(), String> {
        for group in &self.assignment_groups {
            if !(0.0..=100.0).contains(&group.group_weight) {
                return Err(format!(
                    "Assignment group '{}' has weight {} outside 0-100",
                    group.name, group.group_weight
                ));
            }
            if let Some(a) = group.assignments.iter().find(|a| a.points_possible < 0.0) {
                return Err(format!(
                    "Assignment '{}' ({}) has negative points possible",
                    a.name, a.id
                ));
            }
        }

        if let Some(p) = self.grading_periods.iter().find(|p| p.weight < 0.0) {
            return Err(format!("Grading period '{}' has negative weight", p.title));
        }

        if self.scaling_factor <= 0.0 {
            return Err(format!(
                "Scaling factor must be positive, got {}",
                self.scaling_factor
            ));
        }

        Ok(())
    }
}
