//! Assignment group model

use super::Assignment;
use serde::{Deserialize, Serialize};

/// Drop rules attached to an assignment group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingRules {
    /// Number of lowest scores to drop
    #[serde(default)]
    pub drop_lowest: u32,

    /// Number of highest scores to drop
    #[serde(default)]
    pub drop_highest: u32,

    /// Assignment ids that are never dropped
    #[serde(default)]
    pub never_drop: Vec<u64>,
}

impl GradingRules {
    /// Whether the rules drop anything at all
    #[must_use]
    pub const fn drops_anything(&self) -> bool {
        self.drop_lowest > 0 || self.drop_highest > 0
    }
}

/// A weighted bucket of assignments (e.g., "Homework" = 30% of the grade)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentGroup {
    /// Group id
    pub id: u64,

    /// Group name
    #[serde(default)]
    pub name: String,

    /// Share of the final grade in percent (0-100)
    #[serde(default)]
    pub group_weight: f64,

    /// Optional drop rules
    #[serde(default)]
    pub rules: Option<GradingRules>,

    /// Assignments in display order
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl AssignmentGroup {
    /// Create an empty group
    ///
    /// # Arguments
    /// * `id` - Group id
    /// * `name` - Group name
    /// * `group_weight` - Share of the final grade in percent
    #[must_use]
    pub const fn new(id: u64, name: String, group_weight: f64) -> Self {
        Self {
            id,
            name,
            group_weight,
            rules: None,
            assignments: Vec::new(),
        }
    }

    /// Attach drop rules
    #[must_use]
    pub fn with_rules(mut self, rules: GradingRules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Append an assignment
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Builder form of [`add_assignment`](Self::add_assignment)
    #[must_use]
    pub fn with_assignment(mut self, assignment: Assignment) -> Self {
        self.add_assignment(assignment);
        self
    }

    /// Look up an assignment by id
    #[must_use]
    pub fn get_assignment(&self, id: u64) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.id == id)
    }
}
