//! Assignment model

use super::Submission;
use serde::{Deserialize, Serialize};

/// Submission type used by the LMS for assignments that are never graded
pub const NOT_GRADED: &str = "not_graded";

const fn default_published() -> bool {
    true
}

/// Represents a gradable item inside an assignment group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assignment id
    pub id: u64,

    /// Assignment name (e.g., "Homework 3")
    #[serde(default)]
    pub name: String,

    /// Maximum points a student can earn
    #[serde(default)]
    pub points_possible: f64,

    /// Raw submission types (e.g., `online_text_entry`, `not_graded`).
    /// Empty means the assignment is not submittable.
    #[serde(default, rename = "submission_types")]
    pub submission_types_raw: Vec<String>,

    /// Excludes the assignment from every grade computation
    #[serde(default)]
    pub omit_from_final_grade: bool,

    /// Unpublished assignments are invisible to students and never graded
    #[serde(default = "default_published")]
    pub published: bool,

    /// The student's submission, if any
    #[serde(default)]
    pub submission: Option<Submission>,
}

impl Assignment {
    /// Create a new published assignment with no submission types
    ///
    /// # Arguments
    /// * `id` - Assignment id
    /// * `name` - Display name
    /// * `points_possible` - Maximum points
    #[must_use]
    pub const fn new(id: u64, name: String, points_possible: f64) -> Self {
        Self {
            id,
            name,
            points_possible,
            submission_types_raw: Vec::new(),
            omit_from_final_grade: false,
            published: true,
            submission: None,
        }
    }

    /// Set the raw submission types
    #[must_use]
    pub fn with_submission_types(mut self, types: &[&str]) -> Self {
        self.submission_types_raw = types.iter().map(|t| (*t).to_string()).collect();
        self
    }

    /// Attach a submission
    #[must_use]
    pub fn with_submission(mut self, submission: Submission) -> Self {
        self.submission = Some(submission);
        self
    }

    /// Mark the assignment as omitted from the final grade
    #[must_use]
    pub const fn omitted(mut self) -> Self {
        self.omit_from_final_grade = true;
        self
    }

    /// Mark the assignment as unpublished
    #[must_use]
    pub const fn unpublished(mut self) -> Self {
        self.published = false;
        self
    }

    /// Whether the assignment can take part in any grade calculation.
    ///
    /// Omitted, unpublished, `not_graded` and non-submittable assignments are
    /// never gradeable.
    #[must_use]
    pub fn is_gradeable(&self) -> bool {
        !self.omit_from_final_grade
            && self.published
            && !self.submission_types_raw.is_empty()
            && !self.submission_types_raw.iter().any(|t| t == NOT_GRADED)
    }
}
