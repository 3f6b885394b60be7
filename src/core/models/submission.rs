//! Submission model

use serde::{Deserialize, Serialize};

/// Workflow state of a submission whose grade has not been finalized by an instructor
pub const PENDING_REVIEW: &str = "pending_review";

/// A student's submission for an assignment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Points awarded, if the submission has been scored
    #[serde(default)]
    pub score: Option<f64>,

    /// Grade as displayed by the LMS (e.g., "85", "B+", "complete")
    #[serde(default)]
    pub grade: Option<String>,

    /// Workflow state (e.g., "submitted", "graded", "pending_review")
    #[serde(default)]
    pub workflow_state: String,

    /// Excused submissions never count toward a grade
    #[serde(default)]
    pub excused: bool,

    /// Timestamp at which the grade became visible to the student
    #[serde(default)]
    pub posted_at: Option<String>,

    /// Grading period the submission belongs to
    #[serde(default)]
    pub grading_period_id: Option<u64>,
}

impl Submission {
    /// Create a submission with the given score
    ///
    /// # Arguments
    /// * `score` - Points awarded, `None` when not yet scored
    #[must_use]
    pub const fn new(score: Option<f64>) -> Self {
        Self {
            score,
            grade: None,
            workflow_state: String::new(),
            excused: false,
            posted_at: None,
            grading_period_id: None,
        }
    }

    /// Create a scored submission that is already posted
    #[must_use]
    pub fn graded(score: f64) -> Self {
        Self {
            grade: Some(score.to_string()),
            workflow_state: "graded".to_string(),
            posted_at: Some("2024-01-01T00:00:00Z".to_string()),
            ..Self::new(Some(score))
        }
    }

    /// Set the workflow state
    #[must_use]
    pub fn with_workflow_state(mut self, state: &str) -> Self {
        self.workflow_state = state.to_string();
        self
    }

    /// Set the posting timestamp (`None` means unposted)
    #[must_use]
    pub fn with_posted_at(mut self, posted_at: Option<&str>) -> Self {
        self.posted_at = posted_at.map(str::to_string);
        self
    }

    /// Mark the submission as excused
    #[must_use]
    pub const fn excused(mut self) -> Self {
        self.excused = true;
        self
    }

    /// Assign the submission to a grading period
    #[must_use]
    pub const fn in_period(mut self, period_id: u64) -> Self {
        self.grading_period_id = Some(period_id);
        self
    }

    /// Whether the submission is waiting for manual review
    #[must_use]
    pub fn is_pending_review(&self) -> bool {
        self.workflow_state == PENDING_REVIEW
    }

    /// Whether the grade has been posted to the student
    #[must_use]
    pub const fn is_posted(&self) -> bool {
        self.posted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_submission_is_unscored() {
        let submission = Submission::new(None);
        assert!(submission.score.is_none());
        assert!(!submission.is_pending_review());
        assert!(!submission.is_posted());
        assert!(!submission.excused);
    }

    #[test]
    fn test_graded_submission() {
        let submission = Submission::graded(42.5);
        assert_eq!(submission.score, Some(42.5));
        assert_eq!(submission.grade.as_deref(), Some("42.5"));
        assert!(submission.is_posted());
    }

    #[test]
    fn test_pending_review() {
        let submission = Submission::graded(10.0).with_workflow_state(PENDING_REVIEW);
        assert!(submission.is_pending_review());
    }

    #[test]
    fn test_deserialize_minimal() {
        let submission: Submission =
            serde_json::from_str(r#"{"score": 7.0, "workflow_state": "graded"}"#).unwrap();
        assert_eq!(submission.score, Some(7.0));
        assert!(submission.posted_at.is_none());
        assert!(submission.grading_period_id.is_none());
    }
}
