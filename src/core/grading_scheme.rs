//! Letter grades and points-based display of a computed percentage

use crate::core::models::{Course, GradingSchemeRow};
use crate::core::rounding::round;
use std::fmt;

/// Tolerance when comparing a percentage against a scheme bound
const BOUND_EPSILON: f64 = 1e-9;

/// Look up the letter for `percent` in `scheme`.
///
/// The row with the highest lower bound not above `percent / 100` wins. Below
/// every bound the lowest row is returned. An empty scheme has no letter.
#[must_use]
pub fn letter_grade(percent: f64, scheme: &[GradingSchemeRow]) -> Option<&str> {
    let fraction = percent / 100.0;

    scheme
        .iter()
        .filter(|row| row.value <= fraction + BOUND_EPSILON)
        .max_by(|a, b| a.value.total_cmp(&b.value))
        .or_else(|| scheme.iter().min_by(|a, b| a.value.total_cmp(&b.value)))
        .map(|row| row.name.as_str())
}

/// Convert a percentage to a points-based score on `scaling_factor`.
///
/// # Errors
/// Returns an error if the result cannot be rounded.
pub fn points_based(percent: f64, scaling_factor: f64) -> Result<f64, String> {
    round(percent / 100.0 * scaling_factor, 2)
}

/// A grade as a student sees it
#[derive(Debug, Clone, PartialEq)]
pub struct GradeDisplay {
    /// Rounded course percentage
    pub percent: f64,
    /// Score and scale when the course uses a points-based scheme
    pub points: Option<(f64, f64)>,
    /// Letter from the course's grading scheme
    pub letter: Option<String>,
    /// Whether numeric scores are hidden
    pub restricted: bool,
}

impl GradeDisplay {
    /// Build the display of `percent` according to the course settings
    ///
    /// # Errors
    /// Returns an error if a points-based score cannot be rounded.
    pub fn for_course(course: &Course, percent: f64) -> Result<Self, String> {
        let points = if course.points_based_grading_scheme {
            Some((
                points_based(percent, course.scaling_factor)?,
                course.scaling_factor,
            ))
        } else {
            None
        };

        Ok(Self {
            percent,
            points,
            letter: letter_grade(percent, &course.grading_scheme).map(str::to_string),
            restricted: course.restrict_quantitative_data,
        })
    }
}

impl fmt::Display for GradeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.restricted {
            return write!(f, "{}", self.letter.as_deref().unwrap_or("N/A"));
        }

        match self.points {
            Some((points, scale)) => write!(f, "{points} / {scale}")?,
            None => write!(f, "{}%", self.percent)?,
        }

        if let Some(letter) = &self.letter {
            write!(f, " ({letter})")?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn scheme() -> Vec<GradingSchemeRow> {
        vec![
            GradingSchemeRow::new("A", 0.94),
            GradingSchemeRow::new("B", 0.84),
            GradingSchemeRow::new("C", 0.74),
            GradingSchemeRow::new("F", 0.0),
        ]
    }

    #[test]
    fn test_letter_grade_bounds() {
        let scheme = scheme();
        assert_eq!(letter_grade(100.0, &scheme), Some("A"));
        assert_eq!(letter_grade(94.0, &scheme), Some("A"));
        assert_eq!(letter_grade(93.99, &scheme), Some("B"));
        assert_eq!(letter_grade(74.0, &scheme), Some("C"));
        assert_eq!(letter_grade(12.0, &scheme), Some("F"));
    }

    #[test]
    fn test_letter_grade_below_all_bounds() {
        let scheme = vec![
            GradingSchemeRow::new("Pass", 0.6),
            GradingSchemeRow::new("Fail", 0.3),
        ];
        assert_eq!(letter_grade(10.0, &scheme), Some("Fail"));
    }

    #[test]
    fn test_letter_grade_empty_scheme() {
        assert_eq!(letter_grade(88.0, &[]), None);
    }

    #[test]
    fn test_points_based() {
        assert_eq!(points_based(85.5, 4.0).unwrap(), 3.42);
        assert_eq!(points_based(100.0, 10.0).unwrap(), 10.0);
    }

    #[test]
    fn test_display_percent_with_letter() {
        let mut course = Course::new("Math".to_string());
        course.grading_scheme = scheme();
        let display = GradeDisplay::for_course(&course, 85.56).unwrap();
        assert_eq!(display.to_string(), "85.56% (B)");
    }

    #[test]
    fn test_display_percent_without_scheme() {
        let course = Course::new("Math".to_string());
        let display = GradeDisplay::for_course(&course, 90.0).unwrap();
        assert_eq!(display.to_string(), "90%");
    }

    #[test]
    fn test_display_points_based() {
        let mut course = Course::new("Math".to_string());
        course.points_based_grading_scheme = true;
        course.scaling_factor = 4.0;
        let display = GradeDisplay::for_course(&course, 85.5).unwrap();
        assert_eq!(display.points, Some((3.42, 4.0)));
        assert_eq!(display.to_string(), "3.42 / 4");
    }

    #[test]
    fn test_display_restricted() {
        let mut course = Course::new("Math".to_string());
        course.restrict_quantitative_data = true;
        assert_eq!(
            GradeDisplay::for_course(&course, 70.0).unwrap().to_string(),
            "N/A"
        );

        course.grading_scheme = scheme();
        assert_eq!(
            GradeDisplay::for_course(&course, 70.0).unwrap().to_string(),
            "F"
        );
    }
}
