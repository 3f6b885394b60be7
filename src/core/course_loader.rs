//! JSON course export loader and what-if score parsing

use crate::core::calculator::WhatIfScores;
use crate::core::models::Course;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Read and validate a course export from a JSON file
///
/// # Arguments
/// * `path` - Path to the JSON export
///
/// # Errors
/// Returns an error if the file cannot be read, is not a valid course export,
/// or fails validation
pub fn load_course<P: AsRef<Path>>(path: P) -> Result<Course, Box<dyn Error>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;

    let course = parse_course(&content).map_err(|e| format!("{}: {e}", path.display()))?;
    crate::debug!(
        "Loaded '{}' from {} ({} groups, {} assignments)",
        course.name,
        path.display(),
        course.assignment_groups.len(),
        course.assignment_count()
    );

    Ok(course)
}

/// Parse and validate a course export from a JSON string
///
/// # Errors
/// Returns an error if the JSON is malformed or the course fails validation
pub fn parse_course(json: &str) -> Result<Course, String> {
    let course: Course =
        serde_json::from_str(json).map_err(|e| format!("Invalid course export: {e}"))?;
    course.validate()?;
    Ok(course)
}

/// Parse `ID=SCORE` pairs into a what-if map. Later pairs win.
///
/// # Errors
/// Returns an error naming the first pair that is not `ID=SCORE` with an
/// integer id and a finite, non-negative score
pub fn parse_what_if(pairs: &[String]) -> Result<WhatIfScores, String> {
    let mut what_if = WhatIfScores::new();

    for pair in pairs {
        let (id, score) = pair
            .split_once('=')
            .ok_or_else(|| format!("Invalid what-if '{pair}': expected ID=SCORE"))?;

        let id: u64 = id
            .trim()
            .parse()
            .map_err(|_| format!("Invalid what-if '{pair}': '{id}' is not an assignment id"))?;

        let score: f64 = score
            .trim()
            .parse()
            .map_err(|_| format!("Invalid what-if '{pair}': '{score}' is not a score"))?;

        if !score.is_finite() || score < 0.0 {
            return Err(format!(
                "Invalid what-if '{pair}': score must be a non-negative number"
            ));
        }

        what_if.insert(id, score);
    }

    Ok(what_if)
}

/// What-if ids that match no assignment of the course, sorted
#[must_use]
pub fn unknown_what_if_ids(course: &Course, what_if: &WhatIfScores) -> Vec<u64> {
    let mut unknown: Vec<u64> = what_if
        .keys()
        .copied()
        .filter(|id| !course.has_assignment(*id))
        .collect();
    unknown.sort_unstable();
    unknown
}
