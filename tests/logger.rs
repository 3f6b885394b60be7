//! Integration tests for logger behavior.
//!
//! The level is process-global, so everything that changes it lives in one test.

use grade_calc::logger::{
    close_file_logging, enable_debug, enabled, init_file_logging, level, set_level,
    set_level_from_str, Level,
};
use grade_calc::{debug, error, info, warn};
use std::fs;
use tempfile::TempDir;

#[test]
fn level_configuration() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("WARN"));
    assert!(set_level_from_str("info"));
    assert_eq!(level(), Level::Info);

    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
    assert_eq!(level(), Level::Info);

    assert!(enabled(Level::Error));
    assert!(!enabled(Level::Debug));

    set_level(Level::Debug);
    enable_debug();
    assert!(enabled(Level::Debug));

    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[test]
fn file_logging_appends_prefixed_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("logs").join("gradecalc.log");

    assert!(init_file_logging(&log_path));
    error!("written to file");
    close_file_logging();

    let content = fs::read_to_string(&log_path).expect("Failed to read log file");
    assert!(content.contains("[ERROR] written to file"));
}
