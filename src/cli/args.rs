//! CLI argument definitions for `gradecalc`

use clap::{builder::BoolishValueParser, ArgGroup, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use grade_calc::config::ConfigOverrides;
use grade_calc::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `only_graded`, `reports_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Grade selection flags shared by `grade` and `report`
#[derive(Debug, Clone, Default, clap::Args)]
#[command(group(ArgGroup::new("scope").args(["current", "final_grade"])))]
#[command(group(ArgGroup::new("weighting").args(["weighted", "unweighted"])))]
pub struct GradeOptions {
    /// Hypothetical score for an assignment (repeatable)
    #[arg(long = "what-if", value_name = "ID=SCORE")]
    pub what_if: Vec<String>,

    /// Grade only assignments that have a score
    #[arg(long)]
    pub current: bool,

    /// Grade every assignment, counting ungraded ones as zero
    #[arg(long = "final")]
    pub final_grade: bool,

    /// Apply assignment group weights regardless of the course setting
    #[arg(long)]
    pub weighted: bool,

    /// Pool points across groups regardless of the course setting
    #[arg(long)]
    pub unweighted: bool,
}

impl GradeOptions {
    /// Whether to compute the current grade, falling back to `default`
    #[must_use]
    pub const fn only_graded(&self, default: bool) -> bool {
        if self.current {
            true
        } else if self.final_grade {
            false
        } else {
            default
        }
    }

    /// Whether to apply group weights, falling back to the course setting
    #[must_use]
    pub const fn apply_weights(&self, course_setting: bool) -> bool {
        if self.weighted {
            true
        } else if self.unweighted {
            false
        } else {
            course_setting
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Compute course grades.
    ///
    /// Load one or more course exports (JSON) and print each course grade.
    Grade {
        /// Paths to course export files (supports multiple)
        #[arg(value_name = "FILES", num_args = 1..)]
        input_files: Vec<PathBuf>,

        #[command(flatten)]
        options: GradeOptions,

        /// Also print the per-group breakdown
        #[arg(short, long)]
        breakdown: bool,
    },
    /// Generate a grade report from a course export.
    ///
    /// Creates a formatted report with the current and final grade and a
    /// per-group breakdown.
    Report {
        /// Path to course export file
        #[arg(value_name = "FILE")]
        input_file: PathBuf,

        /// Output file path (optional; defaults to the reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "html")]
        format: String,

        /// Hypothetical score for an assignment (repeatable)
        #[arg(long = "what-if", value_name = "ID=SCORE")]
        what_if: Vec<String>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gradecalc",
    about = "Course grade calculator for LMS exports",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config unposted-score policy (true/false)
    #[arg(long = "exclude-unposted", value_parser = BoolishValueParser::new())]
    pub exclude_unposted: Option<bool>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// The short-form `--reports-dir` takes precedence over
    /// `--config-reports-dir` when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            exclude_unposted: self.exclude_unposted,
            reports_dir: self
                .reports_dir
                .as_ref()
                .or(self.config_reports_dir.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
