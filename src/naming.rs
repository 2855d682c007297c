//! File naming for monthly input/output pairs
//!
//! Inputs and outputs share a stem built from the month, e.g.
//! `e5.accumulated_tp_1h.198101`; only the root directory and the
//! extension differ.

use chrono::NaiveDate;
use std::path::PathBuf;

pub const DEFAULT_INPUT_ROOT: &str = "./raw_1hr_all";
pub const DEFAULT_OUTPUT_ROOT: &str = "./binary_1hr_all";
pub const DEFAULT_PREFIX: &str = "e5.accumulated_tp_1h";
pub const INPUT_EXTENSION: &str = "nc";
pub const OUTPUT_EXTENSION: &str = "bin";

/// Directory roots and naming convention for a conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub prefix: String,
    pub input_ext: String,
    pub output_ext: String,
}

/// Input and output paths for a single month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthPaths {
    pub stem: String,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Layout {
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            ..Self::default()
        }
    }

    /// Formats the date-derived stem, `<prefix>.<YYYY><MM>`.
    pub fn stem(&self, date: NaiveDate) -> String {
        format!("{}.{}", self.prefix, date.format("%Y%m"))
    }

    pub fn month_paths(&self, date: NaiveDate) -> MonthPaths {
        let stem = self.stem(date);
        let input = self
            .input_root
            .join(format!("{}.{}", stem, self.input_ext));
        let output = self
            .output_root
            .join(format!("{}.{}", stem, self.output_ext));
        MonthPaths {
            stem,
            input,
            output,
        }
    }
}

impl MonthPaths {
    /// Console line announcing a conversion
    pub fn progress_line(&self) -> String {
        format!(
            "Reading {} and outputting to {}",
            self.input.display(),
            self.output.display()
        )
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from(DEFAULT_INPUT_ROOT),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            prefix: DEFAULT_PREFIX.to_string(),
            input_ext: INPUT_EXTENSION.to_string(),
            output_ext: OUTPUT_EXTENSION.to_string(),
        }
    }
}
