//! The yearly/monthly conversion loop
//!
//! Every month from January of the start year to December of the end year is
//! converted in order. The first failure aborts the run: months already
//! written stay on disk, later months are never attempted.

use crate::binary::{read_raw_bytes, write_raw};
use crate::calendar::{month_starts, year_range};
use crate::errors::{ConvertError, Result};
use crate::naming::{Layout, MonthPaths};
use crate::netcdf_io::load_field;
use chrono::{Datelike, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, info_span};

pub const DEFAULT_START_YEAR: i32 = 1981;
pub const DEFAULT_END_YEAR: i32 = 2020;
pub const DEFAULT_VARIABLE: &str = "tp";

const PROGRESS_TEMPLATE: &str =
    "{prefix} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}";

/// Settings for a conversion run
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub layout: Layout,
    pub variable: String,
    pub show_progress: bool,
}

impl ConvertConfig {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            variable: DEFAULT_VARIABLE.to_string(),
            show_progress: true,
        }
    }
}

/// Totals for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub files: usize,
    pub bytes: u64,
}

impl ConversionSummary {
    fn add(&mut self, bytes: u64) {
        self.files += 1;
        self.bytes += bytes;
    }
}

/// Converts monthly NetCDF fields into raw binary dumps
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// Converts every month of `[start_year, end_year]`.
    pub fn convert(&self, start_year: i32, end_year: i32) -> Result<ConversionSummary> {
        let summary = self.for_each_month(start_year, end_year, |paths| {
            println!("{}", paths.progress_line());
            self.convert_paths(paths)
        })?;

        info!(
            files = summary.files,
            bytes = summary.bytes,
            "conversion finished"
        );
        Ok(summary)
    }

    /// Converts a single month. Returns the number of bytes written.
    pub fn convert_month(&self, date: NaiveDate) -> Result<u64> {
        self.convert_paths(&self.config.layout.month_paths(date))
    }

    fn convert_paths(&self, paths: &MonthPaths) -> Result<u64> {
        let field = load_field(&paths.input, &self.config.variable)?;
        let bytes = write_raw(&paths.output, &field)?;
        debug!(
            stem = %paths.stem,
            element_type = %field.element_type(),
            shape = ?field.shape(),
            bytes,
            "wrote dump"
        );
        Ok(bytes)
    }

    /// Checks that every dump of `[start_year, end_year]` matches its source field byte for byte.
    pub fn verify(&self, start_year: i32, end_year: i32) -> Result<ConversionSummary> {
        let summary = self.for_each_month(start_year, end_year, |paths| {
            println!(
                "Verifying {} against {}",
                paths.output.display(),
                paths.input.display()
            );
            self.verify_paths(paths)
        })?;

        info!(
            files = summary.files,
            bytes = summary.bytes,
            "verification finished"
        );
        Ok(summary)
    }

    /// Verifies a single month. Returns the number of bytes compared.
    pub fn verify_month(&self, date: NaiveDate) -> Result<u64> {
        self.verify_paths(&self.config.layout.month_paths(date))
    }

    fn verify_paths(&self, paths: &MonthPaths) -> Result<u64> {
        let field = load_field(&paths.input, &self.config.variable)?;
        let dumped = read_raw_bytes(&paths.output)?;

        if dumped.len() as u64 != field.byte_len() {
            return Err(ConvertError::VerifyMismatch {
                path: paths.output.clone(),
                detail: format!(
                    "dump holds {} bytes, field {} {:?} needs {}",
                    dumped.len(),
                    field.element_type(),
                    field.shape(),
                    field.byte_len()
                ),
            });
        }

        let first_difference =
            field.with_bytes(|expected| expected.iter().zip(&dumped).position(|(a, b)| a != b));
        if let Some(offset) = first_difference {
            return Err(ConvertError::VerifyMismatch {
                path: paths.output.clone(),
                detail: format!("content differs at byte offset {}", offset),
            });
        }

        Ok(field.byte_len())
    }

    fn for_each_month<F>(
        &self,
        start_year: i32,
        end_year: i32,
        mut step: F,
    ) -> Result<ConversionSummary>
    where
        F: FnMut(&MonthPaths) -> Result<u64>,
    {
        let mut summary = ConversionSummary::default();

        for year in year_range(start_year, end_year)? {
            let _span = info_span!("year", year).entered();
            let dates = month_starts(year)?;
            let progress = self.progress_bar(year, dates.len() as u64);

            for date in dates {
                let paths = self.config.layout.month_paths(date);
                progress.set_message(format!("{:02}", date.month()));

                let bytes = match progress.suspend(|| step(&paths)) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        progress.abandon();
                        return Err(e);
                    }
                };
                summary.add(bytes);
                progress.inc(1);
            }

            progress.finish_and_clear();
        }

        Ok(summary)
    }

    fn progress_bar(&self, year: i32, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new(len);
        progress.set_style(
            ProgressStyle::default_bar()
                .template(PROGRESS_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
        );
        progress.set_prefix(year.to_string());
        progress
    }
}

/// Converts `[start_year, end_year]` with the default directories and field.
pub fn convert(start_year: i32, end_year: i32) -> Result<ConversionSummary> {
    Converter::new(ConvertConfig::default()).convert(start_year, end_year)
}
