//! Synthetic hourly precipitation dumps
//!
//! Produces files in the same headerless `f32` format and naming scheme as a
//! real conversion, for exercising downstream readers without ERA5 input.
//! Each file holds `days × 24` grids of `height × width` values, where a
//! value at hour `h` of month `m` is `uniform(0, 1) × (144 − (h − 12)²) × m`:
//! zero at midnight, peaking at noon and growing through the year.

use crate::calendar::{days_in_month, month_starts, year_range};
use crate::errors::{ConvertError, Result};
use crate::naming::Layout;
use chrono::{Datelike, NaiveDate};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_HEIGHT: usize = 721;
pub const DEFAULT_WIDTH: usize = 1440;
pub const DEFAULT_SYNTHETIC_END_YEAR: i32 = 1982;
pub const HOURS_PER_DAY: u32 = 24;

/// Writes synthetic monthly dumps
#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    pub layout: Layout,
    pub height: usize,
    pub width: usize,
    pub seed: u64,
}

impl SyntheticGenerator {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            seed: 0,
        }
    }

    pub fn with_grid(mut self, height: usize, width: usize) -> Self {
        self.height = height;
        self.width = width;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Weight applied to the uniform sample for a given hour and month
    pub fn hourly_scale(hour: u32, month: u32) -> f32 {
        let offset = hour as i64 - 12;
        ((144 - offset * offset) * month as i64) as f32
    }

    /// Writes one dump per month of `[start_year, end_year]` and returns the paths written.
    pub fn generate(&self, start_year: i32, end_year: i32) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for year in year_range(start_year, end_year)? {
            for date in month_starts(year)? {
                let path = self.layout.month_paths(date).output;
                println!("writing: {}", path.display());
                self.write_month(&path, date)?;
                written.push(path);
            }
        }
        info!(files = written.len(), "synthetic generation finished");
        Ok(written)
    }

    /// Writes the dump for the month starting at `date`. Returns the bytes written.
    pub fn write_month(&self, path: &Path, date: NaiveDate) -> Result<u64> {
        let io_err = |source: std::io::Error| ConvertError::IoWrite {
            path: path.to_path_buf(),
            source,
        };

        let days = days_in_month(date.year(), date.month())?;
        let grid_len = self.height * self.width;

        // Same seed for every month, so months differ only through their scale.
        let mut rng = StdRng::seed_from_u64(self.seed);
        let distribution = Uniform::new(0.0f32, 1.0);

        let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
        let mut grid = vec![0.0f32; grid_len];
        for _day in 0..days {
            for hour in 0..HOURS_PER_DAY {
                let scale = Self::hourly_scale(hour, date.month());
                for value in grid.iter_mut() {
                    *value = distribution.sample(&mut rng) * scale;
                }
                writer
                    .write_all(bytemuck::cast_slice(&grid))
                    .map_err(io_err)?;
            }
        }
        writer.flush().map_err(io_err)?;

        let values = days as usize * HOURS_PER_DAY as usize * grid_len;
        let bytes = (values * std::mem::size_of::<f32>()) as u64;
        debug!(path = %path.display(), days, bytes, "wrote synthetic dump");
        Ok(bytes)
    }
}
