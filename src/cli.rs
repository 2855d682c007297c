//! Defines command-line interface options using `clap` for the era5_nc2bin application.
//!
//! Every option defaults to the values of the original batch run, so invoking
//! the binary without arguments converts 1981 through 2020.

use crate::convert::{ConvertConfig, DEFAULT_END_YEAR, DEFAULT_START_YEAR, DEFAULT_VARIABLE};
use crate::naming::{Layout, DEFAULT_INPUT_ROOT, DEFAULT_OUTPUT_ROOT};
use crate::synthetic::{
    SyntheticGenerator, DEFAULT_HEIGHT, DEFAULT_SYNTHETIC_END_YEAR, DEFAULT_WIDTH,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Converts monthly ERA5 precipitation NetCDF files to raw binary
#[derive(Parser, Debug)]
#[command(
    version,
    name = "era5-nc2bin",
    about = "Dump monthly ERA5 NetCDF fields as headerless binary files"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert every month of the year range (the default)
    Convert(RunArgs),
    /// Check existing dumps against their NetCDF sources
    Verify(RunArgs),
    /// Write synthetic dumps without reading any NetCDF input
    Synthesize(SynthesizeArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// First year to process
    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    pub start_year: i32,

    /// Last year to process, inclusive
    #[arg(long, default_value_t = DEFAULT_END_YEAR)]
    pub end_year: i32,

    /// Directory holding the monthly NetCDF files
    #[arg(long, default_value = DEFAULT_INPUT_ROOT)]
    pub input_dir: PathBuf,

    /// Directory receiving the binary dumps; must already exist
    #[arg(long, default_value = DEFAULT_OUTPUT_ROOT)]
    pub output_dir: PathBuf,

    /// Name of the field to extract
    #[arg(long, default_value = DEFAULT_VARIABLE)]
    pub variable: String,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SynthesizeArgs {
    /// First year to generate
    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    pub start_year: i32,

    /// Last year to generate, inclusive
    #[arg(long, default_value_t = DEFAULT_SYNTHETIC_END_YEAR)]
    pub end_year: i32,

    /// Directory receiving the synthetic dumps; must already exist
    #[arg(long, default_value = DEFAULT_OUTPUT_ROOT)]
    pub output_dir: PathBuf,

    /// Grid rows (latitudes)
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Grid columns (longitudes)
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Random seed, reused for every month
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl Args {
    /// The subcommand to run; a bare invocation converts with the defaults.
    pub fn selected_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Convert(RunArgs::default()))
    }
}

impl RunArgs {
    pub fn to_config(&self) -> ConvertConfig {
        ConvertConfig::new(Layout::new(&self.input_dir, &self.output_dir))
            .with_variable(&self.variable)
            .with_progress(!self.no_progress)
    }
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            input_dir: PathBuf::from(DEFAULT_INPUT_ROOT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            variable: DEFAULT_VARIABLE.to_string(),
            no_progress: false,
        }
    }
}

impl SynthesizeArgs {
    pub fn to_generator(&self) -> SyntheticGenerator {
        let layout = Layout {
            output_root: self.output_dir.clone(),
            ..Layout::default()
        };
        SyntheticGenerator::new(layout)
            .with_grid(self.height, self.width)
            .with_seed(self.seed)
    }
}
