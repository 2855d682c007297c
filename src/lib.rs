//! era5_nc2bin: monthly ERA5 NetCDF to raw binary conversion
//!
//! Reads the accumulated precipitation field (`tp`) from one NetCDF file per
//! month and writes its elements to a headerless binary file with the same
//! date-derived stem:
//!
//! ```text
//! ./raw_1hr_all/e5.accumulated_tp_1h.198101.nc -> ./binary_1hr_all/e5.accumulated_tp_1h.198101.bin
//! ```
//!
//! The dump is the array in C order and native byte order. Unpacked fields
//! keep their stored element type; packed fields (`scale_factor`,
//! `add_offset`) are unpacked to `f32` or `f64` first. Its length is always
//! `elements × element size`.
//!
//! ## Module Organization
//!
//! - [`calendar`]: month sequences for the yearly loop
//! - [`naming`]: stems and input/output paths
//! - [`field`]: typed in-memory field arrays
//! - [`metadata`]: field layout inspection
//! - [`netcdf_io`]: opening datasets and extracting fields
//! - [`binary`]: writing and reading raw dumps
//! - [`convert`]: the conversion loop
//! - [`synthetic`]: synthetic dumps for downstream testing
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//! ```rust,no_run
//! use era5_nc2bin::prelude::*;
//!
//! let converter = Converter::new(ConvertConfig::default());
//! let summary = converter.convert(1981, 1981).unwrap();
//! println!("{} files, {} bytes", summary.files, summary.bytes);
//! ```

pub mod binary;
pub mod calendar;
pub mod cli;
pub mod convert;
pub mod errors;
pub mod field;
pub mod metadata;
pub mod naming;
pub mod netcdf_io;
pub mod synthetic;

pub use convert::convert;

pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::binary::{read_raw, write_raw};
    pub use crate::convert::{ConversionSummary, ConvertConfig, Converter};
    pub use crate::errors::{ConvertError, Result};
    pub use crate::field::{ElementType, FieldData};
    pub use crate::metadata::{describe_field, FieldLayout, Packing};
    pub use crate::naming::{Layout, MonthPaths};
    pub use crate::netcdf_io::{load_field, open_dataset, read_field};
    pub use crate::synthetic::SyntheticGenerator;
}
