//! NetCDF input: opening monthly datasets and extracting a field
//!
//! Fields are read whole. Unpacked fields keep the element type they are
//! stored with. Packed fields (`scale_factor` and/or `add_offset`) are
//! unpacked to floats: `f64` if either attribute is `f64` or the stored type
//! is wider than 16 bits, otherwise `f32`. Fill values are not masked.

use crate::errors::{ConvertError, Result};
use crate::field::{ElementType, FieldData};
use crate::metadata::{describe_variable, find_variable, Packing};
use netcdf::{File, Variable};
use std::path::Path;
use tracing::debug;

/// Opens a NetCDF dataset read-only.
pub fn open_dataset(path: &Path) -> Result<File> {
    debug!(path = %path.display(), "opening dataset");
    netcdf::open(path).map_err(|source| ConvertError::DatasetOpen {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the whole of field `name` as a dense array. `path` is only used for error reporting.
pub fn read_field(file: &File, name: &str, path: &Path) -> Result<FieldData> {
    let var = find_variable(file, name, path)?;
    let layout = describe_variable(&var)?;

    debug!(
        field = name,
        stored_type = %layout.stored_type,
        element_type = %layout.element_type,
        packed = layout.packing.is_some(),
        shape = ?layout.shape(),
        "reading field"
    );

    if let Some(packing) = layout.packing {
        return unpack(&var, layout.element_type, packing);
    }

    let data = match layout.stored_type {
        ElementType::I8 => FieldData::I8(var.get::<i8, _>(..)?),
        ElementType::U8 => FieldData::U8(var.get::<u8, _>(..)?),
        ElementType::I16 => FieldData::I16(var.get::<i16, _>(..)?),
        ElementType::U16 => FieldData::U16(var.get::<u16, _>(..)?),
        ElementType::I32 => FieldData::I32(var.get::<i32, _>(..)?),
        ElementType::U32 => FieldData::U32(var.get::<u32, _>(..)?),
        ElementType::I64 => FieldData::I64(var.get::<i64, _>(..)?),
        ElementType::U64 => FieldData::U64(var.get::<u64, _>(..)?),
        ElementType::F32 => FieldData::F32(var.get::<f32, _>(..)?),
        ElementType::F64 => FieldData::F64(var.get::<f64, _>(..)?),
    };

    Ok(data)
}

/// Reads a packed variable converted to `target` and applies scale, then offset.
fn unpack(var: &Variable, target: ElementType, packing: Packing) -> Result<FieldData> {
    if target == ElementType::F32 {
        let mut values = var.get::<f32, _>(..)?;
        if let Some(scale) = packing.scale_factor {
            let scale = scale as f32;
            values.mapv_inplace(|v| v * scale);
        }
        if let Some(offset) = packing.add_offset {
            let offset = offset as f32;
            values.mapv_inplace(|v| v + offset);
        }
        Ok(FieldData::F32(values))
    } else {
        let mut values = var.get::<f64, _>(..)?;
        if let Some(scale) = packing.scale_factor {
            values.mapv_inplace(|v| v * scale);
        }
        if let Some(offset) = packing.add_offset {
            values.mapv_inplace(|v| v + offset);
        }
        Ok(FieldData::F64(values))
    }
}

/// Opens `path` and reads field `name` from it, dropping the dataset handle afterwards.
pub fn load_field(path: &Path, name: &str) -> Result<FieldData> {
    let file = open_dataset(path)?;
    read_field(&file, name, path)
}
