//! Headerless raw binary dumps
//!
//! A dump is the field's elements in C order and native byte order, nothing
//! else. Reading one back needs the element type and shape from elsewhere.

use crate::errors::{ConvertError, Result};
use crate::field::FieldData;
use bytemuck::Pod;
use ndarray::{ArrayD, IxDyn};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Writes `data` to `path`, creating or truncating it. Returns the bytes written.
pub fn write_raw(path: &Path, data: &FieldData) -> Result<u64> {
    let io_err = |source: std::io::Error| ConvertError::IoWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    data.with_bytes(|bytes| writer.write_all(bytes)).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    Ok(data.byte_len())
}

/// Reads a dump written by [`write_raw`] back into an array of `shape`.
pub fn read_raw<T>(path: &Path, shape: &[usize]) -> Result<ArrayD<T>>
where
    T: Pod,
{
    let io_err = |source: std::io::Error| ConvertError::IoRead {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_err)?;
    let actual_bytes = file.metadata().map_err(io_err)?.len();

    let elements: usize = shape.iter().product();
    let expected_bytes = (elements * std::mem::size_of::<T>()) as u64;
    if actual_bytes != expected_bytes {
        return Err(ConvertError::ShapeMismatch {
            path: path.to_path_buf(),
            expected_bytes,
            actual_bytes,
        });
    }

    let mut values = vec![T::zeroed(); elements];
    file.read_exact(bytemuck::cast_slice_mut(&mut values))
        .map_err(io_err)?;

    Ok(ArrayD::from_shape_vec(IxDyn(shape), values)?)
}

/// Reads a whole dump as bytes.
pub fn read_raw_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| ConvertError::IoRead {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_back() -> Result<()> {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("field.bin");

        let values: Vec<f64> = (0..12).map(|i| i as f64 * 0.5).collect();
        let array = ArrayD::from_shape_vec(IxDyn(&[3, 4]), values)?;
        let written = write_raw(&path, &FieldData::F64(array.clone()))?;

        assert_eq!(written, 96);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 96);
        assert_eq!(read_raw::<f64>(&path, &[3, 4])?, array);
        Ok(())
    }

    #[test]
    fn test_write_truncates_existing_file() -> Result<()> {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("field.bin");
        std::fs::write(&path, vec![0xffu8; 1000]).unwrap();

        let array = ArrayD::from_shape_vec(IxDyn(&[2]), vec![7u8, 9])?;
        write_raw(&path, &FieldData::U8(array))?;

        assert_eq!(read_raw_bytes(&path)?, vec![7u8, 9]);
        Ok(())
    }

    #[test]
    fn test_read_with_wrong_shape() -> Result<()> {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("field.bin");
        let array = ArrayD::from_shape_vec(IxDyn(&[4]), vec![1i32, 2, 3, 4])?;
        write_raw(&path, &FieldData::I32(array))?;

        match read_raw::<i32>(&path, &[5]) {
            Err(ConvertError::ShapeMismatch {
                expected_bytes,
                actual_bytes,
                ..
            }) => {
                assert_eq!(expected_bytes, 20);
                assert_eq!(actual_bytes, 16);
            }
            other => panic!("Expected ShapeMismatch error, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("missing").join("field.bin");
        let array = ArrayD::from_shape_vec(IxDyn(&[1]), vec![1.0f32]).unwrap();

        match write_raw(&path, &FieldData::F32(array)) {
            Err(ConvertError::IoWrite { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("Expected IoWrite error, got {:?}", other),
        }
    }
}
