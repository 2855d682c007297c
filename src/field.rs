//! Dense field arrays held in their stored element type

use ndarray::ArrayD;
use netcdf::types::{FloatType, IntType, NcVariableType};
use std::fmt;

/// Numeric element types that can be dumped without conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl ElementType {
    /// Maps a NetCDF variable type onto a dumpable element type.
    pub fn from_vartype(vartype: &NcVariableType) -> Option<Self> {
        match vartype {
            NcVariableType::Int(IntType::I8) => Some(ElementType::I8),
            NcVariableType::Int(IntType::U8) => Some(ElementType::U8),
            NcVariableType::Int(IntType::I16) => Some(ElementType::I16),
            NcVariableType::Int(IntType::U16) => Some(ElementType::U16),
            NcVariableType::Int(IntType::I32) => Some(ElementType::I32),
            NcVariableType::Int(IntType::U32) => Some(ElementType::U32),
            NcVariableType::Int(IntType::I64) => Some(ElementType::I64),
            NcVariableType::Int(IntType::U64) => Some(ElementType::U64),
            NcVariableType::Float(FloatType::F32) => Some(ElementType::F32),
            NcVariableType::Float(FloatType::F64) => Some(ElementType::F64),
            _ => None,
        }
    }

    /// Size of one element in bytes
    pub fn size(&self) -> usize {
        match self {
            ElementType::I8 | ElementType::U8 => 1,
            ElementType::I16 | ElementType::U16 => 2,
            ElementType::I32 | ElementType::U32 | ElementType::F32 => 4,
            ElementType::I64 | ElementType::U64 | ElementType::F64 => 8,
        }
    }

    /// Float type that packed values of this type widen to when unpacked.
    ///
    /// Integers of up to 16 bits and `f32` fit exactly in `f32`; anything
    /// wider, or a `f64` packing attribute, needs `f64`.
    pub fn unpacked_type(&self, f64_attributes: bool) -> ElementType {
        if f64_attributes {
            return ElementType::F64;
        }
        match self {
            ElementType::I8
            | ElementType::U8
            | ElementType::I16
            | ElementType::U16
            | ElementType::F32 => ElementType::F32,
            _ => ElementType::F64,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ElementType::I8 => "i8",
            ElementType::U8 => "u8",
            ElementType::I16 => "i16",
            ElementType::U16 => "u16",
            ElementType::I32 => "i32",
            ElementType::U32 => "u32",
            ElementType::I64 => "i64",
            ElementType::U64 => "u64",
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A whole variable read into memory, one variant per element type
#[derive(Debug, Clone, PartialEq)]
pub enum FieldData {
    I8(ArrayD<i8>),
    U8(ArrayD<u8>),
    I16(ArrayD<i16>),
    U16(ArrayD<u16>),
    I32(ArrayD<i32>),
    U32(ArrayD<u32>),
    I64(ArrayD<i64>),
    U64(ArrayD<u64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

/// Runs `$body` with `$array` bound to the inner typed array.
macro_rules! with_array {
    ($data:expr, $array:ident => $body:expr) => {
        match $data {
            FieldData::I8($array) => $body,
            FieldData::U8($array) => $body,
            FieldData::I16($array) => $body,
            FieldData::U16($array) => $body,
            FieldData::I32($array) => $body,
            FieldData::U32($array) => $body,
            FieldData::I64($array) => $body,
            FieldData::U64($array) => $body,
            FieldData::F32($array) => $body,
            FieldData::F64($array) => $body,
        }
    };
}

impl FieldData {
    pub fn element_type(&self) -> ElementType {
        match self {
            FieldData::I8(_) => ElementType::I8,
            FieldData::U8(_) => ElementType::U8,
            FieldData::I16(_) => ElementType::I16,
            FieldData::U16(_) => ElementType::U16,
            FieldData::I32(_) => ElementType::I32,
            FieldData::U32(_) => ElementType::U32,
            FieldData::I64(_) => ElementType::I64,
            FieldData::U64(_) => ElementType::U64,
            FieldData::F32(_) => ElementType::F32,
            FieldData::F64(_) => ElementType::F64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        with_array!(self, array => array.shape())
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        with_array!(self, array => array.len())
    }

    /// Size of the raw dump in bytes
    pub fn byte_len(&self) -> u64 {
        (self.len() * self.element_type().size()) as u64
    }

    /// Calls `f` with the array's elements as native-endian bytes in C order.
    pub fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        with_array!(self, array => contiguous_bytes(array, f))
    }
}

fn contiguous_bytes<T, R>(array: &ArrayD<T>, f: impl FnOnce(&[u8]) -> R) -> R
where
    T: bytemuck::Pod,
{
    let standard = array.as_standard_layout();
    match standard.as_slice() {
        Some(elements) => f(bytemuck::cast_slice(elements)),
        None => {
            let elements: Vec<T> = standard.iter().copied().collect();
            f(bytemuck::cast_slice(&elements))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn test_byte_len_matches_element_size() {
        let data = FieldData::F32(ArrayD::zeros(IxDyn(&[2, 3, 4])));
        assert_eq!(data.len(), 24);
        assert_eq!(data.byte_len(), 96);
        assert_eq!(data.shape(), &[2, 3, 4]);

        let data = FieldData::I16(ArrayD::zeros(IxDyn(&[5])));
        assert_eq!(data.byte_len(), 10);
        assert_eq!(data.element_type(), ElementType::I16);
    }

    #[test]
    fn test_bytes_follow_c_order() {
        let array = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![1u16, 2, 3, 4]).unwrap();
        let transposed = FieldData::U16(array.reversed_axes());

        let bytes = transposed.with_bytes(|b| b.to_vec());
        let expected: Vec<u8> = [1u16, 3, 2, 4].iter().flat_map(|v| v.to_ne_bytes()).collect();
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_unpacked_type_widening() {
        assert_eq!(ElementType::I16.unpacked_type(false), ElementType::F32);
        assert_eq!(ElementType::U8.unpacked_type(false), ElementType::F32);
        assert_eq!(ElementType::I32.unpacked_type(false), ElementType::F64);
        assert_eq!(ElementType::F64.unpacked_type(false), ElementType::F64);
        assert_eq!(ElementType::I16.unpacked_type(true), ElementType::F64);
    }

    #[test]
    fn test_element_type_names() {
        assert_eq!(ElementType::F32.to_string(), "f32");
        assert_eq!(ElementType::U64.size(), 8);
        assert_eq!(ElementType::I8.size(), 1);
    }
}
