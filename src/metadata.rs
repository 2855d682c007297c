//! Field layout inspection
//!
//! Describes the element type and shape of a variable without reading its
//! data, so the size of the raw dump is known before converting. Packed
//! fields (`scale_factor` / `add_offset`) are dumped unpacked, as floats.

use crate::errors::{ConvertError, Result};
use crate::field::ElementType;
use netcdf::{AttributeValue, File, Variable};
use std::path::Path;

/// Information about a dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionInfo {
    pub name: String,
    pub length: usize,
    pub is_unlimited: bool,
}

/// Packing attributes of a field, applied as `stored * scale_factor + add_offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Packing {
    pub scale_factor: Option<f64>,
    pub add_offset: Option<f64>,
}

/// Element type and shape of a field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldLayout {
    pub name: String,
    /// Element type in the file
    pub stored_type: ElementType,
    /// Element type of the dump; a float type when the field is packed
    pub element_type: ElementType,
    pub packing: Option<Packing>,
    pub dimensions: Vec<DimensionInfo>,
}

impl FieldLayout {
    pub fn shape(&self) -> Vec<usize> {
        self.dimensions.iter().map(|d| d.length).collect()
    }

    /// Total number of elements; 1 for a scalar.
    pub fn total_elements(&self) -> usize {
        self.dimensions.iter().map(|d| d.length).product()
    }

    /// Size in bytes of the headerless dump of this field
    pub fn byte_len(&self) -> u64 {
        (self.total_elements() * self.element_type.size()) as u64
    }
}

/// Looks up `name` in `file`. `path` is only used for error reporting.
pub fn find_variable<'f>(file: &'f File, name: &str, path: &Path) -> Result<Variable<'f>> {
    file.variable(name).ok_or_else(|| ConvertError::FieldNotFound {
        field: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Looks up `name` in `file` and describes it.
pub fn describe_field(file: &File, name: &str, path: &Path) -> Result<FieldLayout> {
    let var = find_variable(file, name, path)?;
    describe_variable(&var)
}

/// Describes an already opened variable without reading its data.
pub fn describe_variable(var: &Variable) -> Result<FieldLayout> {
    let name = var.name().to_string();
    let vartype = var.vartype();
    let stored_type =
        ElementType::from_vartype(&vartype).ok_or_else(|| ConvertError::UnsupportedType {
            field: name.clone(),
            vartype: format!("{:?}", vartype).to_lowercase(),
        })?;

    let scale_factor = float_attribute(var, "scale_factor");
    let add_offset = float_attribute(var, "add_offset");
    let packing = if scale_factor.is_some() || add_offset.is_some() {
        Some(Packing {
            scale_factor: scale_factor.map(|(v, _)| v),
            add_offset: add_offset.map(|(v, _)| v),
        })
    } else {
        None
    };

    let element_type = match packing {
        Some(_) => {
            let f64_attributes = [scale_factor, add_offset]
                .iter()
                .flatten()
                .any(|&(_, is_f64)| is_f64);
            stored_type.unpacked_type(f64_attributes)
        }
        None => stored_type,
    };

    let dimensions = var
        .dimensions()
        .iter()
        .map(|d| DimensionInfo {
            name: d.name().to_string(),
            length: d.len(),
            is_unlimited: d.is_unlimited(),
        })
        .collect();

    Ok(FieldLayout {
        name,
        stored_type,
        element_type,
        packing,
        dimensions,
    })
}

/// Reads a float attribute, returning its value and whether it is stored as `f64`.
fn float_attribute(var: &Variable, name: &str) -> Option<(f64, bool)> {
    var.attribute(name).and_then(|attr| match attr.value().ok()? {
        AttributeValue::Float(v) => Some((v as f64, false)),
        AttributeValue::Double(v) => Some((v, true)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim(name: &str, length: usize) -> DimensionInfo {
        DimensionInfo {
            name: name.to_string(),
            length,
            is_unlimited: false,
        }
    }

    fn layout(element_type: ElementType, dimensions: Vec<DimensionInfo>) -> FieldLayout {
        FieldLayout {
            name: "tp".to_string(),
            stored_type: element_type,
            element_type,
            packing: None,
            dimensions,
        }
    }

    #[test]
    fn test_full_grid_byte_len() {
        let layout = layout(
            ElementType::F32,
            vec![dim("time", 31), dim("latitude", 721), dim("longitude", 1440)],
        );
        assert_eq!(layout.shape(), vec![31, 721, 1440]);
        assert_eq!(layout.byte_len(), 31 * 721 * 1440 * 4);
    }

    #[test]
    fn test_hourly_month_byte_len() {
        let layout = layout(
            ElementType::F32,
            vec![dim("time", 28 * 24), dim("latitude", 721), dim("longitude", 1440)],
        );
        assert_eq!(layout.total_elements(), 28 * 24 * 721 * 1440);
        assert_eq!(layout.byte_len(), 28 * 24 * 721 * 1440 * 4);
    }

    #[test]
    fn test_packed_layout_uses_unpacked_size() {
        let layout = FieldLayout {
            stored_type: ElementType::I16,
            packing: Some(Packing {
                scale_factor: Some(0.001),
                add_offset: None,
            }),
            ..layout(ElementType::F64, vec![dim("time", 6)])
        };
        assert_eq!(layout.byte_len(), 48);
    }

    #[test]
    fn test_scalar_layout_has_one_element() {
        let layout = layout(ElementType::F64, vec![]);
        assert_eq!(layout.total_elements(), 1);
        assert_eq!(layout.byte_len(), 8);
    }
}
