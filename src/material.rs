use std::convert::TryFrom;
use std::slice;

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::error::{MtlError, Result};

/// Number of texture slots stored per material record.
pub const TEXTURE_SLOTS: usize = 4;

/// A single decoded material.
///
/// Colors are RGBA with `x`, `y`, `z`, `w` holding red, green, blue and alpha.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub diffuse: Vec4,
    pub ambient: Vec4,
    pub specular: Vec4,
    pub emissive: Vec4,
    pub specular_power: f32,
    /// Non-empty texture names in slot order, at most [`TEXTURE_SLOTS`].
    pub texture_file_names: Vec<String>,
}

impl MaterialRecord {
    /// Returns the texture bound to the first populated slot.
    pub fn main_texture(&self) -> Option<&str> {
        self.texture_file_names.first().map(String::as_str)
    }

    fn check(&self, index: usize) -> Result<()> {
        let names = &self.texture_file_names;
        if names.len() > TEXTURE_SLOTS {
            return Err(MtlError::InvalidMaterial {
                index,
                message: format!(
                    "{} texture names, at most {TEXTURE_SLOTS} fit",
                    names.len()
                ),
            });
        }
        if names.iter().any(String::is_empty) {
            return Err(MtlError::InvalidMaterial {
                index,
                message: "empty texture name".to_string(),
            });
        }
        Ok(())
    }
}

/// Ordered, immutable set of materials decoded from one `.mtl` file.
///
/// Other assets refer to materials by index, so order is preserved exactly
/// as stored on disk. Every record has at most [`TEXTURE_SLOTS`] texture
/// names and none of them is empty, whether the library was decoded, built
/// with [`MaterialLibrary::new`] or deserialized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "LibraryFields")]
pub struct MaterialLibrary {
    materials: Vec<MaterialRecord>,
}

#[derive(Deserialize)]
struct LibraryFields {
    materials: Vec<MaterialRecord>,
}

impl TryFrom<LibraryFields> for MaterialLibrary {
    type Error = MtlError;

    fn try_from(fields: LibraryFields) -> Result<Self> {
        Self::new(fields.materials)
    }
}

impl MaterialLibrary {
    /// Builds a library, rejecting records the file format cannot hold.
    pub fn new(materials: Vec<MaterialRecord>) -> Result<Self> {
        for (index, material) in materials.iter().enumerate() {
            material.check(index)?;
        }
        Ok(Self { materials })
    }

    /// Returns all materials in on-disk order.
    pub fn materials(&self) -> &[MaterialRecord] {
        &self.materials
    }

    /// Number of materials in the library.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Looks up a material by its on-disk index.
    pub fn get(&self, index: usize) -> Option<&MaterialRecord> {
        self.materials.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, MaterialRecord> {
        self.materials.iter()
    }

    /// Consumes the library, handing the records to the caller.
    pub fn into_materials(self) -> Vec<MaterialRecord> {
        self.materials
    }
}

impl<'a> IntoIterator for &'a MaterialLibrary {
    type Item = &'a MaterialRecord;
    type IntoIter = slice::Iter<'a, MaterialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
