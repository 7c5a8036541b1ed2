use glam::Vec4;
use log::debug;

use crate::codepage::Codepage;
use crate::decoder::{MTL_MAGIC, MTL_VERSION};
use crate::error::{MtlError, Result};
use crate::material::{MaterialLibrary, MaterialRecord, TEXTURE_SLOTS};

/// Writes material libraries in the version 100 `.mtl` layout.
///
/// Texture names fill the leading slots and the remaining slots are written
/// with length zero, so a decode of the output yields the same names in the
/// same order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MtlEncoder {
    codepage: Codepage,
}

impl MtlEncoder {
    /// Creates an encoder storing texture names in `codepage`.
    pub fn new(codepage: Codepage) -> Self {
        Self { codepage }
    }

    /// Serializes `library` into a complete `.mtl` buffer.
    pub fn encode(&self, library: &MaterialLibrary) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(MTL_MAGIC);
        buffer.push(0);
        buffer.extend_from_slice(&MTL_VERSION.to_le_bytes());
        write_len(&mut buffer, library.len(), "material count")?;

        for material in library {
            self.write_material(&mut buffer, material)?;
        }

        debug!(
            "encoded {} material(s) into {} bytes using {}",
            library.len(),
            buffer.len(),
            self.codepage
        );
        Ok(buffer)
    }

    /// Writes one record. [`MaterialLibrary`] guarantees at most
    /// [`TEXTURE_SLOTS`] non-empty names per record.
    fn write_material(&self, buffer: &mut Vec<u8>, material: &MaterialRecord) -> Result<()> {
        let names = &material.texture_file_names;

        for color in [
            material.diffuse,
            material.ambient,
            material.specular,
            material.emissive,
        ] {
            write_color(buffer, color);
        }
        buffer.extend_from_slice(&material.specular_power.to_le_bytes());

        for name in names {
            let bytes = self.codepage.encode(name)?;
            write_len(buffer, bytes.len(), "texture name length")?;
            buffer.extend_from_slice(&bytes);
        }
        for _ in names.len()..TEXTURE_SLOTS {
            buffer.extend_from_slice(&0i32.to_le_bytes());
        }
        Ok(())
    }
}

/// Encodes `library` with texture names stored in `codepage`.
pub fn encode(library: &MaterialLibrary, codepage: Codepage) -> Result<Vec<u8>> {
    MtlEncoder::new(codepage).encode(library)
}

fn write_color(buffer: &mut Vec<u8>, color: Vec4) {
    for component in color.to_array() {
        buffer.extend_from_slice(&component.to_le_bytes());
    }
}

fn write_len(buffer: &mut Vec<u8>, len: usize, what: &str) -> Result<()> {
    let value = i32::try_from(len).map_err(|_| MtlError::InvalidData {
        offset: buffer.len(),
        message: format!("{what} {len} does not fit in 32 bits"),
    })?;
    buffer.extend_from_slice(&value.to_le_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;
    use once_cell::sync::Lazy;

    static SAMPLE: Lazy<MaterialLibrary> = Lazy::new(|| {
        MaterialLibrary::new(vec![
            MaterialRecord {
                diffuse: Vec4::new(0.8, 0.7, 0.6, 1.0),
                ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
                specular: Vec4::ONE,
                emissive: Vec4::ZERO,
                specular_power: 16.0,
                texture_file_names: vec!["石板.bmp".to_string(), "lightmap.tga".to_string()],
            },
            MaterialRecord::default(),
            MaterialRecord {
                specular_power: -1.5,
                texture_file_names: vec![
                    "a.bmp".to_string(),
                    "b.bmp".to_string(),
                    "c.bmp".to_string(),
                    "d.bmp".to_string(),
                ],
                ..MaterialRecord::default()
            },
        ])
        .unwrap()
    });

    #[test]
    fn encoded_library_decodes_to_equal_records() {
        let bytes = encode(&SAMPLE, Codepage::Gbk).unwrap();
        let decoded = decode(&bytes, Codepage::Gbk).unwrap();
        assert_eq!(decoded, *SAMPLE);
    }

    #[test]
    fn writes_expected_layout() {
        let library = MaterialLibrary::new(vec![MaterialRecord::default()]).unwrap();
        let bytes = encode(&library, Codepage::Gbk).unwrap();
        assert_eq!(&bytes[..4], b"mtl\0");
        assert_eq!(&bytes[4..8], &100i32.to_le_bytes());
        assert_eq!(&bytes[8..12], &1i32.to_le_bytes());
        // header + 16 floats + specular power + 4 empty slots
        assert_eq!(bytes.len(), 12 + 64 + 4 + 16);
        assert!(bytes[12..].iter().all(|&b| b == 0));
    }

    #[test]
    fn empty_library_is_header_only() {
        let bytes = encode(&MaterialLibrary::default(), Codepage::Utf8).unwrap();
        assert_eq!(bytes.len(), 12);
        assert!(decode(&bytes, Codepage::Utf8).unwrap().is_empty());
    }

    #[test]
    fn fills_every_slot_when_four_names_are_present() {
        let full = SAMPLE.get(2).unwrap();
        let library = MaterialLibrary::new(vec![full.clone()]).unwrap();
        let bytes = encode(&library, Codepage::Gbk).unwrap();
        // header + colors + power + 4 × (length + "x.bmp")
        assert_eq!(bytes.len(), 12 + 64 + 4 + 4 * (4 + 5));
        let decoded = decode(&bytes, Codepage::Gbk).unwrap();
        assert_eq!(decoded.materials()[0].texture_file_names, full.texture_file_names);
    }

    #[test]
    fn rejects_names_outside_codepage() {
        assert!(matches!(
            encode(&SAMPLE, Codepage::Windows1252),
            Err(MtlError::EncodeError { .. })
        ));
    }
}
