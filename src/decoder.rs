use glam::Vec4;
use log::{debug, trace};

use crate::codepage::{Codepage, StrictText, TextDecoder};
use crate::cursor::BinaryCursor;
use crate::error::{MtlError, Result};
use crate::material::{MaterialLibrary, MaterialRecord, TEXTURE_SLOTS};

/// Signature stored in the first three header bytes. The fourth is padding.
pub const MTL_MAGIC: &[u8; 3] = b"mtl";
/// The only format version ever shipped.
pub const MTL_VERSION: i32 = 100;

/// Four colors, the specular power and four empty slot lengths.
const MIN_RECORD_LEN: usize = 4 * 16 + 4 + TEXTURE_SLOTS * 4;

/// Decodes `.mtl` buffers with a fixed codepage and text strategy.
#[derive(Debug, Clone, Default)]
pub struct MtlDecoder<T = StrictText> {
    codepage: Codepage,
    text: T,
}

impl MtlDecoder {
    /// Creates a decoder that fails on texture names malformed in `codepage`.
    pub fn new(codepage: Codepage) -> Self {
        Self {
            codepage,
            text: StrictText,
        }
    }
}

impl<T: TextDecoder> MtlDecoder<T> {
    /// Swaps the strategy used for texture names.
    pub fn with_text_decoder<U: TextDecoder>(self, text: U) -> MtlDecoder<U> {
        MtlDecoder {
            codepage: self.codepage,
            text,
        }
    }

    /// Codepage applied to every texture name.
    pub fn codepage(&self) -> Codepage {
        self.codepage
    }

    /// Decodes a complete `.mtl` file held in memory.
    pub fn decode(&self, data: &[u8]) -> Result<MaterialLibrary> {
        let mut cursor = BinaryCursor::new(data);
        read_header(&mut cursor)?;

        let count_offset = cursor.position();
        let count = cursor.read_i32()?;
        let count = usize::try_from(count).map_err(|_| MtlError::InvalidData {
            offset: count_offset,
            message: format!("negative material count {count}"),
        })?;
        debug!(
            "decoding {count} material(s) from {} bytes using {}",
            data.len(),
            self.codepage
        );

        let mut materials = Vec::with_capacity(count.min(cursor.remaining() / MIN_RECORD_LEN));
        for index in 0..count {
            let material = self.read_material(&mut cursor)?;
            trace!(
                "material {index}: {} texture(s)",
                material.texture_file_names.len()
            );
            materials.push(material);
        }

        if !cursor.is_empty() {
            debug!("ignoring {} trailing byte(s)", cursor.remaining());
        }

        MaterialLibrary::new(materials)
    }

    fn read_material(&self, cursor: &mut BinaryCursor<'_>) -> Result<MaterialRecord> {
        let diffuse = read_color(cursor)?;
        let ambient = read_color(cursor)?;
        let specular = read_color(cursor)?;
        let emissive = read_color(cursor)?;
        let specular_power = cursor.read_f32()?;

        let mut texture_file_names = Vec::new();
        for _ in 0..TEXTURE_SLOTS {
            let length_offset = cursor.position();
            let length = cursor.read_i32()?;
            let length = usize::try_from(length).map_err(|_| MtlError::InvalidData {
                offset: length_offset,
                message: format!("negative texture name length {length}"),
            })?;
            if length == 0 {
                continue;
            }
            texture_file_names.push(cursor.read_string(length, self.codepage, &self.text)?);
        }

        Ok(MaterialRecord {
            diffuse,
            ambient,
            specular,
            emissive,
            specular_power,
            texture_file_names,
        })
    }
}

/// Decodes `data` with the strict text strategy.
pub fn decode(data: &[u8], codepage: Codepage) -> Result<MaterialLibrary> {
    MtlDecoder::new(codepage).decode(data)
}

fn read_header(cursor: &mut BinaryCursor<'_>) -> Result<()> {
    let header = cursor.read_chars(4)?;
    if &header[..3] != MTL_MAGIC {
        return Err(MtlError::InvalidHeader {
            found: [header[0], header[1], header[2]],
        });
    }

    let version = cursor.read_i32()?;
    if version != MTL_VERSION {
        return Err(MtlError::UnsupportedVersion { found: version });
    }
    Ok(())
}

fn read_color(cursor: &mut BinaryCursor<'_>) -> Result<Vec4> {
    Ok(Vec4::from_array(cursor.read_f32_array::<4>()?))
}
