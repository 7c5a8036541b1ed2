use thiserror::Error;

use crate::codepage::Codepage;

/// Errors produced while decoding or encoding a material library.
#[derive(Debug, Error)]
pub enum MtlError {
    #[error("invalid material library header: expected \"mtl\", found {found:?}")]
    InvalidHeader { found: [u8; 3] },

    #[error("unsupported material library version {found} (only 100 is supported)")]
    UnsupportedVersion { found: i32 },

    #[error("invalid data at offset {offset:#x}: {message}")]
    InvalidData { offset: usize, message: String },

    #[error("unexpected end of data at offset {offset:#x} (need {need} bytes, have {have})")]
    TruncatedData {
        offset: usize,
        need: usize,
        have: usize,
    },

    #[error("invalid material {index}: {message}")]
    InvalidMaterial { index: usize, message: String },

    #[error("string at offset {offset:#x} is not valid {codepage}")]
    DecodeError { offset: usize, codepage: Codepage },

    #[error("unsupported codepage: {0}")]
    UnsupportedCodepage(String),

    #[error("texture name {text:?} cannot be represented in {codepage}")]
    EncodeError { codepage: Codepage, text: String },
}

pub type Result<T> = std::result::Result<T, MtlError>;
