//! Reader and writer for the binary material library (`.mtl`) format used
//! by legacy game assets.
//!
//! A library is a short framed header followed by fixed-size material
//! records, each carrying four RGBA colors, a specular power and up to four
//! texture file names stored in a legacy codepage. Loading bytes from disk
//! and binding materials to renderable surfaces are left to the host so the
//! codec stays a pure function of its input.

pub mod codepage;
pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod material;

pub use codepage::{Codepage, LossyText, StrictText, TextDecoder};
pub use cursor::BinaryCursor;
pub use decoder::{decode, MtlDecoder, MTL_MAGIC, MTL_VERSION};
pub use encoder::{encode, MtlEncoder};
pub use error::{MtlError, Result};
pub use material::{MaterialLibrary, MaterialRecord, TEXTURE_SLOTS};
