use std::borrow::Cow;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use encoding_rs::Encoding;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{MtlError, Result};

/// Legacy codepages a material library may store texture names in.
///
/// The set is closed on purpose: decoding goes through fixed tables instead
/// of whatever the host platform has installed, so the same bytes always
/// produce the same text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Codepage {
    /// Simplified Chinese, Windows codepage 936.
    #[default]
    Gbk,
    /// Traditional Chinese, Windows codepage 950.
    Big5,
    /// Japanese, Windows codepage 932.
    ShiftJis,
    /// Korean, Windows codepage 949.
    EucKr,
    /// Western European, Windows codepage 1252.
    Windows1252,
    /// UTF-8, codepage 65001.
    Utf8,
}

impl Codepage {
    pub const ALL: [Codepage; 6] = [
        Codepage::Gbk,
        Codepage::Big5,
        Codepage::ShiftJis,
        Codepage::EucKr,
        Codepage::Windows1252,
        Codepage::Utf8,
    ];

    /// Looks up a codepage by its Windows numeric identifier.
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|codepage| codepage.id() == id)
    }

    /// Returns the Windows numeric identifier.
    pub fn id(self) -> u32 {
        match self {
            Codepage::Gbk => 936,
            Codepage::Big5 => 950,
            Codepage::ShiftJis => 932,
            Codepage::EucKr => 949,
            Codepage::Windows1252 => 1252,
            Codepage::Utf8 => 65001,
        }
    }

    /// Short lowercase name, also accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Codepage::Gbk => "gbk",
            Codepage::Big5 => "big5",
            Codepage::ShiftJis => "shift_jis",
            Codepage::EucKr => "euc-kr",
            Codepage::Windows1252 => "windows-1252",
            Codepage::Utf8 => "utf-8",
        }
    }

    fn encoding(self) -> &'static Encoding {
        match self {
            Codepage::Gbk => encoding_rs::GBK,
            Codepage::Big5 => encoding_rs::BIG5,
            Codepage::ShiftJis => encoding_rs::SHIFT_JIS,
            Codepage::EucKr => encoding_rs::EUC_KR,
            Codepage::Windows1252 => encoding_rs::WINDOWS_1252,
            Codepage::Utf8 => encoding_rs::UTF_8,
        }
    }

    /// Decodes `bytes`, returning `None` if any sequence is malformed.
    pub fn decode_strict(self, bytes: &[u8]) -> Option<String> {
        self.encoding()
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(Cow::into_owned)
    }

    /// Decodes `bytes`, substituting U+FFFD for malformed sequences.
    ///
    /// The flag reports whether any substitution happened.
    pub fn decode_lossy(self, bytes: &[u8]) -> (String, bool) {
        let (text, had_errors) = self.encoding().decode_without_bom_handling(bytes);
        (text.into_owned(), had_errors)
    }

    /// Encodes `text` into this codepage.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        let (bytes, _, had_errors) = self.encoding().encode(text);
        if had_errors {
            return Err(MtlError::EncodeError {
                codepage: self,
                text: text.to_string(),
            });
        }
        Ok(bytes.into_owned())
    }
}

impl fmt::Display for Codepage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (cp{})", self.name(), self.id())
    }
}

impl TryFrom<u32> for Codepage {
    type Error = MtlError;

    fn try_from(id: u32) -> Result<Self> {
        Self::from_id(id).ok_or_else(|| MtlError::UnsupportedCodepage(id.to_string()))
    }
}

impl FromStr for Codepage {
    type Err = MtlError;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        let digits = normalized.strip_prefix("cp").unwrap_or(&normalized);
        if let Ok(id) = digits.parse::<u32>() {
            return Codepage::try_from(id);
        }
        let codepage = match normalized.as_str() {
            "gbk" | "gb2312" => Codepage::Gbk,
            "big5" => Codepage::Big5,
            "shift-jis" | "sjis" => Codepage::ShiftJis,
            "euc-kr" => Codepage::EucKr,
            "windows-1252" | "latin1" => Codepage::Windows1252,
            "utf-8" | "utf8" => Codepage::Utf8,
            _ => return Err(MtlError::UnsupportedCodepage(value.to_string())),
        };
        Ok(codepage)
    }
}

/// Strategy used to turn raw texture-name bytes into text.
///
/// Returning `None` signals that the bytes are not valid in `codepage`.
/// Any `Fn(&[u8], Codepage) -> Option<String>` closure is a strategy too.
pub trait TextDecoder {
    fn decode(&self, bytes: &[u8], codepage: Codepage) -> Option<String>;
}

impl<F> TextDecoder for F
where
    F: Fn(&[u8], Codepage) -> Option<String>,
{
    fn decode(&self, bytes: &[u8], codepage: Codepage) -> Option<String> {
        self(bytes, codepage)
    }
}

/// Rejects any byte sequence that is malformed in the codepage.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictText;

impl TextDecoder for StrictText {
    fn decode(&self, bytes: &[u8], codepage: Codepage) -> Option<String> {
        codepage.decode_strict(bytes)
    }
}

/// Replaces malformed sequences with U+FFFD and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LossyText;

impl TextDecoder for LossyText {
    fn decode(&self, bytes: &[u8], codepage: Codepage) -> Option<String> {
        let (text, replaced) = codepage.decode_lossy(bytes);
        if replaced {
            warn!("replaced malformed {codepage} bytes in texture name {text:?}");
        }
        Some(text)
    }
}
