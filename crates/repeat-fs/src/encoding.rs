//! Caller-selected text encoding for reading and writing files

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

use crate::{Error, Result};

/// UTF-8 byte order mark
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encoding used for every file read or written during one invocation.
///
/// Wraps an `encoding_rs` encoding resolved from a WHATWG label. Plain labels
/// keep a byte order mark as a `U+FEFF` character, so it is written back
/// unchanged. `utf-8-sig` strips an optional mark on read and always writes
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding {
    encoding: &'static Encoding,
    bom: bool,
}

impl TextEncoding {
    /// Resolve an encoding from its label (`utf-8`, `utf-8-sig`, `latin1`,
    /// `windows-1252`, ...).
    ///
    /// Labels of encodings that can only be decoded, such as UTF-16, are
    /// rejected.
    pub fn from_label(label: &str) -> Result<Self> {
        let trimmed = label.trim();
        let unknown = || Error::UnknownEncoding {
            label: trimmed.to_string(),
        };

        if trimmed.eq_ignore_ascii_case("utf-8-sig") || trimmed.eq_ignore_ascii_case("utf8-sig")
        {
            return Ok(Self {
                encoding: UTF_8,
                bom: true,
            });
        }

        let encoding = Encoding::for_label(trimmed.as_bytes()).ok_or_else(unknown)?;
        if encoding.output_encoding() != encoding {
            return Err(unknown());
        }
        Ok(Self {
            encoding,
            bom: false,
        })
    }

    /// Name of the encoding, `utf-8-sig` for UTF-8 with a byte order mark.
    pub fn name(&self) -> &'static str {
        if self.bom {
            "utf-8-sig"
        } else {
            self.encoding.name()
        }
    }

    /// Decode bytes, returning `None` when they contain malformed sequences.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        let (text, had_errors) = if self.bom {
            self.encoding.decode_with_bom_removal(bytes)
        } else {
            self.encoding.decode_without_bom_handling(bytes)
        };
        if had_errors { None } else { Some(text) }
    }

    /// Encode text for writing, prefixed with a byte order mark for `utf-8-sig`.
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        let (bytes, _, _) = self.encoding.encode(text);
        if self.bom {
            let mut marked = Vec::with_capacity(BOM.len() + bytes.len());
            marked.extend_from_slice(BOM);
            marked.extend_from_slice(&bytes);
            Cow::Owned(marked)
        } else {
            bytes
        }
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self {
            encoding: UTF_8,
            bom: false,
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
