// ============================================================
// Layer 4 — Source Text Encodings
// ============================================================
// The corpus file is decoded line by line with a configured
// encoding. Only the encodings these corpora actually ship in
// are supported:
//
//   utf-8      (aliases: utf8)
//   utf-8-sig  UTF-8 with an optional leading byte order mark
//   latin-1    (aliases: latin1, iso-8859-1), one byte per char
//
// Names are matched case-insensitively.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::CorpusError;

const BOM: char = '\u{FEFF}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf8Sig,
    Latin1,
}

impl TextEncoding {
    /// Decode one line of raw bytes (terminator already removed).
    ///
    /// `line_no` is 1-based and only used for the error message
    /// and to strip a BOM from the first line.
    pub fn decode_line(&self, bytes: &[u8], line_no: usize) -> Result<String, CorpusError> {
        match self {
            TextEncoding::Utf8 => self.utf8(bytes, line_no),
            TextEncoding::Utf8Sig => {
                let mut text = self.utf8(bytes, line_no)?;
                if line_no == 1 && text.starts_with(BOM) {
                    text.remove(0);
                }
                Ok(text)
            }
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }

    fn utf8(&self, bytes: &[u8], line_no: usize) -> Result<String, CorpusError> {
        String::from_utf8(bytes.to_vec()).map_err(|_| CorpusError::InvalidEncoding {
            line:     line_no,
            encoding: self.to_string(),
        })
    }
}

impl FromStr for TextEncoding {
    type Err = CorpusError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "utf-8-sig" | "utf8-sig" => Ok(TextEncoding::Utf8Sig),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            _ => Err(CorpusError::UnsupportedEncoding(name.to_string())),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Latin1 => "latin-1",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("utf_8_sig".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8Sig);
        assert_eq!("ISO-8859-1".parse::<TextEncoding>().unwrap(), TextEncoding::Latin1);
        assert!(matches!(
            "gbk".parse::<TextEncoding>(),
            Err(CorpusError::UnsupportedEncoding(_))
        ));
    }

    #[test]
    fn test_decode_lines() {
        let enc = TextEncoding::Utf8Sig;
        assert_eq!(enc.decode_line("\u{FEFF}你好".as_bytes(), 1).unwrap(), "你好");
        assert_eq!(enc.decode_line("\u{FEFF}x".as_bytes(), 2).unwrap(), "\u{FEFF}x");
        assert_eq!(TextEncoding::Latin1.decode_line(&[0x63, 0xE9], 1).unwrap(), "cé");
        assert!(matches!(
            TextEncoding::Utf8.decode_line(&[0xFF, 0xFE], 4),
            Err(CorpusError::InvalidEncoding { line: 4, .. })
        ));
    }
}
