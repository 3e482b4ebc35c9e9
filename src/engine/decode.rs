//! Catalog file decoding
//!
//! Catalog exports arrive as UTF-8 or UTF-16 with a byte-order mark, as
//! plain UTF-8, or as Big5 from non-Unicode spreadsheet tools. Decoding
//! happens in full before any store mutation.

use encoding_rs::{BIG5, UTF_16BE, UTF_16LE};
use thiserror::Error;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Unrecoverable byte-to-text failure
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("file declares a UTF-16 byte-order mark but is not valid UTF-16")]
    InvalidUtf16,

    #[error("file is neither valid UTF-8 nor valid Big5")]
    UnknownEncoding,
}

/// Decode raw catalog bytes into text.
///
/// BOM-marked files are decoded per their mark. Unmarked files are tried
/// as strict UTF-8 first, then Big5.
pub fn decode_catalog_bytes(bytes: &[u8]) -> Result<String, DecodeError> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return String::from_utf8(rest.to_vec()).map_err(|_| DecodeError::UnknownEncoding);
    }

    if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        let (text, _, had_errors) = UTF_16LE.decode(rest);
        if had_errors {
            return Err(DecodeError::InvalidUtf16);
        }
        return Ok(text.into_owned());
    }

    if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        let (text, _, had_errors) = UTF_16BE.decode(rest);
        if had_errors {
            return Err(DecodeError::InvalidUtf16);
        }
        return Ok(text.into_owned());
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    let (text, _, had_errors) = BIG5.decode(bytes);
    if had_errors {
        return Err(DecodeError::UnknownEncoding);
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_utf8() {
        assert_eq!(decode_catalog_bytes(b"P1,SN1").unwrap(), "P1,SN1");
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("P1,widget".as_bytes());
        assert_eq!(decode_catalog_bytes(&bytes).unwrap(), "P1,widget");
    }

    #[test]
    fn test_utf16_le_bom() {
        let mut bytes = UTF16_LE_BOM.to_vec();
        for unit in "P1,SN".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_catalog_bytes(&bytes).unwrap(), "P1,SN");
    }

    #[test]
    fn test_utf16_be_bom() {
        let mut bytes = UTF16_BE_BOM.to_vec();
        for unit in "P1,SN".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode_catalog_bytes(&bytes).unwrap(), "P1,SN");
    }

    #[test]
    fn test_big5_fallback() {
        // "中文" in Big5
        let bytes: Vec<u8> = vec![0xA4, 0xA4, 0xA4, 0xE5];
        let text = decode_catalog_bytes(&bytes).unwrap();
        assert_eq!(text, "中文");
    }

    #[test]
    fn test_undecodable_bytes_error() {
        // 0xFF 0xFF is neither valid UTF-8 nor a Big5 lead/trail pair
        let err = decode_catalog_bytes(&[0xFF, 0xFF, 0xFF]).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownEncoding));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode_catalog_bytes(b"").unwrap(), "");
    }
}
