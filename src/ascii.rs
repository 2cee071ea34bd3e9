//! ASCII / UTF-8 helpers (C1).
//!
//! The core stores every component as a UTF-8 byte buffer. Input may arrive
//! already UTF-8, or declared under some other encoding; either way it is
//! transcoded to UTF-8 once at the parser boundary and never again.
use crate::error::UrlError;

/// Returns `true` if every byte of `bytes` is in `0..=0x7f`.
#[inline]
pub fn is_ascii(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii)
}

/// Decodes `bytes` under `encoding` into a UTF-8 `String`.
///
/// Only `"utf-8"` (and its aliases) and `"ascii"` are recognized directly;
/// ASCII is a strict subset of UTF-8 so it needs no transcoding. Any other
/// declared encoding falls back to `Err(InvalidEncoding)` since the core
/// intentionally carries no charset conversion tables beyond UTF-8 (Non-goal
/// §1: no bindings to another runtime's encoding machinery).
pub fn decode(bytes: &[u8], encoding: &str) -> Result<String, UrlError> {
    match normalize_encoding_name(encoding) {
        "utf-8" | "ascii" => {
            std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|_| UrlError::InvalidEncoding)
        }
        _ => Err(UrlError::InvalidEncoding),
    }
}

fn normalize_encoding_name(encoding: &str) -> &str {
    match encoding {
        "utf8" | "UTF-8" | "UTF8" | "utf-8" => "utf-8",
        "ascii" | "ASCII" | "us-ascii" => "ascii",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_detection() {
        assert!(is_ascii(b"http://example.com"));
        assert!(!is_ascii("http://kündigen.de".as_bytes()));
    }

    #[test]
    fn decode_utf8() {
        assert_eq!(decode(b"hello", "utf-8").unwrap(), "hello");
        assert!(decode(&[0xff, 0xfe], "utf-8").is_err());
    }

    #[test]
    fn decode_unknown_encoding_rejected() {
        assert!(decode(b"hello", "windows-1252").is_err());
    }
}
