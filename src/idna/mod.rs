//! Punycode + IDNA (C3): RFC 3492 encode/decode of a single label, applied
//! to dot-separated host labels (RFC 3490-style, IDNA2003 compatible — see
//! `SPEC_FULL.md` §9/§15 on why this crate never defers to a platform IDNA
//! implementation).
mod punycode;

use crate::error::UrlError;
use crate::log::warning;

const ACE_PREFIX: &str = "xn--";
const MAX_LABEL_LEN: usize = 63;

/// Encodes a single label. Pure-ASCII labels without the `xn--` prefix are
/// returned unchanged; everything else becomes `xn--<punycode>`.
pub fn encode_label(label: &str) -> Result<String, UrlError> {
    if label.is_empty() {
        return Err(UrlError::PunycodeEncode);
    }
    if label.is_ascii() {
        return if label.len() > MAX_LABEL_LEN {
            Err(UrlError::PunycodeEncode)
        } else {
            Ok(label.to_owned())
        };
    }

    let body = punycode::encode(label)?;
    let encoded = format!("{ACE_PREFIX}{body}");
    if encoded.len() > MAX_LABEL_LEN {
        return Err(UrlError::PunycodeEncode);
    }
    Ok(encoded)
}

/// Decodes a single label. Labels without the `xn--` prefix are returned
/// unchanged.
pub fn decode_label(label: &str) -> Result<String, UrlError> {
    if label.is_empty() {
        return Err(UrlError::PunycodeDecode);
    }
    match strip_ace_prefix(label) {
        Some(body) => {
            if !label.starts_with(ACE_PREFIX) {
                warning!("accepting non-lowercase ACE prefix on label {label:?}");
            }
            punycode::decode(body)
        }
        None => Ok(label.to_owned()),
    }
}

fn strip_ace_prefix(label: &str) -> Option<&str> {
    // Byte-level comparison, not `label[..4]`: a non-ASCII label can have a
    // multi-byte character straddling offset 4, which would panic on a
    // naive str slice before we've even confirmed the prefix is there.
    let bytes = label.as_bytes();
    match bytes.get(..ACE_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(ACE_PREFIX.as_bytes()) => {
            Some(&label[ACE_PREFIX.len()..])
        }
        _ => None,
    }
}

/// Applies [`encode_label`] to every dot-separated label of `host`.
pub fn encode_host(host: &str) -> Result<String, UrlError> {
    if host.is_empty() {
        return Err(UrlError::RelativeUrl);
    }
    host.split('.')
        .map(encode_label)
        .collect::<Result<Vec<_>, _>>()
        .map(|labels| labels.join("."))
}

/// Applies [`decode_label`] to every dot-separated label of `host`.
pub fn decode_host(host: &str) -> Result<String, UrlError> {
    if host.is_empty() {
        return Err(UrlError::RelativeUrl);
    }
    host.split('.')
        .map(decode_label)
        .collect::<Result<Vec<_>, _>>()
        .map(|labels| labels.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_label_unchanged() {
        assert_eq!(encode_label("example").unwrap(), "example");
        assert_eq!(decode_label("example").unwrap(), "example");
    }

    #[test]
    fn host_roundtrip() {
        let encoded = encode_host("www.kündigen.de").unwrap();
        assert_eq!(encoded, "www.xn--kndigen-n2a.de");
        let decoded = decode_host(&encoded).unwrap();
        assert_eq!(decoded, "www.kündigen.de");
    }

    #[test]
    fn idempotent_punycode() {
        let once = encode_host("www.kündigen.de").unwrap();
        let twice = encode_host(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn non_lowercase_ace_prefix_still_decodes() {
        assert_eq!(decode_label("XN--kndigen-n2a").unwrap(), "kündigen");
        assert_eq!(decode_label("Xn--kndigen-n2a").unwrap(), "kündigen");
    }

    #[test]
    fn empty_label_rejected() {
        assert!(encode_label("").is_err());
        assert!(encode_host("a..b").is_err());
    }

    #[test]
    fn too_long_label_rejected() {
        let long = "a".repeat(64);
        assert!(encode_label(&long).is_err());
    }

    #[test]
    fn russian_host_example() {
        let encoded = encode_host("россия.иком.museum").unwrap();
        assert_eq!(encoded, "xn--h1alffa9f.xn--h1aegh.museum");
    }
}
