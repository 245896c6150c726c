//! GCE label encoding
//!
//! Only lowercase ASCII letters and digits pass through unchanged. Every
//! other byte, `-` and `_` included, is written as `-` followed by two
//! lowercase hex digits, so decoding is unambiguous.

use std::fmt::Write;

use crate::error::{Error, Result};

/// Encode an arbitrary string into a GCE-compatible label value
pub fn encode_gce_label(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        if b.is_ascii_lowercase() || b.is_ascii_digit() {
            out.push(char::from(b));
        } else {
            // writing to a String cannot fail
            let _ = write!(out, "-{b:02x}");
        }
    }
    out
}

/// Reverse [`encode_gce_label`]
pub fn decode_gce_label(s: &str) -> Result<String> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'-' {
            let escape = s
                .get(i + 1..i + 3)
                .filter(|hex| hex.bytes().all(|c| c.is_ascii_hexdigit()))
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(|| {
                    Error::invalid_argument("DecodeGCELabel", format!("bad escape at {i} in {s:?}"))
                })?;
            out.push(escape);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out)
        .map_err(|_| Error::invalid_argument("DecodeGCELabel", format!("{s:?} is not valid UTF-8")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_passthrough() {
        assert_eq!(encode_gce_label("abc123"), "abc123");
    }

    #[test]
    fn test_encode_escapes() {
        assert_eq!(encode_gce_label("my.cluster"), "my-2ecluster");
        assert_eq!(encode_gce_label("a-b"), "a-2db");
        assert_eq!(encode_gce_label("Node"), "-4eode");
        assert_eq!(encode_gce_label(""), "");
    }

    #[test]
    fn test_decode_reverses_encode() {
        for input in ["k8s.example.com", "Mixed_Case-Name", "ünïcode"] {
            assert_eq!(decode_gce_label(&encode_gce_label(input)).unwrap(), input);
        }
    }

    #[test]
    fn test_decode_rejects_truncated_escape() {
        assert!(decode_gce_label("abc-2").is_err());
        assert!(decode_gce_label("abc-zz").is_err());
        assert!(decode_gce_label("abc-+f").is_err());
    }
}
