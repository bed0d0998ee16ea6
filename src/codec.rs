//! Canonical base64 encoding (RFC 4648, standard alphabet, `=` padding).
//!
//! Attachment payloads go over the wire base64-encoded; this module wraps
//! the standard engine so the rest of the crate never touches the engine
//! types directly.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{MailcatError, Result};

/// Encode a byte sequence as canonical base64 text.
///
/// Total over all inputs: the empty input encodes to the empty string, and
/// the output length is always `ceil(n/3) * 4`.
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode canonical base64 text back into bytes.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| MailcatError::InvalidBase64(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc4648_vectors() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "Zg==");
        assert_eq!(encode(b"fo"), "Zm8=");
        assert_eq!(encode(b"foo"), "Zm9v");
        assert_eq!(encode(b"foob"), "Zm9vYg==");
        assert_eq!(encode(b"fooba"), "Zm9vYmE=");
        assert_eq!(encode(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn test_output_length() {
        for n in 0..64usize {
            let data = vec![0xA5u8; n];
            let out = encode(&data);
            assert_eq!(out.len() % 4, 0, "length not a multiple of 4 for n={n}");
            assert_eq!(out.len(), n.div_ceil(3) * 4, "wrong length for n={n}");
        }
    }

    #[test]
    fn test_standard_alphabet() {
        // 0xFB 0xFF encodes to "+/8=" under the standard alphabet,
        // "-_8=" under the URL-safe one.
        assert_eq!(encode(&[0xFB, 0xFF]), "+/8=");
    }

    #[test]
    fn test_round_trip() {
        let samples: [&[u8]; 4] = [b"", b"ok", b"hello world", &[0u8, 255, 128, 7, 42]];
        for sample in samples {
            let decoded = decode(&encode(sample)).expect("round-trip decode");
            assert_eq!(decoded, sample);
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("not base64!!").is_err());
    }
}
