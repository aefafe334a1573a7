//! Byte/text codec for the signing flow: message text goes to the provider
//! as UTF-8 bytes, signature bytes come back to the view as base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::ports::PortError;

pub fn encode_message(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

pub fn signature_to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn base64_to_bytes(encoded: &str) -> Result<Vec<u8>, PortError> {
    STANDARD
        .decode(encoded)
        .map_err(|e| PortError::Validation(format!("invalid base64: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_round_trips_arbitrary_bytes() {
        let cases: [&[u8]; 4] = [b"", &[0x00], &[0xff; 64], b"Sign this"];
        for bytes in cases {
            let encoded = signature_to_base64(bytes);
            let decoded = base64_to_bytes(&encoded).expect("decode");
            assert_eq!(decoded, bytes);
        }
    }

    #[test]
    fn message_encoding_is_utf8() {
        assert_eq!(encode_message("abc"), b"abc");
        assert_eq!(encode_message("é"), "é".as_bytes());
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let err = base64_to_bytes("not base64!!").expect_err("must fail");
        assert!(err.to_string().contains("invalid base64"));
    }
}
