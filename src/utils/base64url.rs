//! Base64URL encoding/decoding per RFC 4648
//!
//! A thin wrapper around the `base64` crate. Encoding never emits `=` padding;
//! decoding accepts segments with or without padding and enforces a size limit.

use crate::error::{Error, Result};
use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

/// URL-safe alphabet, unpadded output, padding-indifferent input
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes to an unpadded Base64URL string
pub fn encode_bytes(input: &[u8]) -> String {
    URL_SAFE_LENIENT.encode(input)
}

/// Encode a string to an unpadded Base64URL string
pub fn encode(input: &str) -> String {
    encode_bytes(input.as_bytes())
}

/// Decode a Base64URL string to bytes with maximum size limit
pub fn decode_bytes(input: &str, max_size: usize) -> Result<Vec<u8>> {
    // Reject before decoding: 4 characters never carry more than 3 bytes
    let data_len = input.trim_end_matches('=').len();
    if data_len / 4 * 3 > max_size {
        return Err(Error::InvalidEncoding(format!(
            "Encoded size exceeds limit: {} characters (max decoded: {max_size} bytes)",
            input.len()
        )));
    }

    let result = URL_SAFE_LENIENT
        .decode(input)
        .map_err(|e| Error::InvalidEncoding(format!("Base64URL decode failed: {e}")))?;

    if result.len() > max_size {
        return Err(Error::InvalidEncoding(format!(
            "Decoded size exceeds limit: {} bytes (max: {max_size})",
            result.len()
        )));
    }

    Ok(result)
}
