//! Lightweight JWT header view for algorithm checks

use crate::algorithm::AlgorithmType;
use crate::error::{Error, Result};
use crate::limits::MAX_DECODED_HEADER_SIZE;
use crate::utils::base64url;
use miniserde::Deserialize;

/// JWT header structure
///
/// Only the fields that drive verification are read; everything else in the
/// header is ignored here and stays available through `DecodedToken::header`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenHeader {
    /// Algorithm used for signing
    #[serde(rename = "alg")]
    pub algorithm: Option<String>,

    /// Media type, usually "JWT"
    #[serde(rename = "typ")]
    pub token_type: Option<String>,

    /// Key ID
    #[serde(rename = "kid")]
    pub key_id: Option<String>,
}

impl TokenHeader {
    /// Decode a header from its Base64URL segment
    pub(crate) fn from_segment(segment: &str) -> Result<Self> {
        let bytes = base64url::decode_bytes(segment, MAX_DECODED_HEADER_SIZE)?;
        let json = std::str::from_utf8(&bytes)
            .map_err(|_| Error::InvalidJson("header is not valid UTF-8".to_string()))?;

        miniserde::json::from_str(json)
            .map_err(|e| Error::InvalidJson(format!("Failed to parse header: {e}")))
    }
}

/// Best-effort algorithm hint from the first segment of `token`
///
/// Payload and signature are not looked at, so a token with a damaged body
/// still yields its declared algorithm.
pub(crate) fn detect_algorithm(token: &str) -> Option<AlgorithmType> {
    let segment = token.split('.').next()?;
    let header = TokenHeader::from_segment(segment).ok()?;
    header.algorithm?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_fields() {
        let segment = base64url::encode(r#"{"alg":"ES256","typ":"JWT","kid":"key-1","x":[1]}"#);
        let header = TokenHeader::from_segment(&segment).unwrap();
        assert_eq!(header.algorithm.as_deref(), Some("ES256"));
        assert_eq!(header.token_type.as_deref(), Some("JWT"));
        assert_eq!(header.key_id.as_deref(), Some("key-1"));
    }

    #[test]
    fn test_header_without_alg() {
        let segment = base64url::encode(r#"{"typ":"JWT"}"#);
        let header = TokenHeader::from_segment(&segment).unwrap();
        assert!(header.algorithm.is_none());
    }

    #[test]
    fn test_header_not_json() {
        let segment = base64url::encode("not json");
        assert!(matches!(
            TokenHeader::from_segment(&segment),
            Err(Error::InvalidJson(_))
        ));
    }

    #[test]
    fn test_detect_algorithm() {
        let header = base64url::encode(r#"{"alg":"rs512"}"#);
        assert_eq!(
            detect_algorithm(&format!("{header}.@@@.###")),
            Some(AlgorithmType::RS512)
        );
        assert_eq!(detect_algorithm(&header), Some(AlgorithmType::RS512));
    }

    #[test]
    fn test_detect_algorithm_unknown() {
        let none = base64url::encode(r#"{"alg":"none"}"#);
        assert_eq!(detect_algorithm(&format!("{none}.e30.")), None);

        let missing = base64url::encode(r#"{"typ":"JWT"}"#);
        assert_eq!(detect_algorithm(&format!("{missing}.e30.sig")), None);

        assert_eq!(detect_algorithm(""), None);
        assert_eq!(detect_algorithm("garbage"), None);
    }
}
