//! Token framing and decoding
//!
//! Decoding never verifies anything: it only undoes the Base64URL/JSON framing
//! so the header and claims can be inspected.

use crate::algorithm::AlgorithmType;
use crate::claims::Claims;
use crate::error::{Error, Result};
use crate::json;
use crate::limits::{MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_TOKEN_LENGTH};
use crate::utils::base64url;
use serde_json::{Map, Value};

/// The three segments of a compact JWT, borrowed from the original string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TokenParts<'a> {
    pub header: &'a str,
    pub payload: &'a str,
    pub signature: &'a str,
    /// `header.payload` exactly as transmitted
    pub signing_input: &'a str,
}

impl<'a> TokenParts<'a> {
    /// Split a token into exactly three non-empty segments
    pub(crate) fn split(token: &'a str) -> Result<Self> {
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        let mut parts = token.split('.');
        let header = parts.next().ok_or(Error::MalformedToken)?;
        let payload = parts.next().ok_or(Error::MalformedToken)?;
        let signature = parts.next().ok_or(Error::MalformedToken)?;
        if parts.next().is_some() {
            return Err(Error::MalformedToken);
        }
        if header.is_empty() || payload.is_empty() || signature.is_empty() {
            return Err(Error::MalformedToken);
        }

        Ok(Self {
            header,
            payload,
            signature,
            signing_input: &token[..header.len() + 1 + payload.len()],
        })
    }

    /// Decode the payload segment into a JSON object
    pub(crate) fn payload_object(&self) -> Result<Map<String, Value>> {
        let bytes = base64url::decode_bytes(self.payload, MAX_DECODED_PAYLOAD_SIZE)?;
        json::parse_object(&bytes, "payload")
    }
}

/// A decoded, unverified JWT
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedToken {
    /// Parsed header object
    pub header: Map<String, Value>,
    /// Parsed payload object
    pub payload: Map<String, Value>,
    /// Signature segment, still Base64URL-encoded
    pub signature: String,
    /// Header as indented JSON with sorted keys
    pub header_json: String,
    /// Payload as indented JSON with sorted keys
    pub payload_json: String,
}

impl DecodedToken {
    /// Algorithm declared in the header, if it is a supported one
    pub fn algorithm(&self) -> Option<AlgorithmType> {
        self.header.get("alg")?.as_str()?.parse().ok()
    }

    /// `typ` header value
    pub fn token_type(&self) -> Option<&str> {
        self.header.get("typ")?.as_str()
    }

    /// `kid` header value
    pub fn key_id(&self) -> Option<&str> {
        self.header.get("kid")?.as_str()
    }

    /// Registered claims as a typed view
    ///
    /// # Errors
    ///
    /// `Error::InvalidJson` when a registered claim has the wrong JSON type.
    pub fn claims(&self) -> Result<Claims> {
        Claims::from_payload(&self.payload)
    }
}

/// Decode a token without verifying it
pub(crate) fn decode(token: &str) -> Result<DecodedToken> {
    let parts = TokenParts::split(token)?;

    let header_bytes = base64url::decode_bytes(parts.header, MAX_DECODED_HEADER_SIZE)?;
    let payload_bytes = base64url::decode_bytes(parts.payload, MAX_DECODED_PAYLOAD_SIZE)?;

    let header = json::parse_object(&header_bytes, "header")?;
    let payload = json::parse_object(&payload_bytes, "payload")?;

    let header_json = json::to_pretty_string(&Value::Object(header.clone()))?;
    let payload_json = json::to_pretty_string(&Value::Object(payload.clone()))?;

    Ok(DecodedToken {
        header,
        payload,
        signature: parts.signature.to_string(),
        header_json,
        payload_json,
    })
}
