//! HMAC token generation
//!
//! Output is deterministic: header and payload are serialized with object keys
//! sorted at every depth, and no segment carries `=` padding.

use crate::algorithm::{AlgorithmType, hmac};
use crate::error::{Error, Result};
use crate::json;
use crate::utils::base64url;
use serde_json::{Value, json};

/// Sign `payload` with `secret` under an HMAC algorithm
///
/// # Errors
///
/// * `Error::UnsupportedAlgorithm` for RSA/ECDSA algorithms (verification only)
/// * `Error::MissingSecret` for an empty secret
/// * `Error::InvalidJson` if `payload` is not a JSON object
pub(crate) fn generate_with_algorithm(
    payload: &Value,
    secret: &[u8],
    algorithm: AlgorithmType,
) -> Result<String> {
    if !algorithm.is_symmetric() {
        return Err(Error::UnsupportedAlgorithm(format!(
            "{algorithm} tokens can be verified but not generated"
        )));
    }
    if secret.is_empty() {
        return Err(Error::MissingSecret);
    }
    if !payload.is_object() {
        return Err(Error::InvalidJson("payload must be a JSON object".to_string()));
    }

    let header = json!({ "alg": algorithm.as_str(), "typ": "JWT" });
    let header_b64 = base64url::encode(&json::to_canonical_string(&header)?);
    let payload_b64 = base64url::encode(&json::to_canonical_string(payload)?);

    let signing_input = format!("{header_b64}.{payload_b64}");
    let signature = hmac::sign(algorithm.digest(), secret, signing_input.as_bytes())?;

    Ok(format!(
        "{signing_input}.{}",
        base64url::encode_bytes(&signature)
    ))
}
