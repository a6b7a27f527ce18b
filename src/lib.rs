//! # jwtinspect - Decode, Verify and Generate JSON Web Tokens
//!
//! > A small JWT engine for developer tooling: inspect any token, check its
//! > signature, mint HMAC test tokens.
//!
//! ## Overview
//!
//! A JWT is three Base64URL segments joined by `.`: a JSON header, a JSON
//! payload of claims, and a signature over `header.payload`. **jwtinspect**
//! exposes five operations over that format:
//!
//! | Operation | Purpose |
//! |---|---|
//! | [`decode`] | Undo the framing and show header and payload, without verifying |
//! | [`verify`] | Check the signature under a caller-chosen algorithm |
//! | [`generate`] | Build an HS256 token with deterministic key order |
//! | [`detect_algorithm`] | Read the declared algorithm as a UI hint |
//! | [`validate_claims`] | Report on `exp`, `nbf`, `iat` and the identity claims |
//!
//! The free functions use the default [`AwsLcBackend`] and configuration. For
//! a custom backend or claims configuration, build a [`JwtEngine`].
//!
//! ## Quick Start
//!
//! ```
//! use jwtinspect::{AlgorithmType, decode, generate, verify};
//! use serde_json::json;
//!
//! let token = generate(&json!({"sub": "1234567890"}), "your-256-bit-secret")?;
//!
//! assert!(verify(&token, AlgorithmType::HS256, "your-256-bit-secret")?);
//! assert!(!verify(&token, AlgorithmType::HS256, "another-secret")?);
//!
//! let decoded = decode(&token)?;
//! assert_eq!(decoded.payload["sub"], "1234567890");
//! # Ok::<(), jwtinspect::Error>(())
//! ```
//!
//! ## Algorithms
//!
//! | Family | Algorithms | Key material |
//! |---|---|---|
//! | HMAC | HS256, HS384, HS512 | Shared secret bytes |
//! | RSASSA-PKCS1-v1_5 | RS256, RS384, RS512 | PEM public key (2048-8192 bit) |
//! | RSASSA-PSS | PS256, PS384, PS512 | PEM public key (2048-8192 bit) |
//! | ECDSA | ES256, ES384, ES512 | PEM public key on P-256 / P-384 / P-521 |
//!
//! Generation covers the HMAC family only.
//!
//! ## Security
//!
//! - **Algorithm confusion**: `verify` takes the algorithm from the caller and
//!   fails with [`Error::AlgorithmMismatch`] when the header declares another
//!   one. The `none` algorithm is not supported.
//! - **Timing**: HMAC signatures are compared in constant time.
//! - **Signing input**: the signature is checked over the segments exactly as
//!   transmitted, never over re-serialized JSON.
//! - **Resource limits**: token, decoded segment and PEM sizes are bounded.
//!
//! ## Error Handling
//!
//! Every operation returns a typed [`Error`]. `verify` returns `Ok(false)` for
//! a signature that does not match, and `Err` when verification could not be
//! attempted (missing or malformed key, malformed token, mismatched algorithm).
//!
//! ## Logging
//!
//! Events are emitted through `tracing` at `debug` level, with a `warn` for
//! algorithm mismatches. Secrets, keys and token contents are never logged.

mod error;

// Internal modules
pub(crate) mod algorithm;
pub(crate) mod backend;
pub(crate) mod claims;
pub(crate) mod engine;
pub(crate) mod generate;
pub(crate) mod header;
pub(crate) mod json;
pub(crate) mod limits;
pub(crate) mod token;

pub mod keys;
pub mod utils;

// Public Interface
pub use algorithm::{AlgorithmFamily, AlgorithmType, DigestAlgorithm, EcdsaCurve};
pub use backend::{AwsLcBackend, CryptoBackend};
pub use claims::{Audience, ClaimStatus, ClaimValidation, Claims, ClaimsValidation};
pub use engine::JwtEngine;
pub use error::{Error, Result};
pub use keys::{KeyKind, PublicKey};
pub use token::DecodedToken;

use serde_json::{Map, Value};

/// Decode a token without verifying it
///
/// # Errors
///
/// * `Error::MalformedToken` unless there are exactly three non-empty segments
/// * `Error::InvalidEncoding` if a segment is not Base64URL
/// * `Error::InvalidJson` if header or payload is not a JSON object
pub fn decode(token: &str) -> Result<DecodedToken> {
    token::decode(token)
}

/// Verify the signature of `token` under `algorithm`
///
/// `key` is the shared secret for HS* and PEM text for RS*, PS* and ES*.
/// See [`JwtEngine::verify`].
pub fn verify(token: &str, algorithm: AlgorithmType, key: impl AsRef<[u8]>) -> Result<bool> {
    JwtEngine::new().verify(token, algorithm, key)
}

/// Generate an HS256 token
pub fn generate(payload: &Value, secret: impl AsRef<[u8]>) -> Result<String> {
    generate::generate_with_algorithm(payload, secret.as_ref(), AlgorithmType::HS256)
}

/// Generate a token under HS256, HS384 or HS512
pub fn generate_with_algorithm(
    payload: &Value,
    secret: impl AsRef<[u8]>,
    algorithm: AlgorithmType,
) -> Result<String> {
    generate::generate_with_algorithm(payload, secret.as_ref(), algorithm)
}

/// Read the algorithm declared in the header, if it is a supported one
///
/// A display hint only; [`verify`] performs its own algorithm check.
pub fn detect_algorithm(token: &str) -> Option<AlgorithmType> {
    header::detect_algorithm(token)
}

/// Report on the registered claims of `payload` at the current time
pub fn validate_claims(payload: &Map<String, Value>) -> Vec<ClaimValidation> {
    validate_claims_at(payload, claims::current_timestamp())
}

/// Report on the registered claims of `payload` at `now` (Unix seconds)
pub fn validate_claims_at(payload: &Map<String, Value>, now: i64) -> Vec<ClaimValidation> {
    claims::validate_claims_at(payload, now, &ClaimsValidation::default())
}
