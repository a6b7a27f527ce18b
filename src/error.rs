//! Errors for jwtinspect

use thiserror::Error;

/// Errors returned by the JWT engine
///
/// Every failure is a typed value. A malformed token, missing key material or
/// a rejected cryptographic operation never panics; callers can tell "the
/// signature is invalid" (`Ok(false)` from verification) apart from "the
/// verification could not be attempted" (an `Err`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Malformed JWT: expected three non-empty parts separated by '.'")]
    MalformedToken,

    #[error("Base64URL decoding failed: {0}")]
    InvalidEncoding(String),

    #[error("JSON parsing failed: {0}")]
    InvalidJson(String),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Algorithm mismatch: requested '{expected}', token header declares {found:?}")]
    AlgorithmMismatch {
        expected: String,
        found: Option<String>,
    },

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    // ============================================================================
    // Key Errors
    // ============================================================================
    #[error("A non-empty secret is required for HMAC algorithms")]
    MissingSecret,

    #[error("A PEM-encoded public key is required for this algorithm")]
    MissingPublicKey,

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature is structurally invalid: {0}")]
    SignatureMismatch(String),

    // ============================================================================
    // Claim Errors
    // ============================================================================
    #[error("Token expired at {expired_at} (now: {now}, skew: {skew}s)")]
    TokenExpired {
        expired_at: i64,
        now: i64,
        skew: u64,
    },
}

/// Result type alias for jwtinspect operations
pub type Result<T> = std::result::Result<T, Error>;
