//! Size limit constants for input validation

/// Maximum length for a JWT token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

// ============================================================================
// Decoded segment size limits
// ============================================================================

/// Maximum size for decoded JWT header JSON (8KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded JWT payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// RSA-8192 signatures are 1024 bytes, the largest any supported algorithm produces
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

// ============================================================================
// Key material limits
// ============================================================================

/// Maximum length for PEM-encoded public key input (16KB)
pub(crate) const MAX_PEM_LENGTH: usize = 16 * 1024;

/// Smallest RSA modulus accepted for verification (2048 bits)
pub(crate) const MIN_RSA_MODULUS_BITS: usize = 2048;

/// Largest RSA modulus accepted for verification (8192 bits)
pub(crate) const MAX_RSA_MODULUS_BITS: usize = 8192;

// ============================================================================
// Validation bounds
// ============================================================================

/// Maximum clock skew tolerance (300 seconds = 5 minutes)
/// Prevents clock skew from effectively disabling expiration checks
pub(crate) const MAX_CLOCK_SKEW_SECONDS: u64 = 300;
