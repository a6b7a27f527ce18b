use crate::algorithm::AlgorithmType;
use crate::backend::CryptoBackend;
use crate::error::{Error, Result};
use crate::keys::PublicKey;

/// Everything a strategy needs to check one signature
pub(crate) struct VerifyRequest<'a> {
    /// Algorithm the caller asked for (already confirmed against the header)
    pub algorithm: AlgorithmType,
    /// The exact bytes that were signed (`header.payload` as transmitted)
    pub signing_input: &'a [u8],
    /// Decoded signature segment
    pub signature: &'a [u8],
    /// Secret bytes or PEM text, depending on the family
    pub key: &'a [u8],
}

/// Verification routine shared by all algorithms of one family
///
/// Returns `Ok(false)` when the signature does not match and `Err` when the
/// verification could not be attempted at all.
pub(crate) trait SignatureStrategy: Send + Sync {
    fn verify(&self, request: &VerifyRequest<'_>, backend: &dyn CryptoBackend) -> Result<bool>;
}

/// Load the PEM public key for an asymmetric algorithm
pub(crate) fn load_public_key(key: &[u8], backend: &dyn CryptoBackend) -> Result<PublicKey> {
    if key.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::MissingPublicKey);
    }

    let pem = std::str::from_utf8(key)
        .map_err(|_| Error::InvalidPublicKey("PEM input is not valid UTF-8".to_string()))?;

    backend.parse_public_key(pem)
}
