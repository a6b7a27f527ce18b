use crate::algorithm::{DigestAlgorithm, SignatureStrategy, VerifyRequest};
use crate::backend::CryptoBackend;
use crate::error::{Error, Result};

use constant_time_eq::constant_time_eq;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// HS256 / HS384 / HS512
pub(crate) struct HmacStrategy;

impl SignatureStrategy for HmacStrategy {
    fn verify(&self, request: &VerifyRequest<'_>, _backend: &dyn CryptoBackend) -> Result<bool> {
        if request.key.is_empty() {
            return Err(Error::MissingSecret);
        }

        let expected = sign(request.algorithm.digest(), request.key, request.signing_input)?;

        // Length mismatch is reported as a plain mismatch, never short-circuited per byte
        Ok(constant_time_eq(&expected, request.signature))
    }
}

/// Compute the HMAC of `input` keyed with `secret`
pub(crate) fn sign(digest: DigestAlgorithm, secret: &[u8], input: &[u8]) -> Result<Vec<u8>> {
    match digest {
        DigestAlgorithm::Sha256 => compute::<Hmac<Sha256>>(secret, input),
        DigestAlgorithm::Sha384 => compute::<Hmac<Sha384>>(secret, input),
        DigestAlgorithm::Sha512 => compute::<Hmac<Sha512>>(secret, input),
    }
}

fn compute<M: Mac + KeyInit>(secret: &[u8], input: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as KeyInit>::new_from_slice(secret)
        .map_err(|e| Error::UnsupportedAlgorithm(format!("HMAC key rejected: {e}")))?;
    Mac::update(&mut mac, input);
    Ok(mac.finalize().into_bytes().to_vec())
}
