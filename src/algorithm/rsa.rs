use crate::algorithm::traits::load_public_key;
use crate::algorithm::{SignatureStrategy, VerifyRequest};
use crate::backend::CryptoBackend;
use crate::error::{Error, Result};
use crate::keys::KeyKind;

/// RS256 / RS384 / RS512 and PS256 / PS384 / PS512
///
/// Padding and digest are selected by the backend from the algorithm; this
/// strategy only makes sure an RSA key is in hand.
pub(crate) struct RsaStrategy;

impl SignatureStrategy for RsaStrategy {
    fn verify(&self, request: &VerifyRequest<'_>, backend: &dyn CryptoBackend) -> Result<bool> {
        let public_key = load_public_key(request.key, backend)?;

        if !matches!(public_key.kind(), KeyKind::Rsa { .. }) {
            return Err(Error::InvalidPublicKey(format!(
                "{} requires an RSA public key, got {}",
                request.algorithm,
                public_key.kind()
            )));
        }

        backend.verify_signature(
            request.algorithm,
            request.signing_input,
            request.signature,
            &public_key,
        )
    }
}
