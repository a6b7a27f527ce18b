use crate::algorithm::traits::load_public_key;
use crate::algorithm::{SignatureStrategy, VerifyRequest};
use crate::backend::CryptoBackend;
use crate::error::{Error, Result};
use crate::keys::KeyKind;
use crate::utils::der::ecdsa_raw_to_der;

/// ES256 / ES384 / ES512
///
/// Tokens carry the fixed-width `R || S` form; the backend is handed DER.
pub(crate) struct EcdsaStrategy;

impl SignatureStrategy for EcdsaStrategy {
    fn verify(&self, request: &VerifyRequest<'_>, backend: &dyn CryptoBackend) -> Result<bool> {
        let curve = request.algorithm.curve().ok_or_else(|| {
            Error::UnsupportedAlgorithm(format!("{} is not an ECDSA algorithm", request.algorithm))
        })?;

        let public_key = load_public_key(request.key, backend)?;

        if public_key.kind() != KeyKind::Ec(curve) {
            return Err(Error::InvalidPublicKey(format!(
                "{} requires an EC {} public key, got {}",
                request.algorithm,
                curve.name(),
                public_key.kind()
            )));
        }

        let der_signature = ecdsa_raw_to_der(request.signature, curve)?;

        backend.verify_signature(
            request.algorithm,
            request.signing_input,
            &der_signature,
            &public_key,
        )
    }
}
