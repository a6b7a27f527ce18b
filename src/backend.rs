//! Pluggable cryptographic backend
//!
//! The engine never touches a crypto library directly for public-key work. It
//! asks a [`CryptoBackend`] to parse key material and to check a signature, so
//! hosts can swap the provider (hardware token, platform keychain, test double)
//! without touching token handling.

use crate::algorithm::{AlgorithmFamily, AlgorithmType};
use crate::error::{Error, Result};
use crate::keys::{KeyKind, PublicKey, parse_public_key_pem};
use crate::limits::{MAX_RSA_MODULUS_BITS, MIN_RSA_MODULUS_BITS};

use aws_lc_rs::signature::{self, UnparsedPublicKey};
use tracing::debug;

/// Capability interface for public-key signature verification
pub trait CryptoBackend: Send + Sync {
    /// Parse a PEM-encoded public key
    ///
    /// The default implementation is the pure PEM/DER parser in [`crate::keys`].
    fn parse_public_key(&self, pem: &str) -> Result<PublicKey> {
        parse_public_key_pem(pem)
    }

    /// Verify `signature` over `message`
    ///
    /// ECDSA signatures are passed DER-encoded. Returns `Ok(false)` when the
    /// signature does not match, and `Err(Error::UnsupportedAlgorithm)` when the
    /// primitive cannot perform the operation with this key at all.
    fn verify_signature(
        &self,
        algorithm: AlgorithmType,
        message: &[u8],
        signature: &[u8],
        key: &PublicKey,
    ) -> Result<bool>;
}

/// Default backend built on `aws-lc-rs`
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsLcBackend;

impl AwsLcBackend {
    /// Get the verification algorithm for signature verification
    ///
    /// Note: ECDSA uses the ASN.1 variants; the raw JWS form has already been
    /// converted to DER by the caller.
    fn verification_algorithm(
        algorithm: AlgorithmType,
    ) -> Result<&'static dyn signature::VerificationAlgorithm> {
        Ok(match algorithm {
            AlgorithmType::RS256 => &signature::RSA_PKCS1_2048_8192_SHA256,
            AlgorithmType::RS384 => &signature::RSA_PKCS1_2048_8192_SHA384,
            AlgorithmType::RS512 => &signature::RSA_PKCS1_2048_8192_SHA512,
            AlgorithmType::PS256 => &signature::RSA_PSS_2048_8192_SHA256,
            AlgorithmType::PS384 => &signature::RSA_PSS_2048_8192_SHA384,
            AlgorithmType::PS512 => &signature::RSA_PSS_2048_8192_SHA512,
            AlgorithmType::ES256 => &signature::ECDSA_P256_SHA256_ASN1,
            AlgorithmType::ES384 => &signature::ECDSA_P384_SHA384_ASN1,
            AlgorithmType::ES512 => &signature::ECDSA_P521_SHA512_ASN1,
            AlgorithmType::HS256 | AlgorithmType::HS384 | AlgorithmType::HS512 => {
                return Err(Error::UnsupportedAlgorithm(format!(
                    "{algorithm} is a symmetric algorithm and has no public-key verifier"
                )));
            }
        })
    }

    /// Reject key/algorithm pairs the primitive would refuse outright
    fn check_key_usable(algorithm: AlgorithmType, key: &PublicKey) -> Result<()> {
        match (algorithm.family(), key.kind()) {
            (AlgorithmFamily::RsaPkcs1 | AlgorithmFamily::RsaPss, KeyKind::Rsa { modulus_bits }) => {
                if (MIN_RSA_MODULUS_BITS..=MAX_RSA_MODULUS_BITS).contains(&modulus_bits) {
                    Ok(())
                } else {
                    Err(Error::UnsupportedAlgorithm(format!(
                        "{algorithm} requires a {MIN_RSA_MODULUS_BITS}-{MAX_RSA_MODULUS_BITS} bit RSA key, got {modulus_bits} bits"
                    )))
                }
            }
            (AlgorithmFamily::Ecdsa, KeyKind::Ec(curve)) if algorithm.curve() == Some(curve) => {
                Ok(())
            }
            (_, kind) => Err(Error::UnsupportedAlgorithm(format!(
                "{algorithm} cannot be verified with an {kind} key"
            ))),
        }
    }
}

impl CryptoBackend for AwsLcBackend {
    fn verify_signature(
        &self,
        algorithm: AlgorithmType,
        message: &[u8],
        signature: &[u8],
        key: &PublicKey,
    ) -> Result<bool> {
        let verification = Self::verification_algorithm(algorithm)?;
        Self::check_key_usable(algorithm, key)?;

        let public_key = UnparsedPublicKey::new(verification, key.key_bytes());
        match public_key.verify(message, signature) {
            Ok(()) => Ok(true),
            Err(_) => {
                debug!(%algorithm, key = %key.kind(), "backend rejected signature");
                Ok(false)
            }
        }
    }
}
