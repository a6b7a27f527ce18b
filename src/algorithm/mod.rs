//! Algorithm support for JWT verification and generation
mod traits;

pub(crate) mod ecdsa;
pub(crate) mod hmac;
pub(crate) mod rsa;

pub(crate) use traits::{SignatureStrategy, VerifyRequest};

use crate::error::{Error, Result};
use std::str::FromStr;

/// Algorithm identifier from a JWT header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmType {
    HS256,
    HS384,
    HS512,
    RS256,
    RS384,
    RS512,
    PS256,
    PS384,
    PS512,
    ES256,
    ES384,
    ES512,
}

/// Signature scheme family an algorithm belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmFamily {
    /// HMAC with a shared secret
    Hmac,
    /// RSASSA-PKCS1-v1_5
    RsaPkcs1,
    /// RSASSA-PSS
    RsaPss,
    /// ECDSA over a NIST prime curve
    Ecdsa,
}

/// SHA-2 digest paired with an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

/// ECDSA curve identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcdsaCurve {
    /// P-256 (secp256r1)
    P256,
    /// P-384 (secp384r1)
    P384,
    /// P-521 (secp521r1)
    P521,
}

impl EcdsaCurve {
    /// Width in bytes of one signature component (R or S) and of one point coordinate
    pub const fn component_len(&self) -> usize {
        match self {
            EcdsaCurve::P256 => 32,
            EcdsaCurve::P384 => 48,
            EcdsaCurve::P521 => 66,
        }
    }

    /// Human-readable curve name
    pub const fn name(&self) -> &'static str {
        match self {
            EcdsaCurve::P256 => "P-256",
            EcdsaCurve::P384 => "P-384",
            EcdsaCurve::P521 => "P-521",
        }
    }
}

impl AlgorithmType {
    /// Every supported algorithm, in declaration order
    pub const ALL: [AlgorithmType; 12] = [
        AlgorithmType::HS256,
        AlgorithmType::HS384,
        AlgorithmType::HS512,
        AlgorithmType::RS256,
        AlgorithmType::RS384,
        AlgorithmType::RS512,
        AlgorithmType::PS256,
        AlgorithmType::PS384,
        AlgorithmType::PS512,
        AlgorithmType::ES256,
        AlgorithmType::ES384,
        AlgorithmType::ES512,
    ];

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmType::HS256 => "HS256",
            AlgorithmType::HS384 => "HS384",
            AlgorithmType::HS512 => "HS512",
            AlgorithmType::RS256 => "RS256",
            AlgorithmType::RS384 => "RS384",
            AlgorithmType::RS512 => "RS512",
            AlgorithmType::PS256 => "PS256",
            AlgorithmType::PS384 => "PS384",
            AlgorithmType::PS512 => "PS512",
            AlgorithmType::ES256 => "ES256",
            AlgorithmType::ES384 => "ES384",
            AlgorithmType::ES512 => "ES512",
        }
    }

    pub const fn family(&self) -> AlgorithmFamily {
        match self {
            AlgorithmType::HS256 | AlgorithmType::HS384 | AlgorithmType::HS512 => {
                AlgorithmFamily::Hmac
            }
            AlgorithmType::RS256 | AlgorithmType::RS384 | AlgorithmType::RS512 => {
                AlgorithmFamily::RsaPkcs1
            }
            AlgorithmType::PS256 | AlgorithmType::PS384 | AlgorithmType::PS512 => {
                AlgorithmFamily::RsaPss
            }
            AlgorithmType::ES256 | AlgorithmType::ES384 | AlgorithmType::ES512 => {
                AlgorithmFamily::Ecdsa
            }
        }
    }

    pub const fn digest(&self) -> DigestAlgorithm {
        match self {
            AlgorithmType::HS256
            | AlgorithmType::RS256
            | AlgorithmType::PS256
            | AlgorithmType::ES256 => DigestAlgorithm::Sha256,
            AlgorithmType::HS384
            | AlgorithmType::RS384
            | AlgorithmType::PS384
            | AlgorithmType::ES384 => DigestAlgorithm::Sha384,
            AlgorithmType::HS512
            | AlgorithmType::RS512
            | AlgorithmType::PS512
            | AlgorithmType::ES512 => DigestAlgorithm::Sha512,
        }
    }

    /// Curve for ECDSA algorithms, `None` for every other family
    pub const fn curve(&self) -> Option<EcdsaCurve> {
        match self {
            AlgorithmType::ES256 => Some(EcdsaCurve::P256),
            AlgorithmType::ES384 => Some(EcdsaCurve::P384),
            AlgorithmType::ES512 => Some(EcdsaCurve::P521),
            _ => None,
        }
    }

    /// Whether verification uses a shared secret rather than a public key
    pub const fn is_symmetric(&self) -> bool {
        matches!(self.family(), AlgorithmFamily::Hmac)
    }

    /// The verification routine for this algorithm's family
    pub(crate) fn strategy(&self) -> &'static dyn SignatureStrategy {
        match self.family() {
            AlgorithmFamily::Hmac => &hmac::HmacStrategy,
            AlgorithmFamily::RsaPkcs1 | AlgorithmFamily::RsaPss => &rsa::RsaStrategy,
            AlgorithmFamily::Ecdsa => &ecdsa::EcdsaStrategy,
        }
    }
}

impl FromStr for AlgorithmType {
    type Err = Error;

    /// Parse an algorithm name, ignoring ASCII case
    fn from_str(s: &str) -> Result<Self> {
        AlgorithmType::ALL
            .into_iter()
            .find(|alg| alg.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                if s.eq_ignore_ascii_case("none") {
                    Error::UnsupportedAlgorithm(
                        "'none' (unsigned tokens cannot be verified)".to_string(),
                    )
                } else {
                    Error::UnsupportedAlgorithm(format!("'{s}'"))
                }
            })
    }
}

impl std::fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for AlgorithmType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
