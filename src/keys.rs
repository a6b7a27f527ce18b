//! Public key material for RSA and ECDSA verification
//!
//! Keys arrive as PEM text. The armor is stripped, the body is base64-decoded
//! to DER and the DER is inspected just enough to learn the key type (RSA, or
//! EC on a named curve). The bytes handed to the backend are the inner key
//! encoding: a PKCS#1 `RSAPublicKey`, or an uncompressed EC point.

use crate::algorithm::EcdsaCurve;
use crate::error::{Error, Result};
use crate::limits::MAX_PEM_LENGTH;
use crate::utils::der::rsa_modulus_bits;
use base64::{Engine, engine::general_purpose::STANDARD};
use der::Decode;
use spki::{ObjectIdentifier, SubjectPublicKeyInfoRef};

const RSA_ENCRYPTION_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
const SECP256R1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const SECP384R1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
const SECP521R1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");

/// Kind of public key, as far as algorithm selection cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// RSA key with the given modulus size
    Rsa { modulus_bits: usize },
    /// EC key on a named curve
    Ec(EcdsaCurve),
}

impl std::fmt::Display for KeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyKind::Rsa { modulus_bits } => write!(f, "RSA-{modulus_bits}"),
            KeyKind::Ec(curve) => write!(f, "EC {}", curve.name()),
        }
    }
}

/// A parsed public key, ready for a [`CryptoBackend`](crate::CryptoBackend)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    kind: KeyKind,
    key_bytes: Vec<u8>,
}

impl PublicKey {
    /// Key type and parameters
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// PKCS#1 `RSAPublicKey` DER for RSA keys, uncompressed point for EC keys
    pub fn key_bytes(&self) -> &[u8] {
        &self.key_bytes
    }
}

/// Parse a PEM public key
///
/// Accepts `-----BEGIN PUBLIC KEY-----` (SubjectPublicKeyInfo) and
/// `-----BEGIN RSA PUBLIC KEY-----` (PKCS#1). A bare base64 body without armor
/// is read as SubjectPublicKeyInfo.
///
/// # Errors
///
/// `Error::MissingPublicKey` for blank input, `Error::InvalidPublicKey` for
/// everything that cannot be turned into a supported key.
pub fn parse_public_key_pem(pem: &str) -> Result<PublicKey> {
    let pem = pem.trim();
    if pem.is_empty() {
        return Err(Error::MissingPublicKey);
    }
    if pem.len() > MAX_PEM_LENGTH {
        return Err(Error::InvalidPublicKey(format!(
            "PEM input too large: {} bytes (maximum: {MAX_PEM_LENGTH} bytes)",
            pem.len()
        )));
    }

    let (label, body) = split_armor(pem)?;
    let der = decode_body(body)?;

    match label {
        "PUBLIC KEY" => parse_spki(&der),
        "RSA PUBLIC KEY" => {
            let modulus_bits = rsa_modulus_bits(&der)?;
            Ok(PublicKey {
                kind: KeyKind::Rsa { modulus_bits },
                key_bytes: der,
            })
        }
        other => Err(Error::InvalidPublicKey(format!(
            "unsupported PEM label '{other}', expected 'PUBLIC KEY' or 'RSA PUBLIC KEY'"
        ))),
    }
}

/// Split PEM armor into its label and base64 body
fn split_armor(pem: &str) -> Result<(&str, &str)> {
    const BEGIN: &str = "-----BEGIN ";
    const DASHES: &str = "-----";

    let Some(after_begin) = pem.strip_prefix(BEGIN) else {
        if pem.contains(DASHES) {
            return Err(Error::InvalidPublicKey("malformed PEM header".to_string()));
        }
        return Ok(("PUBLIC KEY", pem));
    };

    let label_end = after_begin
        .find(DASHES)
        .ok_or_else(|| Error::InvalidPublicKey("malformed PEM header".to_string()))?;
    let label = &after_begin[..label_end];
    let rest = &after_begin[label_end + DASHES.len()..];

    let footer = format!("-----END {label}-----");
    let body_end = rest
        .find(&footer)
        .ok_or_else(|| Error::InvalidPublicKey(format!("missing PEM footer for '{label}'")))?;

    Ok((label, &rest[..body_end]))
}

fn decode_body(body: &str) -> Result<Vec<u8>> {
    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(Error::InvalidPublicKey("empty PEM body".to_string()));
    }

    STANDARD
        .decode(compact)
        .map_err(|e| Error::InvalidPublicKey(format!("PEM body is not valid base64: {e}")))
}

fn parse_spki(der: &[u8]) -> Result<PublicKey> {
    let spki = SubjectPublicKeyInfoRef::from_der(der)
        .map_err(|e| Error::InvalidPublicKey(format!("malformed SubjectPublicKeyInfo: {e}")))?;

    let key_bytes = spki.subject_public_key.as_bytes().ok_or_else(|| {
        Error::InvalidPublicKey("subject public key has unused bits".to_string())
    })?;

    let algorithm_oid = spki.algorithm.oid;
    if algorithm_oid == RSA_ENCRYPTION_OID {
        let modulus_bits = rsa_modulus_bits(key_bytes)?;
        return Ok(PublicKey {
            kind: KeyKind::Rsa { modulus_bits },
            key_bytes: key_bytes.to_vec(),
        });
    }

    if algorithm_oid != EC_PUBLIC_KEY_OID {
        return Err(Error::InvalidPublicKey(format!(
            "unsupported key algorithm {algorithm_oid}"
        )));
    }

    let curve_oid = spki
        .algorithm
        .parameters_oid()
        .map_err(|e| Error::InvalidPublicKey(format!("EC key without named curve: {e}")))?;
    let curve = if curve_oid == SECP256R1_OID {
        EcdsaCurve::P256
    } else if curve_oid == SECP384R1_OID {
        EcdsaCurve::P384
    } else if curve_oid == SECP521R1_OID {
        EcdsaCurve::P521
    } else {
        return Err(Error::InvalidPublicKey(format!(
            "unsupported EC curve {curve_oid}"
        )));
    };

    validate_ec_point(key_bytes, curve)?;
    Ok(PublicKey {
        kind: KeyKind::Ec(curve),
        key_bytes: key_bytes.to_vec(),
    })
}

fn validate_ec_point(point: &[u8], curve: EcdsaCurve) -> Result<()> {
    let expected = 1 + 2 * curve.component_len();
    match point.first() {
        Some(0x04) if point.len() == expected => Ok(()),
        Some(0x02 | 0x03) => Err(Error::InvalidPublicKey(
            "compressed EC points are not supported".to_string(),
        )),
        _ => Err(Error::InvalidPublicKey(format!(
            "EC point for {} must be {expected} bytes in uncompressed form",
            curve.name()
        ))),
    }
}
