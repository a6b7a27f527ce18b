//! DER encoding utilities
//!
//! JWS carries ECDSA signatures as fixed-width `R || S` (RFC 7518 Section 3.4),
//! while ASN.1 verifiers expect `ECDSA-Sig-Value ::= SEQUENCE { r INTEGER, s INTEGER }`.
//! The conversion is done by hand so the exact byte layout stays under test.
//! RSA public keys are decoded with the RustCrypto `der` crate.

use crate::algorithm::EcdsaCurve;
use crate::error::{Error, Result};
use der::{Decode, Sequence, asn1::UintRef};

const TAG_INTEGER: u8 = 0x02;
const TAG_SEQUENCE: u8 = 0x30;

fn der_len(len: usize) -> Vec<u8> {
    if len < 0x80 {
        vec![len as u8]
    } else {
        let mut tmp = Vec::new();
        let mut n = len;
        while n > 0 {
            tmp.push((n & 0xFF) as u8);
            n >>= 8;
        }
        tmp.reverse();
        let mut v = Vec::with_capacity(1 + tmp.len());
        v.push(0x80 | (tmp.len() as u8));
        v.extend_from_slice(&tmp);
        v
    }
}

/// Encode an unsigned big-endian integer as a DER INTEGER
///
/// Leading zero bytes are stripped (keeping at least one byte), then a single
/// zero is re-added when the high bit is set so the value stays non-negative.
fn der_unsigned_integer(bytes: &[u8]) -> Vec<u8> {
    let first_nonzero = bytes.iter().position(|b| *b != 0);
    let trimmed = match first_nonzero {
        Some(idx) => &bytes[idx..],
        None => &[0u8][..],
    };

    let needs_pad = trimmed.first().is_some_and(|b| b & 0x80 != 0);
    let value_len = trimmed.len() + usize::from(needs_pad);

    let mut out = Vec::with_capacity(2 + value_len);
    out.push(TAG_INTEGER);
    out.extend_from_slice(&der_len(value_len));
    if needs_pad {
        out.push(0x00);
    }
    out.extend_from_slice(trimmed);
    out
}

fn der_sequence(children: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(3 + children.len());
    out.push(TAG_SEQUENCE);
    out.extend_from_slice(&der_len(children.len()));
    out.extend_from_slice(children);
    out
}

/// Convert a raw fixed-width ECDSA signature (`R || S`) to its DER encoding
///
/// The raw signature must be exactly twice the curve's component width
/// (64, 96 or 132 bytes for P-256, P-384 and P-521).
///
/// # Errors
///
/// Returns `Error::SignatureMismatch` if the raw length is wrong for the curve.
///
/// # Example
///
/// ```
/// use jwtinspect::EcdsaCurve;
/// use jwtinspect::utils::der::ecdsa_raw_to_der;
///
/// let mut raw = vec![0u8; 64];
/// raw[31] = 0x01; // r = 1
/// raw[63] = 0x02; // s = 2
/// let der = ecdsa_raw_to_der(&raw, EcdsaCurve::P256).unwrap();
/// assert_eq!(der, [0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02]);
/// ```
pub fn ecdsa_raw_to_der(raw: &[u8], curve: EcdsaCurve) -> Result<Vec<u8>> {
    let width = curve.component_len();
    if raw.len() != width * 2 {
        return Err(Error::SignatureMismatch(format!(
            "{} signature must be {} bytes, got {}",
            curve.name(),
            width * 2,
            raw.len()
        )));
    }

    let (r, s) = raw.split_at(width);
    let mut children = der_unsigned_integer(r);
    children.extend_from_slice(&der_unsigned_integer(s));
    Ok(der_sequence(&children))
}

/// RSA public key structure for DER decoding
///
/// Represents RSAPublicKey as defined in RFC 8017:
/// RSAPublicKey ::= SEQUENCE {
///     modulus           INTEGER,  -- n
///     publicExponent    INTEGER   -- e
/// }
#[derive(Sequence)]
struct RsaPublicKey<'a> {
    /// RSA modulus (n)
    modulus: UintRef<'a>,
    /// RSA public exponent (e)
    public_exponent: UintRef<'a>,
}

/// Size in bits of the modulus of a PKCS#1 `RSAPublicKey`
pub(crate) fn rsa_modulus_bits(pkcs1_der: &[u8]) -> Result<usize> {
    let key = RsaPublicKey::from_der(pkcs1_der)
        .map_err(|e| Error::InvalidPublicKey(format!("malformed RSAPublicKey: {e}")))?;

    if !key
        .public_exponent
        .as_bytes()
        .last()
        .is_some_and(|b| b & 1 == 1)
    {
        return Err(Error::InvalidPublicKey(
            "RSA public exponent must be odd".to_string(),
        ));
    }

    // UintRef strips leading zero bytes
    let modulus = key.modulus.as_bytes();
    match modulus.first() {
        Some(first) => Ok((modulus.len() - 1) * 8 + (8 - first.leading_zeros() as usize)),
        None => Err(Error::InvalidPublicKey("RSA modulus is zero".to_string())),
    }
}
