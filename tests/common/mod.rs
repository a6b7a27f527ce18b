//! Key material and token builders shared by the integration suites
//!
//! RSA keys come from the `rsa` crate and are generated once per test binary.
//! Signing is done with `aws-lc-rs`, independently of the code under test.

#![allow(dead_code)]

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{self, EcdsaKeyPair, KeyPair, RsaKeyPair};
use base64::{Engine, engine::general_purpose::STANDARD};
use jwtinspect::AlgorithmType;
use jwtinspect::utils::base64url;
use rsa::RsaPrivateKey;
use rsa::pkcs1::EncodeRsaPublicKey;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use std::sync::OnceLock;

/// SubjectPublicKeyInfo prefixes for EC keys; the uncompressed point follows
const P256_SPKI_PREFIX: &[u8] = &[
    0x30, 0x59, 0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x08,
    0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07, 0x03, 0x42, 0x00,
];
const P384_SPKI_PREFIX: &[u8] = &[
    0x30, 0x76, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x05,
    0x2b, 0x81, 0x04, 0x00, 0x22, 0x03, 0x62, 0x00,
];
const P521_SPKI_PREFIX: &[u8] = &[
    0x30, 0x81, 0x9b, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06,
    0x05, 0x2b, 0x81, 0x04, 0x00, 0x23, 0x03, 0x81, 0x86, 0x00,
];

pub const SECRET: &str = "your-256-bit-secret";

/// Shared 2048-bit RSA key
pub fn rsa_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| {
        RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("failed to generate RSA key")
    })
}

/// `-----BEGIN PUBLIC KEY-----` PEM for [`rsa_key`]
pub fn rsa_public_pem() -> String {
    rsa_key()
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .expect("failed to encode SPKI PEM")
}

/// `-----BEGIN RSA PUBLIC KEY-----` PEM for [`rsa_key`]
pub fn rsa_pkcs1_pem() -> String {
    rsa_key()
        .to_public_key()
        .to_pkcs1_pem(LineEnding::LF)
        .expect("failed to encode PKCS#1 PEM")
}

/// EC key pair plus its SPKI PEM
pub struct EcKey {
    pub pair: EcdsaKeyPair,
    pub public_pem: String,
}

/// Fresh EC key for an ES* algorithm
pub fn ec_key(algorithm: AlgorithmType) -> EcKey {
    let (signing, prefix) = ec_parameters(algorithm);
    let rng = SystemRandom::new();
    let pkcs8 = EcdsaKeyPair::generate_pkcs8(signing, &rng).expect("failed to generate EC key");
    let pair = EcdsaKeyPair::from_pkcs8(signing, pkcs8.as_ref()).expect("failed to load EC key");

    let mut spki = prefix.to_vec();
    spki.extend_from_slice(pair.public_key().as_ref());

    EcKey {
        pair,
        public_pem: pem("PUBLIC KEY", &spki),
    }
}

fn ec_parameters(
    algorithm: AlgorithmType,
) -> (&'static signature::EcdsaSigningAlgorithm, &'static [u8]) {
    match algorithm {
        AlgorithmType::ES256 => (&signature::ECDSA_P256_SHA256_FIXED_SIGNING, P256_SPKI_PREFIX),
        AlgorithmType::ES384 => (&signature::ECDSA_P384_SHA384_FIXED_SIGNING, P384_SPKI_PREFIX),
        AlgorithmType::ES512 => (&signature::ECDSA_P521_SHA512_FIXED_SIGNING, P521_SPKI_PREFIX),
        other => panic!("{other} is not an ECDSA algorithm"),
    }
}

/// Wrap DER in PEM armor with 64-column lines
pub fn pem(label: &str, der: &[u8]) -> String {
    let body = STANDARD.encode(der);
    let lines: Vec<&str> = body
        .as_bytes()
        .chunks(64)
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect();
    format!(
        "-----BEGIN {label}-----\n{}\n-----END {label}-----\n",
        lines.join("\n")
    )
}

/// `header.payload` for the given JSON texts
pub fn signing_input(header: &str, payload: &str) -> String {
    format!(
        "{}.{}",
        base64url::encode(header),
        base64url::encode(payload)
    )
}

/// Build a token signed with the matching private key
///
/// HMAC tokens are signed with [`SECRET`], RSA tokens with [`rsa_key`], ECDSA
/// tokens with `ec` (required for ES*).
pub fn sign_token(algorithm: AlgorithmType, payload: &str, ec: Option<&EcKey>) -> String {
    let header = format!(r#"{{"alg":"{algorithm}","typ":"JWT"}}"#);
    let input = signing_input(&header, payload);
    let signature = sign(algorithm, input.as_bytes(), ec);
    format!("{input}.{}", base64url::encode_bytes(&signature))
}

/// Sign raw bytes with the key for `algorithm`
pub fn sign(algorithm: AlgorithmType, message: &[u8], ec: Option<&EcKey>) -> Vec<u8> {
    let rng = SystemRandom::new();
    match algorithm {
        AlgorithmType::HS256 | AlgorithmType::HS384 | AlgorithmType::HS512 => {
            hmac_sign(algorithm, SECRET.as_bytes(), message)
        }
        AlgorithmType::ES256 | AlgorithmType::ES384 | AlgorithmType::ES512 => ec
            .expect("ECDSA tokens need an EC key")
            .pair
            .sign(&rng, message)
            .expect("ECDSA signing failed")
            .as_ref()
            .to_vec(),
        rsa_alg => {
            let padding: &'static dyn signature::RsaEncoding = match rsa_alg {
                AlgorithmType::RS256 => &signature::RSA_PKCS1_SHA256,
                AlgorithmType::RS384 => &signature::RSA_PKCS1_SHA384,
                AlgorithmType::RS512 => &signature::RSA_PKCS1_SHA512,
                AlgorithmType::PS256 => &signature::RSA_PSS_SHA256,
                AlgorithmType::PS384 => &signature::RSA_PSS_SHA384,
                _ => &signature::RSA_PSS_SHA512,
            };
            let pkcs8 = rsa_key().to_pkcs8_der().expect("failed to encode PKCS#8");
            let pair = RsaKeyPair::from_pkcs8(pkcs8.as_bytes()).expect("failed to load RSA key");
            let mut signature = vec![0; pair.public_modulus_len()];
            pair.sign(padding, &rng, message, &mut signature)
                .expect("RSA signing failed");
            signature
        }
    }
}

/// HMAC with the `hmac` crate directly
pub fn hmac_sign(algorithm: AlgorithmType, secret: &[u8], message: &[u8]) -> Vec<u8> {
    use hmac::{Hmac, Mac};
    use sha2::{Sha256, Sha384, Sha512};

    macro_rules! mac {
        ($digest:ty) => {{
            let mut mac = Hmac::<$digest>::new_from_slice(secret).unwrap();
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }};
    }

    match algorithm {
        AlgorithmType::HS256 => mac!(Sha256),
        AlgorithmType::HS384 => mac!(Sha384),
        AlgorithmType::HS512 => mac!(Sha512),
        other => panic!("{other} is not an HMAC algorithm"),
    }
}

/// Flip one bit in the decoded payload and re-encode it, keeping the old signature
pub fn tamper_payload(token: &str) -> String {
    let parts: Vec<&str> = token.split('.').collect();
    let mut payload = base64url::decode_bytes(parts[1], 1 << 16).unwrap();
    let last = payload.len() - 2;
    payload[last] ^= 0x01;
    format!(
        "{}.{}.{}",
        parts[0],
        base64url::encode_bytes(&payload),
        parts[2]
    )
}
