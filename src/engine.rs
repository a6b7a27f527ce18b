use crate::algorithm::{AlgorithmType, VerifyRequest};
use crate::backend::{AwsLcBackend, CryptoBackend};
use crate::claims::{self, ClaimValidation, ClaimsValidation};
use crate::error::{Error, Result};
use crate::generate;
use crate::header::{self, TokenHeader};
use crate::limits::MAX_DECODED_SIGNATURE_SIZE;
use crate::token::{self, DecodedToken, TokenParts};
use crate::utils::base64url;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// JWT decode / verify / generate engine
///
/// The engine is configured once and can be reused for any number of tokens.
/// Clones share the crypto backend.
pub struct JwtEngine<B: CryptoBackend = AwsLcBackend> {
    config_backend: Arc<B>,
    config_claims: ClaimsValidation,
}

impl<B: CryptoBackend> Clone for JwtEngine<B> {
    fn clone(&self) -> Self {
        Self {
            config_backend: Arc::clone(&self.config_backend),
            config_claims: self.config_claims.clone(),
        }
    }
}

impl JwtEngine {
    /// Create an engine backed by `aws-lc-rs`
    pub fn new() -> Self {
        Self::with_backend(AwsLcBackend)
    }
}

impl Default for JwtEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: CryptoBackend> JwtEngine<B> {
    /// Create an engine with a custom crypto backend
    pub fn with_backend(backend: B) -> Self {
        Self {
            config_backend: Arc::new(backend),
            config_claims: ClaimsValidation::default(),
        }
    }

    /// Configure claims evaluation
    pub fn claims(&mut self, config: ClaimsValidation) -> &mut Self {
        self.config_claims = config;
        self
    }

    /// Finish configuration
    pub fn build(&mut self) -> Self {
        self.clone()
    }

    /// The crypto backend in use
    pub fn backend(&self) -> &B {
        &self.config_backend
    }
}

impl<B: CryptoBackend> JwtEngine<B> {
    /// Decode a token without verifying its signature
    pub fn decode(&self, token: &str) -> Result<DecodedToken> {
        let decoded = token::decode(token)?;
        let declared = decoded.header.get("alg").and_then(Value::as_str);
        debug!(
            algorithm = declared,
            claims = decoded.payload.len(),
            "decoded token"
        );
        Ok(decoded)
    }

    /// Verify the signature of `token` under `algorithm`
    ///
    /// `key` is the shared secret for HMAC algorithms and PEM text for RSA and
    /// ECDSA. The algorithm declared in the token header must match `algorithm`
    /// (ignoring ASCII case); the header is never trusted to pick the algorithm.
    ///
    /// Returns `Ok(false)` when the signature does not match. Every error means
    /// verification could not be attempted.
    pub fn verify(
        &self,
        token: &str,
        algorithm: AlgorithmType,
        key: impl AsRef<[u8]>,
    ) -> Result<bool> {
        // 1. Split into segments; the signing input is the transmitted text
        let parts = TokenParts::split(token)?;

        // 2. Confirm the declared algorithm before touching any key material
        let header = TokenHeader::from_segment(parts.header)?;
        match header.algorithm.as_deref() {
            Some(found) if found.eq_ignore_ascii_case(algorithm.as_str()) => {}
            found => {
                warn!(
                    expected = %algorithm,
                    found,
                    "token header algorithm does not match requested algorithm"
                );
                return Err(Error::AlgorithmMismatch {
                    expected: algorithm.to_string(),
                    found: found.map(str::to_string),
                });
            }
        }

        // 3. Check the signature with the family's strategy
        let signature = base64url::decode_bytes(parts.signature, MAX_DECODED_SIGNATURE_SIZE)?;
        let request = VerifyRequest {
            algorithm,
            signing_input: parts.signing_input.as_bytes(),
            signature: &signature,
            key: key.as_ref(),
        };
        let valid = algorithm
            .strategy()
            .verify(&request, self.config_backend.as_ref())?;
        debug!(
            %algorithm,
            valid,
            typ = header.token_type.as_deref(),
            kid = header.key_id.as_deref(),
            "verified token signature"
        );

        // 4. Optional expiry enforcement, only for authentic tokens
        if valid && self.config_claims.rejects_expired() {
            let payload = parts.payload_object()?;
            self.config_claims
                .check_expiry(&payload, claims::current_timestamp())?;
        }

        Ok(valid)
    }

    /// Generate an HS256 token for `payload`
    pub fn generate(&self, payload: &Value, secret: impl AsRef<[u8]>) -> Result<String> {
        self.generate_with_algorithm(payload, secret, AlgorithmType::HS256)
    }

    /// Generate a token for `payload` under an HMAC algorithm
    pub fn generate_with_algorithm(
        &self,
        payload: &Value,
        secret: impl AsRef<[u8]>,
        algorithm: AlgorithmType,
    ) -> Result<String> {
        let token = generate::generate_with_algorithm(payload, secret.as_ref(), algorithm)?;
        debug!(%algorithm, length = token.len(), "generated token");
        Ok(token)
    }

    /// Best-effort algorithm hint from the token header
    ///
    /// Not a security check; `verify` confirms the algorithm itself.
    pub fn detect_algorithm(&self, token: &str) -> Option<AlgorithmType> {
        header::detect_algorithm(token)
    }

    /// Report on the registered claims of `payload` at the current time
    pub fn validate_claims(&self, payload: &Map<String, Value>) -> Vec<ClaimValidation> {
        self.validate_claims_at(payload, claims::current_timestamp())
    }

    /// Report on the registered claims of `payload` at `now` (Unix seconds)
    pub fn validate_claims_at(&self, payload: &Map<String, Value>, now: i64) -> Vec<ClaimValidation> {
        claims::validate_claims_at(payload, now, &self.config_claims)
    }
}
