//! Claims inspection for JWT payloads
//!
//! This module turns the registered claims of a payload (RFC 7519 §4.1) into a
//! human-readable report. Time-based claims (exp, nbf, iat) are checked against
//! the current time; identity claims (iss, sub, aud, jti) are informational.
//! A report never fails: a malformed claim is reported as `Invalid`.

use crate::error::{Error, Result};
use crate::limits::MAX_CLOCK_SKEW_SECONDS;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Registered claims, as a typed view over a payload
///
/// Time claims are kept as `f64` so both integer and fractional NumericDate
/// values are accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Claims {
    /// Issuer (iss)
    #[serde(rename = "iss", default)]
    pub issuer: Option<String>,
    /// Subject (sub)
    #[serde(rename = "sub", default)]
    pub subject: Option<String>,
    /// Audience (aud)
    #[serde(rename = "aud", default)]
    pub audience: Option<Audience>,
    /// Expiration Time (exp), seconds since Unix epoch
    #[serde(rename = "exp", default)]
    pub expiration: Option<f64>,
    /// Not Before (nbf), seconds since Unix epoch
    #[serde(rename = "nbf", default)]
    pub not_before: Option<f64>,
    /// Issued At (iat), seconds since Unix epoch
    #[serde(rename = "iat", default)]
    pub issued_at: Option<f64>,
    /// JWT ID (jti)
    #[serde(rename = "jti", default)]
    pub jwt_id: Option<String>,
}

impl Claims {
    /// Read the registered claims out of a payload object
    ///
    /// Unregistered claims are ignored.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self> {
        Claims::deserialize(Value::Object(payload.clone()))
            .map_err(|e| Error::InvalidJson(format!("registered claim has wrong type: {e}")))
    }
}

/// The `aud` claim: a single string or an array of strings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    /// All audience values
    pub fn values(&self) -> Vec<&str> {
        match self {
            Audience::Single(aud) => vec![aud.as_str()],
            Audience::Multiple(auds) => auds.iter().map(String::as_str).collect(),
        }
    }

    /// Whether `audience` is one of the values
    pub fn contains(&self, audience: &str) -> bool {
        self.values().contains(&audience)
    }
}

/// Outcome of one claim check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Valid,
    Invalid,
    /// Accepted, but worth a second look (e.g. issued in the future)
    Suspicious,
    /// Present, not subject to validation
    Informational,
}

/// Report entry for one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimValidation {
    pub claim: String,
    pub status: ClaimStatus,
    pub message: String,
}

impl ClaimValidation {
    fn new(claim: &str, status: ClaimStatus, message: String) -> Self {
        Self {
            claim: claim.to_string(),
            status,
            message,
        }
    }
}

/// Configuration for claims evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimsValidation {
    clock_skew_seconds: u64,
    reject_expired: bool,
}

impl ClaimsValidation {
    /// Create a new validation config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set clock skew tolerance
    ///
    /// # Security
    /// Clock skew is capped at 300 seconds (5 minutes) so a large value cannot
    /// effectively disable expiration checks. Larger values are clamped.
    pub fn clock_skew(mut self, seconds: u64) -> Self {
        self.clock_skew_seconds = seconds.min(MAX_CLOCK_SKEW_SECONDS);
        self
    }

    /// Make signature verification fail with `Error::TokenExpired` for expired tokens
    pub fn reject_expired(mut self) -> Self {
        self.reject_expired = true;
        self
    }

    pub(crate) fn rejects_expired(&self) -> bool {
        self.reject_expired
    }

    /// Fail if `payload` carries an `exp` that has passed at `now`
    pub(crate) fn check_expiry(&self, payload: &Map<String, Value>, now: i64) -> Result<()> {
        let Some(exp) = payload.get("exp").and_then(numeric_date) else {
            return Ok(());
        };

        if exp + self.skew_secs() <= now as f64 {
            return Err(Error::TokenExpired {
                expired_at: exp.floor() as i64,
                now,
                skew: self.clock_skew_seconds,
            });
        }
        Ok(())
    }

    fn skew_secs(&self) -> f64 {
        self.clock_skew_seconds as f64
    }
}

/// Evaluate the registered claims of `payload` at time `now`
///
/// Entries appear in the order exp, nbf, iat, iss, sub, aud, jti, one per
/// claim present.
pub(crate) fn validate_claims_at(
    payload: &Map<String, Value>,
    now: i64,
    config: &ClaimsValidation,
) -> Vec<ClaimValidation> {
    let skew = config.skew_secs();
    let at = now as f64;
    let mut report = Vec::new();

    if let Some(value) = payload.get("exp") {
        report.push(match numeric_date(value) {
            Some(exp) if exp + skew > at => ClaimValidation::new(
                "exp",
                ClaimStatus::Valid,
                format!("Expires {}", describe_time(exp, now)),
            ),
            Some(exp) => ClaimValidation::new(
                "exp",
                ClaimStatus::Invalid,
                format!("Expired {}", describe_time(exp, now)),
            ),
            None => not_a_date("exp", value),
        });
    }

    if let Some(value) = payload.get("nbf") {
        report.push(match numeric_date(value) {
            Some(nbf) if nbf <= at + skew => ClaimValidation::new(
                "nbf",
                ClaimStatus::Valid,
                format!("Valid since {}", describe_time(nbf, now)),
            ),
            Some(nbf) => ClaimValidation::new(
                "nbf",
                ClaimStatus::Invalid,
                format!("Not valid before {}", describe_time(nbf, now)),
            ),
            None => not_a_date("nbf", value),
        });
    }

    if let Some(value) = payload.get("iat") {
        report.push(match numeric_date(value) {
            Some(iat) if iat <= at + skew => ClaimValidation::new(
                "iat",
                ClaimStatus::Valid,
                format!("Issued {}", describe_time(iat, now)),
            ),
            Some(iat) => ClaimValidation::new(
                "iat",
                ClaimStatus::Suspicious,
                format!("Issued in the future: {}", describe_time(iat, now)),
            ),
            None => not_a_date("iat", value),
        });
    }

    for (claim, label) in [
        ("iss", "Issuer"),
        ("sub", "Subject"),
        ("aud", "Audience"),
        ("jti", "JWT ID"),
    ] {
        if let Some(value) = payload.get(claim) {
            report.push(ClaimValidation::new(
                claim,
                ClaimStatus::Informational,
                format!("{label}: {}", display_value(value)),
            ));
        }
    }

    report
}

/// Current Unix timestamp
pub(crate) fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Read a NumericDate; fractional seconds are kept for comparison
fn numeric_date(value: &Value) -> Option<f64> {
    value.as_f64()
}

fn not_a_date(claim: &str, value: &Value) -> ClaimValidation {
    ClaimValidation::new(
        claim,
        ClaimStatus::Invalid,
        format!("Not a numeric date: {value}"),
    )
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// "2024-01-01 00:00:00 UTC (in 1h 0m)" style rendering
fn describe_time(timestamp: f64, now: i64) -> String {
    let timestamp = timestamp.floor() as i64;
    let absolute = DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("@{timestamp}"));

    let delta = timestamp.saturating_sub(now);
    let relative = if delta == 0 {
        "now".to_string()
    } else if delta > 0 {
        format!("in {}", format_duration(delta.unsigned_abs()))
    } else {
        format!("{} ago", format_duration(delta.unsigned_abs()))
    };

    format!("{absolute} ({relative})")
}

fn format_duration(seconds: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    match seconds {
        s if s < MINUTE => format!("{s}s"),
        s if s < HOUR => format!("{}m {}s", s / MINUTE, s % MINUTE),
        s if s < DAY => format!("{}h {}m", s / HOUR, (s % HOUR) / MINUTE),
        s => format!("{}d {}h", s / DAY, (s % DAY) / HOUR),
    }
}
