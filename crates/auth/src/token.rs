//! Signed, time-limited bearer tokens.
//!
//! Wire format: `base64url(header).base64url(claims).base64url(hmac-sha256)`,
//! header fixed to `{"alg":"HS256","typ":"JWT"}`. Verification is stateless:
//! the server holds no per-token state, only the signing secret.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use notably_core::Role;

type HmacSha256 = Hmac<Sha256>;

/// Default token lifetime (24 hours).
pub const DEFAULT_TTL_SECS: i64 = 60 * 60 * 24;

/// Fixed token header. Issuer and verifier share one trust domain, so a
/// symmetric HS256 signature is sufficient; no other algorithm is accepted.
const HEADER_JSON: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("token signature mismatch")]
    SignatureMismatch,

    #[error("token expired")]
    Expired,

    #[error("claims encoding failed: {0}")]
    Encoding(String),
}

/// Application claims supplied at login time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub email: String,
    pub role: Role,
    pub tenant_slug: String,
}

/// Decoded token payload: the application claims plus the validity window
/// injected at issuance. Immutable once signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSet {
    pub email: String,
    pub role: Role,
    pub tenant_slug: String,
    /// Issued-at, epoch seconds.
    pub iat: i64,
    /// Expiry, epoch seconds. A claim set without `exp` never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Encodes and verifies bearer tokens under a single server secret.
#[derive(Clone)]
pub struct TokenCodec {
    mac: HmacSha256,
}

impl core::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // The keyed state never appears in logs.
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        // HMAC-SHA256 accepts keys of any length, so this is the only place
        // the infallible construction is unwrapped.
        let mac = HmacSha256::new_from_slice(secret.as_ref())
            .expect("HMAC accepts keys of any length");
        Self { mac }
    }

    fn mac(&self) -> HmacSha256 {
        self.mac.clone()
    }

    /// Issue a signed token valid for `ttl_secs` from `now`.
    ///
    /// Pure given (claims, ttl, now, secret); the only effect of the
    /// wall-clock convenience [`TokenCodec::issue`] is reading the clock.
    pub fn issue_at(
        &self,
        claims: &SessionClaims,
        ttl_secs: i64,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let set = ClaimSet {
            email: claims.email.clone(),
            role: claims.role,
            tenant_slug: claims.tenant_slug.clone(),
            iat,
            exp: Some(iat + ttl_secs),
        };

        let payload =
            serde_json::to_vec(&set).map_err(|e| TokenError::Encoding(e.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(HEADER_JSON),
            URL_SAFE_NO_PAD.encode(payload)
        );

        let mut mac = self.mac();
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{signing_input}.{signature}"))
    }

    pub fn issue(&self, claims: &SessionClaims, ttl_secs: i64) -> Result<String, TokenError> {
        self.issue_at(claims, ttl_secs, Utc::now())
    }

    /// Verify integrity and expiry, returning the decoded claim set.
    ///
    /// Expiry is fixed to one side: a token is expired iff `now > exp`, so a
    /// decode at exactly `exp` still succeeds.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<ClaimSet, TokenError> {
        let mut segments = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed);
        };
        if header.is_empty() || payload.is_empty() || signature.is_empty() {
            return Err(TokenError::Malformed);
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::SignatureMismatch)?;

        let mut mac = self.mac();
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());
        // Constant-time comparison; a generic byte equality would leak timing.
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::SignatureMismatch)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::Malformed)?;
        let set: ClaimSet =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if set.exp.is_some_and(|exp| now.timestamp() > exp) {
            return Err(TokenError::Expired);
        }

        Ok(set)
    }

    pub fn decode(&self, token: &str) -> Result<ClaimSet, TokenError> {
        self.decode_at(token, Utc::now())
    }
}
