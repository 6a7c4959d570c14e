//! Signed session tokens.
//!
//! Tokens are stateless HS256 JWTs binding an account's public ID and email
//! with a fixed 24-hour validity window. There is no server-side revocation
//! list: validity is purely signature + expiry, and logout is client-side
//! cookie deletion (a known design limitation, not a security property).
//!
//! The signing secret is process-wide configuration injected at startup.
//! Rotation currently means restarting with a new secret, which invalidates
//! outstanding tokens; dual-key verification is the extension point if
//! seamless rotation is ever needed.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use clementine_core::{Email, PublicId};

/// Token validity window.
pub const TOKEN_VALIDITY_HOURS: i64 = 24;

/// Claims carried in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account public ID (subject).
    pub sub: PublicId,
    /// Account email.
    pub email: Email,
    /// Issued-at timestamp (seconds).
    pub iat: i64,
    /// Expiry timestamp (seconds).
    pub exp: i64,
}

/// Errors that can occur issuing or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token's expiry timestamp has passed.
    #[error("token expired")]
    Expired,

    /// The signature does not match the payload.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The token is structurally invalid.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Token encoding failed.
    #[error("token creation failed: {0}")]
    Creation(String),
}

/// Issues and verifies session tokens with a process-wide secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenSigner {
    /// Create a signer from the configured secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
        }
    }

    /// Issue a token for an account, valid for 24 hours.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Creation` if encoding fails.
    pub fn issue(&self, public_id: PublicId, email: &Email) -> Result<String, TokenError> {
        self.issue_with_validity(public_id, email, Duration::hours(TOKEN_VALIDITY_HOURS))
    }

    /// Issue a token with an explicit validity window.
    ///
    /// Exposed at crate level so tests can mint soon-to-expire tokens.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Creation` if encoding fails.
    pub(crate) fn issue_with_validity(
        &self,
        public_id: PublicId,
        email: &Email,
        validity: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: public_id,
            email: email.clone(),
            iat: now.timestamp(),
            exp: (now + validity).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Creation(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` if the validity window has passed,
    /// `TokenError::InvalidSignature` if the payload was tampered with or
    /// signed with a different key, and `TokenError::Malformed` for
    /// structurally invalid input.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            }
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(&SecretString::from("kR8!vXq2#mZ9$wLp4&nJc7*uEy1@qBs5"))
    }

    fn email() -> Email {
        Email::parse("user@example.com").unwrap()
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let signer = signer();
        let id = PublicId::generate();

        let token = signer.issue(id, &email()).unwrap();
        let claims = signer.verify(&token).unwrap();

        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, email());
        assert_eq!(claims.exp - claims.iat, TOKEN_VALIDITY_HOURS * 3600);
    }

    #[test]
    fn test_expired_token() {
        let signer = signer();
        let token = signer
            .issue_with_validity(PublicId::generate(), &email(), Duration::seconds(-5))
            .unwrap();

        assert!(matches!(signer.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_wrong_key_is_invalid_signature() {
        let token = signer().issue(PublicId::generate(), &email()).unwrap();

        let other = TokenSigner::new(&SecretString::from("a9$Fq0&bTx5!hNe3#rWm8@kDv2^yGz6L"));
        assert!(matches!(
            other.verify(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let signer = signer();
        let token = signer.issue(PublicId::generate(), &email()).unwrap();

        // Swap the payload segment for one signed with another key
        let other = TokenSigner::new(&SecretString::from("a9$Fq0&bTx5!hNe3#rWm8@kDv2^yGz6L"));
        let forged = other.issue(PublicId::generate(), &email()).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_payload: Vec<&str> = forged.split('.').collect();
        parts[1] = forged_payload[1];
        let tampered = parts.join(".");

        assert!(matches!(
            signer.verify(&tampered),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(
            signer().verify("not-a-token"),
            Err(TokenError::Malformed(_))
        ));
    }
}
