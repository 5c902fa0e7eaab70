//! Save-authorization tokens for the options form.
//!
//! Tokens use the format: `base64url(payload).base64url(signature)`
//!
//! The payload is a JSON object containing:
//! - `act`: the action the token authorizes (e.g. `input`)
//! - `tick`: `floor(issued_at / (lifetime / 2))`
//!
//! The Ed25519 signature covers the base64url-encoded payload string. A
//! token is accepted during the tick it was issued in and the one after, so
//! it stays valid for between half and all of the configured lifetime.

use crate::error::{OptionsError, OptionsResult};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The decoded token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub act: String,
    pub tick: i64,
}

/// Issues and verifies tokens for one action.
pub struct TokenIssuer {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
    action: String,
    lifetime_secs: i64,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("action", &self.action)
            .field("lifetime_secs", &self.lifetime_secs)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Creates an issuer with a freshly generated key.
    ///
    /// Tokens issued by one process are not accepted by another unless both
    /// are built with [`TokenIssuer::from_seed`] and the same seed.
    pub fn generate(action: &str, lifetime_secs: i64) -> Self {
        Self::from_seed(rand::random::<[u8; 32]>(), action, lifetime_secs)
    }

    /// Creates an issuer from a fixed 32-byte seed.
    pub fn from_seed(seed: [u8; 32], action: &str, lifetime_secs: i64) -> Self {
        let signing_key = SigningKey::from_bytes(&seed);
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
            action: action.to_string(),
            lifetime_secs: lifetime_secs.max(2),
        }
    }

    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    #[must_use]
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime_secs
    }

    fn tick_at(&self, now: i64) -> i64 {
        now.div_euclid(self.lifetime_secs / 2)
    }

    /// Issues a token valid from `now`.
    pub fn issue_at(&self, now: i64) -> String {
        let payload = TokenPayload {
            act: self.action.clone(),
            tick: self.tick_at(now),
        };
        // A two-field struct of a String and an i64 always serializes.
        let json = serde_json::to_vec(&payload).unwrap_or_default();
        let payload_b64 = URL_SAFE_NO_PAD.encode(json);
        let signature = self.signing_key.sign(payload_b64.as_bytes());
        let sig_b64 = URL_SAFE_NO_PAD.encode(signature.to_bytes());
        format!("{payload_b64}.{sig_b64}")
    }

    /// Issues a token valid from the current time.
    pub fn issue(&self) -> String {
        self.issue_at(chrono::Utc::now().timestamp())
    }

    /// Verifies a token at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Authorization`] if the token is malformed, not
    /// signed by this issuer, for another action, or expired.
    pub fn verify_at(&self, token: &str, now: i64) -> OptionsResult<TokenPayload> {
        let token = token.trim();
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 2 {
            return Err(OptionsError::Authorization(
                "token must have exactly two parts separated by a dot".to_string(),
            ));
        }
        let payload_b64 = parts[0];
        let signature_b64 = parts[1];

        let sig_bytes = URL_SAFE_NO_PAD.decode(signature_b64).map_err(|e| {
            OptionsError::Authorization(format!("invalid signature base64: {e}"))
        })?;
        let signature = Signature::from_slice(&sig_bytes)
            .map_err(|_| OptionsError::Authorization("invalid signature length".to_string()))?;

        self.verifying_key
            .verify(payload_b64.as_bytes(), &signature)
            .map_err(|_| OptionsError::Authorization("token signature invalid".to_string()))?;

        let payload_json = URL_SAFE_NO_PAD.decode(payload_b64).map_err(|e| {
            OptionsError::Authorization(format!("invalid payload base64: {e}"))
        })?;
        let payload: TokenPayload = serde_json::from_slice(&payload_json).map_err(|e| {
            OptionsError::Authorization(format!("invalid payload JSON: {e}"))
        })?;

        if payload.act != self.action {
            return Err(OptionsError::Authorization(format!(
                "token issued for action '{}'",
                payload.act
            )));
        }

        let current = self.tick_at(now);
        if payload.tick != current && payload.tick != current - 1 {
            return Err(OptionsError::Authorization("token expired".to_string()));
        }

        Ok(payload)
    }
}
