//! Session token module for the news service
//!
//! Sessions are stateless JWTs signed with HS256. The same process issues
//! and validates them, so a single shared secret is used instead of a key pair.
//!
//! ## Security Design
//!
//! - **HS256 ONLY**: validation pins the algorithm, no `alg` negotiation
//! - **No hardcoded keys**: the secret is provided by configuration
//! - **Minimum secret length**: secrets shorter than 32 bytes are refused
//! - **Expiry enforced**: `exp` is always validated
//!
//! ## Usage
//!
//! ```rust
//! use crypto_core::jwt::SessionKeys;
//! use uuid::Uuid;
//!
//! let keys = SessionKeys::from_secret(b"0123456789abcdef0123456789abcdef", 24).unwrap();
//! let token = keys.issue(Uuid::new_v4(), "reader").unwrap();
//! assert!(keys.validate(&token).is_ok());
//! ```
use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Constants
// ============================================================================

const MIN_SECRET_BYTES: usize = 32;

const SESSION_TOKEN_TYPE: &str = "session";

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Data Structures
// ============================================================================

/// JWT claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type, always "session"
    pub token_type: String,
    /// Username at the time of login
    pub username: String,
}

/// Signing and verification keys plus the session lifetime
#[derive(Clone)]
pub struct SessionKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("secret", &"[REDACTED]")
            .field("ttl_hours", &self.ttl.num_hours())
            .finish()
    }
}

impl SessionKeys {
    /// Build keys from a shared secret
    ///
    /// ## Errors
    ///
    /// Returns error if the secret is shorter than 32 bytes or the TTL is not positive.
    pub fn from_secret(secret: &[u8], ttl_hours: i64) -> Result<Self> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(anyhow!(
                "JWT secret must be at least {MIN_SECRET_BYTES} bytes, got {}",
                secret.len()
            ));
        }
        if ttl_hours <= 0 {
            return Err(anyhow!("Session TTL must be positive, got {ttl_hours}h"));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: Duration::hours(ttl_hours),
        })
    }

    /// Session lifetime in seconds, used for cookie `Max-Age`
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    // ========================================================================
    // Token Generation
    // ========================================================================

    /// Issue a session token for a user
    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            token_type: SESSION_TOKEN_TYPE.to_string(),
            username: username.to_string(),
        };

        self.encode_claims(&claims)
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(JWT_ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| anyhow!("Failed to generate session token: {e}"))
    }

    // ========================================================================
    // Token Validation
    // ========================================================================

    /// Validate and decode a session token
    ///
    /// ## Errors
    ///
    /// Returns error if:
    /// - Token signature is invalid
    /// - Token is expired
    /// - Token format is malformed
    /// - Token is not a session token
    pub fn validate(&self, token: &str) -> Result<TokenData<Claims>> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| anyhow!("Token validation failed: {e}"))?;

        if data.claims.token_type != SESSION_TOKEN_TYPE {
            return Err(anyhow!(
                "Unexpected token type: {}",
                data.claims.token_type
            ));
        }

        Ok(data)
    }

    /// Extract the user ID from a validated token
    pub fn user_id(&self, token: &str) -> Result<Uuid> {
        let token_data = self.validate(token)?;
        Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| anyhow!("Invalid user ID format in token: {e}"))
    }
}

// ============================================================================
// Tests
// ============================================================================
