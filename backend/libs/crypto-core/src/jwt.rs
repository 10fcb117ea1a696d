/// Shared JWT codec for Storefront services
///
/// Tokens are compact JWS strings signed with HS256 over a secret supplied by
/// configuration. The codec is a plain value: construct it once at startup and
/// hand it (behind an `Arc`) to whoever issues or validates tokens.
///
/// ## Security Design
///
/// - **HS256 ONLY**: tokens carrying any other `alg` are rejected as invalid signatures
/// - **No hardcoded keys**: the secret comes from the caller
/// - **Zero leeway**: a token is unusable from the second its `exp` passes
/// - **Fixed window**: expiry is stamped at issuance (24 hours) and never slides
///
/// ## Usage
///
/// ```rust
/// use crypto_core::jwt::{Claims, Role, TokenCodec};
/// use uuid::Uuid;
///
/// let codec = TokenCodec::new(b"a-secret-of-at-least-thirty-two-bytes!!").unwrap();
/// let claims = Claims::new(Uuid::new_v4(), "ana@example.com", "Ana", Role::Customer);
/// let token = codec.issue(&claims).unwrap();
/// assert_eq!(codec.decode(&token).unwrap(), claims);
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Constants
// ============================================================================

/// Lifetime of every issued token
pub const TOKEN_EXPIRY_HOURS: i64 = 24;

/// Shortest secret accepted by [`TokenCodec::new`]
pub const MIN_SECRET_LEN: usize = 32;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Data Structures
// ============================================================================

/// Authorization role carried inside every token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            other => Err(TokenError::Malformed(format!("unknown role '{other}'"))),
        }
    }
}

/// JWT Claims structure - standard claims plus Storefront identity fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Email address
    pub email: String,
    /// Display name, used for audit stamping
    pub full_name: String,
    /// Authorization role
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a user, valid for [`TOKEN_EXPIRY_HOURS`] from now
    pub fn new(user_id: Uuid, email: &str, full_name: &str, role: Role) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::hours(TOKEN_EXPIRY_HOURS);

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            role,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Seconds of validity left, clamped at zero
    pub fn remaining_secs(&self) -> u64 {
        let remaining = self.exp - Utc::now().timestamp();
        remaining.max(0) as u64
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token signature")]
    InvalidSignature,

    #[error("token expired")]
    Expired,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("signing key rejected: {0}")]
    InvalidKey(String),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

// ============================================================================
// Codec
// ============================================================================

/// Signs and verifies [`Claims`] with a shared HMAC secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &JWT_ALGORITHM)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Create a codec from the raw secret bytes
    ///
    /// ## Errors
    ///
    /// Returns `TokenError::InvalidKey` if the secret is shorter than
    /// [`MIN_SECRET_LEN`] bytes.
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(TokenError::InvalidKey(format!(
                "secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }

        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Sign claims into a compact token string
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(JWT_ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, then return the embedded claims
    ///
    /// ## Errors
    ///
    /// - `InvalidSignature` if the signature or algorithm does not match
    /// - `Expired` if `exp` is in the past
    /// - `Malformed` if the string cannot be parsed into claims
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}

// ============================================================================
// Tests
// ============================================================================
