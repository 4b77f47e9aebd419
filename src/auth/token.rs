use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Config;
use crate::error::AppError;

/// Purpose tag carried inside every token, checked on verification to
/// prevent token-type confusion (an access token cannot be replayed as a
/// refresh token and vice versa).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TokenAction {
    #[serde(rename = "access_token")]
    Access,
    #[serde(rename = "refresh_token")]
    Refresh,
}

/// Claims encoded within a JWT.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// The subject's user id.
    pub user_id: i32,
    /// Token purpose tag.
    pub action: TokenAction,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// An access/refresh token pair, always issued together at
/// register/login/refresh time.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Failure kinds for token decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// The signature does not match.
    Invalid,
    /// The token is past its `exp` claim.
    Expired,
    /// The token is structurally invalid.
    Malformed,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenError::Invalid => write!(f, "Invalid token"),
            TokenError::Expired => write!(f, "Expired token"),
            TokenError::Malformed => write!(f, "Malformed token"),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(error: jsonwebtoken::errors::Error) -> TokenError {
        match error.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::Invalid,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => TokenError::Malformed,
            _ => TokenError::Invalid,
        }
    }
}

/// Creates and validates signed, expiring action tokens.
///
/// Holds the signing keys and configured lifetimes; constructed once from
/// `Config` and shared. Tokens are signed with HS256 and are entirely
/// self-contained: validity is proven by signature and expiry alone, so
/// revocation before natural expiry is not supported.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl_minutes: i64,
    refresh_ttl_minutes: i64,
}

impl TokenCodec {
    pub fn new(secret: &str, access_ttl_minutes: i64, refresh_ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl_minutes,
            refresh_ttl_minutes,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.secret_key,
            config.access_token_expire_minutes,
            config.refresh_token_expire_minutes,
        )
    }

    /// Signs a token carrying `{user_id, action, exp = now + ttl}`.
    pub fn issue(
        &self,
        user_id: i32,
        action: TokenAction,
        ttl_minutes: i64,
    ) -> Result<String, AppError> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::minutes(ttl_minutes))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            user_id,
            action,
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to issue token: {}", e)))
    }

    pub fn issue_access(&self, user_id: i32) -> Result<String, AppError> {
        self.issue(user_id, TokenAction::Access, self.access_ttl_minutes)
    }

    pub fn issue_refresh(&self, user_id: i32) -> Result<String, AppError> {
        self.issue(user_id, TokenAction::Refresh, self.refresh_ttl_minutes)
    }

    /// Issues an access and refresh token together for the same subject.
    pub fn issue_pair(&self, user_id: i32) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue_access(user_id)?,
            refresh_token: self.issue_refresh(user_id)?,
        })
    }

    /// Verifies signature and expiry, returning the decoded claims.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }

    /// Decodes the token and returns the subject id only if its action tag
    /// matches `expected`. An action mismatch is a soft `Ok(None)`, distinct
    /// from decode failures which are hard errors.
    pub fn verify_action(
        &self,
        token: &str,
        expected: TokenAction,
    ) -> Result<Option<i32>, TokenError> {
        let claims = self.decode(token)?;
        if claims.action == expected {
            Ok(Some(claims.user_id))
        } else {
            Ok(None)
        }
    }
}
