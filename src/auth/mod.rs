pub mod extractors;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use extractors::AuthenticatedUser;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenAction, TokenCodec, TokenError, TokenPair};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    /// Must be between 3 and 32 characters, alphanumeric, underscores, or hyphens.
    #[validate(
        length(min = 3, max = 32),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Response body after successful registration, login, or refresh.
///
/// The access token travels in the body; the paired refresh token is set as
/// an HTTP-only cookie and never appears here.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            username: "some_user".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let short_password_login = LoginRequest {
            username: "some_user".to_string(),
            password: "123".to_string(),
        };
        assert!(short_password_login.validate().is_err());

        let empty_username_login = LoginRequest {
            username: "".to_string(),
            password: "password123".to_string(),
        };
        assert!(empty_username_login.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            username: "test_user-123".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_register.validate().is_ok());

        let invalid_username_register = RegisterRequest {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            username: "test user!".to_string(), // Contains space and exclamation
            password: "password123".to_string(),
        };
        assert!(invalid_username_register.validate().is_err());

        let short_username_register = RegisterRequest {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            username: "tu".to_string(),
            password: "password123".to_string(),
        };
        assert!(short_username_register.validate().is_err());

        let empty_first_name_register = RegisterRequest {
            first_name: "".to_string(),
            last_name: "User".to_string(),
            username: "test_user".to_string(),
            password: "password123".to_string(),
        };
        assert!(empty_first_name_register.validate().is_err());
    }
}
