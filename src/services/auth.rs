use crate::auth::token::{TokenAction, TokenCodec, TokenPair};
use crate::auth::{hash_password, verify_password, LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::models::NewUser;
use crate::store::UserStore;

/// Orchestrates registration, login, and refresh over the user store and
/// token codec. Session state lives entirely in token possession; there is
/// no server-side session record.
#[derive(Clone)]
pub struct AuthService {
    users: UserStore,
    codec: TokenCodec,
}

impl AuthService {
    pub fn new(users: UserStore, codec: TokenCodec) -> Self {
        Self { users, codec }
    }

    /// Creates a new user account and issues its first token pair.
    pub async fn register(&self, input: RegisterRequest) -> Result<TokenPair, AppError> {
        if self.users.get_by_username(&input.username).await?.is_some() {
            return Err(AppError::BadRequest("User already exists".into()));
        }

        let password = hash_password(&input.password)?;
        let user = self
            .users
            .insert(NewUser {
                first_name: input.first_name,
                last_name: input.last_name,
                username: input.username,
                password,
            })
            .await?;

        self.codec.issue_pair(user.id)
    }

    /// Authenticates a user by username and password.
    ///
    /// A missing username is `NotFound`; a failed password check is
    /// `Unauthorized`.
    pub async fn login(&self, input: LoginRequest) -> Result<TokenPair, AppError> {
        let user = self
            .users
            .get_by_username(&input.username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        if !verify_password(&input.password, &user.password)? {
            return Err(AppError::Unauthorized(
                "Incorrect username or password".into(),
            ));
        }

        self.codec.issue_pair(user.id)
    }

    /// Exchanges a valid refresh token for a freshly rotated pair.
    ///
    /// Stateless: the old refresh token is not invalidated, only
    /// time-bounded by its own expiry. Any decode failure or a non-refresh
    /// action tag yields `Unauthorized`.
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let user_id = self
            .codec
            .verify_action(refresh_token, TokenAction::Refresh)
            .map_err(|_| AppError::Unauthorized("Invalid refresh token".into()))?
            .ok_or_else(|| AppError::Unauthorized("Invalid token action".into()))?;

        self.codec.issue_pair(user_id)
    }
}
