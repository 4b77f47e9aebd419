use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::{TokenAction, TokenCodec};
use crate::error::AppError;

/// Extracts the authenticated user's id from the `Authorization` bearer
/// header on protected routes.
///
/// The bearer token is verified against the access action tag using the
/// `TokenCodec` registered in app data. Every failure mode — missing header,
/// malformed or expired token, wrong action tag — is coerced to
/// `AppError::Unauthorized` so decode internals never leak to clients.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub i32);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let codec = match req.app_data::<web::Data<TokenCodec>>() {
            Some(codec) => codec,
            None => {
                let err =
                    AppError::InternalServerError("Token codec not configured".to_string());
                return ready(Err(err.into()));
            }
        };

        let bearer = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let result = match bearer {
            Some(token) => match codec.verify_action(token, TokenAction::Access) {
                Ok(Some(user_id)) => Ok(AuthenticatedUser(user_id)),
                // A non-access action tag carries no identity for protected routes.
                Ok(None) => Err(AppError::Unauthorized("Invalid token action".to_string())),
                Err(_) => Err(AppError::Unauthorized("Invalid token".to_string())),
            },
            None => Err(AppError::Unauthorized("Missing token".to_string())),
        };

        ready(result.map_err(Into::into))
    }
}
