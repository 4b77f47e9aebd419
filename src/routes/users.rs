use actix_web::cookie::{Cookie, SameSite};
use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

use crate::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::services::AuthService;

pub const REFRESH_COOKIE: &str = "refresh_token";

/// The refresh token only ever travels in an HTTP-only, secure cookie; the
/// client-side script context never sees it.
fn refresh_cookie(token: String) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .finish()
}

/// Register a new user
///
/// Creates a user account, returns the access token in the body, and sets
/// the refresh token cookie.
#[post("/register")]
pub async fn register(
    service: web::Data<AuthService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let tokens = service.register(register_data.into_inner()).await?;

    Ok(HttpResponse::Created()
        .cookie(refresh_cookie(tokens.refresh_token))
        .json(AuthResponse {
            access_token: tokens.access_token,
        }))
}

/// Login user
///
/// Authenticates by username and password; responds identically to register.
#[post("/login")]
pub async fn login(
    service: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let tokens = service.login(login_data.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(tokens.refresh_token))
        .json(AuthResponse {
            access_token: tokens.access_token,
        }))
}

/// Refresh token pair
///
/// Reads the refresh token from its cookie and rotates the pair.
#[post("/refresh")]
pub async fn refresh(
    service: web::Data<AuthService>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let cookie = req
        .cookie(REFRESH_COOKIE)
        .ok_or_else(|| AppError::Unauthorized("Refresh token not found".into()))?;

    let tokens = service.refresh(cookie.value())?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(tokens.refresh_token))
        .json(AuthResponse {
            access_token: tokens.access_token,
        }))
}

/// Logout
///
/// Stateless: instructs the client to drop the refresh token cookie. No
/// server-side record changes.
#[post("/logout")]
pub async fn logout() -> impl Responder {
    let mut cookie = Cookie::build(REFRESH_COOKIE, "").path("/").finish();
    cookie.make_removal();

    HttpResponse::Ok().cookie(cookie).json(json!({
        "message": "Logged out"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    use crate::auth::TokenCodec;
    use crate::store::UserStore;
    use sqlx::postgres::PgPoolOptions;

    fn auth_service() -> AuthService {
        // Lazy pool: cookie-only paths never touch the database.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/taskboard_test")
            .unwrap();
        AuthService::new(
            UserStore::new(pool),
            TokenCodec::new("routes_test_secret", 30, 10080),
        )
    }

    #[actix_rt::test]
    async fn test_refresh_without_cookie_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(auth_service()))
                .service(refresh),
        )
        .await;

        let req = test::TestRequest::post().uri("/refresh").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_refresh_rotates_cookie_and_body() {
        let codec = TokenCodec::new("routes_test_secret", 30, 10080);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(auth_service()))
                .service(refresh),
        )
        .await;

        let refresh_token = codec.issue_refresh(5).unwrap();
        let req = test::TestRequest::post()
            .uri("/refresh")
            .cookie(Cookie::new(REFRESH_COOKIE, refresh_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let rotated = resp
            .response()
            .cookies()
            .find(|c| c.name() == REFRESH_COOKIE)
            .expect("rotated refresh cookie");
        assert_eq!(rotated.http_only(), Some(true));
        assert_eq!(rotated.secure(), Some(true));
        assert_eq!(
            codec.decode(rotated.value()).unwrap().user_id,
            5,
            "rotated cookie should carry the same subject"
        );

        let body: AuthResponse = test::read_body_json(resp).await;
        assert_eq!(codec.decode(&body.access_token).unwrap().user_id, 5);
    }

    #[actix_rt::test]
    async fn test_refresh_with_access_token_cookie_is_unauthorized() {
        let codec = TokenCodec::new("routes_test_secret", 30, 10080);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(auth_service()))
                .service(refresh),
        )
        .await;

        let access_token = codec.issue_access(5).unwrap();
        let req = test::TestRequest::post()
            .uri("/refresh")
            .cookie(Cookie::new(REFRESH_COOKIE, access_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_logout_removes_cookie() {
        let app = test::init_service(App::new().service(logout)).await;

        let req = test::TestRequest::post().uri("/logout").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let removal = resp
            .response()
            .cookies()
            .find(|c| c.name() == REFRESH_COOKIE)
            .expect("removal cookie");
        assert_eq!(removal.value(), "");

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Logged out");
    }
}
