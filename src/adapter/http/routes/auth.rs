use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header::{HeaderMap, LOCATION, SET_COOKIE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::forwarded::callback_url;
use crate::adapter::http::middleware::auth::{
    build_logout_cookie, build_session_cookie, session_token_from_headers,
};
use crate::adapter::http::middleware::extractor::AuthUser;
use crate::adapter::http::schema::auth::{CallbackQuery, LoginQuery, UserResponse};
use crate::application::app_error::AppResult;
use crate::application::dto::auth::{BeginLoginDTO, CompleteLoginDTO, SessionTokenDTO};
use crate::application::interactors::login::{BeginLoginInteractor, CompleteLoginInteractor};
use crate::application::interactors::session::LogoutInteractor;
use crate::infra::config::AppConfig;

#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = "Auth",
    params(LoginQuery),
    responses(
        (status = 302, description = "Redirect to the identity provider"),
        (status = 400, description = "Provider credentials not configured", body = ErrorResponse)
    )
)]
pub async fn login(
    interactor: BeginLoginInteractor,
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<LoginQuery>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let dto = BeginLoginDTO {
        return_to: query.return_to,
        callback_url: callback_url(&headers, &config),
    };
    let redirect = interactor.execute(dto).await?;
    Ok((StatusCode::FOUND, [(LOCATION, redirect.location)]))
}

#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = "Auth",
    params(CallbackQuery),
    responses(
        (status = 302, description = "Session established, redirect into the frontend; \
            on any failure, redirect to the frontend login route with a generic error")
    )
)]
pub async fn callback(
    interactor: CompleteLoginInteractor,
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<CallbackQuery>,
    headers: HeaderMap,
) -> Response {
    let dto = CompleteLoginDTO {
        state: query.state,
        code: query.code,
        error: query.error,
        callback_url: callback_url(&headers, &config),
    };
    match interactor.execute(dto).await {
        Ok(completed) => {
            let cookie = build_session_cookie(&completed.session_id, &config.session);
            let location = config.frontend_route(&completed.return_to);
            (StatusCode::FOUND, [(SET_COOKIE, cookie), (LOCATION, location)]).into_response()
        }
        Err(err) => {
            // Whatever went wrong, the browser only learns that login failed.
            warn!("Login callback failed: {err}");
            let location = config.frontend_route("/login?error=authentication_failed");
            (StatusCode::FOUND, [(LOCATION, location)]).into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = "Auth",
    responses(
        (status = 200, description = "Identity of the current session", body = UserResponse),
        (status = 401, description = "No valid session", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn current_user(auth_user: AuthUser) -> AppResult<impl IntoResponse> {
    Ok((
        StatusCode::OK,
        Json(UserResponse {
            name: auth_user.name,
            email: auth_user.email,
            picture: auth_user.picture,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses(
        (status = 302, description = "Session destroyed (if any), cookie cleared, \
            redirect to the frontend root")
    )
)]
pub async fn logout(
    interactor: LogoutInteractor,
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    // Logout never demands a live session: destroying nothing and clearing
    // the cookie is the same observable outcome as a real logout.
    if let Some(token) = session_token_from_headers(&headers, &config.session.cookie_name) {
        interactor.execute(SessionTokenDTO { token }).await?;
    }
    let cookie = build_logout_cookie(&config.session);
    let location = config.frontend_route("/");
    Ok((StatusCode::FOUND, [(SET_COOKIE, cookie), (LOCATION, location)]))
}
