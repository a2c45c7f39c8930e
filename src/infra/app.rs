use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{self};
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use crate::adapter::http::docs::{docs_ui, openapi_json};
use crate::adapter::http::middleware::auth::{auth_middleware, session_cookie_middleware};
use crate::adapter::http::routes::auth::{callback, current_user, login, logout};
use crate::adapter::http::routes::demo::weather_forecast;
use crate::infra::config::AppConfig;
use crate::infra::state::AppState;

fn build_cors(config: &AppConfig) -> CorsLayer {
    // Exactly one origin, and always credentialed; a wildcard here would be
    // rejected by browsers anyway once credentials are allowed.
    let origins: Vec<http::HeaderValue> = [config.application.frontend_url.as_str()]
        .iter()
        .filter_map(|s| {
            s.parse::<http::HeaderValue>()
                .map_err(|e| {
                    tracing::warn!("Failed to parse origin '{}': {}", s, e);
                })
                .ok()
        })
        .collect();

    let methods = if config.is_production() {
        vec![http::Method::GET, http::Method::POST]
    } else {
        vec![
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
        ]
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

pub fn auth_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/logout", post(logout));

    let protected_routes = Router::new()
        .route("/user", get(current_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), session_cookie_middleware))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(public_routes).merge(protected_routes)
}

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_router(state))
        .route("/weatherforecast", get(weather_forecast))
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(docs_ui))
}

pub fn create_app(config: &AppConfig, state: AppState) -> Router {
    let cors = build_cors(config);
    Router::new()
        .merge(router(state.clone()))
        .with_state(state.clone())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &http::Request<_>| {
                    let request_id = Uuid::now_v7();
                    tracing::info_span!(
                        "http-request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                        request_id = %request_id
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
