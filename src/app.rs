use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full HTTP surface. Cross-cutting layers (CORS, tracing, body limits) are
/// added by the caller.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(user_routes())
        .merge(profile_routes(state.clone()))
        .with_state(state)
}

fn user_routes() -> Router<AppState> {
    Router::new().route("/api/users", post(public::users::register))
}

fn profile_routes(state: AppState) -> Router<AppState> {
    use public::profile as open;
    use protected::profile as own;

    let protected = Router::new()
        .route("/api/profile/me", get(own::me))
        .route("/api/profile", post(own::upsert).delete(own::delete))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    Router::new()
        .route("/api/profile", get(open::list))
        .route("/api/profile/users/:user_id", get(open::by_user))
        .merge(protected)
}

/// CORS policy from config; an empty origin list allows any origin
pub fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "DevConnector API",
        "version": version,
        "endpoints": {
            "users": "POST /api/users (public)",
            "profiles": "GET /api/profile, GET /api/profile/users/:user_id (public)",
            "own_profile": "GET /api/profile/me, POST /api/profile, DELETE /api/profile (bearer token)",
            "health": "GET /health (public)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
