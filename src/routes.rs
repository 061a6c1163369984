use crate::auth::{handlers as auth_handlers, middleware::require_auth};
use crate::config::SessionLayer;
use crate::handlers;
use crate::middleware::add_security_headers;
use crate::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Routes under `/api`, without layers.
pub fn api_routes() -> Router<AppState> {
    let protected_routes = Router::new()
        .route("/account/me", get(auth_handlers::current_account_handler))
        .layer(middleware::from_fn(require_auth));

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route(
            "/account",
            get(handlers::get_account_handler).post(handlers::create_account_handler),
        )
        .route("/account/login", post(auth_handlers::login_handler))
        .route("/account/logout", post(auth_handlers::logout_handler))
        .merge(protected_routes)
}

/// CORS for the browser front end, which runs on its own origin.
pub fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600));

    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid CORS_ORIGIN {:?}", origin);
            layer
        }
    }
}

pub fn build_app(state: AppState, session_layer: SessionLayer, cors: CorsLayer) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(session_layer)
        .layer(middleware::from_fn(add_security_headers))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
