use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    services::ServeDir,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::middleware::{make_span_with_request_id, request_id_middleware};
use crate::services::images::PUBLIC_PREFIX;

use super::handlers;
use super::AppState;

/// Default upload body limit when the caller does not specify one
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    create_router_with_limit(state, DEFAULT_BODY_LIMIT)
}

/// Creates the router with an explicit request body limit for uploads
pub fn create_router_with_limit(state: AppState, body_limit: usize) -> Router {
    let uploads = ServeDir::new(state.images.root());

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes())
        .nest_service(PUBLIC_PREFIX, uploads)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(make_span_with_request_id)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                ),
        )
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        // Users
        .route("/users", post(handlers::create_user))
        // Same endpoint with the trailing slash some clients send
        .route("/users/", post(handlers::create_user))
        .route("/users/:user_id", get(handlers::get_user))
        .route("/users/:user_id/photo", post(handlers::upload_user_photo))
        // Wardrobe
        .route(
            "/users/:user_id/clothing",
            get(handlers::get_user_wardrobe).post(handlers::add_clothing_item),
        )
        // Outfits
        .route(
            "/users/:user_id/outfits/generate",
            post(handlers::generate_outfit),
        )
        .route("/users/:user_id/outfits/save", post(handlers::save_outfit))
        .route("/users/:user_id/outfits", get(handlers::get_saved_outfits))
}
