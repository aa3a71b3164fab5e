use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::{authenticate_jwt, ensure_admin};
use crate::state::AppState;

/// Create the main application router with all routes and middleware
#[tracing::instrument(skip(state))]
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (anyone may read)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/jobs", get(handlers::jobs::list_jobs))
        .route("/jobs/:id", get(handlers::jobs::get_job));

    // Admin routes, rejected before the handler unless the token carries isAdmin
    let admin_routes = Router::new()
        .route("/jobs", post(handlers::jobs::create_job))
        .route(
            "/jobs/:id",
            axum::routing::patch(handlers::jobs::update_job).delete(handlers::jobs::delete_job),
        )
        .route_layer(axum::middleware::from_fn(ensure_admin));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    authenticate_jwt,
                )),
        )
        .with_state(state)
}
