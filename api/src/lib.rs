// HTTP surface for the job board: axum router, handlers and auth middleware

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
