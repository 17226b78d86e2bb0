use crate::handlers;
use crate::middleware::cors;
use crate::state::AppState;
use axum::{middleware, Router};

/// Management routes are registered before the DoH catch-all; static path
/// segments take precedence over `/{user_id}`.
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .merge(handlers::rules::routes())
        .merge(handlers::doh::routes())
        .layer(middleware::from_fn(cors::cors))
        .with_state(state)
}
