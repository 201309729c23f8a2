//! roster-api: HTTP front-end for the Roster employee directory.
//!
//! Exposes list/create/update/delete over `Employee` nodes. Handlers are
//! stateless; every request goes straight to the injected store.

pub mod env;
pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::{get, put};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the application router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/employees",
            get(handlers::list_employees)
                .post(handlers::create_employee)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/employees/:name",
            put(handlers::update_employee)
                .delete(handlers::delete_employee)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/health",
            get(handlers::health).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::unknown_route)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
