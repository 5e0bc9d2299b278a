//! Contains all the routes that this application can handle.

mod api;
mod home;

// re-export errors
pub use api::{count::CountError, subscribe::SubscribeError};

use crate::{web, AppState};
use home::home;

use axum::{
    http::{Method, StatusCode},
    routing::{get, post},
    Router,
};

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Answers every method a route doesn't handle, so the client still gets a JSON body.
async fn method_not_allowed(method: Method) -> web::Error {
    web::Error::MethodNotAllowed(method)
}

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .with_state(app_state.clone())
        .nest("/api", api_routes(app_state))
        .route("/health-check", get(health_check))
}

/// API - Routes nested under "/api" path
fn api_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/subscribe",
            post(api::subscribe).fallback(method_not_allowed),
        )
        .route("/count", get(api::count).fallback(method_not_allowed))
        .with_state(app_state)
}
