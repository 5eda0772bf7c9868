pub mod app_state;
pub mod configuration;
pub mod errors;
pub mod form;
mod routes;
pub mod store;
pub mod telemetry;

use crate::app_state::AppState;
use crate::store::Store;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub fn create_app(store: Store) -> (Router, AppState) {
    let app_state = AppState::init(store);
    let app = Router::new()
        .route("/health_check", get(routes::health_check))
        .route("/api/contact", post(routes::contact))
        .layer(CatchPanicLayer::custom(routes::handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state.clone());
    (app, app_state)
}
