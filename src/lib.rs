use axum::Router;

use crate::state::AppState;

pub mod config;
pub mod consts;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_router(state.clone()))
        .with_state(state)
}
