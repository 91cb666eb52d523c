use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use questboard_core::SqliteStore;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

pub mod error;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<SqliteStore>>,
}

impl AppState {
    pub fn new(store: SqliteStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/healthz", get(healthz))
        .route(
            "/characters",
            post(routes::characters::create_character).get(routes::characters::list_characters),
        )
        .route(
            "/characters/{character_id}",
            get(routes::characters::get_character),
        )
        .route(
            "/characters/{character_id}/missions",
            get(routes::characters::get_character_missions),
        )
        .route(
            "/missions",
            post(routes::missions::create_mission).get(routes::missions::list_missions),
        )
        .route("/missions/{mission_id}", get(routes::missions::get_mission))
        .route(
            "/missions/{mission_id}/accept",
            post(routes::missions::accept_mission),
        )
        .route(
            "/missions/{mission_id}/start",
            post(routes::missions::start_mission),
        )
        .route(
            "/missions/{mission_id}/complete",
            post(routes::missions::complete_mission),
        )
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn welcome() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to the Questboard mission API",
        "health": "/healthz",
    }))
}

async fn healthz() -> &'static str {
    "ok"
}
