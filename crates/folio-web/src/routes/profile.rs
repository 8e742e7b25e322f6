use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use folio_core::model::{ProjectEntry, QaEntry};

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile", get(profile))
        .route("/api/projects", get(projects))
}

async fn profile(State(state): State<Arc<AppState>>) -> Json<Vec<QaEntry>> {
    let (profile, _, _) = state.chat.knowledge().tables();
    Json(profile.to_vec())
}

async fn projects(State(state): State<Arc<AppState>>) -> Json<Vec<ProjectEntry>> {
    let (_, projects, _) = state.chat.knowledge().tables();
    Json(projects.to_vec())
}
