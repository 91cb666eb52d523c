use axum::extract::{Path, Query, State};
use axum::Json;
use questboard_core::{
    AssignmentRecord, CharacterId, MissionId, MissionQueue, MissionRecord, NewMission,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::routes::ListQuery;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateMissionRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub xp_reward: i64,
    #[serde(default = "default_difficulty")]
    pub difficulty: i64,
}

fn default_difficulty() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub character_id: i64,
}

pub async fn create_mission(
    State(state): State<AppState>,
    Json(request): Json<CreateMissionRequest>,
) -> Result<Json<MissionRecord>, ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::bad_request("title is required"));
    }

    let mut store = state.store.lock().await;
    let mission = store.insert_mission(NewMission {
        title: request.title,
        description: request.description,
        xp_reward: request.xp_reward,
        difficulty: request.difficulty,
    })?;
    tracing::info!(mission_id = %mission.id, title = %mission.title, "mission created");

    Ok(Json(mission))
}

pub async fn list_missions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<MissionRecord>>, ApiError> {
    let store = state.store.lock().await;
    let missions = store.list_missions(query.skip, query.limit())?;
    Ok(Json(missions))
}

pub async fn get_mission(
    State(state): State<AppState>,
    Path(mission_id): Path<i64>,
) -> Result<Json<MissionRecord>, ApiError> {
    let store = state.store.lock().await;
    let mission = store
        .fetch_mission(MissionId::new(mission_id))?
        .ok_or_else(|| ApiError::not_found("mission not found"))?;
    Ok(Json(mission))
}

pub async fn accept_mission(
    State(state): State<AppState>,
    Path(mission_id): Path<i64>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<AssignmentRecord>, ApiError> {
    let mission_id = MissionId::new(mission_id);
    let character_id = CharacterId::new(query.character_id);
    let mut store = state.store.lock().await;

    if store.fetch_character(character_id)?.is_none() {
        return Err(ApiError::not_found("character not found"));
    }

    let assignment = MissionQueue::new(&mut store, character_id).enqueue(mission_id)?;
    tracing::info!(
        character_id = %character_id,
        mission_id = %mission_id,
        position = assignment.position,
        "mission accepted"
    );

    Ok(Json(assignment))
}

pub async fn start_mission(
    State(state): State<AppState>,
    Path(mission_id): Path<i64>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<AssignmentRecord>, ApiError> {
    let mission_id = MissionId::new(mission_id);
    let character_id = CharacterId::new(query.character_id);
    let mut store = state.store.lock().await;

    if store.fetch_mission(mission_id)?.is_none() {
        return Err(ApiError::not_found("mission not found"));
    }
    if store.fetch_character(character_id)?.is_none() {
        return Err(ApiError::not_found("character not found"));
    }

    let started = MissionQueue::new(&mut store, character_id)
        .start_next()?
        .ok_or_else(|| ApiError::not_found("no pending missions to start"))?;
    tracing::info!(
        character_id = %character_id,
        assignment_id = %started.id,
        "mission started"
    );

    Ok(Json(started))
}

pub async fn complete_mission(
    State(state): State<AppState>,
    Path(mission_id): Path<i64>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<AssignmentRecord>, ApiError> {
    let mission_id = MissionId::new(mission_id);
    let character_id = CharacterId::new(query.character_id);
    let mut store = state.store.lock().await;

    if store.fetch_mission(mission_id)?.is_none() {
        return Err(ApiError::not_found("mission not found"));
    }
    if store.fetch_character(character_id)?.is_none() {
        return Err(ApiError::not_found("character not found"));
    }

    let completed = MissionQueue::new(&mut store, character_id)
        .dequeue()?
        .ok_or_else(|| ApiError::not_found("mission queue is empty"))?;

    let reward = store
        .fetch_mission(completed.mission_id)?
        .ok_or_else(|| ApiError::internal("completed assignment references a missing mission"))?
        .xp_reward;
    store.award_experience(character_id, reward)?;
    tracing::info!(
        character_id = %character_id,
        assignment_id = %completed.id,
        xp_reward = reward,
        "mission completed"
    );

    Ok(Json(completed))
}
