use axum::extract::{Path, Query, State};
use axum::Json;
use questboard_core::{
    CharacterId, CharacterRecord, MissionQueue, NewCharacter, QueueEntryRecord,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::ListQuery;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCharacterRequest {
    pub name: String,
    #[serde(default = "default_level")]
    pub level: i64,
    #[serde(default)]
    pub experience: i64,
}

fn default_level() -> i64 {
    1
}

#[derive(Debug, Serialize)]
pub struct CharacterDetailResponse {
    #[serde(flatten)]
    pub character: CharacterRecord,
    pub mission_count: u64,
    pub pending_missions: u64,
}

pub async fn create_character(
    State(state): State<AppState>,
    Json(request): Json<CreateCharacterRequest>,
) -> Result<Json<CharacterRecord>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }

    let mut store = state.store.lock().await;
    let character = store.insert_character(NewCharacter {
        name: request.name,
        level: request.level,
        experience: request.experience,
    })?;
    tracing::info!(character_id = %character.id, name = %character.name, "character created");

    Ok(Json(character))
}

pub async fn list_characters(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CharacterRecord>>, ApiError> {
    let store = state.store.lock().await;
    let characters = store.list_characters(query.skip, query.limit())?;
    Ok(Json(characters))
}

pub async fn get_character(
    State(state): State<AppState>,
    Path(character_id): Path<i64>,
) -> Result<Json<CharacterDetailResponse>, ApiError> {
    let character_id = CharacterId::new(character_id);
    let mut store = state.store.lock().await;

    let character = store
        .fetch_character(character_id)?
        .ok_or_else(|| ApiError::not_found("character not found"))?;
    let mission_count = store.count_assignments(character_id)?;
    let pending_missions = MissionQueue::new(&mut store, character_id).size()?;

    Ok(Json(CharacterDetailResponse {
        character,
        mission_count,
        pending_missions,
    }))
}

pub async fn get_character_missions(
    State(state): State<AppState>,
    Path(character_id): Path<i64>,
) -> Result<Json<Vec<QueueEntryRecord>>, ApiError> {
    let character_id = CharacterId::new(character_id);
    let store = state.store.lock().await;

    if store.fetch_character(character_id)?.is_none() {
        return Err(ApiError::not_found("character not found"));
    }
    let entries = store.character_queue_entries(character_id)?;

    Ok(Json(entries))
}
