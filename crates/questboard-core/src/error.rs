use thiserror::Error;

use crate::ids::{CharacterId, MissionId};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("character {0} not found")]
    CharacterNotFound(CharacterId),
    #[error("mission {0} not found")]
    MissionNotFound(MissionId),
}
