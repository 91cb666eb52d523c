use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::CoreError;
use crate::ids::{AssignmentId, CharacterId, MissionId};
use crate::status::MissionStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub name: String,
    pub level: i64,
    pub experience: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCharacter {
    pub name: String,
    pub level: i64,
    pub experience: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRecord {
    pub id: MissionId,
    pub title: String,
    pub description: String,
    pub xp_reward: i64,
    pub difficulty: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMission {
    pub title: String,
    pub description: String,
    pub xp_reward: i64,
    pub difficulty: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub id: AssignmentId,
    pub character_id: CharacterId,
    pub mission_id: MissionId,
    pub position: i64,
    pub status: MissionStatus,
    pub accepted_at: String,
    pub completed_at: Option<String>,
}

/// One row of an owner's queue joined with the display fields of the
/// referenced mission. Built for the HTTP layer; the queue facade itself
/// never performs this join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntryRecord {
    pub id: AssignmentId,
    pub status: MissionStatus,
    pub position: i64,
    pub accepted_at: String,
    pub completed_at: Option<String>,
    pub character_id: CharacterId,
    pub character_name: String,
    pub mission_id: MissionId,
    pub title: String,
    pub description: String,
    pub xp_reward: i64,
    pub difficulty: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub busy_timeout_ms: u64,
    pub wal_enabled: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
            wal_enabled: true,
        }
    }
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        Self::open_with(path, StoreOptions::default())
    }

    pub fn open_with(path: impl AsRef<Path>, options: StoreOptions) -> Result<Self, CoreError> {
        let conn = Connection::open(path).map_err(|err| CoreError::Persistence(err.to_string()))?;
        if options.wal_enabled {
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(|err| CoreError::Persistence(err.to_string()))?;
        }
        conn.busy_timeout(std::time::Duration::from_millis(options.busy_timeout_ms))
            .map_err(|err| CoreError::Persistence(err.to_string()))?;
        let store = Self { conn };
        store.bootstrap()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self, CoreError> {
        let conn =
            Connection::open_in_memory().map_err(|err| CoreError::Persistence(err.to_string()))?;
        let store = Self { conn };
        store.bootstrap()?;
        Ok(store)
    }

    fn bootstrap(&self) -> Result<(), CoreError> {
        self.conn
            .execute_batch(
                "
                PRAGMA foreign_keys = ON;

                CREATE TABLE IF NOT EXISTS characters (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    level INTEGER NOT NULL DEFAULT 1,
                    experience INTEGER NOT NULL DEFAULT 0,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS missions (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL DEFAULT '',
                    xp_reward INTEGER NOT NULL DEFAULT 0,
                    difficulty INTEGER NOT NULL DEFAULT 1,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS mission_assignments (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    character_id INTEGER NOT NULL REFERENCES characters(id),
                    mission_id INTEGER NOT NULL REFERENCES missions(id),
                    position INTEGER NOT NULL,
                    status TEXT NOT NULL DEFAULT 'pending',
                    accepted_at TEXT NOT NULL,
                    completed_at TEXT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_assignments_queue
                    ON mission_assignments(character_id, status, position);
                ",
            )
            .map_err(|err| CoreError::Persistence(err.to_string()))
    }

    pub fn insert_character(&mut self, new: NewCharacter) -> Result<CharacterRecord, CoreError> {
        let created_at = now_rfc3339()?;
        self.conn
            .execute(
                "INSERT INTO characters (name, level, experience, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![new.name, new.level, new.experience, created_at],
            )
            .map_err(|err| CoreError::Persistence(err.to_string()))?;

        Ok(CharacterRecord {
            id: CharacterId::new(self.conn.last_insert_rowid()),
            name: new.name,
            level: new.level,
            experience: new.experience,
            created_at,
        })
    }

    pub fn fetch_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Option<CharacterRecord>, CoreError> {
        self.conn
            .query_row(
                "SELECT id, name, level, experience, created_at FROM characters WHERE id = ?1",
                params![character_id.get()],
                map_character_row,
            )
            .optional()
            .map_err(|err| CoreError::Persistence(err.to_string()))
    }

    pub fn list_characters(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<CharacterRecord>, CoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT id, name, level, experience, created_at
                FROM characters
                ORDER BY id ASC
                LIMIT ?1 OFFSET ?2
                ",
            )
            .map_err(|err| CoreError::Persistence(err.to_string()))?;

        let rows = stmt
            .query_map(params![limit, skip], map_character_row)
            .map_err(|err| CoreError::Persistence(err.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|err| CoreError::Persistence(err.to_string()))
    }

    pub fn award_experience(
        &mut self,
        character_id: CharacterId,
        amount: i64,
    ) -> Result<CharacterRecord, CoreError> {
        let changed = self
            .conn
            .execute(
                "UPDATE characters SET experience = experience + ?2 WHERE id = ?1",
                params![character_id.get(), amount],
            )
            .map_err(|err| CoreError::Persistence(err.to_string()))?;
        if changed == 0 {
            return Err(CoreError::CharacterNotFound(character_id));
        }

        self.fetch_character(character_id)?
            .ok_or_else(|| CoreError::CharacterNotFound(character_id))
    }

    pub fn insert_mission(&mut self, new: NewMission) -> Result<MissionRecord, CoreError> {
        let created_at = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO missions (title, description, xp_reward, difficulty, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ",
                params![
                    new.title,
                    new.description,
                    new.xp_reward,
                    new.difficulty,
                    created_at
                ],
            )
            .map_err(|err| CoreError::Persistence(err.to_string()))?;

        Ok(MissionRecord {
            id: MissionId::new(self.conn.last_insert_rowid()),
            title: new.title,
            description: new.description,
            xp_reward: new.xp_reward,
            difficulty: new.difficulty,
            created_at,
        })
    }

    pub fn fetch_mission(&self, mission_id: MissionId) -> Result<Option<MissionRecord>, CoreError> {
        self.conn
            .query_row(
                "
                SELECT id, title, description, xp_reward, difficulty, created_at
                FROM missions
                WHERE id = ?1
                ",
                params![mission_id.get()],
                map_mission_row,
            )
            .optional()
            .map_err(|err| CoreError::Persistence(err.to_string()))
    }

    pub fn list_missions(&self, skip: u64, limit: u64) -> Result<Vec<MissionRecord>, CoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT id, title, description, xp_reward, difficulty, created_at
                FROM missions
                ORDER BY id ASC
                LIMIT ?1 OFFSET ?2
                ",
            )
            .map_err(|err| CoreError::Persistence(err.to_string()))?;

        let rows = stmt
            .query_map(params![limit, skip], map_mission_row)
            .map_err(|err| CoreError::Persistence(err.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|err| CoreError::Persistence(err.to_string()))
    }

    pub fn count_assignments(&self, character_id: CharacterId) -> Result<u64, CoreError> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM mission_assignments WHERE character_id = ?1",
                params![character_id.get()],
                |row| row.get(0),
            )
            .map_err(|err| CoreError::Persistence(err.to_string()))?;

        u64::try_from(count).map_err(|_| {
            CoreError::Persistence(format!("assignment count '{count}' is out of range"))
        })
    }

    pub fn active_assignment_count(&self, character_id: CharacterId) -> Result<u64, CoreError> {
        let count: i64 = self
            .conn
            .query_row(
                "
                SELECT COUNT(*)
                FROM mission_assignments
                WHERE character_id = ?1 AND status IN (?2, ?3)
                ",
                params![
                    character_id.get(),
                    MissionStatus::Pending.as_str(),
                    MissionStatus::InProgress.as_str()
                ],
                |row| row.get(0),
            )
            .map_err(|err| CoreError::Persistence(err.to_string()))?;

        u64::try_from(count).map_err(|_| {
            CoreError::Persistence(format!("assignment count '{count}' is out of range"))
        })
    }

    pub fn max_assignment_position(
        &self,
        character_id: CharacterId,
    ) -> Result<Option<i64>, CoreError> {
        let max_position: Option<i64> = self
            .conn
            .query_row(
                "SELECT MAX(position) FROM mission_assignments WHERE character_id = ?1",
                params![character_id.get()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| CoreError::Persistence(err.to_string()))?
            .flatten();

        Ok(max_position)
    }

    pub fn insert_assignment(
        &mut self,
        character_id: CharacterId,
        mission_id: MissionId,
        position: i64,
        accepted_at: String,
    ) -> Result<AssignmentRecord, CoreError> {
        let mission_exists: i64 = self
            .conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM missions WHERE id = ?1)",
                params![mission_id.get()],
                |row| row.get(0),
            )
            .map_err(|err| CoreError::Persistence(err.to_string()))?;
        if mission_exists == 0 {
            return Err(CoreError::MissionNotFound(mission_id));
        }

        self.conn
            .execute(
                "
                INSERT INTO mission_assignments (character_id, mission_id, position, status, accepted_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ",
                params![
                    character_id.get(),
                    mission_id.get(),
                    position,
                    MissionStatus::Pending.as_str(),
                    accepted_at
                ],
            )
            .map_err(|err| CoreError::Persistence(err.to_string()))?;

        Ok(AssignmentRecord {
            id: AssignmentId::new(self.conn.last_insert_rowid()),
            character_id,
            mission_id,
            position,
            status: MissionStatus::Pending,
            accepted_at,
            completed_at: None,
        })
    }

    pub fn fetch_assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> Result<Option<AssignmentRecord>, CoreError> {
        self.conn
            .query_row(
                "
                SELECT id, character_id, mission_id, position, status, accepted_at, completed_at
                FROM mission_assignments
                WHERE id = ?1
                ",
                params![assignment_id.get()],
                |row| map_assignment_row(row).map_err(to_from_sql_error),
            )
            .optional()
            .map_err(|err| CoreError::Persistence(err.to_string()))
    }

    pub fn head_active_assignment(
        &self,
        character_id: CharacterId,
    ) -> Result<Option<AssignmentRecord>, CoreError> {
        self.conn
            .query_row(
                "
                SELECT id, character_id, mission_id, position, status, accepted_at, completed_at
                FROM mission_assignments
                WHERE character_id = ?1 AND status IN (?2, ?3)
                ORDER BY position ASC, id ASC
                LIMIT 1
                ",
                params![
                    character_id.get(),
                    MissionStatus::Pending.as_str(),
                    MissionStatus::InProgress.as_str()
                ],
                |row| map_assignment_row(row).map_err(to_from_sql_error),
            )
            .optional()
            .map_err(|err| CoreError::Persistence(err.to_string()))
    }

    pub fn head_pending_assignment(
        &self,
        character_id: CharacterId,
    ) -> Result<Option<AssignmentRecord>, CoreError> {
        self.conn
            .query_row(
                "
                SELECT id, character_id, mission_id, position, status, accepted_at, completed_at
                FROM mission_assignments
                WHERE character_id = ?1 AND status = ?2
                ORDER BY position ASC, id ASC
                LIMIT 1
                ",
                params![character_id.get(), MissionStatus::Pending.as_str()],
                |row| map_assignment_row(row).map_err(to_from_sql_error),
            )
            .optional()
            .map_err(|err| CoreError::Persistence(err.to_string()))
    }

    pub fn mark_assignment_in_progress(
        &mut self,
        assignment_id: AssignmentId,
    ) -> Result<AssignmentRecord, CoreError> {
        let changed = self
            .conn
            .execute(
                "UPDATE mission_assignments SET status = ?2 WHERE id = ?1",
                params![assignment_id.get(), MissionStatus::InProgress.as_str()],
            )
            .map_err(|err| CoreError::Persistence(err.to_string()))?;
        if changed == 0 {
            return Err(CoreError::Persistence(format!(
                "assignment '{assignment_id}' vanished during update"
            )));
        }

        self.fetch_assignment(assignment_id)?.ok_or_else(|| {
            CoreError::Persistence(format!("assignment '{assignment_id}' vanished after update"))
        })
    }

    pub fn mark_assignment_completed(
        &mut self,
        assignment_id: AssignmentId,
        completed_at: String,
    ) -> Result<AssignmentRecord, CoreError> {
        let changed = self
            .conn
            .execute(
                "UPDATE mission_assignments SET status = ?2, completed_at = ?3 WHERE id = ?1",
                params![
                    assignment_id.get(),
                    MissionStatus::Completed.as_str(),
                    completed_at
                ],
            )
            .map_err(|err| CoreError::Persistence(err.to_string()))?;
        if changed == 0 {
            return Err(CoreError::Persistence(format!(
                "assignment '{assignment_id}' vanished during update"
            )));
        }

        self.fetch_assignment(assignment_id)?.ok_or_else(|| {
            CoreError::Persistence(format!("assignment '{assignment_id}' vanished after update"))
        })
    }

    pub fn assignments_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<AssignmentRecord>, CoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT id, character_id, mission_id, position, status, accepted_at, completed_at
                FROM mission_assignments
                WHERE character_id = ?1
                ORDER BY position ASC, id ASC
                ",
            )
            .map_err(|err| CoreError::Persistence(err.to_string()))?;

        let rows = stmt
            .query_map(params![character_id.get()], |row| {
                map_assignment_row(row).map_err(to_from_sql_error)
            })
            .map_err(|err| CoreError::Persistence(err.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|err| CoreError::Persistence(err.to_string()))
    }

    pub fn character_queue_entries(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<QueueEntryRecord>, CoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT a.id, a.status, a.position, a.accepted_at, a.completed_at,
                       a.character_id, c.name,
                       a.mission_id, m.title, m.description, m.xp_reward, m.difficulty
                FROM mission_assignments a
                JOIN characters c ON c.id = a.character_id
                JOIN missions m ON m.id = a.mission_id
                WHERE a.character_id = ?1
                ORDER BY a.position ASC, a.id ASC
                ",
            )
            .map_err(|err| CoreError::Persistence(err.to_string()))?;

        let rows = stmt
            .query_map(params![character_id.get()], |row| {
                map_queue_entry_row(row).map_err(to_from_sql_error)
            })
            .map_err(|err| CoreError::Persistence(err.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|err| CoreError::Persistence(err.to_string()))
    }
}

pub(crate) fn now_rfc3339() -> Result<String, CoreError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| CoreError::Persistence(format!("failed to format timestamp: {err}")))
}

fn to_from_sql_error(err: CoreError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::other(err.to_string())),
    )
}

fn map_character_row(row: &rusqlite::Row<'_>) -> Result<CharacterRecord, rusqlite::Error> {
    Ok(CharacterRecord {
        id: CharacterId::new(row.get(0)?),
        name: row.get(1)?,
        level: row.get(2)?,
        experience: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn map_mission_row(row: &rusqlite::Row<'_>) -> Result<MissionRecord, rusqlite::Error> {
    Ok(MissionRecord {
        id: MissionId::new(row.get(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        xp_reward: row.get(3)?,
        difficulty: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn map_assignment_row(row: &rusqlite::Row<'_>) -> Result<AssignmentRecord, CoreError> {
    let status_text: String = row
        .get(4)
        .map_err(|err| CoreError::Persistence(err.to_string()))?;

    Ok(AssignmentRecord {
        id: AssignmentId::new(
            row.get(0)
                .map_err(|err| CoreError::Persistence(err.to_string()))?,
        ),
        character_id: CharacterId::new(
            row.get(1)
                .map_err(|err| CoreError::Persistence(err.to_string()))?,
        ),
        mission_id: MissionId::new(
            row.get(2)
                .map_err(|err| CoreError::Persistence(err.to_string()))?,
        ),
        position: row
            .get(3)
            .map_err(|err| CoreError::Persistence(err.to_string()))?,
        status: MissionStatus::parse(&status_text)?,
        accepted_at: row
            .get(5)
            .map_err(|err| CoreError::Persistence(err.to_string()))?,
        completed_at: row
            .get(6)
            .map_err(|err| CoreError::Persistence(err.to_string()))?,
    })
}

fn map_queue_entry_row(row: &rusqlite::Row<'_>) -> Result<QueueEntryRecord, CoreError> {
    let status_text: String = row
        .get(1)
        .map_err(|err| CoreError::Persistence(err.to_string()))?;

    Ok(QueueEntryRecord {
        id: AssignmentId::new(
            row.get(0)
                .map_err(|err| CoreError::Persistence(err.to_string()))?,
        ),
        status: MissionStatus::parse(&status_text)?,
        position: row
            .get(2)
            .map_err(|err| CoreError::Persistence(err.to_string()))?,
        accepted_at: row
            .get(3)
            .map_err(|err| CoreError::Persistence(err.to_string()))?,
        completed_at: row
            .get(4)
            .map_err(|err| CoreError::Persistence(err.to_string()))?,
        character_id: CharacterId::new(
            row.get(5)
                .map_err(|err| CoreError::Persistence(err.to_string()))?,
        ),
        character_name: row
            .get(6)
            .map_err(|err| CoreError::Persistence(err.to_string()))?,
        mission_id: MissionId::new(
            row.get(7)
                .map_err(|err| CoreError::Persistence(err.to_string()))?,
        ),
        title: row
            .get(8)
            .map_err(|err| CoreError::Persistence(err.to_string()))?,
        description: row
            .get(9)
            .map_err(|err| CoreError::Persistence(err.to_string()))?,
        xp_reward: row
            .get(10)
            .map_err(|err| CoreError::Persistence(err.to_string()))?,
        difficulty: row
            .get(11)
            .map_err(|err| CoreError::Persistence(err.to_string()))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_character(name: &str) -> NewCharacter {
        NewCharacter {
            name: name.to_owned(),
            level: 1,
            experience: 0,
        }
    }

    fn sample_mission(title: &str, xp_reward: i64) -> NewMission {
        NewMission {
            title: title.to_owned(),
            description: format!("{title} description"),
            xp_reward,
            difficulty: 2,
        }
    }

    #[test]
    fn insert_and_fetch_character_round_trips() {
        let mut store = SqliteStore::in_memory().expect("in-memory store");

        let created = store
            .insert_character(sample_character("Aveline"))
            .expect("insert character");
        let fetched = store
            .fetch_character(created.id)
            .expect("fetch character")
            .expect("character present");

        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Aveline");
    }

    #[test]
    fn fetch_missing_character_returns_none() {
        let store = SqliteStore::in_memory().expect("in-memory store");
        let missing = store
            .fetch_character(CharacterId::new(42))
            .expect("fetch character");
        assert!(missing.is_none());
    }

    #[test]
    fn list_characters_honors_skip_and_limit() {
        let mut store = SqliteStore::in_memory().expect("in-memory store");
        for name in ["first", "second", "third"] {
            store
                .insert_character(sample_character(name))
                .expect("insert character");
        }

        let page = store.list_characters(1, 1).expect("list characters");
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "second");
    }

    #[test]
    fn award_experience_accumulates() {
        let mut store = SqliteStore::in_memory().expect("in-memory store");
        let character = store
            .insert_character(sample_character("Aveline"))
            .expect("insert character");

        store
            .award_experience(character.id, 100)
            .expect("first award");
        let updated = store
            .award_experience(character.id, 150)
            .expect("second award");

        assert_eq!(updated.experience, 250);
    }

    #[test]
    fn award_experience_for_missing_character_fails() {
        let mut store = SqliteStore::in_memory().expect("in-memory store");
        let error = store
            .award_experience(CharacterId::new(9), 10)
            .expect_err("missing character");
        assert!(matches!(error, CoreError::CharacterNotFound(_)));
    }

    #[test]
    fn insert_assignment_rejects_unknown_mission() {
        let mut store = SqliteStore::in_memory().expect("in-memory store");
        let character = store
            .insert_character(sample_character("Aveline"))
            .expect("insert character");

        let accepted_at = now_rfc3339().expect("timestamp");
        let error = store
            .insert_assignment(character.id, MissionId::new(7), 1, accepted_at)
            .expect_err("unknown mission");
        assert!(matches!(error, CoreError::MissionNotFound(_)));
    }

    #[test]
    fn queue_entries_join_mission_display_fields_in_position_order() {
        let mut store = SqliteStore::in_memory().expect("in-memory store");
        let character = store
            .insert_character(sample_character("Aveline"))
            .expect("insert character");
        let wolves = store
            .insert_mission(sample_mission("Cull the wolves", 100))
            .expect("insert mission");
        let courier = store
            .insert_mission(sample_mission("Courier run", 50))
            .expect("insert mission");

        let accepted_at = now_rfc3339().expect("timestamp");
        store
            .insert_assignment(character.id, wolves.id, 1, accepted_at.clone())
            .expect("insert first assignment");
        store
            .insert_assignment(character.id, courier.id, 2, accepted_at)
            .expect("insert second assignment");

        let entries = store
            .character_queue_entries(character.id)
            .expect("queue entries");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Cull the wolves");
        assert_eq!(entries[0].xp_reward, 100);
        assert_eq!(entries[0].character_name, "Aveline");
        assert_eq!(entries[1].position, 2);
        assert_eq!(entries[1].title, "Courier run");
    }

    #[test]
    fn file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("questboard.db");

        let mission_id = {
            let mut store = SqliteStore::open(&path).expect("open store");
            store
                .insert_mission(sample_mission("Cull the wolves", 100))
                .expect("insert mission")
                .id
        };

        let reopened = SqliteStore::open(&path).expect("reopen store");
        let mission = reopened
            .fetch_mission(mission_id)
            .expect("fetch mission")
            .expect("mission present");
        assert_eq!(mission.title, "Cull the wolves");
    }
}
