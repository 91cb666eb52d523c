use crate::error::CoreError;
use crate::ids::{CharacterId, MissionId};
use crate::store::{now_rfc3339, AssignmentRecord, SqliteStore};

/// FIFO backlog of mission assignments for one character, kept as ordered
/// rows in the store. Positions are assigned once at enqueue time and never
/// renumbered, so completed assignments leave gaps behind.
///
/// The facade holds no state of its own beyond the owner binding; every call
/// is a single read or a single persisted write against the store handle.
pub struct MissionQueue<'a> {
    store: &'a mut SqliteStore,
    character_id: CharacterId,
}

impl<'a> MissionQueue<'a> {
    pub fn new(store: &'a mut SqliteStore, character_id: CharacterId) -> Self {
        Self {
            store,
            character_id,
        }
    }

    pub fn is_empty(&self) -> Result<bool, CoreError> {
        Ok(self.size()? == 0)
    }

    /// Number of assignments still in the queue: pending plus in-progress.
    /// Completed assignments are history, not queue members.
    pub fn size(&self) -> Result<u64, CoreError> {
        self.store.active_assignment_count(self.character_id)
    }

    /// Appends a mission to the back of the queue. The new position is one
    /// past the highest position ever assigned to this owner, completed
    /// assignments included, so order survives completions without
    /// renumbering.
    pub fn enqueue(&mut self, mission_id: MissionId) -> Result<AssignmentRecord, CoreError> {
        let position = self
            .store
            .max_assignment_position(self.character_id)?
            .unwrap_or(0)
            + 1;
        let accepted_at = now_rfc3339()?;

        self.store
            .insert_assignment(self.character_id, mission_id, position, accepted_at)
    }

    /// The current head: lowest-position assignment that is pending or in
    /// progress. Read-only; `None` when the queue is empty.
    pub fn first(&self) -> Result<Option<AssignmentRecord>, CoreError> {
        self.store.head_active_assignment(self.character_id)
    }

    /// Activates the lowest-position pending assignment and returns it, or
    /// `None` when nothing is pending. An in-progress head is skipped, not
    /// reactivated: two calls without an intervening completion will leave
    /// two assignments in progress at once.
    pub fn start_next(&mut self) -> Result<Option<AssignmentRecord>, CoreError> {
        let Some(next) = self.store.head_pending_assignment(self.character_id)? else {
            return Ok(None);
        };

        self.store.mark_assignment_in_progress(next.id).map(Some)
    }

    /// Completes the current head, whether or not it was ever started, and
    /// stamps its completion time. `None` (and no write) when the queue is
    /// empty.
    pub fn dequeue(&mut self) -> Result<Option<AssignmentRecord>, CoreError> {
        let Some(head) = self.store.head_active_assignment(self.character_id)? else {
            return Ok(None);
        };

        let completed_at = now_rfc3339()?;
        self.store
            .mark_assignment_completed(head.id, completed_at)
            .map(Some)
    }

    /// Every assignment this owner ever accepted, any status, in ascending
    /// position order.
    pub fn get_all(&self) -> Result<Vec<AssignmentRecord>, CoreError> {
        self.store.assignments_for_character(self.character_id)
    }
}
