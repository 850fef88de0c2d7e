use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One waiting session in either the main or the overflow queue.
/// Dequeue order within a queue is ascending `enqueued_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntry {
    pub session_id: Uuid,
    pub enqueued_at: DateTime<Utc>,
    pub is_overflow: bool,
}

impl QueueEntry {
    pub fn new(session_id: Uuid, is_overflow: bool, enqueued_at: DateTime<Utc>) -> Self {
        Self {
            session_id,
            enqueued_at,
            is_overflow,
        }
    }
}
