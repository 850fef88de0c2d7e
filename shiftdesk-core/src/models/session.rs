use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Requested,
    Queued,
    Assigned,
    Active,
    Inactive,
    Refused,
    Completed,
}

impl SessionStatus {
    /// Refused and Completed are terminal; everything else can still move.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Refused | SessionStatus::Completed)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SessionStatus::Requested => "requested",
            SessionStatus::Queued => "queued",
            SessionStatus::Assigned => "assigned",
            SessionStatus::Active => "active",
            SessionStatus::Inactive => "inactive",
            SessionStatus::Refused => "refused",
            SessionStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// A support-chat session. Never deleted during normal operation; refusals
/// are kept so they stay auditable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub status: SessionStatus,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_poll_at: Option<DateTime<Utc>>,
    pub assigned_agent_id: Option<Uuid>,
    pub is_overflow: bool,
    pub team_id: Option<Uuid>,
}

impl Session {
    pub fn new(user_id: Option<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: SessionStatus::Requested,
            user_id,
            created_at,
            last_poll_at: None,
            assigned_agent_id: None,
            is_overflow: false,
            team_id: None,
        }
    }
}
