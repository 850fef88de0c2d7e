use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seniority tiers, ordered: assignment prefers the lowest tier first, and
/// the tier determines the agent's concurrency ceiling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Junior,
    MidLevel,
    Senior,
    TeamLead,
}

impl Seniority {
    pub const ALL: [Seniority; 4] = [
        Seniority::Junior,
        Seniority::MidLevel,
        Seniority::Senior,
        Seniority::TeamLead,
    ];
}

impl std::fmt::Display for Seniority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Seniority::Junior => "junior",
            Seniority::MidLevel => "mid_level",
            Seniority::Senior => "senior",
            Seniority::TeamLead => "team_lead",
        };
        f.write_str(s)
    }
}

/// A support agent. `current_active_chats` is owned by the scheduling engine;
/// the concurrency ceiling is derived from seniority on every read (see
/// `capacity::agent_capacity`), never stored as authoritative state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    pub seniority: Seniority,
    pub current_active_chats: i32,
    pub shift_id: Option<Uuid>,
    pub team_id: Uuid,
}

impl Agent {
    pub fn new(name: impl Into<String>, seniority: Seniority, team_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            seniority,
            current_active_chats: 0,
            shift_id: None,
            team_id,
        }
    }
}
