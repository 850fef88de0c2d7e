use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A team of agents. Exactly one team should carry `is_overflow_team = true`
/// for the overflow path to engage; membership lives on the agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub is_overflow_team: bool,
}

impl Team {
    pub fn new(name: impl Into<String>, is_overflow_team: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_overflow_team,
        }
    }
}
