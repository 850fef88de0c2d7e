use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recurring time-of-day window owned by a team. `starts_at > ends_at`
/// means the window spans midnight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub id: Uuid,
    pub team_id: Uuid,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
}

impl Shift {
    pub fn new(team_id: Uuid, starts_at: NaiveTime, ends_at: NaiveTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_id,
            starts_at,
            ends_at,
        }
    }

    pub fn contains(&self, t: NaiveTime) -> bool {
        if self.starts_at <= self.ends_at {
            t >= self.starts_at && t < self.ends_at
        } else {
            // Overnight shift
            t >= self.starts_at || t < self.ends_at
        }
    }
}
