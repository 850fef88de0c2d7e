//! Concurrency and queue-length limits derived from seniority.
//!
//! Capacity is a pure function of seniority, recomputed on every read.
//! Persisting it would go stale the moment an agent's seniority changes.

use crate::models::{Agent, Seniority};

/// Queue headroom relative to team capacity.
const QUEUE_FACTOR: f64 = 1.5;

fn efficiency(seniority: Seniority) -> f64 {
    match seniority {
        Seniority::Junior => 0.4,
        Seniority::MidLevel => 0.6,
        Seniority::Senior => 0.8,
        Seniority::TeamLead => 0.5,
    }
}

/// Concurrency ceiling for one agent: floor(10 × efficiency).
/// Junior 4, MidLevel 6, Senior 8, TeamLead 5.
pub fn agent_capacity(agent: &Agent) -> i32 {
    (10.0 * efficiency(agent.seniority)).floor() as i32
}

pub fn has_spare_capacity(agent: &Agent) -> bool {
    agent.current_active_chats < agent_capacity(agent)
}

/// Total concurrency ceiling across a team's members.
pub fn team_capacity(agents: &[Agent]) -> i32 {
    agents.iter().map(agent_capacity).sum()
}

/// Maximum queue length a team may back: floor(capacity × 1.5).
pub fn max_queue_length(team_capacity: i32) -> usize {
    (team_capacity as f64 * QUEUE_FACTOR).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn agent(seniority: Seniority) -> Agent {
        Agent::new("a", seniority, Uuid::new_v4())
    }

    #[test]
    fn test_agent_capacity_per_tier() {
        assert_eq!(agent_capacity(&agent(Seniority::Junior)), 4);
        assert_eq!(agent_capacity(&agent(Seniority::MidLevel)), 6);
        assert_eq!(agent_capacity(&agent(Seniority::Senior)), 8);
        assert_eq!(agent_capacity(&agent(Seniority::TeamLead)), 5);
    }

    #[test]
    fn test_team_capacity_sums_members() {
        let agents = vec![
            agent(Seniority::Junior),
            agent(Seniority::MidLevel),
            agent(Seniority::Senior),
        ];
        assert_eq!(team_capacity(&agents), 4 + 6 + 8);
        assert_eq!(team_capacity(&[]), 0);
    }

    #[test]
    fn test_max_queue_length_floors() {
        // MidLevel alone: capacity 6 -> max queue 9
        assert_eq!(max_queue_length(6), 9);
        // Odd capacity floors: 5 * 1.5 = 7.5 -> 7
        assert_eq!(max_queue_length(5), 7);
        assert_eq!(max_queue_length(0), 0);
    }

    #[test]
    fn test_spare_capacity_bound() {
        let mut a = agent(Seniority::Junior);
        assert!(has_spare_capacity(&a));
        a.current_active_chats = 4;
        assert!(!has_spare_capacity(&a));
    }
}
