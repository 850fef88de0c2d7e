//! Shift resolution: which team is on duty and whether office hours apply.

use chrono::NaiveTime;

use crate::models::{Agent, Shift, Team};

/// Office hours window during which the overflow team may absorb load.
pub const OFFICE_START: (u32, u32) = (8, 0);
pub const OFFICE_END: (u32, u32) = (20, 0);

/// True iff 08:00 <= t < 20:00.
pub fn is_office_hours(t: NaiveTime) -> bool {
    use chrono::Timelike;
    let minutes = t.hour() * 60 + t.minute();
    let start = OFFICE_START.0 * 60 + OFFICE_START.1;
    let end = OFFICE_END.0 * 60 + OFFICE_END.1;
    minutes >= start && minutes < end
}

/// The non-overflow team whose shift contains `t`. Overflow shifts only gate
/// which overflow agents are selectable; they never make a team "active".
///
/// Tie-break: when several shift windows contain `t`, the first one in input
/// order wins. Shift data is expected to be curated so windows don't overlap;
/// seeding validates that expectation.
pub fn active_team<'a>(teams: &'a [Team], shifts: &[Shift], t: NaiveTime) -> Option<&'a Team> {
    shifts.iter().filter(|s| s.contains(t)).find_map(|shift| {
        teams
            .iter()
            .find(|team| team.id == shift.team_id && !team.is_overflow_team)
    })
}

pub fn is_agent_on_shift(agent: &Agent, shifts: &[Shift], t: NaiveTime) -> bool {
    // Agents without an assigned shift are never on-shift.
    let Some(shift_id) = agent.shift_id else {
        return false;
    };
    shifts
        .iter()
        .any(|s| s.id == shift_id && s.contains(t))
}

/// Agents whose assigned shift is active at `t`.
pub fn on_shift_agents(agents: &[Agent], shifts: &[Shift], t: NaiveTime) -> Vec<Agent> {
    agents
        .iter()
        .filter(|a| is_agent_on_shift(a, shifts, t))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Seniority;
    use uuid::Uuid;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_office_hours_bounds() {
        assert!(!is_office_hours(t(7, 59)));
        assert!(is_office_hours(t(8, 0)));
        assert!(is_office_hours(t(19, 59)));
        assert!(!is_office_hours(t(20, 0)));
        assert!(!is_office_hours(t(22, 0)));
    }

    #[test]
    fn test_active_team_matches_shift_window() {
        let day = Team::new("Day", false);
        let night = Team::new("Night", false);
        let teams = vec![day.clone(), night.clone()];
        let shifts = vec![
            Shift::new(day.id, t(8, 0), t(20, 0)),
            Shift::new(night.id, t(20, 0), t(8, 0)),
        ];

        assert_eq!(active_team(&teams, &shifts, t(10, 0)).unwrap().id, day.id);
        assert_eq!(active_team(&teams, &shifts, t(23, 0)).unwrap().id, night.id);
        assert_eq!(active_team(&teams, &shifts, t(3, 0)).unwrap().id, night.id);
    }

    #[test]
    fn test_active_team_none_without_matching_shift() {
        let team = Team::new("Day", false);
        let teams = vec![team.clone()];
        let shifts = vec![Shift::new(team.id, t(8, 0), t(16, 0))];
        assert!(active_team(&teams, &shifts, t(17, 0)).is_none());
        assert!(active_team(&teams, &[], t(10, 0)).is_none());
    }

    #[test]
    fn test_overflow_team_never_active() {
        let overflow = Team::new("Overflow", true);
        let teams = vec![overflow.clone()];
        let shifts = vec![Shift::new(overflow.id, t(0, 0), t(23, 59))];
        assert!(active_team(&teams, &shifts, t(10, 0)).is_none());
    }

    #[test]
    fn test_overflow_shift_does_not_shadow_main_team() {
        let overflow = Team::new("Overflow", true);
        let main = Team::new("Day", false);
        let teams = vec![overflow.clone(), main.clone()];
        // Overflow shift listed first; the main team must still resolve.
        let shifts = vec![
            Shift::new(overflow.id, t(8, 0), t(20, 0)),
            Shift::new(main.id, t(8, 0), t(16, 0)),
        ];
        assert_eq!(active_team(&teams, &shifts, t(10, 0)).unwrap().id, main.id);
    }

    #[test]
    fn test_overlapping_shifts_first_wins() {
        let a = Team::new("A", false);
        let b = Team::new("B", false);
        let teams = vec![a.clone(), b.clone()];
        let shifts = vec![
            Shift::new(a.id, t(8, 0), t(16, 0)),
            Shift::new(b.id, t(8, 0), t(16, 0)),
        ];
        assert_eq!(active_team(&teams, &shifts, t(10, 0)).unwrap().id, a.id);
    }

    #[test]
    fn test_agent_without_shift_never_on_shift() {
        let team_id = Uuid::new_v4();
        let agent = Agent::new("a", Seniority::Junior, team_id);
        let shifts = vec![Shift::new(team_id, t(0, 0), t(23, 59))];
        assert!(!is_agent_on_shift(&agent, &shifts, t(10, 0)));
    }

    #[test]
    fn test_on_shift_agents_filters_by_shift() {
        let team_id = Uuid::new_v4();
        let shift = Shift::new(team_id, t(8, 0), t(16, 0));
        let mut on = Agent::new("on", Seniority::Junior, team_id);
        on.shift_id = Some(shift.id);
        let off = Agent::new("off", Seniority::Junior, team_id);

        let result = on_shift_agents(&[on.clone(), off], &[shift], t(10, 0));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, on.id);
    }
}
