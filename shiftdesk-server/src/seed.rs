//! Demo roster seeding for the in-memory deployment.
//!
//! Three day-covering shifts (morning/afternoon/night) plus an overflow team
//! whose shift spans office hours, so overflow sessions can actually be
//! drained. Shift windows are expected not to overlap; seeding validates
//! that and warns, since the first-match tie-break would otherwise silently
//! shadow a team.

use anyhow::Result;
use chrono::NaiveTime;

use shiftdesk_core::models::{Agent, Seniority, Shift, Team};

use crate::engine::Stores;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid seed time")
}

pub async fn seed_demo_data(stores: &Stores) -> Result<()> {
    let team_a = stores.teams.add(Team::new("Team A", false)).await?;
    let team_b = stores.teams.add(Team::new("Team B", false)).await?;
    let team_c = stores.teams.add(Team::new("Team C", false)).await?;
    let overflow = stores.teams.add(Team::new("Overflow Team", true)).await?;

    let morning = stores
        .shifts
        .add(Shift::new(team_a.id, t(8, 0), t(16, 0)))
        .await?;
    let afternoon = stores
        .shifts
        .add(Shift::new(team_b.id, t(16, 0), t(0, 0)))
        .await?;
    let night = stores
        .shifts
        .add(Shift::new(team_c.id, t(0, 0), t(8, 0)))
        .await?;
    // Overflow only absorbs during office hours; its shift mirrors that window.
    let overflow_shift = stores
        .shifts
        .add(Shift::new(overflow.id, t(8, 0), t(20, 0)))
        .await?;

    validate_shift_windows(&[morning.clone(), afternoon.clone(), night.clone()]);

    // Team A: 1 team lead, 2 mid-level, 1 junior (morning)
    let team_a_roster = [
        ("Team Lead A", Seniority::TeamLead),
        ("Mid-Level A1", Seniority::MidLevel),
        ("Mid-Level A2", Seniority::MidLevel),
        ("Junior A", Seniority::Junior),
    ];
    for (name, seniority) in team_a_roster {
        let mut agent = Agent::new(name, seniority, team_a.id);
        agent.shift_id = Some(morning.id);
        stores.agents.add(agent).await?;
    }

    // Team B: 1 senior, 1 mid-level, 2 juniors (afternoon)
    let team_b_roster = [
        ("Senior B", Seniority::Senior),
        ("Mid-Level B", Seniority::MidLevel),
        ("Junior B1", Seniority::Junior),
        ("Junior B2", Seniority::Junior),
    ];
    for (name, seniority) in team_b_roster {
        let mut agent = Agent::new(name, seniority, team_b.id);
        agent.shift_id = Some(afternoon.id);
        stores.agents.add(agent).await?;
    }

    // Team C: 2 mid-level (night)
    for name in ["Mid-Level C1", "Mid-Level C2"] {
        let mut agent = Agent::new(name, Seniority::MidLevel, team_c.id);
        agent.shift_id = Some(night.id);
        stores.agents.add(agent).await?;
    }

    // Overflow team: 6 juniors
    for i in 1..=6 {
        let mut agent = Agent::new(
            format!("Overflow Agent {}", i),
            Seniority::Junior,
            overflow.id,
        );
        agent.shift_id = Some(overflow_shift.id);
        stores.agents.add(agent).await?;
    }

    tracing::info!("Seeded 4 teams, 16 agents, 4 shifts");
    Ok(())
}

/// Warn about overlapping non-overflow shift windows. Overlaps aren't fatal
/// (first match wins), but they mean one team can never become active.
fn validate_shift_windows(shifts: &[Shift]) {
    for (i, a) in shifts.iter().enumerate() {
        for b in shifts.iter().skip(i + 1) {
            if a.contains(b.starts_at) || b.contains(a.starts_at) {
                tracing::warn!(
                    "Shift windows overlap: {}..{} and {}..{}; the earlier-seeded shift wins ties",
                    a.starts_at,
                    a.ends_at,
                    b.starts_at,
                    b.ends_at
                );
            }
        }
    }
}
