//! Assignment tick — the periodic queue-draining pass.
//!
//! Per tick, strictly in this order:
//! 1. Reap: release agent capacity held by sessions already marked Inactive.
//! 2. Resolve which team is on shift and whether office hours apply.
//! 3. Drain the main queue in FIFO order against the active team.
//! 4. Drain the overflow queue (office hours only) against the overflow team.
//!
//! Reaping runs first so freed capacity is assignable within the same tick.
//! A drain stops at the first session no agent can take: a later arrival must
//! never be assigned while an earlier one is blocked only by capacity.

use anyhow::Result;
use chrono::NaiveTime;
use tokio::sync::broadcast;

use shiftdesk_core::models::{SessionStatus, Shift, Team};
use shiftdesk_core::selector::{self, RoundRobinCursors};
use shiftdesk_core::{capacity, shifts};

use crate::engine::Engine;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Report from one assignment tick.
#[derive(Debug, Clone, Default)]
pub struct AssignmentReport {
    pub reaped: usize,
    pub assigned_main: usize,
    pub assigned_overflow: usize,
    pub elapsed_ms: u64,
}

impl AssignmentReport {
    pub fn total_changes(&self) -> usize {
        self.reaped + self.assigned_main + self.assigned_overflow
    }
}

/// Run one assignment tick under the scheduler lock.
pub async fn run_assignment_tick(engine: &Engine) -> Result<AssignmentReport> {
    let start = std::time::Instant::now();
    let mut state = engine.scheduler().await;
    let mut report = AssignmentReport::default();

    report.reaped = reap_inactive_sessions(engine).await?;

    let tod = engine.clock.time_of_day();
    let teams = engine.stores.teams.list_all().await?;
    let all_shifts = engine.stores.shifts.list_all().await?;
    let active = shifts::active_team(&teams, &all_shifts, tod).cloned();
    let overflow_team = engine.stores.teams.get_overflow_team().await?;

    if let Some(team) = &active {
        report.assigned_main =
            drain_queue(engine, team, &all_shifts, tod, false, &mut state.cursors).await?;
    }

    if shifts::is_office_hours(tod) {
        if let Some(team) = &overflow_team {
            report.assigned_overflow =
                drain_queue(engine, team, &all_shifts, tod, true, &mut state.cursors).await?;
        }
    }

    report.elapsed_ms = start.elapsed().as_millis() as u64;
    Ok(report)
}

/// Background loop: tick every `assign_interval_seconds` until shutdown.
/// Tick failures are logged and the loop keeps going.
pub async fn run_assignment_loop(
    engine: std::sync::Arc<Engine>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let interval =
        tokio::time::Duration::from_secs(engine.scheduling.assign_interval_seconds);
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!(
        "Assignment loop started (interval: {}s)",
        engine.scheduling.assign_interval_seconds
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match run_assignment_tick(&engine).await {
                    Ok(report) if report.total_changes() > 0 => {
                        tracing::info!(
                            "Assignment tick: {} reaped, {} assigned main, {} assigned overflow in {}ms",
                            report.reaped,
                            report.assigned_main,
                            report.assigned_overflow,
                            report.elapsed_ms
                        );
                    }
                    Ok(_) => tracing::debug!("Assignment tick: no changes"),
                    Err(e) => tracing::error!("Assignment tick error: {}", e),
                }
            }
            _ = shutdown.recv() => {
                tracing::info!("Assignment loop shutting down");
                break;
            }
        }
    }
}

// ============================================================================
// INTERNAL HELPERS
// ============================================================================

/// Release capacity held by sessions the liveness sweep demoted to Inactive.
/// Decrements the agent (floored at zero) and clears the session's assignment
/// so the reap never double-releases.
async fn reap_inactive_sessions(engine: &Engine) -> Result<usize> {
    let mut reaped = 0;

    let inactive = engine
        .stores
        .sessions
        .list_by_status(SessionStatus::Inactive)
        .await?;

    for mut session in inactive {
        let Some(agent_id) = session.assigned_agent_id else {
            continue;
        };

        if let Some(mut agent) = engine.stores.agents.get(agent_id).await? {
            if agent.current_active_chats > 0 {
                agent.current_active_chats -= 1;
            }
            engine.stores.agents.update(&agent).await?;
        }

        session.assigned_agent_id = None;
        engine.stores.sessions.update(&session).await?;
        reaped += 1;

        tracing::debug!(session_id = %session.id, agent_id = %agent_id, "reaped inactive session");
    }

    Ok(reaped)
}

/// Drain one queue in FIFO order against a team's on-shift agents.
async fn drain_queue(
    engine: &Engine,
    team: &Team,
    all_shifts: &[Shift],
    tod: NaiveTime,
    is_overflow: bool,
    cursors: &mut RoundRobinCursors,
) -> Result<usize> {
    let entries = engine.stores.queues.list_all(is_overflow).await?;
    if entries.is_empty() {
        return Ok(0);
    }

    let team_agents = engine.stores.agents.list_by_team(team.id).await?;
    let mut candidates = shifts::on_shift_agents(&team_agents, all_shifts, tod);
    candidates.retain(capacity::has_spare_capacity);
    if candidates.is_empty() {
        return Ok(0);
    }

    let mut assigned = 0;
    for entry in entries {
        let Some(mut session) = engine.stores.sessions.get(entry.session_id).await? else {
            engine.stores.queues.remove(entry.session_id, is_overflow).await?;
            continue;
        };
        // A poll may have promoted the session, or the sweep demoted it,
        // while it sat queued. Drop the stale entry so it stops counting
        // against the queue cap, and move on.
        if session.status != SessionStatus::Queued {
            engine.stores.queues.remove(entry.session_id, is_overflow).await?;
            continue;
        }

        let Some(agent_id) = selector::select_agent(&candidates, cursors) else {
            // No agent has capacity left; stop here to preserve FIFO fairness.
            break;
        };

        session.assigned_agent_id = Some(agent_id);
        session.team_id = Some(team.id);
        session.status = SessionStatus::Assigned;
        engine.stores.sessions.update(&session).await?;

        if let Some(agent) = candidates.iter_mut().find(|a| a.id == agent_id) {
            agent.current_active_chats += 1;
            engine.stores.agents.update(agent).await?;
        }

        engine.stores.queues.remove(entry.session_id, is_overflow).await?;
        assigned += 1;

        tracing::debug!(
            session_id = %session.id,
            agent_id = %agent_id,
            overflow = is_overflow,
            "session assigned"
        );
    }

    Ok(assigned)
}
