//! The scheduling engine: the single owner of all mutable scheduling state.
//!
//! Every mutating path — session creation, poll recording, the assignment
//! tick, the liveness sweep — runs under one scheduler mutex, so mutations to
//! sessions, agents, and queues are serialized through a single owner. The
//! round-robin cursors live inside that same mutex and survive for the life
//! of the process.
//!
//! Status snapshots are read-only and skip the lock.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use shiftdesk_core::clock::Clock;
use shiftdesk_core::config::SchedulingConfig;
use shiftdesk_core::error::CoreError;
use shiftdesk_core::models::{Session, SessionStatus, Team};
use shiftdesk_core::selector::RoundRobinCursors;
use shiftdesk_core::store::memory::{
    MemoryAgentStore, MemoryQueueStore, MemorySessionStore, MemoryShiftStore, MemoryTeamStore,
};
use shiftdesk_core::store::{AgentStore, QueueStore, SessionStore, ShiftStore, TeamStore};
use shiftdesk_core::{admission, capacity, liveness, shifts};

pub const MSG_QUEUED: &str = "Chat session queued.";
pub const MSG_QUEUED_OVERFLOW: &str = "Chat session queued in overflow team.";
pub const MSG_QUEUE_FULL: &str = "Queue is full. Chat session refused.";
pub const MSG_NO_ACTIVE_TEAM: &str =
    "No active team available. Service is currently unavailable.";

/// The store seams the engine schedules against.
#[derive(Clone)]
pub struct Stores {
    pub sessions: Arc<dyn SessionStore>,
    pub agents: Arc<dyn AgentStore>,
    pub teams: Arc<dyn TeamStore>,
    pub shifts: Arc<dyn ShiftStore>,
    pub queues: Arc<dyn QueueStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            sessions: Arc::new(MemorySessionStore::new()),
            agents: Arc::new(MemoryAgentStore::new()),
            teams: Arc::new(MemoryTeamStore::new()),
            shifts: Arc::new(MemoryShiftStore::new()),
            queues: Arc::new(MemoryQueueStore::new()),
        }
    }
}

/// Scheduler-owned mutable state. Cursors reset only on process restart.
#[derive(Debug, Default)]
pub struct SchedulerState {
    pub cursors: RoundRobinCursors,
}

pub struct Engine {
    pub stores: Stores,
    pub clock: Arc<dyn Clock>,
    pub scheduling: SchedulingConfig,
    scheduler: Mutex<SchedulerState>,
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub status: SessionStatus,
    pub message: String,
    pub is_overflow: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PollSessionResponse {
    pub session_id: Uuid,
    pub status: SessionStatus,
    pub assigned_agent_id: Option<Uuid>,
    pub assigned_agent_name: Option<String>,
    pub is_overflow: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentStatus {
    pub id: Uuid,
    pub name: String,
    pub seniority: String,
    pub current_chats: i32,
    pub max_concurrency: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub active_team: Option<String>,
    pub team_capacity: i32,
    pub max_queue_length: usize,
    pub queue_length: usize,
    pub overflow_queue_length: usize,
    pub active_sessions: usize,
    pub is_office_hours: bool,
    pub agents: Vec<AgentStatus>,
}

// ============================================================================
// Engine
// ============================================================================

impl Engine {
    pub fn new(stores: Stores, clock: Arc<dyn Clock>, scheduling: SchedulingConfig) -> Self {
        Self {
            stores,
            clock,
            scheduling,
            scheduler: Mutex::new(SchedulerState::default()),
        }
    }

    /// Acquire the scheduler lock. Every mutating operation goes through
    /// here; holding the guard is what serializes session/agent/queue writes.
    pub async fn scheduler(&self) -> MutexGuard<'_, SchedulerState> {
        self.scheduler.lock().await
    }

    /// Intake a new chat request: decide admission, record the session
    /// (refusals included, so they stay auditable), and enqueue on accept.
    pub async fn create_session(
        &self,
        user_id: Option<String>,
    ) -> Result<CreateSessionResponse, CoreError> {
        let _guard = self.scheduler().await;

        let now = self.clock.now();
        let tod = self.clock.time_of_day();
        let office_hours = shifts::is_office_hours(tod);

        let teams = self.stores.teams.list_all().await?;
        let all_shifts = self.stores.shifts.list_all().await?;
        let active = shifts::active_team(&teams, &all_shifts, tod);
        let overflow_team = self.stores.teams.get_overflow_team().await?;

        // Off-hours with nobody on shift: refuse before looking at queues.
        if active.is_none() && !office_hours {
            return self.record_refusal(user_id, now, MSG_NO_ACTIVE_TEAM).await;
        }

        // During office hours a gap in the shift roster still sizes the queue
        // against the first team on record rather than going dark.
        let main_team = match active.or_else(|| teams.first()) {
            Some(team) => team,
            None => return self.record_refusal(user_id, now, MSG_NO_ACTIVE_TEAM).await,
        };

        let main_capacity = self.team_capacity_of(main_team).await?;
        let overflow_capacity = match &overflow_team {
            Some(team) => Some(self.team_capacity_of(team).await?),
            None => None,
        };

        let main_queue_len = self.stores.queues.length(false).await?;
        let overflow_queue_len = self.stores.queues.length(true).await?;

        let decision = admission::decide(
            main_capacity,
            main_queue_len,
            overflow_capacity,
            overflow_queue_len,
            office_hours,
        );

        let mut session = Session::new(user_id, now);
        session.status = decision.status;
        session.is_overflow = decision.use_overflow;
        let session = self.stores.sessions.add(session).await?;

        if decision.accept {
            self.stores
                .queues
                .enqueue(session.id, decision.use_overflow)
                .await?;
        }

        let message = if decision.accept {
            if decision.use_overflow {
                MSG_QUEUED_OVERFLOW
            } else {
                MSG_QUEUED
            }
        } else {
            MSG_QUEUE_FULL
        };

        tracing::debug!(
            session_id = %session.id,
            status = %session.status,
            overflow = session.is_overflow,
            "session intake decided"
        );

        Ok(CreateSessionResponse {
            session_id: session.id,
            status: session.status,
            message: message.to_string(),
            is_overflow: session.is_overflow,
        })
    }

    /// Record a customer poll: stamps liveness, promotes Queued/Assigned to
    /// Active, and reports the assigned agent if there is one.
    pub async fn poll_session(&self, session_id: Uuid) -> Result<PollSessionResponse, CoreError> {
        let _guard = self.scheduler().await;

        let mut session = self
            .stores
            .sessions
            .get(session_id)
            .await?
            .ok_or_else(|| CoreError::not_found("session", session_id))?;

        liveness::record_poll(&mut session, self.clock.now());
        self.stores.sessions.update(&session).await?;

        let agent = match session.assigned_agent_id {
            Some(agent_id) => self.stores.agents.get(agent_id).await?,
            None => None,
        };

        Ok(PollSessionResponse {
            session_id: session.id,
            status: session.status,
            assigned_agent_id: session.assigned_agent_id,
            assigned_agent_name: agent.map(|a| a.name),
            is_overflow: session.is_overflow,
        })
    }

    /// Read-only operational snapshot for the status board.
    pub async fn status_snapshot(&self) -> Result<StatusSnapshot, CoreError> {
        let tod = self.clock.time_of_day();
        let is_office_hours = shifts::is_office_hours(tod);

        let teams = self.stores.teams.list_all().await?;
        let all_shifts = self.stores.shifts.list_all().await?;
        let active = shifts::active_team(&teams, &all_shifts, tod);

        let (active_team, team_capacity) = match active {
            Some(team) => (
                Some(team.name.clone()),
                self.team_capacity_of(team).await?,
            ),
            None => (None, 0),
        };
        let max_queue_length = if active_team.is_some() {
            capacity::max_queue_length(team_capacity)
        } else {
            0
        };

        let queue_length = self.stores.queues.length(false).await?;
        let overflow_queue_length = self.stores.queues.length(true).await?;
        let active_sessions = self
            .stores
            .sessions
            .list_by_status(SessionStatus::Active)
            .await?
            .len();

        let agents = self
            .stores
            .agents
            .list_all()
            .await?
            .into_iter()
            .map(|a| AgentStatus {
                id: a.id,
                name: a.name.clone(),
                seniority: a.seniority.to_string(),
                current_chats: a.current_active_chats,
                max_concurrency: capacity::agent_capacity(&a),
            })
            .collect();

        Ok(StatusSnapshot {
            active_team,
            team_capacity,
            max_queue_length,
            queue_length,
            overflow_queue_length,
            active_sessions,
            is_office_hours,
            agents,
        })
    }

    async fn team_capacity_of(&self, team: &Team) -> Result<i32, CoreError> {
        let agents = self.stores.agents.list_by_team(team.id).await?;
        Ok(capacity::team_capacity(&agents))
    }

    async fn record_refusal(
        &self,
        user_id: Option<String>,
        now: chrono::DateTime<chrono::Utc>,
        message: &str,
    ) -> Result<CreateSessionResponse, CoreError> {
        let mut session = Session::new(user_id, now);
        session.status = SessionStatus::Refused;
        let session = self.stores.sessions.add(session).await?;

        tracing::debug!(session_id = %session.id, "session refused: {}", message);

        Ok(CreateSessionResponse {
            session_id: session.id,
            status: SessionStatus::Refused,
            message: message.to_string(),
            is_overflow: false,
        })
    }
}
