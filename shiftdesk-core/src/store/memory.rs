//! In-memory store implementations for the single-process deployment.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Agent, QueueEntry, Session, SessionStatus, Shift, Team};
use crate::store::{
    AgentStore, QueueStore, SessionStore, ShiftStore, StoreResult, TeamStore,
};

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, id: Uuid) -> StoreResult<Option<Session>> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn add(&self, session: Session) -> StoreResult<Session> {
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        Ok(session)
    }

    async fn update(&self, session: &Session) -> StoreResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        Ok(())
    }

    async fn list_by_status(&self, status: SessionStatus) -> StoreResult<Vec<Session>> {
        let mut sessions: Vec<Session> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.status == status)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.created_at);
        Ok(sessions)
    }
}

#[derive(Default)]
pub struct MemoryAgentStore {
    agents: RwLock<Vec<Agent>>,
}

impl MemoryAgentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AgentStore for MemoryAgentStore {
    async fn get(&self, id: Uuid) -> StoreResult<Option<Agent>> {
        Ok(self.agents.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn add(&self, agent: Agent) -> StoreResult<Agent> {
        self.agents.write().await.push(agent.clone());
        Ok(agent)
    }

    async fn update(&self, agent: &Agent) -> StoreResult<()> {
        let mut agents = self.agents.write().await;
        if let Some(existing) = agents.iter_mut().find(|a| a.id == agent.id) {
            *existing = agent.clone();
        }
        Ok(())
    }

    async fn list_by_team(&self, team_id: Uuid) -> StoreResult<Vec<Agent>> {
        Ok(self
            .agents
            .read()
            .await
            .iter()
            .filter(|a| a.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> StoreResult<Vec<Agent>> {
        Ok(self.agents.read().await.clone())
    }
}

#[derive(Default)]
pub struct MemoryTeamStore {
    teams: RwLock<Vec<Team>>,
}

impl MemoryTeamStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamStore for MemoryTeamStore {
    async fn add(&self, team: Team) -> StoreResult<Team> {
        self.teams.write().await.push(team.clone());
        Ok(team)
    }

    async fn list_all(&self) -> StoreResult<Vec<Team>> {
        Ok(self.teams.read().await.clone())
    }

    async fn get_overflow_team(&self) -> StoreResult<Option<Team>> {
        Ok(self
            .teams
            .read()
            .await
            .iter()
            .find(|t| t.is_overflow_team)
            .cloned())
    }
}

#[derive(Default)]
pub struct MemoryShiftStore {
    shifts: RwLock<Vec<Shift>>,
}

impl MemoryShiftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShiftStore for MemoryShiftStore {
    async fn add(&self, shift: Shift) -> StoreResult<Shift> {
        self.shifts.write().await.push(shift.clone());
        Ok(shift)
    }

    async fn list_all(&self) -> StoreResult<Vec<Shift>> {
        Ok(self.shifts.read().await.clone())
    }
}

/// Two independent FIFO queues. Vec order is enqueue order, which keeps the
/// FIFO invariant without re-sorting on every read.
#[derive(Default)]
pub struct MemoryQueueStore {
    main: RwLock<Vec<QueueEntry>>,
    overflow: RwLock<Vec<QueueEntry>>,
}

impl MemoryQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self, is_overflow: bool) -> &RwLock<Vec<QueueEntry>> {
        if is_overflow {
            &self.overflow
        } else {
            &self.main
        }
    }
}

#[async_trait]
impl QueueStore for MemoryQueueStore {
    async fn enqueue(&self, session_id: Uuid, is_overflow: bool) -> StoreResult<QueueEntry> {
        let entry = QueueEntry::new(session_id, is_overflow, Utc::now());
        self.queue(is_overflow).write().await.push(entry.clone());
        Ok(entry)
    }

    async fn dequeue(&self, is_overflow: bool) -> StoreResult<Option<QueueEntry>> {
        let mut queue = self.queue(is_overflow).write().await;
        if queue.is_empty() {
            return Ok(None);
        }
        Ok(Some(queue.remove(0)))
    }

    async fn length(&self, is_overflow: bool) -> StoreResult<usize> {
        Ok(self.queue(is_overflow).read().await.len())
    }

    async fn list_all(&self, is_overflow: bool) -> StoreResult<Vec<QueueEntry>> {
        Ok(self.queue(is_overflow).read().await.clone())
    }

    async fn remove(&self, session_id: Uuid, is_overflow: bool) -> StoreResult<()> {
        let mut queue = self.queue(is_overflow).write().await;
        if let Some(pos) = queue.iter().position(|e| e.session_id == session_id) {
            queue.remove(pos);
        }
        Ok(())
    }
}
