//! Store seams the scheduling engine depends on.
//!
//! The engine only ever sees these CRUD contracts; the in-memory
//! implementations in [`memory`] back the single-process deployment, and a
//! remote implementation would surface transient failures through the same
//! `Result`s.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{Agent, QueueEntry, Session, SessionStatus, Shift, Team};

pub type StoreResult<T> = Result<T, CoreError>;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, id: Uuid) -> StoreResult<Option<Session>>;
    async fn add(&self, session: Session) -> StoreResult<Session>;
    async fn update(&self, session: &Session) -> StoreResult<()>;
    async fn list_by_status(&self, status: SessionStatus) -> StoreResult<Vec<Session>>;
}

#[async_trait]
pub trait AgentStore: Send + Sync {
    async fn get(&self, id: Uuid) -> StoreResult<Option<Agent>>;
    async fn add(&self, agent: Agent) -> StoreResult<Agent>;
    async fn update(&self, agent: &Agent) -> StoreResult<()>;
    async fn list_by_team(&self, team_id: Uuid) -> StoreResult<Vec<Agent>>;
    async fn list_all(&self) -> StoreResult<Vec<Agent>>;
}

#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn add(&self, team: Team) -> StoreResult<Team>;
    async fn list_all(&self) -> StoreResult<Vec<Team>>;
    async fn get_overflow_team(&self) -> StoreResult<Option<Team>>;
}

#[async_trait]
pub trait ShiftStore: Send + Sync {
    async fn add(&self, shift: Shift) -> StoreResult<Shift>;
    async fn list_all(&self) -> StoreResult<Vec<Shift>>;
}

#[async_trait]
pub trait QueueStore: Send + Sync {
    async fn enqueue(&self, session_id: Uuid, is_overflow: bool) -> StoreResult<QueueEntry>;
    async fn dequeue(&self, is_overflow: bool) -> StoreResult<Option<QueueEntry>>;
    async fn length(&self, is_overflow: bool) -> StoreResult<usize>;
    /// All entries of one queue, ordered by enqueue time.
    async fn list_all(&self, is_overflow: bool) -> StoreResult<Vec<QueueEntry>>;
    async fn remove(&self, session_id: Uuid, is_overflow: bool) -> StoreResult<()>;
}
