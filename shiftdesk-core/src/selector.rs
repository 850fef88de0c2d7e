//! Agent selection: seniority-tier preference with per-tier round-robin.
//!
//! Simple load is spread to the cheapest agents first: the lowest seniority
//! tier with spare capacity always wins, and within that tier a persistent
//! cursor rotates through the members so repeated picks don't pile onto one
//! agent. Cursors live for the life of the process (reset only on restart)
//! and are owned by the scheduler, passed in explicitly.

use std::collections::HashMap;

use uuid::Uuid;

use crate::capacity::has_spare_capacity;
use crate::models::{Agent, Seniority};

/// Per-tier round-robin positions. The cursor stores the index of the last
/// agent picked within that tier's capacity-filtered candidate list.
#[derive(Debug, Clone, Default)]
pub struct RoundRobinCursors {
    last_index: HashMap<Seniority, usize>,
}

impl RoundRobinCursors {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Pick the next agent to receive a queued session.
///
/// Filters to candidates with spare capacity, takes the lowest tier that has
/// any, and advances that tier's cursor (wrapping modulo the tier's candidate
/// count). Returns `None` when no candidate has capacity — including the
/// defensive case of a tier emptying mid-cycle.
pub fn select_agent(candidates: &[Agent], cursors: &mut RoundRobinCursors) -> Option<Uuid> {
    let tier = Seniority::ALL
        .iter()
        .copied()
        .find(|&s| {
            candidates
                .iter()
                .any(|a| a.seniority == s && has_spare_capacity(a))
        })?;

    let tier_members: Vec<&Agent> = candidates
        .iter()
        .filter(|a| a.seniority == tier && has_spare_capacity(a))
        .collect();

    let cursor = cursors.last_index.entry(tier).or_insert(usize::MAX);
    *cursor = cursor.wrapping_add(1) % tier_members.len();
    Some(tier_members[*cursor].id)
}
