//! Admission: accept a new session into the main queue, spill it to the
//! overflow queue, or refuse it.
//!
//! This is a pure decision function; the engine persists the session and
//! performs the enqueue. Refused sessions are still recorded so every refusal
//! is auditable. The off-hours/no-active-team refusal happens upstream in the
//! engine, before queue lengths are even consulted.

use crate::capacity::max_queue_length;
use crate::models::SessionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionDecision {
    pub accept: bool,
    pub use_overflow: bool,
    pub status: SessionStatus,
}

impl AdmissionDecision {
    fn queued(use_overflow: bool) -> Self {
        Self {
            accept: true,
            use_overflow,
            status: SessionStatus::Queued,
        }
    }

    fn refused() -> Self {
        Self {
            accept: false,
            use_overflow: false,
            status: SessionStatus::Refused,
        }
    }
}

/// Decide where a new session goes, given the capacities of the main team and
/// (if one exists) the overflow team, and the current queue lengths.
///
/// Overflow is only eligible during office hours, and only while the overflow
/// queue itself has room.
pub fn decide(
    main_capacity: i32,
    main_queue_len: usize,
    overflow_capacity: Option<i32>,
    overflow_queue_len: usize,
    office_hours: bool,
) -> AdmissionDecision {
    if main_queue_len < max_queue_length(main_capacity) {
        return AdmissionDecision::queued(false);
    }

    // Main queue is full
    if office_hours {
        if let Some(overflow_capacity) = overflow_capacity {
            if overflow_queue_len < max_queue_length(overflow_capacity) {
                return AdmissionDecision::queued(true);
            }
        }
    }

    AdmissionDecision::refused()
}

#[cfg(test)]
mod tests {
    use super::*;

    // One MidLevel agent: capacity 6, max queue length 9.
    const MID_CAPACITY: i32 = 6;

    #[test]
    fn test_accepts_main_below_max() {
        let d = decide(MID_CAPACITY, 5, None, 0, true);
        assert!(d.accept);
        assert!(!d.use_overflow);
        assert_eq!(d.status, SessionStatus::Queued);
    }

    #[test]
    fn test_accepts_main_at_last_slot() {
        let d = decide(MID_CAPACITY, 8, None, 0, false);
        assert!(d.accept);
        assert!(!d.use_overflow);
    }

    #[test]
    fn test_spills_to_overflow_when_main_full() {
        let d = decide(MID_CAPACITY, 9, Some(24), 5, true);
        assert!(d.accept);
        assert!(d.use_overflow);
        assert_eq!(d.status, SessionStatus::Queued);
    }

    #[test]
    fn test_refuses_outside_office_hours_when_main_full() {
        // Overflow team exists with room, but it's not office hours.
        let d = decide(MID_CAPACITY, 9, Some(24), 0, false);
        assert!(!d.accept);
        assert_eq!(d.status, SessionStatus::Refused);
    }

    #[test]
    fn test_refuses_without_overflow_team() {
        let d = decide(MID_CAPACITY, 9, None, 0, true);
        assert!(!d.accept);
    }

    #[test]
    fn test_refuses_when_both_queues_full() {
        // Overflow: 6 juniors, capacity 24, max queue 36.
        let d = decide(MID_CAPACITY, 10, Some(24), 36, true);
        assert!(!d.accept);
        assert!(!d.use_overflow);
        assert_eq!(d.status, SessionStatus::Refused);
    }

    #[test]
    fn test_zero_capacity_team_refuses_immediately() {
        let d = decide(0, 0, None, 0, true);
        assert!(!d.accept);
    }
}
