//! Poll tracking and inactivity detection.
//!
//! Detection and capacity reclamation are deliberately split: this module
//! only flips session status, and the scheduling tick's reap step releases
//! the agent, so the two stay independently testable.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Session, SessionStatus};

/// Record a poll: stamp `last_poll_at` and promote Queued/Assigned sessions
/// to Active (the first poll after assignment confirms the customer is live).
pub fn record_poll(session: &mut Session, now: DateTime<Utc>) {
    session.last_poll_at = Some(now);
    if matches!(
        session.status,
        SessionStatus::Queued | SessionStatus::Assigned
    ) {
        session.status = SessionStatus::Active;
    }
}

/// True iff the session has polled before and the gap since then exceeds the
/// threshold. Sessions that never polled are never flagged here.
pub fn is_inactive(session: &Session, now: DateTime<Utc>, threshold: Duration) -> bool {
    match session.last_poll_at {
        Some(last) => now - last > threshold,
        None => false,
    }
}

/// Demote an Active or Assigned session to Inactive; no-op for any other
/// status. Returns whether a transition happened. The assigned agent keeps
/// its slot until the next assignment tick reaps it.
pub fn mark_inactive(session: &mut Session) -> bool {
    if matches!(
        session.status,
        SessionStatus::Active | SessionStatus::Assigned
    ) {
        session.status = SessionStatus::Inactive;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(status: SessionStatus) -> Session {
        let mut s = Session::new(None, Utc::now());
        s.status = status;
        s
    }

    #[test]
    fn test_record_poll_promotes_queued_to_active() {
        let now = Utc::now();
        let mut s = session(SessionStatus::Queued);
        record_poll(&mut s, now);
        assert_eq!(s.status, SessionStatus::Active);
        assert_eq!(s.last_poll_at, Some(now));
    }

    #[test]
    fn test_record_poll_promotes_assigned_to_active() {
        let mut s = session(SessionStatus::Assigned);
        record_poll(&mut s, Utc::now());
        assert_eq!(s.status, SessionStatus::Active);
    }

    #[test]
    fn test_record_poll_leaves_other_statuses() {
        for status in [SessionStatus::Refused, SessionStatus::Inactive] {
            let mut s = session(status);
            record_poll(&mut s, Utc::now());
            assert_eq!(s.status, status);
            assert!(s.last_poll_at.is_some());
        }
    }

    #[test]
    fn test_poll_then_check_is_never_inactive() {
        let now = Utc::now();
        let mut s = session(SessionStatus::Active);
        record_poll(&mut s, now);
        assert!(!is_inactive(&s, now, Duration::seconds(1)));
    }

    #[test]
    fn test_inactive_after_threshold() {
        let now = Utc::now();
        let mut s = session(SessionStatus::Active);
        s.last_poll_at = Some(now - Duration::seconds(5));
        assert!(is_inactive(&s, now, Duration::seconds(3)));
        assert!(!is_inactive(&s, now, Duration::seconds(10)));
    }

    #[test]
    fn test_never_polled_is_never_inactive() {
        let s = session(SessionStatus::Active);
        assert!(!is_inactive(&s, Utc::now(), Duration::seconds(0)));
    }

    #[test]
    fn test_mark_inactive_only_touches_live_sessions() {
        let mut active = session(SessionStatus::Active);
        assert!(mark_inactive(&mut active));
        assert_eq!(active.status, SessionStatus::Inactive);

        let mut assigned = session(SessionStatus::Assigned);
        assert!(mark_inactive(&mut assigned));

        for status in [
            SessionStatus::Requested,
            SessionStatus::Queued,
            SessionStatus::Refused,
            SessionStatus::Completed,
            SessionStatus::Inactive,
        ] {
            let mut s = session(status);
            assert!(!mark_inactive(&mut s));
            assert_eq!(s.status, status);
        }
    }
}
