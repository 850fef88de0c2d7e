//! Liveness sweep — the short-period pass that demotes stalled sessions.
//!
//! Only marks: a session whose polls stopped goes Active/Assigned → Inactive
//! here, and the next assignment tick's reap step releases the agent. Keeping
//! the two steps apart means inactivity detection and capacity reclamation
//! stay independently testable.

use anyhow::Result;
use tokio::sync::broadcast;

use shiftdesk_core::liveness;
use shiftdesk_core::models::SessionStatus;

use crate::engine::Engine;

/// Report from one liveness sweep.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    pub scanned: usize,
    pub marked_inactive: usize,
    pub elapsed_ms: u64,
}

/// Run one sweep under the scheduler lock.
pub async fn run_liveness_sweep(engine: &Engine) -> Result<SweepReport> {
    let start = std::time::Instant::now();
    let _state = engine.scheduler().await;
    let mut report = SweepReport::default();

    let now = engine.clock.now();
    let threshold =
        chrono::Duration::seconds(engine.scheduling.inactivity_threshold_seconds as i64);

    let mut sessions = engine
        .stores
        .sessions
        .list_by_status(SessionStatus::Active)
        .await?;
    sessions.extend(
        engine
            .stores
            .sessions
            .list_by_status(SessionStatus::Assigned)
            .await?,
    );

    for mut session in sessions {
        report.scanned += 1;
        if liveness::is_inactive(&session, now, threshold) && liveness::mark_inactive(&mut session)
        {
            engine.stores.sessions.update(&session).await?;
            report.marked_inactive += 1;
            tracing::debug!(session_id = %session.id, "session marked inactive");
        }
    }

    report.elapsed_ms = start.elapsed().as_millis() as u64;
    Ok(report)
}

/// Background loop: sweep every `sweep_interval_seconds` until shutdown.
pub async fn run_sweep_loop(
    engine: std::sync::Arc<Engine>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let interval = tokio::time::Duration::from_secs(engine.scheduling.sweep_interval_seconds);
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!(
        "Liveness sweep started (interval: {}s, threshold: {}s)",
        engine.scheduling.sweep_interval_seconds,
        engine.scheduling.inactivity_threshold_seconds
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match run_liveness_sweep(&engine).await {
                    Ok(report) if report.marked_inactive > 0 => {
                        tracing::info!(
                            "Liveness sweep: {} scanned, {} marked inactive in {}ms",
                            report.scanned,
                            report.marked_inactive,
                            report.elapsed_ms
                        );
                    }
                    Ok(_) => tracing::debug!("Liveness sweep: nothing to mark"),
                    Err(e) => tracing::error!("Liveness sweep error: {}", e),
                }
            }
            _ = shutdown.recv() => {
                tracing::info!("Liveness sweep shutting down");
                break;
            }
        }
    }
}
