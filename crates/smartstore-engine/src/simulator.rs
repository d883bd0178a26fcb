//! Auto-simulate loop.
//!
//! While the switch in [`AutoSimulateControl`] is on, the loop calls
//! `simulate_empty` once per interval through the same [`AppState`] path
//! the HTTP handlers use, so timer-driven empties are logged and
//! broadcast exactly like manual ones.
//!
//! [`AutoSimulateControl`]: smartstore_core::AutoSimulateControl

use std::sync::Arc;

use smartstore_observer::AppState;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Run the loop forever. Abort the task to stop it.
///
/// The next empty is pinned to a deadline. A wakeup that leaves the
/// interval unchanged resumes the same deadline; switching off, or a new
/// interval, starts a fresh one.
pub async fn run_auto_simulate(state: Arc<AppState>) {
    let control = Arc::clone(&state.auto_simulate);
    let mut pending: Option<(Instant, u64)> = None;

    loop {
        if !control.is_enabled() {
            pending = None;
            control.wait_until_enabled().await;
        }

        let seconds = control.interval_seconds();
        let deadline = match pending {
            Some((deadline, armed_for)) if armed_for == seconds => deadline,
            _ => {
                debug!(seconds, "auto-simulate armed");
                next_deadline(control.interval())
            }
        };
        pending = Some((deadline, seconds));

        tokio::select! {
            () = tokio::time::sleep_until(deadline) => {
                pending = None;
                // The switch may have flipped during the sleep without a
                // wakeup reaching us yet.
                if !control.is_enabled() {
                    continue;
                }
                match state.simulate_empty().await {
                    Ok(emptied) => info!(
                        shelf = %emptied.shelf,
                        minutes = emptied.minutes,
                        "auto-simulate emptied shelf"
                    ),
                    Err(e) => warn!(error = %e, "auto-simulate failed"),
                }
            }
            () = control.changed() => {}
        }
    }
}

fn next_deadline(interval: std::time::Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(interval).unwrap_or(now)
}
