//! The session controller: one task that owns the session state, consumes
//! input events and drives the debounced recalculation.
//!
//! Every relevant edit re-arms a single deadline instead of spawning a task
//! per keystroke, so a burst of typing produces exactly one calculation
//! once the burst pauses. An explicit calculate request bypasses the
//! deadline and leaves any armed one untouched.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::events::InputEvent;
use crate::session::Session;
use crate::sink::{EngineUpdate, UpdateSink};

/// Pause after the last relevant input before recalculating.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Runs the session until the event channel closes.
///
/// Publishes the initial form state first, then applies events as they
/// arrive. An armed deadline that has not fired when the channel closes is
/// abandoned with the task.
#[tracing::instrument(skip(session, events, sink), fields(debounce_ms = debounce.as_millis() as u64))]
pub async fn run_session<S: UpdateSink>(
    mut session: Session,
    mut events: mpsc::Receiver<InputEvent>,
    sink: S,
    debounce: Duration,
) {
    for update in session.initial_updates() {
        sink.publish(update).await;
    }

    let deadline = sleep(debounce);
    tokio::pin!(deadline);
    let mut armed = false;

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    debug!("event channel closed, stopping session");
                    break;
                };
                debug!(?event, "applying input event");
                let applied = session.apply(event);
                for update in applied.updates {
                    sink.publish(update).await;
                }
                if applied.calculate_now {
                    let result = session.calculate();
                    debug!(success = result.is_success(), "explicit calculation");
                    sink.publish(EngineUpdate::Result(result)).await;
                }
                if applied.schedule_recalc {
                    deadline.as_mut().reset(Instant::now() + debounce);
                    armed = true;
                }
            }
            () = &mut deadline, if armed => {
                armed = false;
                if session.can_auto_calculate() {
                    let result = session.calculate();
                    debug!(success = result.is_success(), "debounced calculation");
                    sink.publish(EngineUpdate::Result(result)).await;
                } else {
                    debug!("debounce elapsed without final weight and target, skipping");
                }
            }
        }
    }
}
