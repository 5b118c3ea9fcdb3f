//! Presence rotation task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::bot::domain::StatusRotation;
use crate::builtin::domain::LifecycleAction;
use crate::gateway::ports::ChatTransport;

/// Time between presence changes.
pub const DEFAULT_STATUS_INTERVAL: Duration = Duration::from_secs(60);

/// Sets a random presence line every `interval` until a lifecycle request
/// arrives.
///
/// The first line is set immediately. Presence failures are logged and the
/// rotation carries on.
pub async fn run_status_rotation(
    transport: Arc<dyn ChatTransport>,
    mut rotation: StatusRotation,
    interval: Duration,
    mut lifecycle: watch::Receiver<Option<LifecycleAction>>,
) {
    if rotation.is_empty() {
        debug!("no status messages configured; rotation not started");
        return;
    }
    let mut tick = tokio::time::interval(interval);
    loop {
        tokio::select! {
            changed = lifecycle.changed() => {
                if changed.is_err() || lifecycle.borrow().is_some() {
                    debug!("status rotation stopping");
                    break;
                }
            }
            _ = tick.tick() => {
                let Some(status) = rotation.next_status() else {
                    break;
                };
                if let Err(err) = transport.set_presence(status).await {
                    warn!(status, error = %err, "presence could not be updated");
                }
            }
        }
    }
}
