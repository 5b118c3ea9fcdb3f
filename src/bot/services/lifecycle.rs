//! In-process lifecycle signal.

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::info;

use crate::builtin::{
    domain::LifecycleAction,
    ports::{LifecycleControl, LifecycleError},
};

/// Broadcasts restart and shutdown requests to the tasks that care.
///
/// The latest request wins; subscribers see `None` until one arrives.
#[derive(Debug)]
pub struct LifecycleSignal {
    sender: watch::Sender<Option<LifecycleAction>>,
}

impl Default for LifecycleSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleSignal {
    /// Creates a signal with no pending request.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _initial) = watch::channel(None);
        Self { sender }
    }

    /// Returns a receiver observing requests.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<LifecycleAction>> {
        self.sender.subscribe()
    }

    /// Returns the pending request, if any.
    #[must_use]
    pub fn requested(&self) -> Option<LifecycleAction> {
        *self.sender.borrow()
    }

    /// Waits until a restart or shutdown is requested.
    pub async fn wait(&self) -> LifecycleAction {
        let mut receiver = self.subscribe();
        match receiver.wait_for(Option::is_some).await {
            Ok(action) => action.unwrap_or(LifecycleAction::Shutdown),
            Err(_) => LifecycleAction::Shutdown,
        }
    }

    fn request(&self, action: LifecycleAction) {
        info!(action = %action, "lifecycle request recorded");
        self.sender.send_replace(Some(action));
    }
}

#[async_trait]
impl LifecycleControl for LifecycleSignal {
    async fn request_restart(&self) -> Result<(), LifecycleError> {
        self.request(LifecycleAction::Restart);
        Ok(())
    }

    async fn request_shutdown(&self) -> Result<(), LifecycleError> {
        self.request(LifecycleAction::Shutdown);
        Ok(())
    }
}
