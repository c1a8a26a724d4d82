use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use hft_model::{LabelDefinition, LabelName};

use super::{RefreshContext, TaskState};

/// Running refresh activity of one dynamic label.
pub(crate) struct RefreshTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl RefreshTask {
    /// Spawn the refresh loop for `name` on the current runtime.
    pub(crate) fn spawn(
        ctx: RefreshContext,
        name: LabelName,
        def: LabelDefinition,
        period: Duration,
    ) -> Self {
        let token = CancellationToken::new();
        let handle = tokio::spawn(refresh_loop(ctx, name, def, period, token.clone()));
        Self { token, handle }
    }

    pub(crate) fn state(&self) -> TaskState {
        if self.handle.is_finished() {
            TaskState::Stopped
        } else if self.token.is_cancelled() {
            TaskState::CancelRequested
        } else {
            TaskState::Running
        }
    }

    /// Signal cancellation without waiting.
    pub(crate) fn cancel(&self) {
        self.token.cancel();
    }

    /// Cancel and wait until the loop has returned.
    pub(crate) async fn shutdown(self, name: &str) {
        self.token.cancel();
        if let Err(e) = self.handle.await {
            if e.is_panic() {
                error!(label = name, "refresh task panicked");
            } else {
                debug!(label = name, "refresh task aborted");
            }
        }
    }
}

/// Refresh loop body.
///
/// Cancellation is checked at the top of every iteration and raced against
/// the sleep. The drawn object is never removed here: whoever cancels the
/// task hides the label after the task has been joined.
async fn refresh_loop(
    ctx: RefreshContext,
    name: LabelName,
    def: LabelDefinition,
    period: Duration,
    token: CancellationToken,
) {
    debug!(label = %name, period_ms = period.as_millis() as u64, "refresh task started");

    while !token.is_cancelled() {
        if let Err(e) = ctx.refresh_once(&name, &def).await {
            warn!(label = %name, error = %e, "cannot render dynamic label, stopping its refresh task");
            break;
        }

        tokio::select! {
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(period) => {}
        }
    }

    debug!(label = %name, "refresh task stopped");
}
