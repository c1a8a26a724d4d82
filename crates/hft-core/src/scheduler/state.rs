use std::fmt;

/// Lifecycle state of one refresh task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Looping: refreshing, or sleeping until the next refresh.
    Running,
    /// Cancellation signalled; the task exits at its next check.
    CancelRequested,
    /// The task body has returned (cancelled, or gave up on a render error).
    Stopped,
}

impl TaskState {
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, TaskState::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Running => "running",
            TaskState::CancelRequested => "cancel-requested",
            TaskState::Stopped => "stopped",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
