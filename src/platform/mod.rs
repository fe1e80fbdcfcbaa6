//! Platform abstraction layer
//!
//! The session drives two recurring tasks: the per-frame simulation loop and
//! the one-second countdown. Hosts provide a [`Scheduler`] that starts and
//! cancels them; every callback carries the [`TaskHandle`] it was started
//! with so the session can ignore a task it has already cancelled.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Identifies one started task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Fires once per animation frame
    Frames,
    /// Fires at a fixed period
    Countdown,
}

/// Starts and cancels the session's recurring tasks
pub trait Scheduler {
    /// Begin calling back once per animation frame
    fn start_frames(&mut self) -> TaskHandle;
    /// Begin calling back every `period_ms` milliseconds
    fn start_countdown(&mut self, period_ms: u32) -> TaskHandle;
    /// Stop a task. Cancelling an unknown or finished task is a no-op.
    fn cancel(&mut self, handle: TaskHandle);
}

/// Scheduler that never fires on its own; the host pumps callbacks.
///
/// Used by the native build and by tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: Vec<(TaskHandle, TaskKind)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn start(&mut self, kind: TaskKind) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.active.push((handle, kind));
        handle
    }

    pub fn is_active(&self, handle: TaskHandle) -> bool {
        self.active.iter().any(|(h, _)| *h == handle)
    }

    /// Live tasks of the given kind
    pub fn active(&self, kind: TaskKind) -> Vec<TaskHandle> {
        self.active
            .iter()
            .filter(|(_, k)| *k == kind)
            .map(|(h, _)| *h)
            .collect()
    }
}

impl Scheduler for ManualScheduler {
    fn start_frames(&mut self) -> TaskHandle {
        self.start(TaskKind::Frames)
    }

    fn start_countdown(&mut self, _period_ms: u32) -> TaskHandle {
        self.start(TaskKind::Countdown)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.active.retain(|(h, _)| *h != handle);
    }
}
