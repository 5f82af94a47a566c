//! Response Scheduler - cancellable delayed messages.
//!
//! Each scheduled task sleeps on the tokio clock and then posts a message back
//! to its owning actor. Tasks live in an id-keyed arena so they can be
//! cancelled one by one, by kind, or all at once. Dropping the scheduler
//! aborts everything that is still pending.
//!
//! A task that fires after being cancelled may already have queued its
//! message; the owner calls [`Scheduler::complete`] and ignores the message
//! when it returns `false`.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Thinking delay of a pending reply.
    Reply,
    /// Route change requested by a reply.
    Navigation,
}

struct ScheduledTask {
    kind: TaskKind,
    handle: JoinHandle<()>,
}

pub struct Scheduler<M: Send + 'static> {
    outbox: mpsc::WeakSender<M>,
    tasks: HashMap<TaskId, ScheduledTask>,
    next_id: u64,
}

impl<M: Send + 'static> Scheduler<M> {
    /// The scheduler holds a weak sender so pending timers never keep the
    /// owning actor alive.
    pub fn new(outbox: mpsc::WeakSender<M>) -> Self {
        Self {
            outbox,
            tasks: HashMap::new(),
            next_id: 0,
        }
    }

    /// Posts `build(id)` to the actor after `delay`.
    pub fn schedule(&mut self, kind: TaskKind, delay: Duration, build: impl FnOnce(TaskId) -> M) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let message = build(id);
        let outbox = self.outbox.clone();
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            if let Some(sender) = outbox.upgrade() {
                let _ = sender.send(message).await;
            }
        });

        debug!(task = %id, ?kind, delay_ms = delay.as_millis() as u64, "Task scheduled");
        self.tasks.insert(id, ScheduledTask { kind, handle });
        id
    }

    /// Marks a fired task as done. Returns `false` if it was cancelled.
    pub fn complete(&mut self, id: TaskId) -> bool {
        self.tasks.remove(&id).is_some()
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.tasks.remove(&id) {
            Some(task) => {
                task.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Cancels every pending task of `kind` and returns how many there were.
    pub fn cancel_kind(&mut self, kind: TaskKind) -> usize {
        let ids: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.kind == kind)
            .map(|(id, _)| *id)
            .collect();
        for id in &ids {
            self.cancel(*id);
        }
        ids.len()
    }

    pub fn cancel_all(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    pub fn pending(&self, kind: TaskKind) -> usize {
        self.tasks.values().filter(|task| task.kind == kind).count()
    }
}

impl<M: Send + 'static> Drop for Scheduler<M> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
