use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use tracing::debug;

/// Milliseconds on the scheduler's clock. Real or simulated; the scheduler
/// only ever sees what its caller passes to [`Scheduler::advance`].
pub type Millis = u64;

pub type TaskId = u64;

/// What a task wants after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Run again this many milliseconds after the current fire time.
    After(Millis),
    /// Never run again.
    Done,
}

/// One schedulable unit of work. `C` is whatever slice of state the tasks
/// are allowed to touch.
pub trait Task<C> {
    fn name(&self) -> &str;
    fn tick(&mut self, now: Millis, ctx: &mut C) -> Tick;
}

/// Single-threaded cooperative scheduler: a min-heap of
/// `(next_fire, seq, task)` entries advanced by an external clock.
///
/// Entries with equal fire times run in the order they were queued. A task
/// that asks to run again after 0ms is pushed 1ms forward, so a single
/// [`advance`](Scheduler::advance) always terminates.
pub struct Scheduler<C> {
    queue: BinaryHeap<Reverse<(Millis, u64, TaskId)>>,
    tasks: HashMap<TaskId, Box<dyn Task<C>>>,
    next_id: TaskId,
    seq: u64,
    now: Millis,
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            tasks: HashMap::new(),
            next_id: 1,
            seq: 0,
            now: 0,
        }
    }

    /// The latest time the scheduler has been advanced to.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Queue a task to first run `delay` ms from now.
    pub fn spawn(&mut self, task: Box<dyn Task<C>>, delay: Millis) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        debug!(task = task.name(), id, delay, "spawned task");
        self.tasks.insert(id, task);
        self.push(self.now.saturating_add(delay), id);
        id
    }

    /// Stop a task from running again. Returns false if it was not live.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let removed = self.tasks.remove(&id);
        if let Some(ref task) = removed {
            debug!(task = task.name(), id, "cancelled task");
        }
        removed.is_some()
    }

    pub fn is_live(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Number of live tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Fire time of the earliest live task.
    pub fn next_fire(&mut self) -> Option<Millis> {
        self.drop_stale();
        self.queue.peek().map(|Reverse((at, _, _))| *at)
    }

    /// Run every task due at or before `now`, in fire-time order. Returns the
    /// number of ticks executed.
    pub fn advance(&mut self, now: Millis, ctx: &mut C) -> usize {
        let mut ticks = 0;
        loop {
            self.drop_stale();
            let Some(&Reverse((at, _, id))) = self.queue.peek() else {
                break;
            };
            if at > now {
                break;
            }
            self.queue.pop();

            let Some(mut task) = self.tasks.remove(&id) else {
                continue;
            };
            self.now = self.now.max(at);
            ticks += 1;

            match task.tick(at, ctx) {
                Tick::After(delay) => {
                    self.tasks.insert(id, task);
                    self.push(at.saturating_add(delay.max(1)), id);
                }
                Tick::Done => {
                    debug!(task = task.name(), id, at, "task finished");
                }
            }
        }
        self.now = self.now.max(now);
        ticks
    }

    fn push(&mut self, at: Millis, id: TaskId) {
        self.seq += 1;
        self.queue.push(Reverse((at, self.seq, id)));
    }

    /// Pop heap entries whose task was cancelled.
    fn drop_stale(&mut self) {
        while let Some(Reverse((_, _, id))) = self.queue.peek() {
            if self.tasks.contains_key(id) {
                break;
            }
            self.queue.pop();
        }
    }
}
