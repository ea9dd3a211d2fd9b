//! Virtual-clock scheduler for deferred game continuations
//!
//! Every pause in the game (reveal, result, hand-off, opponent thinking, level
//! advance) is a task scheduled here instead of a wall-clock timer. Time only
//! moves when the owner advances it, so tests can step through a whole game
//! instantly and production simply feeds elapsed wall-clock time.
//!
//! Tasks fire in `(due time, schedule order)` order, and the clock reads the
//! task's own due time while it runs: a chain of continuations scheduled
//! from inside each other keeps its exact spacing however coarse the steps are.

#[derive(Debug, Clone)]
struct Scheduled<T> {
    /// Schedule order, breaks ties between equal due times.
    seq: u64,
    due_ms: u64,
    task: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `task` to run `delay_ms` after the current virtual time.
    pub fn schedule(&mut self, delay_ms: u32, task: T) {
        self.pending.push(Scheduled {
            seq: self.next_seq,
            due_ms: self.now_ms + delay_ms as u64,
            task,
        });
        self.next_seq += 1;
    }

    /// Drop every pending task. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Virtual time of the earliest pending task.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.iter().map(|s| s.due_ms).min()
    }

    /// Remove and return the earliest task due at or before `until_ms`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<T> {
        let (index, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms <= until_ms)
            .min_by_key(|(_, s)| (s.due_ms, s.seq))?;

        let scheduled = self.pending.remove(index);
        self.now_ms = self.now_ms.max(scheduled.due_ms);
        Some(scheduled.task)
    }

    /// Move the clock forward to `until_ms` (never backwards).
    pub fn settle_at(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
