//! Virtual-time queue for deferred page work.
//!
//! DESIGN
//! ======
//! Every delayed action (staggered bar fills, the simulated submission, toast
//! lifecycle) is queued here as a plain task value instead of a closure on a
//! browser timer. Two drivers consume the queue:
//!
//! - the browser binding takes newly scheduled entries with
//!   [`TimerQueue::take_unarmed`], arms one real timeout per entry and calls
//!   [`TimerQueue::fire`] when it elapses;
//! - tests call [`TimerQueue::pop_due`] through the controller's `advance` to
//!   fast-forward deterministically.
//!
//! Ordering is by due time, then by scheduling order. Nothing is cancellable.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

/// Identifier of a scheduled entry, unique per queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    id: TimerId,
    due_ms: u64,
    delay_ms: u32,
    armed: bool,
    task: T,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    now_ms: u64,
    next_id: u64,
    pending: Vec<Entry<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { now_ms: 0, next_id: 0, pending: Vec::new() }
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Queue `task` to run `delay_ms` after the current virtual time.
    pub fn schedule(&mut self, delay_ms: u32, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Entry {
            id,
            due_ms: self.now_ms + u64::from(delay_ms),
            delay_ms,
            armed: false,
            task,
        });
        id
    }

    /// Entries not yet handed to a host timer, as `(id, delay_ms)` pairs.
    pub fn take_unarmed(&mut self) -> Vec<(TimerId, u32)> {
        self.pending
            .iter_mut()
            .filter(|entry| !entry.armed)
            .map(|entry| {
                entry.armed = true;
                (entry.id, entry.delay_ms)
            })
            .collect()
    }

    /// Remove entry `id` because its host timer elapsed.
    ///
    /// Virtual time moves forward to the entry's due time so follow-up
    /// scheduling stays relative to it.
    pub fn fire(&mut self, id: TimerId) -> Option<T> {
        let index = self.pending.iter().position(|entry| entry.id == id)?;
        let entry = self.pending.remove(index);
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(entry.task)
    }

    /// Pop the earliest entry due at or before `until_ms`, moving virtual time
    /// to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<T> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due_ms <= until_ms)
            .min_by_key(|(_, entry)| (entry.due_ms, entry.id))
            .map(|(index, _)| index)?;
        let entry = self.pending.remove(index);
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(entry.task)
    }

    /// Move virtual time forward to `to_ms`; never moves it backwards.
    pub fn advance_to(&mut self, to_ms: u64) {
        self.now_ms = self.now_ms.max(to_ms);
    }
}
