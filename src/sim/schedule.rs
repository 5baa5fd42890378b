//! Virtual-clock task scheduler
//!
//! Drives the repeating tick loop and one-shot timers (fire cooldown)
//! without touching wall-clock time. The platform layer feeds elapsed
//! milliseconds in; tests feed synthetic ones.

use std::collections::BTreeMap;

/// Milliseconds on the scheduler's clock
pub type Millis = u64;

/// Cancel handle for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    handle: TaskHandle,
    task: T,
    /// Re-arm interval for repeating tasks
    period: Option<Millis>,
}

/// Ordered queue of pending tasks keyed by (due time, arm order)
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Millis,
    next_seq: u64,
    queue: BTreeMap<(Millis, u64), Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
        }
    }

    /// Current clock reading
    pub fn now(&self) -> Millis {
        self.now
    }

    fn seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn arm(&mut self, due: Millis, entry: Entry<T>) {
        let seq = self.seq();
        self.queue.insert((due, seq), entry);
    }

    /// Schedule `task` to run every `period` ms, first at `now + period`
    pub fn every(&mut self, period: Millis, task: T) -> TaskHandle {
        let period = period.max(1);
        let handle = TaskHandle(self.seq());
        let due = self.now + period;
        self.arm(
            due,
            Entry {
                handle,
                task,
                period: Some(period),
            },
        );
        handle
    }

    /// Schedule `task` to run once at `now + delay`
    pub fn after(&mut self, delay: Millis, task: T) -> TaskHandle {
        let handle = TaskHandle(self.seq());
        let due = self.now + delay;
        self.arm(
            due,
            Entry {
                handle,
                task,
                period: None,
            },
        );
        handle
    }

    /// Remove a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let key = self
            .queue
            .iter()
            .find(|(_, entry)| entry.handle == handle)
            .map(|(key, _)| *key);
        match key {
            Some(key) => self.queue.remove(&key).is_some(),
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        self.queue.clear();
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.queue.values().any(|entry| entry.handle == handle)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Due time of the earliest pending task
    pub fn next_due(&self) -> Option<Millis> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Move the clock forward to `until` without running anything.
    /// The clock never goes backwards.
    pub fn settle(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }
}

impl<T: Clone> Scheduler<T> {
    /// Take the earliest task due at or before `until`, advancing the clock
    /// to its due time. Repeating tasks are re-armed under the same handle.
    pub fn pop_due(&mut self, until: Millis) -> Option<(TaskHandle, T)> {
        let (&(due, _), _) = self.queue.first_key_value()?;
        if due > until {
            return None;
        }
        let (_, entry) = self.queue.pop_first()?;
        self.now = self.now.max(due);

        let fired = (entry.handle, entry.task.clone());
        if let Some(period) = entry.period {
            self.arm(due + period, entry);
        }
        Some(fired)
    }
}
