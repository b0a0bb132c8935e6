//! Cooperative virtual-time scheduler.
//!
//! The single source of time in the engine. Tasks are ordered by
//! (due instant, scheduling sequence), so firings are totally ordered and
//! two tasks due at the same millisecond run in the order they were
//! scheduled. Nothing fires on its own: the owner drains due tasks up to a
//! deadline with [`Scheduler::pop_due`], which makes tests deterministic
//! (drive with a virtual deadline) and production trivial (drive from a real
//! clock loop).

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

pub type TaskId = u64;

/// A task popped off the queue, stamped with its due instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub id: TaskId,
    pub due_ms: u64,
    pub task: T,
}

#[derive(Debug)]
struct Entry<T> {
    due_ms: u64,
    seq: u64,
    id: TaskId,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_seq: u64,
    next_id: TaskId,
    queue: BinaryHeap<Reverse<Entry<T>>>,
    // Ids still waiting in the queue; cancellation removes the id here and
    // the heap entry is skipped lazily when it surfaces.
    pending_ids: HashSet<TaskId>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Scheduler {
            now_ms: 0,
            next_seq: 0,
            next_id: 1,
            queue: BinaryHeap::new(),
            pending_ids: HashSet::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Pending (not-yet-fired, not-cancelled) task count.
    pub fn pending(&self) -> usize {
        self.pending_ids.len()
    }

    pub fn schedule_at(&mut self, due_ms: u64, task: T) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry {
            due_ms: due_ms.max(self.now_ms),
            seq,
            id,
            task,
        }));
        self.pending_ids.insert(id);
        id
    }

    pub fn schedule_after(&mut self, delay_ms: u64, task: T) -> TaskId {
        self.schedule_at(self.now_ms + delay_ms, task)
    }

    /// Cancel a pending task. Returns false if it already fired or was
    /// already cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.pending_ids.remove(&id)
    }

    /// Drop every pending task. Used on engine teardown.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.pending_ids.clear();
    }

    /// Pop the next task due at or before `deadline_ms`, advancing the clock
    /// to its due instant. When nothing more is due the clock lands on the
    /// deadline and `None` is returned.
    pub fn pop_due(&mut self, deadline_ms: u64) -> Option<Fired<T>> {
        while let Some(Reverse(entry)) = self.queue.peek() {
            if entry.due_ms > deadline_ms {
                break;
            }
            let Reverse(entry) = self.queue.pop().expect("peeked entry");
            if !self.pending_ids.remove(&entry.id) {
                // Cancelled while queued.
                continue;
            }
            self.now_ms = self.now_ms.max(entry.due_ms);
            return Some(Fired {
                id: entry.id,
                due_ms: entry.due_ms,
                task: entry.task,
            });
        }
        self.now_ms = self.now_ms.max(deadline_ms);
        None
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
