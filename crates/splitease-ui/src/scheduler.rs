//! Virtual-clock task scheduler
//!
//! Delayed work (toast fades, loader hiding, animation frames) is queued here
//! and runs when the host advances time. Tasks run in due-time order, ties in
//! scheduling order. Nothing is ever cancelled; a task whose element has gone
//! away simply does nothing when it runs.

use std::collections::BTreeMap;

use crate::dom::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    FadeToast(NodeId),
    RemoveToast(NodeId),
    FadeAlert(NodeId),
    RemoveAlert(NodeId),
    HidePageLoader(NodeId),
    HideProgressLoader(NodeId),
    CounterFrame(NodeId),
    FlushRecalculation,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: u64,
    seq: u64,
    queue: BTreeMap<(u64, u64), Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Queue `task` to run `delay_ms` from now; returns the due time
    pub fn schedule(&mut self, delay_ms: u64, task: Task) -> u64 {
        let due = self.now.saturating_add(delay_ms);
        self.queue.insert((due, self.seq), task);
        self.seq += 1;
        due
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pop the earliest task due at or before `until`, moving the clock to it
    pub fn pop_due(&mut self, until: u64) -> Option<Task> {
        let (&(due, seq), _) = self.queue.iter().next()?;
        if due > until {
            return None;
        }
        let task = self.queue.remove(&(due, seq))?;
        self.now = self.now.max(due);
        Some(task)
    }

    /// Move the clock forward without running anything
    pub fn advance_to(&mut self, time: u64) {
        self.now = self.now.max(time);
    }
}
