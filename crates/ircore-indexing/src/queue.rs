//! Two FIFO queues — priority and standard — drained by the scheduler in
//! `engine.rs`, favoring priority batches.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use ircore_core::entry::Entry;

/// One write operation within a [`Batch`].
#[derive(Debug, Clone)]
pub enum BatchOperation {
    Insert(Entry),
    Update(Entry),
    Delete(String),
}

/// A group of same-kind-of-intent operations submitted together, e.g. one
/// `index_batch` call or one debounced file-watcher flush.
#[derive(Debug, Clone)]
pub struct Batch {
    pub id: String,
    pub source: String,
    pub operations: Vec<BatchOperation>,
    pub enqueued_at: DateTime<Utc>,
}

impl Batch {
    pub fn new(source: impl Into<String>, operations: Vec<BatchOperation>) -> Self {
        Self { id: uuid::Uuid::new_v4().to_string(), source: source.into(), operations, enqueued_at: Utc::now() }
    }

    /// A batch is priority-eligible when its source names "priority" or
    /// real-time ingestion.
    pub fn is_priority_source(&self) -> bool {
        let s = self.source.to_lowercase();
        s.contains("priority") || s.contains("real-time")
    }
}

/// Priority + standard FIFO queue pair with a configurable depth at which
/// the caller should emit a `queue_warning` event.
pub struct BatchQueue {
    priority: Mutex<VecDeque<Batch>>,
    standard: Mutex<VecDeque<Batch>>,
    pub warning_threshold: usize,
}

impl BatchQueue {
    pub fn new(warning_threshold: usize) -> Self {
        Self { priority: Mutex::new(VecDeque::new()), standard: Mutex::new(VecDeque::new()), warning_threshold }
    }

    pub fn enqueue(&self, batch: Batch) {
        if batch.is_priority_source() {
            self.priority.lock().expect("priority queue lock").push_back(batch);
        } else {
            self.standard.lock().expect("standard queue lock").push_back(batch);
        }
    }

    /// Drain up to `max` batches, taking as many priority batches as
    /// available before falling back to standard ones.
    pub fn drain_up_to(&self, max: usize) -> Vec<Batch> {
        let mut drained = Vec::with_capacity(max);
        let mut priority = self.priority.lock().expect("priority queue lock");
        while drained.len() < max {
            match priority.pop_front() {
                Some(b) => drained.push(b),
                None => break,
            }
        }
        drop(priority);
        if drained.len() < max {
            let mut standard = self.standard.lock().expect("standard queue lock");
            while drained.len() < max {
                match standard.pop_front() {
                    Some(b) => drained.push(b),
                    None => break,
                }
            }
        }
        drained
    }

    pub fn len(&self) -> usize {
        self.priority.lock().expect("priority queue lock").len()
            + self.standard.lock().expect("standard queue lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_over_threshold(&self) -> bool {
        self.len() > self.warning_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_batches_drain_before_standard() {
        let queue = BatchQueue::new(1000);
        queue.enqueue(Batch::new("standard-source", vec![]));
        queue.enqueue(Batch::new("real-time-file-watcher", vec![]));
        let drained = queue.drain_up_to(1);
        assert_eq!(drained[0].source, "real-time-file-watcher");
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn warns_past_threshold() {
        let queue = BatchQueue::new(2);
        for _ in 0..3 {
            queue.enqueue(Batch::new("standard", vec![]));
        }
        assert!(queue.is_over_threshold());
    }
}
