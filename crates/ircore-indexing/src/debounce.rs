//! Per-path debounce buffer: coalesces a burst of
//! filesystem events on the same path into at most one re-index,
//! flushing after a leading delay of quiet, or unconditionally once the
//! hard cap elapses (so a continuously-saved file still gets indexed).

use std::path::PathBuf;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::watcher::{ChangeKind, ContentChange};

struct Pending {
    first_seen: Instant,
    last_seen: Instant,
    saw_delete: bool,
    latest: ContentChange,
}

pub struct DebounceBuffer {
    pending: DashMap<PathBuf, Pending>,
    leading_delay: Duration,
    hard_cap: Duration,
}

impl DebounceBuffer {
    pub fn new(leading_delay: Duration, hard_cap: Duration) -> Self {
        Self { pending: DashMap::new(), leading_delay, hard_cap }
    }

    /// Record a raw event, coalescing it with any pending event for the
    /// same path.
    pub fn record(&self, change: ContentChange) {
        let now = Instant::now();
        let saw_delete = change.kind == ChangeKind::Deleted;
        self.pending
            .entry(change.path.clone())
            .and_modify(|p| {
                p.last_seen = now;
                p.saw_delete = p.saw_delete || saw_delete;
                p.latest = change.clone();
            })
            .or_insert(Pending { first_seen: now, last_seen: now, saw_delete, latest: change });
    }

    /// Remove and return every path whose debounce window has closed,
    /// resolving the `{delete, create}` race: a delete followed by a
    /// recreate within the window is reported as a `Modified` (the
    /// entry's content-addressed id survives the round-trip), not a
    /// fresh `Created`.
    pub fn drain_ready(&self) -> Vec<ContentChange> {
        let now = Instant::now();
        let ready: Vec<PathBuf> = self
            .pending
            .iter()
            .filter(|entry| {
                now.duration_since(entry.last_seen) >= self.leading_delay
                    || now.duration_since(entry.first_seen) >= self.hard_cap
            })
            .map(|entry| entry.key().clone())
            .collect();

        ready
            .into_iter()
            .filter_map(|path| self.pending.remove(&path))
            .map(|(_, pending)| {
                let mut change = pending.latest;
                if pending.saw_delete && change.kind == ChangeKind::Created {
                    change.kind = ChangeKind::Modified;
                }
                change
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn coalesces_repeated_events_on_same_path() {
        let buffer = DebounceBuffer::new(Duration::from_millis(0), Duration::from_secs(2));
        for _ in 0..10 {
            buffer.record(ContentChange::new(ChangeKind::Modified, Path::new("/a.md").to_path_buf()));
        }
        let drained = buffer.drain_ready();
        assert_eq!(drained.len(), 1);
    }

    #[test]
    fn delete_then_create_resolves_to_modified() {
        let buffer = DebounceBuffer::new(Duration::from_millis(0), Duration::from_secs(2));
        let path = Path::new("/a.md").to_path_buf();
        buffer.record(ContentChange::new(ChangeKind::Deleted, path.clone()));
        buffer.record(ContentChange::new(ChangeKind::Created, path));
        let drained = buffer.drain_ready();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].kind, ChangeKind::Modified);
    }

    #[test]
    fn different_paths_drain_independently() {
        let buffer = DebounceBuffer::new(Duration::from_millis(0), Duration::from_secs(2));
        buffer.record(ContentChange::new(ChangeKind::Modified, Path::new("/a.md").to_path_buf()));
        buffer.record(ContentChange::new(ChangeKind::Modified, Path::new("/b.md").to_path_buf()));
        assert_eq!(buffer.drain_ready().len(), 2);
    }
}
