//! Deadline queue for deferred, cancellable work.
//!
//! Items are scheduled against an [`Instant`] and handed back by
//! [`DeferredQueue::drain_due`] once their deadline has passed. Nothing runs
//! on its own: the owner polls the queue from its event loop, so every
//! mutation still happens on the owner's thread. Disposing the queue drops
//! everything still scheduled and refuses new work.

use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Scheduled<T> {
    handle: TimerHandle,
    due: Instant,
    item: T,
}

#[derive(Debug)]
pub struct DeferredQueue<T> {
    next_id: u64,
    scheduled: Vec<Scheduled<T>>,
    disposed: bool,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            scheduled: Vec::new(),
            disposed: false,
        }
    }
}

impl<T> DeferredQueue<T> {
    /// Returns `None` once the queue has been disposed.
    pub fn schedule(&mut self, due: Instant, item: T) -> Option<TimerHandle> {
        if self.disposed {
            return None;
        }
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.scheduled.push(Scheduled { handle, due, item });
        Some(handle)
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.scheduled.len();
        self.scheduled.retain(|entry| entry.handle != handle);
        self.scheduled.len() != before
    }

    /// Removes and returns every item due at `now`, earliest deadline first
    /// (ties keep scheduling order).
    pub fn drain_due(&mut self, now: Instant) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.scheduled)
            .into_iter()
            .partition(|entry| entry.due <= now);
        self.scheduled = pending;
        due.sort_by_key(|entry| (entry.due, entry.handle.0));
        due.into_iter().map(|entry| entry.item).collect()
    }

    /// Earliest pending deadline, for sizing the event loop's poll timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduled.iter().map(|entry| entry.due).min()
    }

    pub fn len(&self) -> usize {
        self.scheduled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
        self.scheduled.clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_drain_due_returns_only_expired_items_in_order() {
        let start = Instant::now();
        let mut queue = DeferredQueue::default();
        queue.schedule(start + Duration::from_millis(30), "late");
        queue.schedule(start + Duration::from_millis(10), "first");
        queue.schedule(start + Duration::from_millis(10), "second");

        assert!(queue.drain_due(start).is_empty());
        assert_eq!(queue.drain_due(start + Duration::from_millis(10)), vec!["first", "second"]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_deadline(), Some(start + Duration::from_millis(30)));
        assert_eq!(queue.drain_due(start + Duration::from_secs(1)), vec!["late"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel_removes_single_item() {
        let start = Instant::now();
        let mut queue = DeferredQueue::default();
        let keep = queue.schedule(start, 1);
        let dropped = queue.schedule(start, 2);
        assert!(keep.is_some());

        assert!(queue.cancel(dropped.unwrap()));
        assert!(!queue.cancel(dropped.unwrap()));
        assert_eq!(queue.drain_due(start), vec![1]);
    }

    #[test]
    fn test_dispose_drops_pending_and_refuses_new_work() {
        let start = Instant::now();
        let mut queue = DeferredQueue::default();
        queue.schedule(start, "pending");
        queue.dispose();

        assert!(queue.is_disposed());
        assert!(queue.drain_due(start + Duration::from_secs(5)).is_empty());
        assert!(queue.schedule(start, "after").is_none());
        assert_eq!(queue.next_deadline(), None);
    }
}
